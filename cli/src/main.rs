//! undup CLI - remove duplicate lines from documents

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use undup::render::to_text;
use undup::{
    deduplicate, default_output_path, execute, extract, sniff_container, DedupReport,
    DedupRequest, Error, ExtractOptions, LineKind, Preview, PreviewOptions, Stage,
};

#[derive(Parser)]
#[command(name = "undup")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Remove duplicate lines from text, Word, and Excel documents", long_about = None)]
struct Cli {
    /// Input file (txt, doc, docx, xls, xlsx)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Word document parts to read
    #[arg(long, value_enum, env = "UNDUP_SCOPE", default_value = "all")]
    scope: ScopeArg,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Deduplicate a file and write the result
    Run {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to <name>_dedup.<ext> beside the input)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Word document parts to read
        #[arg(long, value_enum, env = "UNDUP_SCOPE", default_value = "all")]
        scope: ScopeArg,

        /// Write over the input file
        #[arg(long)]
        overwrite: bool,

        /// Answer yes to every confirmation
        #[arg(short, long)]
        yes: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the deduplicated result without writing it
    Preview {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Word document parts to read
        #[arg(long, value_enum, env = "UNDUP_SCOPE", default_value = "all")]
        scope: ScopeArg,

        /// Number of lines to show
        #[arg(short = 'n', long, default_value = "15")]
        lines: usize,

        /// Print every unique line verbatim instead of the preview
        #[arg(long, conflicts_with = "json")]
        raw: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show format and line statistics for a file
    Info {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ScopeArg {
    /// Paragraphs, then table rows
    All,
    /// Paragraphs only
    Paragraphs,
    /// Table rows only
    Tables,
}

impl From<ScopeArg> for undup::Scope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::All => undup::Scope::All,
            ScopeArg::Paragraphs => undup::Scope::Paragraphs,
            ScopeArg::Tables => undup::Scope::Tables,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run {
            input,
            output,
            scope,
            overwrite,
            yes,
            json,
        }) => cmd_run(&input, output, scope, overwrite, yes, json),
        Some(Commands::Preview {
            input,
            scope,
            lines,
            raw,
            json,
        }) => cmd_preview(&input, scope, lines, raw, json),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: run if input is provided
            if let Some(input) = cli.input {
                cmd_run(&input, cli.output, cli.scope, false, false, false)
            } else {
                println!("{}", "Usage: undup <FILE> [OUTPUT]".yellow());
                println!("       undup --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_run(
    input: &Path,
    output: Option<PathBuf>,
    scope: ScopeArg,
    overwrite: bool,
    yes: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut request = DedupRequest::new(input)
        .with_scope(scope.into())
        .with_overwrite(overwrite)
        .allow_format_change(yes);

    request.output = match output {
        Some(path) => Some(path),
        None if overwrite => None,
        None => Some(default_output_path(input, request.validate_input()?)),
    };
    if yes {
        request.overwrite = true;
    }

    let plan = loop {
        match request.validate() {
            Ok(plan) => break plan,
            Err(Error::FormatMismatch { input, output }) => {
                let question = format!(
                    "Output format ({}) differs from input format ({}); formatting may be lost. Continue?",
                    output, input
                );
                if !confirm(&question)? {
                    return Err("cancelled".into());
                }
                request.allow_format_change = true;
            }
            Err(Error::OverwriteNotConfirmed(path)) => {
                let question = format!("{} will be overwritten. Continue?", path.display());
                if !confirm(&question)? {
                    return Err("cancelled".into());
                }
                request.overwrite = true;
            }
            Err(e) => return Err(e.into()),
        }
    };
    log::debug!(
        "{} ({}) -> {} ({}), scope {}",
        plan.input.display(),
        plan.source,
        plan.output.display(),
        plan.target,
        plan.scope
    );

    let pb = ProgressBar::new(Stage::COUNT);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    if json {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let report = execute(&plan, |stage| {
        pb.set_position(stage.index());
        pb.set_message(match stage {
            Stage::Extract => format!("Reading {}...", plan.source),
            Stage::Deduplicate => "Removing duplicates...".to_string(),
            Stage::Serialize => format!("Writing {}...", plan.target),
        });
    });
    let report = match report {
        Ok(report) => report,
        Err(e) => {
            pb.abandon();
            return Err(e.into());
        }
    };
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_warnings(&report.warnings);
    println!("{}", "✓ Deduplication complete".green().bold());
    print_stats(&report);
    println!();
    println!("{}: {}", "Input".bold(), plan.input.display());
    println!("{}: {}", "Output".bold(), plan.output.display());

    Ok(())
}

fn cmd_preview(
    input: &Path,
    scope: ScopeArg,
    lines: usize,
    raw: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = DedupRequest::new(input).with_scope(scope.into());
    let result = undup::preview(&request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.report)?);
        return Ok(());
    }
    if raw {
        print!("{}", to_text(&result.lines));
        return Ok(());
    }

    let preview = Preview::new(&result.lines, &PreviewOptions::new().with_max_lines(lines));

    print_warnings(&result.report.warnings);
    println!(
        "{}",
        format!(
            "Preview ({}, up to {} lines)",
            result.report.source,
            lines
        )
        .cyan()
        .bold()
    );
    println!("{}", "═".repeat(60).dimmed());
    for line in &preview.lines {
        let number = format!("{:>2}.", line.number).dimmed();
        let text = match line.kind {
            LineKind::Row => line.text.magenta(),
            LineKind::SheetMarker => line.text.blue().bold(),
            LineKind::Text => line.text.normal(),
        };
        println!("{} {}", number, text);
    }
    if preview.remaining > 0 {
        println!(
            "\n{}",
            format!("... and {} more lines", preview.remaining).dimmed()
        );
    }

    println!();
    print_stats(&result.report);

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let format = DedupRequest::new(input).validate_input()?;
    let container = sniff_container(input)?;
    let doc = extract(input, format, &ExtractOptions::default())?;
    let unique = deduplicate(&doc.lines);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {:?}", "Container".bold(), container);
    if container != format.expected_container() {
        println!(
            "  {} content does not match the .{} extension",
            "!".yellow().bold(),
            format.extension()
        );
    }

    println!();
    println!("{}", "Line Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Lines".bold(), doc.len());
    println!("{}: {}", "Text lines".bold(), doc.count(LineKind::Text));
    println!("{}: {}", "Table rows".bold(), doc.count(LineKind::Row));
    println!("{}: {}", "Sheets".bold(), doc.count(LineKind::SheetMarker));
    println!("{}: {}", "Unique".bold(), unique.len());
    println!("{}: {}", "Duplicates".bold(), doc.len() - unique.len());

    print_warnings(&doc.warnings);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "undup".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Duplicate line removal for text, Word, and Excel documents");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/undup".dimmed());
    println!("License: MIT");
}

fn print_stats(report: &DedupReport) {
    println!("{}", "Statistics".green().bold());
    println!("{}: {}", "Original lines".bold(), report.original);
    println!("{}: {}", "Unique lines".bold(), report.unique);
    println!("{}: {}", "Removed".bold(), report.removed);
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("{}: {}", "Warning".yellow().bold(), warning);
    }
}

/// Ask a yes/no question on the terminal. Refuses when stdin is not interactive.
fn confirm(question: &str) -> Result<bool, Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Err(format!("{} (pass --yes to confirm non-interactively)", question).into());
    }

    print!("{} {} ", question.yellow(), "[y/N]".dimmed());
    io::stdout().flush()?;

    let mut answer = String::new();
    stdin.lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
