//! End-to-end tests for the undup binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn undup(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_undup"))
        .args(args)
        .stdin(Stdio::null())
        .env_remove("UNDUP_SCOPE")
        .output()
        .expect("failed to run undup")
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_run_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("fruit.txt");
    let output = dir.path().join("out.txt");
    fs::write(&input, "Apple\napple\nBanana\nApple\n").unwrap();

    let result = undup(&["run", arg(&input), "-o", arg(&output)]);

    assert!(result.status.success(), "{:?}", result);
    assert_eq!(fs::read_to_string(&output).unwrap(), "Apple\nBanana\n");
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Removed"));
}

#[test]
fn test_run_default_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("list.txt");
    fs::write(&input, "a\nA\n").unwrap();

    let result = undup(&[arg(&input)]);

    assert!(result.status.success(), "{:?}", result);
    let output = dir.path().join("list_dedup.txt");
    assert_eq!(fs::read_to_string(output).unwrap(), "a\n");
}

#[test]
fn test_run_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("fruit.txt");
    let output = dir.path().join("out.txt");
    fs::write(&input, "Apple\napple\nBanana\nApple\n").unwrap();

    let result = undup(&["run", arg(&input), "-o", arg(&output), "--json"]);
    assert!(result.status.success(), "{:?}", result);

    let report: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(report["original"], 4);
    assert_eq!(report["unique"], 2);
    assert_eq!(report["removed"], 2);
    assert_eq!(report["source"], "txt");
}

#[test]
fn test_preview_does_not_write() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("fruit.txt");
    fs::write(&input, "Apple\napple\nBanana\n").unwrap();

    let result = undup(&["preview", arg(&input), "--raw"]);

    assert!(result.status.success(), "{:?}", result);
    assert_eq!(String::from_utf8_lossy(&result.stdout), "Apple\nBanana\n");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_unsupported_format_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("paper.pdf");
    fs::write(&input, "%PDF-1.7").unwrap();

    let result = undup(&["run", arg(&input), "-o", arg(&dir.path().join("out.txt"))]);

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("Unsupported file format: pdf"));
}

#[test]
fn test_format_change_needs_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("fruit.txt");
    let output = dir.path().join("fruit.xlsx");
    fs::write(&input, "name\tcolor\nApple\tred\n").unwrap();

    let refused = undup(&["run", arg(&input), "-o", arg(&output)]);
    assert_eq!(refused.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&refused.stderr).contains("--yes"));
    assert!(!output.exists());

    let accepted = undup(&["run", arg(&input), "-o", arg(&output), "--yes"]);
    assert!(accepted.status.success(), "{:?}", accepted);
    assert!(fs::read(&output).unwrap().starts_with(b"PK"));
}

#[test]
fn test_empty_input_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.txt");
    let output = dir.path().join("out.txt");
    fs::write(&input, "").unwrap();

    let result = undup(&["run", arg(&input), "-o", arg(&output)]);

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("No content extracted"));
    assert!(!output.exists());
}

#[test]
fn test_info_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("gone.txt");

    let result = undup(&["info", arg(&missing)]);

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("File not found"), "{}", stderr);
}

#[cfg(unix)]
#[test]
fn test_overwrite_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("list.txt");
    fs::write(&input, "a\nA\nb\n").unwrap();
    fs::set_permissions(&input, fs::Permissions::from_mode(0o644)).unwrap();

    let result = undup(&["run", arg(&input), "--overwrite"]);

    assert!(result.status.success(), "{:?}", result);
    assert_eq!(fs::read_to_string(&input).unwrap(), "a\nb\n");
    let mode = fs::metadata(&input).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}
