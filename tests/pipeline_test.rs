//! End-to-end tests for `run` and `preview`.

mod common;

use std::fs;

use common::{para, path_in, read_xlsx, table, write_docx, write_xlsx};
use undup::{preview, run, DedupRequest, Error, Format, Scope};

#[test]
fn test_text_case_insensitive_first_wins() {
    let dir = tempfile::tempdir().unwrap();
    let input = path_in(&dir, "fruit.txt");
    let output = path_in(&dir, "fruit_dedup.txt");
    fs::write(&input, "Apple\napple\nBanana\nApple\n").unwrap();

    let report = run(&DedupRequest::new(&input).with_output(&output)).unwrap();

    assert_eq!(report.original, 4);
    assert_eq!(report.unique, 2);
    assert_eq!(report.removed, 2);
    assert_eq!(report.target, Some(Format::Txt));
    assert_eq!(fs::read_to_string(&output).unwrap(), "Apple\nBanana\n");
}

#[test]
fn test_docx_duplicate_rows_to_text() {
    let dir = tempfile::tempdir().unwrap();
    let input = path_in(&dir, "parts.docx");
    let output = path_in(&dir, "parts.txt");
    write_docx(
        &input,
        &format!("{}{}", para("Parts list"), table(&[&["Bolt", "4"], &["Bolt", "4"]])),
    );

    let request = DedupRequest::new(&input)
        .with_output(&output)
        .with_scope(Scope::Tables)
        .allow_format_change(true);
    let report = run(&request).unwrap();

    assert_eq!(report.original, 2);
    assert_eq!(report.unique, 1);
    assert_eq!(fs::read_to_string(&output).unwrap(), "Bolt\t4\n");
}

#[test]
fn test_tabular_lines_compare_case_sensitively() {
    let dir = tempfile::tempdir().unwrap();
    let input = path_in(&dir, "rows.txt");
    let output = path_in(&dir, "rows_dedup.txt");
    fs::write(&input, "Bolt\t4\nbolt\t4\n  Bolt\t4  \n").unwrap();

    let report = run(&DedupRequest::new(&input).with_output(&output)).unwrap();

    assert_eq!(report.unique, 2);
    assert_eq!(fs::read_to_string(&output).unwrap(), "Bolt\t4\nbolt\t4\n");
}

#[test]
fn test_workbook_flattened_to_one_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let input = path_in(&dir, "stock.xlsx");
    let output = path_in(&dir, "stock_dedup.xlsx");
    write_xlsx(
        &input,
        &[
            ("North", &[&["Item", "Qty"], &["Bolt", "4"], &["Nut", "9"]]),
            ("South", &[&["Item", "Qty"], &["Bolt", "4"], &["Washer", "2"]]),
        ],
    );

    let report = run(&DedupRequest::new(&input).with_output(&output)).unwrap();
    assert_eq!(report.original, 8);
    assert_eq!(report.unique, 6);

    let (sheets, rows) = read_xlsx(&output);
    assert_eq!(sheets.len(), 1);
    assert_eq!(
        rows,
        vec![
            vec!["Item", "Qty"],
            vec!["Bolt", "4"],
            vec!["Nut", "9"],
            vec!["Washer", "2"],
        ]
    );
}

#[test]
fn test_workbook_to_text_drops_markers() {
    let dir = tempfile::tempdir().unwrap();
    let input = path_in(&dir, "stock.xlsx");
    let output = path_in(&dir, "stock.txt");
    write_xlsx(&input, &[("Only", &[&["Item"], &["Bolt"], &["Bolt"]])]);

    run(&DedupRequest::new(&input)
        .with_output(&output)
        .allow_format_change(true))
    .unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "Item\nBolt\n");
}

#[test]
fn test_empty_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = path_in(&dir, "empty.txt");
    let output = path_in(&dir, "empty_dedup.txt");
    fs::write(&input, "").unwrap();

    let err = run(&DedupRequest::new(&input).with_output(&output)).unwrap_err();

    assert!(matches!(err, Error::EmptyContent));
    assert!(!output.exists());
}

#[test]
fn test_unsupported_extension_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = path_in(&dir, "report.pdf");
    fs::write(&input, "%PDF-1.4").unwrap();

    let err = run(&DedupRequest::new(&input).with_output(path_in(&dir, "out.txt"))).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(ref ext) if ext == "pdf"));

    let err = preview(&DedupRequest::new(&input)).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
}

#[test]
fn test_overwrite_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let input = path_in(&dir, "list.txt");
    fs::write(&input, "x\nX\ny\n").unwrap();

    let err = run(&DedupRequest::new(&input).with_output(&input)).unwrap_err();
    assert!(matches!(err, Error::OverwriteNotConfirmed(_)));
    assert_eq!(fs::read_to_string(&input).unwrap(), "x\nX\ny\n");

    let report = run(&DedupRequest::new(&input).with_overwrite(true)).unwrap();
    assert_eq!(report.output.as_deref(), Some(input.as_path()));
    assert_eq!(fs::read_to_string(&input).unwrap(), "x\ny\n");
}

#[test]
fn test_format_change_needs_permission() {
    let dir = tempfile::tempdir().unwrap();
    let input = path_in(&dir, "list.txt");
    let output = path_in(&dir, "list.xlsx");
    fs::write(&input, "Name\nAda\nada\n").unwrap();

    let err = run(&DedupRequest::new(&input).with_output(&output)).unwrap_err();
    assert!(err.is_user_correctable());
    assert!(!output.exists());

    run(&DedupRequest::new(&input)
        .with_output(&output)
        .allow_format_change(true))
    .unwrap();
    let (_, rows) = read_xlsx(&output);
    assert_eq!(rows, vec![vec!["Name"], vec!["Ada"]]);
}

#[test]
fn test_preview_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = path_in(&dir, "notes.txt");
    fs::write(&input, "one\nONE\ntwo\n").unwrap();

    let result = preview(&DedupRequest::new(&input)).unwrap();

    assert_eq!(result.lines, vec!["one", "two"]);
    assert_eq!(result.report.removed, 1);
    assert_eq!(result.report.output, None);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_rerun_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let input = path_in(&dir, "a.txt");
    let once = path_in(&dir, "b.txt");
    let twice = path_in(&dir, "c.txt");
    fs::write(&input, "k\nK\n\nm\n\nk\n").unwrap();

    run(&DedupRequest::new(&input).with_output(&once)).unwrap();
    let report = run(&DedupRequest::new(&once).with_output(&twice)).unwrap();

    assert_eq!(report.removed, 0);
    assert_eq!(fs::read_to_string(&once).unwrap(), fs::read_to_string(&twice).unwrap());
}

#[cfg(unix)]
#[test]
fn test_overwrite_keeps_input_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let input = path_in(&dir, "list.txt");
    fs::write(&input, "x\nX\n").unwrap();
    fs::set_permissions(&input, fs::Permissions::from_mode(0o644)).unwrap();

    run(&DedupRequest::new(&input).with_overwrite(true)).unwrap();

    let mode = fs::metadata(&input).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}
