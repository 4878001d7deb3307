use std::fs;

use cantoral_import_rust::{Config, SongRecord, run};

fn sheet() -> &'static str {
    "CARNAVALITO DEL MISIONERO\n\nDO        DO7\nEsta es la luz de Cristo,\nFA          DO\nyo la haré brillar.\n"
}

#[test]
fn imports_a_directory_batch() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("luz.txt"), sheet()).unwrap();
    fs::write(dir.path().join("roto.docx"), b"esto no es un docx").unwrap();
    fs::write(dir.path().join("~$luz.txt"), "basura temporal").unwrap();
    let output = dir.path().join("songs.jsonl");

    let summary = run(
        Config {
            files: Vec::new(),
            dir: Some(dir.path().to_string_lossy().to_string()),
            output: output.to_string_lossy().to_string(),
            dry_run: false,
            json: true,
            settings_path: None,
            font_family: None,
            font_size: None,
        },
        None,
    )
    .unwrap();

    let report: serde_json::Value = serde_json::from_str(&summary).unwrap();
    assert_eq!(report["total"], 2);
    assert_eq!(report["successful"], 1);
    assert_eq!(report["failed"], 1);
    assert_eq!(report["songs_found"], 1);

    let saved = fs::read_to_string(&output).unwrap();
    let records: Vec<SongRecord> = saved
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "CARNAVALITO DEL MISIONERO");
    assert_eq!(records[0].key, "C");
    assert_eq!(records[0].status, "pending");
    assert!(records[0].lyrics.contains("C  C7"));
    assert!(records[0].notes.contains("luz.txt"));
}

#[test]
fn dry_run_saves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("luz.txt");
    fs::write(&input, sheet()).unwrap();
    let output = dir.path().join("songs.jsonl");

    let summary = run(
        Config {
            files: vec![input.to_string_lossy().to_string()],
            dir: None,
            output: output.to_string_lossy().to_string(),
            dry_run: true,
            json: false,
            settings_path: None,
            font_family: None,
            font_size: None,
        },
        None,
    )
    .unwrap();

    assert!(summary.contains("Imported 1 of 1"));
    assert!(!output.exists());
}

#[test]
fn empty_input_is_an_error() {
    let err = run(
        Config {
            files: Vec::new(),
            dir: None,
            output: "songs.jsonl".to_string(),
            dry_run: true,
            json: false,
            settings_path: None,
            font_family: None,
            font_size: None,
        },
        None,
    )
    .unwrap_err();
    assert!(err.to_string().contains("no input files"));
}
