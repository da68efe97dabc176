use super::*;

use std::fs;

use crate::progress::SilentProgress;

fn clrmamepro(name: &str, games: &[(&str, &str, &str)]) -> String {
    let mut text = format!("clrmamepro (\n\tname \"{name}\"\n)\n");
    for (game, rom, crc) in games {
        text.push_str(&format!(
            "\ngame (\n\tname \"{game}\"\n\trom ( name \"{rom}\" size 16 crc {crc} )\n)\n"
        ));
    }
    text
}

#[test]
fn test_expand_walks_directories_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("b/nested")).unwrap();
    fs::write(root.join("b/nested/deep.xml"), "").unwrap();
    fs::write(root.join("b/first.DAT"), "").unwrap();
    fs::write(root.join("a.txt"), "").unwrap();
    fs::write(root.join("notes.md"), "").unwrap();

    let (files, failures) = expand_inputs(&[root.to_path_buf()]);
    assert!(failures.is_empty());

    let relative: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
    assert_eq!(relative, ["a", "b/first", "b/nested/deep"]);
    assert_eq!(files[2].label, "deep");
}

#[test]
fn test_expand_direct_file_and_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("Arcade.dat");
    fs::write(&file, "").unwrap();
    let missing = dir.path().join("gone.dat");

    let (files, failures) = expand_inputs(&[file.clone(), missing.clone()]);
    assert_eq!(files, [InputFile::single(file)]);
    assert_eq!(files[0].relative_path, "Arcade");
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path, missing);
    assert!(matches!(failures[0].error, LibError::Io(_)));
}

#[test]
fn test_load_file_counts_admissions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("set.dat");
    fs::write(
        &path,
        clrmamepro(
            "Set",
            &[("keep", "keep.bin", "0000000A"), ("drop", "drop.bin", "0000000B")],
        ),
    )
    .unwrap();

    let criteria = FilterCriteria {
        game_name: Some("keep".into()),
        ..FilterCriteria::default()
    };
    let loaded = load_file(&InputFile::single(path), 3, &criteria).unwrap();
    assert_eq!(loaded.counts.accepted, 1);
    assert_eq!(loaded.counts.filtered, 1);
    assert_eq!(loaded.input.catalog.len(), 1);
    assert_eq!(loaded.input.catalog.header.name, "Set");

    let record = loaded.input.catalog.records().next().unwrap();
    assert_eq!(record.machine.source_system_id, 3);
    assert_eq!(record.machine.source_system_name, "set");
}

#[test]
fn test_load_file_without_header_name_uses_label() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Nameless.dat");
    fs::write(&path, "game (\n\tname \"g\"\n\trom ( name \"r\" size 1 crc 00000001 )\n)\n").unwrap();

    let loaded = load_file(&InputFile::single(path), 0, &FilterCriteria::default()).unwrap();
    assert_eq!(loaded.input.catalog.header.name, "Nameless");
    assert_eq!(loaded.input.catalog.header.description, "Nameless");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_load_inputs_keeps_order_and_renumbers_after_failure() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.dat");
    let broken = dir.path().join("broken.dat");
    let third = dir.path().join("third.dat");
    fs::write(&first, clrmamepro("First", &[("a", "a.bin", "00000001")])).unwrap();
    fs::write(&broken, "").unwrap();
    fs::write(&third, clrmamepro("Third", &[("c", "c.bin", "00000003")])).unwrap();

    let options = LoadOptions {
        threads: 3,
        criteria: FilterCriteria::default(),
    };
    let report = load_inputs(&[first, broken.clone(), third], &options, &SilentProgress).await;

    assert!(report.has_failures());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path, broken);
    assert!(matches!(report.failures[0].error, LibError::Format(_)));

    let labels: Vec<&str> = report.loaded.iter().map(|l| l.input.label.as_str()).collect();
    assert_eq!(labels, ["first", "third"]);
    assert_eq!(report.record_count(), 2);

    let ids: Vec<i32> = report
        .loaded
        .iter()
        .flat_map(|l| l.input.catalog.records())
        .map(|r| r.machine.source_system_id)
        .collect();
    assert_eq!(ids, [0, 1]);
}

#[tokio::test]
async fn test_load_inputs_with_nothing_to_load() {
    let report = load_inputs(&[], &LoadOptions::default(), &SilentProgress).await;
    assert!(report.loaded.is_empty());
    assert!(!report.has_failures());

    let (inputs, failures) = report.into_inputs();
    assert!(inputs.is_empty());
    assert!(failures.is_empty());
}
