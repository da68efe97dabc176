use std::fs;
use std::path::Path;

use datjunk_core::diff::{self, merge_catalogs};
use datjunk_core::{CatalogHeader, DiffModes, DiffOptions, FilterCriteria, OutputKind};
use datjunk_formats::{OutputFormat, SourceTag, parse_dat_file};
use datjunk_lib::{LoadOptions, SilentProgress, emit_outputs, load_inputs};

fn write_dat(path: &Path, name: &str, games: &[(&str, &str, &str)]) {
    let mut text = format!("clrmamepro (\n\tname \"{name}\"\n)\n");
    for (game, rom, crc) in games {
        text.push_str(&format!(
            "\ngame (\n\tname \"{game}\"\n\trom ( name \"{rom}\" size 32 crc {crc} )\n)\n"
        ));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

fn options() -> LoadOptions {
    LoadOptions {
        threads: 2,
        criteria: FilterCriteria::default(),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn diff_outputs_land_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.dat");
    let b = dir.path().join("b.dat");
    write_dat(&a, "A", &[("gx", "x.bin", "00000001"), ("gy", "y.bin", "00000002")]);
    write_dat(&b, "B", &[("gy", "y.bin", "00000002"), ("gz", "z.bin", "00000003")]);

    let report = load_inputs(&[a, b], &options(), &SilentProgress).await;
    let (inputs, failures) = report.into_inputs();
    assert!(failures.is_empty());

    let diff_options = DiffOptions {
        modes: DiffModes::ALL,
        ..DiffOptions::default()
    };
    let outputs = diff::run(inputs, &CatalogHeader::named("Out"), &diff_options);
    let kinds: Vec<OutputKind> = outputs.iter().map(|o| o.kind).collect();
    assert_eq!(
        kinds,
        [
            OutputKind::NoDupes,
            OutputKind::Dupes,
            OutputKind::Individual(0),
            OutputKind::Individual(1),
        ]
    );

    let out = dir.path().join("out");
    let catalogs = outputs.into_iter().map(|o| o.catalog).collect();
    let emitted = emit_outputs(catalogs, OutputFormat::Logiqx, &out, false);
    assert!(!emitted.has_failures());
    assert_eq!(emitted.written.len(), 4);

    let dupes = parse_dat_file(&out.join("Out (Duplicates).xml"), &SourceTag::default()).unwrap();
    assert_eq!(dupes.records.len(), 1);
    assert_eq!(dupes.records[0].item.name(), "y.bin");

    let no_dupes =
        parse_dat_file(&out.join("Out (No Duplicates).xml"), &SourceTag::default()).unwrap();
    let mut names: Vec<&str> = no_dupes.records.iter().map(|r| r.item.name()).collect();
    names.sort();
    assert_eq!(names, ["x.bin", "z.bin"]);

    let only_b = parse_dat_file(&out.join("Out (b).xml"), &SourceTag::default()).unwrap();
    assert_eq!(only_b.records.len(), 1);
    assert_eq!(only_b.records[0].item.name(), "z.bin");
}

#[tokio::test]
async fn superdat_merge_prefixes_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("dats");
    write_dat(&root.join("consoles/nes.dat"), "NES", &[("Game A", "a.nes", "0000000A")]);
    write_dat(&root.join("handhelds/gb.dat"), "GB", &[("Game B", "b.gb", "0000000B")]);

    let report = load_inputs(&[root], &options(), &SilentProgress).await;
    let (inputs, failures) = report.into_inputs();
    assert!(failures.is_empty());
    assert_eq!(inputs.len(), 2);

    let mut header = CatalogHeader::named("Everything");
    header.is_superdat = true;
    let merged = merge_catalogs(inputs, &header).unwrap();

    let out = dir.path().join("out");
    let emitted = emit_outputs(vec![merged.catalog], OutputFormat::SabreDat, &out, true);
    assert_eq!(emitted.record_count(), 2);

    let dat = parse_dat_file(&out.join("Everything.xml"), &SourceTag::default()).unwrap();
    assert!(dat.header.is_superdat);
    let mut machines: Vec<&str> = dat.records.iter().map(|r| r.machine.name.as_str()).collect();
    machines.sort();
    assert_eq!(machines, ["consoles/nes/Game A", "handhelds/gb/Game B"]);
}
