use std::collections::BTreeMap;

use datjunk_core::{CatalogHeader, Machine, Record, Rom, bucket_by_machine};
use datjunk_formats::{OutputFormat, SourceTag, parse_dat, write_catalog};

fn rom(machine: &str, name: &str, crc: &str) -> Record {
    Record::new(Rom::new(name, 16).with_crc(crc), Machine::new(machine))
}

fn machines(records: Vec<Record>) -> BTreeMap<String, Vec<Record>> {
    let mut input = BTreeMap::new();
    input.insert(String::new(), records);
    bucket_by_machine(input, false, true).buckets
}

fn render(format: OutputFormat, header: &CatalogHeader, records: Vec<Record>) -> String {
    let mut out = Vec::new();
    write_catalog(format, header, &machines(records), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn machines_are_written_in_natural_order() {
    let text = render(
        OutputFormat::ClrMamePro,
        &CatalogHeader::named("Set"),
        vec![
            rom("game10", "c.bin", "00000003"),
            rom("game2", "b.bin", "00000002"),
            rom("game1", "a.bin", "00000001"),
        ],
    );
    let order: Vec<&str> = text
        .lines()
        .filter_map(|line| line.strip_prefix("\tname \"game"))
        .collect();
    assert_eq!(order, ["1\"", "2\"", "10\""]);
}

#[test]
fn sabredat_nests_directories_by_common_prefix() {
    let mut header = CatalogHeader::named("Super");
    header.is_superdat = true;
    let text = render(
        OutputFormat::SabreDat,
        &header,
        vec![
            rom("consoles/nes/Game A", "a.nes", "00000001"),
            rom("consoles/nes/Game B", "b.nes", "00000002"),
            rom("consoles/snes/Game C", "c.sfc", "00000003"),
            rom("handhelds/gb/Game D", "d.gb", "00000004"),
        ],
    );

    // Each shared directory is opened exactly once.
    assert_eq!(text.matches(r#"<dir name="consoles">"#).count(), 1);
    assert_eq!(text.matches(r#"<dir name="nes">"#).count(), 1);
    assert_eq!(text.matches("<dir ").count(), text.matches("</dir>").count());
    assert_eq!(text.matches("<dir ").count(), 9);

    let dat = parse_dat(text.as_bytes(), &SourceTag::default()).unwrap();
    assert!(dat.header.is_superdat);
    let names: Vec<&str> = dat.records.iter().map(|r| r.machine.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "consoles/nes/Game A",
            "consoles/nes/Game B",
            "consoles/snes/Game C",
            "handhelds/gb/Game D",
        ]
    );
}

#[test]
fn romcenter_round_trip_keeps_roms() {
    let mut parent = rom("pacman", "pacman.6e", "c1e6ab10");
    parent.machine.description = "Pac-Man".into();
    let mut clone = rom("puckman", "pm1.6e", "f36e88ab");
    clone.machine.clone_of = Some("pacman".into());
    let text = render(OutputFormat::RomCenter, &CatalogHeader::named("Arcade"), vec![parent, clone]);
    assert!(text.contains("¬pacman¬pacman¬puckman¬puckman¬pm1.6e¬f36e88ab¬16¬¬¬"));

    let dat = parse_dat(text.as_bytes(), &SourceTag::default()).unwrap();
    assert_eq!(dat.header.name, "Arcade");
    assert_eq!(dat.records.len(), 2);
    assert_eq!(dat.records[0].machine.description, "Pac-Man");
    assert_eq!(dat.records[1].machine.clone_of.as_deref(), Some("pacman"));
}

#[test]
fn csv_quotes_fields_with_commas() {
    let text = render(
        OutputFormat::Csv,
        &CatalogHeader::named("Set"),
        vec![rom("Game (USA, Europe)", "a.bin", "00000001")],
    );
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("File Name,Internal Name,"));
    let row = lines.next().unwrap();
    assert!(row.contains(r#""Game (USA, Europe)""#));
    assert!(row.ends_with(",00000001,,,no"));
}
