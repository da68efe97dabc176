use super::*;
use crate::read::parse_dat;

use datjunk_core::{Disk, ForceMerging, Rom};

const SAMPLE_CLR_DAT: &str = r#"clrmamepro (
	name "Nintendo - Nintendo Entertainment System"
	description "Nintendo - Nintendo Entertainment System"
	version 20141025-064058
	forcemerging full
)

game (
	name "'89 Dennou Kyuusei Uranai (Japan)"
	description "'89 Dennou Kyuusei Uranai (Japan)"
	rom ( name "'89 Dennou Kyuusei Uranai (Japan).nes" size 262144 crc BA58ED29 md5 4187A797E33BC96A96993220DA6F09F7 sha1 56FE858D1035DCE4B68520F457A0858BAE7BB16D )
)

game (
	name "10-Yard Fight (USA, Europe)"
	cloneof "10-Yard Fight (Japan)"
	year 1985
	rom ( name "10-Yard Fight (USA, Europe).nes" size 40960 crc 3D564757 )
	rom ( name "broken.nes" size ten crc 00000000 )
	disk ( name "extra" sha1 016818BF6BAAF779F4F5C1658880B81D23EA40CA flags nodump )
	sample "crowd"
)
"#;

#[test]
fn test_parse_clrmamepro_dat() {
    let dat = parse_dat(SAMPLE_CLR_DAT.as_bytes(), &SourceTag::new(0, "nes")).unwrap();
    assert_eq!(dat.header.name, "Nintendo - Nintendo Entertainment System");
    assert_eq!(dat.header.version, "20141025-064058");
    assert_eq!(dat.header.force_merging, ForceMerging::Full);
    assert_eq!(dat.records.len(), 4);
    assert_eq!(dat.skipped, 1);

    let first = &dat.records[0];
    assert_eq!(first.machine.name, "'89 Dennou Kyuusei Uranai (Japan)");
    assert_eq!(first.item.name(), "'89 Dennou Kyuusei Uranai (Japan).nes");
    assert_eq!(first.item.size(), 262144);
    assert_eq!(first.item.crc(), Some("BA58ED29"));

    let yard = &dat.records[1];
    assert_eq!(yard.machine.name, "10-Yard Fight (USA, Europe)");
    assert_eq!(yard.machine.description, "10-Yard Fight (USA, Europe)");
    assert_eq!(yard.machine.clone_of.as_deref(), Some("10-Yard Fight (Japan)"));
    assert_eq!(yard.machine.year.as_deref(), Some("1985"));

    assert_eq!(dat.records[2].item.kind(), ItemKind::Disk);
    assert!(dat.records[2].item.is_nodump());
    assert_eq!(dat.records[3].item, Item::Sample(datjunk_core::Sample { name: "crowd".into() }));
}

#[test]
fn test_parse_empty_clrmamepro() {
    let result = parse_dat("clrmamepro (\n)\n".as_bytes(), &SourceTag::default());
    assert!(matches!(result, Err(FormatError::InvalidDat(_))));
}

#[test]
fn test_tokenize_quoted_rom() {
    let tokens = tokenize_line(r#"name "Game (USA, Europe).sfc" size 524288 crc ABCD1234"#);
    assert_eq!(
        tokens,
        vec!["name", "Game (USA, Europe).sfc", "size", "524288", "crc", "ABCD1234"]
    );
}

#[test]
fn test_parse_kv_item_block() {
    assert_eq!(
        parse_kv(r#"disk ( name "x" )"#),
        Some(("disk".to_string(), r#"name "x""#.to_string()))
    );
    assert_eq!(
        parse_kv(r#"name "quoted value""#),
        Some(("name".to_string(), "quoted value".to_string()))
    );
    assert_eq!(parse_kv("rom missing-parens"), None);
}

#[test]
fn test_write_and_read_back() {
    let mut header = CatalogHeader::named("Set");
    header.author = "Someone".into();
    header.force_merging = ForceMerging::Split;
    let mut machine = Machine::new("Game (USA)");
    machine.manufacturer = Some("Maker".into());
    let mut nodump = Disk::new("image");
    nodump.nodump = true;
    let records = vec![
        Record::new(
            Rom::new("Game (USA).bin", 1024)
                .with_crc("01234567")
                .with_sha1("0123456789abcdef0123456789abcdef01234567"),
            machine.clone(),
        ),
        Record::new(nodump, machine.clone()),
        Record::new(datjunk_core::Sample { name: "boom".into() }, machine),
    ];

    let mut out = Vec::new();
    write(&header, &[&records[..]], &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("\tforcemerging split\n"));
    assert!(text.contains(
        "\trom ( name \"Game (USA).bin\" size 1024 crc 01234567 sha1 0123456789abcdef0123456789abcdef01234567 )\n"
    ));
    assert!(text.contains("\tdisk ( name \"image\" flags nodump )\n"));

    let dat = parse_dat(text.as_bytes(), &SourceTag::default()).unwrap();
    assert_eq!(dat.header.author, "Someone");
    assert_eq!(dat.header.force_merging, ForceMerging::Split);
    let items: Vec<_> = dat.records.iter().map(|r| r.item.clone()).collect();
    let expected: Vec<_> = records.iter().map(|r| r.item.clone()).collect();
    assert_eq!(items, expected);
    assert_eq!(dat.records[0].machine.manufacturer.as_deref(), Some("Maker"));
}
