use super::*;
use crate::item::{Disk, Rom, Sample};
use crate::machine::Machine;

fn rom(machine: &str, name: &str, size: i64, crc: &str) -> Record {
    Record::new(Rom::new(name, size).with_crc(crc), Machine::new(machine))
}

#[test]
fn wildcard_forms() {
    assert!(pattern_matches("*mario*", "Super Mario World"));
    assert!(pattern_matches("*(usa)", "Super Mario World (USA)"));
    assert!(!pattern_matches("*(usa)", "Super Mario World (USA) (Rev 1)"));
    assert!(pattern_matches("super*", "Super Mario World"));
    assert!(pattern_matches("SUPER MARIO WORLD", "super mario world"));
    assert!(!pattern_matches("super", "Super Mario World"));
}

#[test]
fn lone_star_matches_anything() {
    assert!(pattern_matches("*", ""));
    assert!(pattern_matches("*", "anything"));
    assert!(pattern_matches("**", "anything"));
}

#[test]
fn empty_criteria_accept_everything() {
    let criteria = FilterCriteria::accept_all();
    assert!(criteria.is_empty());
    assert!(criteria.accepts(&rom("Game", "game.bin", 10, "deadbeef")));
}

#[test]
fn game_and_item_names_are_checked() {
    let criteria = FilterCriteria {
        game_name: Some("*zelda*".into()),
        item_name: Some("*.sfc".into()),
        ..FilterCriteria::default()
    };
    assert!(criteria.accepts(&rom("The Legend of Zelda", "zelda.sfc", 10, "11111111")));
    assert!(!criteria.accepts(&rom("The Legend of Zelda", "zelda.smc", 10, "11111111")));
    assert!(!criteria.accepts(&rom("Metroid", "metroid.sfc", 10, "11111111")));
}

#[test]
fn exact_size_overrides_range() {
    let criteria = FilterCriteria {
        size_eq: Some(1024),
        size_gte: Some(4096),
        size_lte: Some(8),
        ..FilterCriteria::default()
    };
    assert!(criteria.accepts(&rom("G", "g.bin", 1024, "11111111")));
    assert!(!criteria.accepts(&rom("G", "g.bin", 1025, "11111111")));
}

#[test]
fn size_range_requires_both_bounds() {
    let criteria = FilterCriteria {
        size_gte: Some(100),
        size_lte: Some(200),
        ..FilterCriteria::default()
    };
    assert!(criteria.accepts(&rom("G", "g.bin", 100, "11111111")));
    assert!(criteria.accepts(&rom("G", "g.bin", 200, "11111111")));
    assert!(!criteria.accepts(&rom("G", "g.bin", 99, "11111111")));
    assert!(!criteria.accepts(&rom("G", "g.bin", 201, "11111111")));
}

#[test]
fn hash_patterns_match_absent_hash_as_empty() {
    let criteria = FilterCriteria {
        md5: Some("d41d*".into()),
        ..FilterCriteria::default()
    };
    assert!(!criteria.accepts(&rom("G", "g.bin", 1, "11111111")));

    let disk = Record::new(
        Disk::new("hdd").with_md5("d41d8cd98f00b204e9800998ecf8427e"),
        Machine::new("G"),
    );
    assert!(criteria.accepts(&disk));
}

#[test]
fn nodump_constraint() {
    let mut bad = Rom::new("bad.bin", 10);
    bad.nodump = true;
    let bad = Record::new(bad, Machine::new("G"));
    let good = rom("G", "good.bin", 10, "11111111");

    let only_nodump = FilterCriteria {
        nodump: Some(true),
        ..FilterCriteria::default()
    };
    assert!(only_nodump.accepts(&bad));
    assert!(!only_nodump.accepts(&good));

    let no_nodump = FilterCriteria {
        nodump: Some(false),
        ..FilterCriteria::default()
    };
    assert!(!no_nodump.accepts(&bad));
    assert!(no_nodump.accepts(&good));
}

#[test]
fn item_type_and_non_hash_kinds() {
    let sample = Record::new(
        Sample {
            name: "boom.wav".into(),
        },
        Machine::new("G"),
    );
    let roms_only = FilterCriteria {
        item_type: Some(ItemKind::Rom),
        ..FilterCriteria::default()
    };
    assert!(!roms_only.accepts(&sample));

    // Size and CRC criteria do not constrain samples.
    let sized = FilterCriteria {
        size_eq: Some(5),
        crc: Some("ffffffff".into()),
        ..FilterCriteria::default()
    };
    assert!(sized.accepts(&sample));
}
