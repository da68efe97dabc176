use super::*;
use crate::item::Rom;
use crate::machine::Machine;
use crate::record::DupeType;

fn record(machine: &str, system: i32, name: &str, size: i64, crc: &str) -> Record {
    Record::new(
        Rom::new(name, size).with_crc(crc),
        Machine::new(machine).with_source(system, format!("s{system}")),
    )
}

fn single_bucket(records: Vec<Record>) -> BTreeMap<String, Vec<Record>> {
    let mut map = BTreeMap::new();
    map.insert("input".to_string(), records);
    map
}

#[test]
fn machine_key_is_prefixed_with_padded_sources() {
    let mut r = record("Super Game", 3, "a.bin", 1, "11111111");
    r.machine.source_id = 12;
    assert_eq!(machine_key(&r, false), "0000000003-0000000012-super game");
    assert_eq!(machine_key(&r, true), "super game");
}

#[test]
fn empty_machine_name_uses_default() {
    let r = record("", 0, "a.bin", 1, "11111111");
    assert_eq!(machine_key(&r, true), "Default");
}

#[test]
fn by_machine_groups_and_sorts() {
    let input = single_bucket(vec![
        record("Game", 1, "b.bin", 1, "11111111"),
        record("Game", 0, "z.bin", 2, "22222222"),
        record("Game", 0, "a.bin", 3, "33333333"),
    ]);

    let bucketed = bucket_by_machine(input.clone(), false, false);
    assert_eq!(bucketed.item_count, 3);
    assert_eq!(bucketed.buckets.len(), 2);
    let source0 = &bucketed.buckets["0000000000-0000000000-game"];
    let names: Vec<_> = source0.iter().map(|r| r.item.name()).collect();
    assert_eq!(names, ["a.bin", "z.bin"]);

    let flat = bucket_by_machine(input, false, true);
    assert_eq!(flat.buckets.len(), 1);
    let names: Vec<_> = flat.buckets["game"].iter().map(|r| r.item.name()).collect();
    assert_eq!(names, ["a.bin", "b.bin", "z.bin"]);
}

#[test]
fn by_machine_dedupes_each_input_bucket() {
    let input = single_bucket(vec![
        record("Game", 0, "a.bin", 4, "11111111"),
        record("Game", 0, "a.bin", 4, "11111111"),
    ]);
    let bucketed = bucket_by_machine(input, true, true);
    assert_eq!(bucketed.item_count, 1);
    assert_eq!(bucketed.buckets["game"][0].dupe_type, DupeType::InternalAll);
}

#[test]
fn by_hash_regroups_then_merges() {
    let mut input = BTreeMap::new();
    input.insert(
        "machine-a".to_string(),
        vec![record("A", 0, "a.bin", 4, "11111111")],
    );
    input.insert(
        "machine-b".to_string(),
        vec![
            record("B", 1, "b.bin", 4, "11111111"),
            record("B", 1, "c.bin", 8, "22222222"),
        ],
    );

    let bucketed = bucket_by_hash(input, true);
    assert_eq!(bucketed.item_count, 2);
    let shared = &bucketed.buckets["4-11111111"];
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].dupe_type, DupeType::ExternalHash);
    assert_eq!(shared[0].machine.name, "A");
    assert!(bucketed.buckets.contains_key("8-22222222"));
}

#[test]
fn by_hash_without_dedupe_keeps_everything() {
    let input = single_bucket(vec![
        record("A", 0, "a.bin", 4, "11111111"),
        record("B", 1, "b.bin", 4, "11111111"),
    ]);
    let bucketed = bucket_by_hash(input, false);
    assert_eq!(bucketed.item_count, 2);
    assert_eq!(bucketed.into_records().count(), 2);
}
