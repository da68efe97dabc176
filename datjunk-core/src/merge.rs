//! Duplicate detection and collapse.
//!
//! Records are sorted by `(size, crc, md5, sha1)` and then folded into an
//! output list. Each record is compared against every record already kept;
//! a missing hash acts as a wildcard, and wildcard matches are not
//! transitive, so a full scan of the kept list is required.

use std::cmp::Ordering;

use crate::item::Item;
use crate::record::{DupeType, Record};

/// True when `a` and `b` plausibly describe the same content.
///
/// Both must be the same kind. ROMs need equal sizes and, for each of
/// CRC, MD5 and SHA-1, either a missing side or equal values. Disks use the
/// same rule over MD5 and SHA-1, but a disk with no hashes at all never
/// matches. Other kinds carry no hash identity and never match.
pub fn is_partial_match(a: &Record, b: &Record) -> bool {
    match (&a.item, &b.item) {
        (Item::Rom(x), Item::Rom(y)) => {
            x.size == y.size
                && hash_compatible(x.crc.as_deref(), y.crc.as_deref())
                && hash_compatible(x.md5.as_deref(), y.md5.as_deref())
                && hash_compatible(x.sha1.as_deref(), y.sha1.as_deref())
        }
        (Item::Disk(x), Item::Disk(y)) => {
            let x_has_hash = x.md5.is_some() || x.sha1.is_some();
            let y_has_hash = y.md5.is_some() || y.sha1.is_some();
            x_has_hash
                && y_has_hash
                && hash_compatible(x.md5.as_deref(), y.md5.as_deref())
                && hash_compatible(x.sha1.as_deref(), y.sha1.as_deref())
        }
        _ => false,
    }
}

fn hash_compatible(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => x == y,
        _ => true,
    }
}

/// Ordering used before the duplicate scan.
///
/// Absent hashes sort as the empty string. Ties fall back to source
/// priority so the output does not depend on input order.
fn merge_order(a: &Record, b: &Record) -> Ordering {
    a.item
        .size()
        .cmp(&b.item.size())
        .then_with(|| a.item.crc().unwrap_or("").cmp(b.item.crc().unwrap_or("")))
        .then_with(|| a.item.md5().unwrap_or("").cmp(b.item.md5().unwrap_or("")))
        .then_with(|| a.item.sha1().unwrap_or("").cmp(b.item.sha1().unwrap_or("")))
        .then_with(|| a.machine.source_system_id.cmp(&b.machine.source_system_id))
        .then_with(|| a.machine.source_id.cmp(&b.machine.source_id))
}

/// Collapse duplicates in `records`, enriching the survivors.
///
/// Nodump records are kept as-is and never matched. For every other record
/// the first kept record it partially matches absorbs it: missing hashes
/// are copied over, the duplicate type is upgraded, and the lower source
/// index takes over the visible names. Unmatched records are kept with
/// [`DupeType::None`].
pub fn merge(mut records: Vec<Record>) -> Vec<Record> {
    if records.is_empty() {
        return records;
    }

    let input_len = records.len();
    records.sort_by(merge_order);

    let mut kept: Vec<Record> = Vec::with_capacity(records.len());
    for record in records {
        if record.item.is_nodump() {
            kept.push(record);
            continue;
        }

        let found = kept
            .iter_mut()
            .find(|candidate| !candidate.item.is_nodump() && is_partial_match(&record, candidate));

        match found {
            Some(survivor) => absorb(survivor, &record),
            None => kept.push(record),
        }
    }

    kept.sort_by(merge_order);

    if kept.len() != input_len {
        log::debug!("Merged {} records into {}", input_len, kept.len());
    }
    kept
}

/// Fold `dupe` into `survivor`.
fn absorb(survivor: &mut Record, dupe: &Record) {
    enrich_hashes(&mut survivor.item, &dupe.item);

    let external =
        survivor.dupe_type.is_external() || !survivor.machine.same_source(&dupe.machine);
    let same_names = survivor.machine.name == dupe.machine.name
        && survivor.item.name() == dupe.item.name();
    let classified = match (external, same_names) {
        (true, true) => DupeType::ExternalAll,
        (true, false) => DupeType::ExternalHash,
        (false, true) => DupeType::InternalAll,
        (false, false) => DupeType::InternalHash,
    };
    survivor.dupe_type = survivor.dupe_type.max(classified);

    if dupe.machine.source_system_id < survivor.machine.source_system_id {
        survivor.machine.source_system_id = dupe.machine.source_system_id;
        survivor.machine.source_system_name = dupe.machine.source_system_name.clone();
        survivor.machine.name = dupe.machine.name.clone();
        survivor.item.set_name(dupe.item.name());
    }
    if dupe.machine.source_id < survivor.machine.source_id {
        survivor.machine.source_id = dupe.machine.source_id;
        survivor.machine.source_name = dupe.machine.source_name.clone();
        survivor.machine.name = dupe.machine.name.clone();
        survivor.item.set_name(dupe.item.name());
    }
}

/// Copy hashes `from` has and `into` lacks.
fn enrich_hashes(into: &mut Item, from: &Item) {
    fn fill(slot: &mut Option<String>, value: Option<&str>) {
        if slot.is_none() {
            *slot = value.map(str::to_string);
        }
    }

    match into {
        Item::Rom(rom) => {
            fill(&mut rom.crc, from.crc());
            fill(&mut rom.md5, from.md5());
            fill(&mut rom.sha1, from.sha1());
        }
        Item::Disk(disk) => {
            fill(&mut disk.md5, from.md5());
            fill(&mut disk.sha1, from.sha1());
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "tests/merge_tests.rs"]
mod tests;
