//! Regrouping of catalog records into machine or hash buckets.

use std::collections::BTreeMap;

use crate::merge::merge;
use crate::record::Record;

/// Records regrouped under new bucket keys.
#[derive(Debug, Clone, Default)]
pub struct Bucketed {
    pub buckets: BTreeMap<String, Vec<Record>>,
    /// Number of records placed into buckets.
    pub item_count: usize,
}

impl Bucketed {
    pub fn into_records(self) -> impl Iterator<Item = Record> {
        self.buckets.into_values().flatten()
    }
}

/// Bucket key for machine grouping.
///
/// Unless `no_rename` is set, the key is prefixed with the zero-padded
/// source ids so machines of the same name from different sources stay
/// apart.
pub fn machine_key(record: &Record, no_rename: bool) -> String {
    let name = if record.machine.name.is_empty() {
        "Default".to_string()
    } else {
        record.machine.name.to_lowercase()
    };
    if no_rename {
        name
    } else {
        format!(
            "{:010}-{:010}-{}",
            record.machine.source_system_id, record.machine.source_id, name
        )
    }
}

/// Group records by machine.
///
/// With `dedupe`, each input bucket is merged before regrouping. Every
/// output bucket is sorted by source ids, machine name and item name, or by
/// names alone when `no_rename` is set.
pub fn bucket_by_machine(
    input: BTreeMap<String, Vec<Record>>,
    dedupe: bool,
    no_rename: bool,
) -> Bucketed {
    let mut out = Bucketed::default();

    for (_, records) in input {
        let records = if dedupe { merge(records) } else { records };
        for record in records {
            let key = machine_key(&record, no_rename);
            out.buckets.entry(key).or_default().push(record);
            out.item_count += 1;
        }
    }

    for records in out.buckets.values_mut() {
        if no_rename {
            records.sort_by(|a, b| {
                a.machine
                    .name
                    .cmp(&b.machine.name)
                    .then_with(|| a.item.name().cmp(b.item.name()))
            });
        } else {
            records.sort_by(|a, b| {
                a.machine
                    .source_system_id
                    .cmp(&b.machine.source_system_id)
                    .then_with(|| a.machine.source_id.cmp(&b.machine.source_id))
                    .then_with(|| a.machine.name.cmp(&b.machine.name))
                    .then_with(|| a.item.name().cmp(b.item.name()))
            });
        }
    }

    log::debug!(
        "Bucketed {} records into {} machines",
        out.item_count,
        out.buckets.len()
    );
    out
}

/// Group records by `"{size}-{crc}"`.
///
/// With `dedupe`, each hash bucket is merged after regrouping, so records
/// with equal size and CRC always meet regardless of how the input was
/// keyed.
pub fn bucket_by_hash(input: BTreeMap<String, Vec<Record>>, dedupe: bool) -> Bucketed {
    let mut buckets: BTreeMap<String, Vec<Record>> = BTreeMap::new();
    for record in input.into_values().flatten() {
        buckets.entry(record.hash_key()).or_default().push(record);
    }

    if dedupe {
        for records in buckets.values_mut() {
            *records = merge(std::mem::take(records));
        }
    }

    let item_count = buckets.values().map(Vec::len).sum();
    log::debug!(
        "Bucketed {} records into {} hash groups",
        item_count,
        buckets.len()
    );
    Bucketed {
        buckets,
        item_count,
    }
}

#[cfg(test)]
#[path = "tests/bucket_tests.rs"]
mod tests;
