//! The working catalog: header, hash-keyed buckets and running statistics.
//!
//! All insertions go through [`Catalog::admit`] or the crate-internal
//! `insert`, which are the only writers of the item map, so the counters
//! always equal a full recomputation.

use std::collections::BTreeMap;

use crate::filter::FilterCriteria;
use crate::header::CatalogHeader;
use crate::item::Item;
use crate::record::Record;
use crate::sanitize::sanitize;

/// Aggregate counters over a catalog's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub item_count: u64,
    pub rom_count: u64,
    pub disk_count: u64,
    /// Sum of sizes of ROMs that are not nodumps.
    pub total_size: u64,
    pub crc_count: u64,
    pub md5_count: u64,
    pub sha1_count: u64,
    pub nodump_count: u64,
}

impl CatalogStats {
    /// Compute counters from scratch.
    pub fn recompute<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.add(record);
        }
        stats
    }

    fn add(&mut self, record: &Record) {
        self.item_count += 1;
        match &record.item {
            Item::Rom(rom) => {
                self.rom_count += 1;
                if rom.nodump {
                    self.nodump_count += 1;
                } else if rom.size > 0 {
                    self.total_size += rom.size as u64;
                }
                self.crc_count += u64::from(rom.crc.is_some());
                self.md5_count += u64::from(rom.md5.is_some());
                self.sha1_count += u64::from(rom.sha1.is_some());
            }
            Item::Disk(disk) => {
                self.disk_count += 1;
                self.nodump_count += u64::from(disk.nodump);
                self.md5_count += u64::from(disk.md5.is_some());
                self.sha1_count += u64::from(disk.sha1.is_some());
            }
            _ => {}
        }
    }

    /// Fold another set of counters into this one.
    pub fn merge(&mut self, other: &CatalogStats) {
        self.item_count += other.item_count;
        self.rom_count += other.rom_count;
        self.disk_count += other.disk_count;
        self.total_size += other.total_size;
        self.crc_count += other.crc_count;
        self.md5_count += other.md5_count;
        self.sha1_count += other.sha1_count;
        self.nodump_count += other.nodump_count;
    }
}

/// Why a record was or was not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    /// The item had no name.
    Unnamed,
    /// The filter criteria rejected it.
    Filtered,
}

/// A header plus records grouped under string bucket keys.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub header: CatalogHeader,
    items: BTreeMap<String, Vec<Record>>,
    stats: CatalogStats,
}

impl Catalog {
    pub fn new(header: CatalogHeader) -> Self {
        Self {
            header,
            items: BTreeMap::new(),
            stats: CatalogStats::default(),
        }
    }

    /// Empty catalog sharing this catalog's header.
    pub fn clone_header(&self) -> Self {
        Self::new(self.header.clone())
    }

    /// Sanitize `record`, run it through `criteria`, and store it under its
    /// hash key.
    pub fn admit(&mut self, record: Record, criteria: &FilterCriteria) -> Admission {
        if record.item.name().is_empty() {
            log::warn!(
                "Rejected unnamed {} in '{}'",
                record.item.kind(),
                record.machine.name
            );
            return Admission::Unnamed;
        }

        let record = sanitize(record);
        if !criteria.accepts(&record) {
            return Admission::Filtered;
        }

        let key = record.hash_key();
        self.insert(key, record);
        Admission::Accepted
    }

    /// Store an already-sanitized record under `key`.
    pub(crate) fn insert(&mut self, key: String, record: Record) {
        self.stats.add(&record);
        self.items.entry(key).or_default().push(record);
    }

    pub fn stats(&self) -> &CatalogStats {
        &self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.stats.item_count == 0
    }

    pub fn len(&self) -> usize {
        self.stats.item_count as usize
    }

    pub fn buckets(&self) -> &BTreeMap<String, Vec<Record>> {
        &self.items
    }

    /// Iterate every record in key order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.items.values().flatten()
    }

    /// Split into header and bucket map.
    pub fn into_parts(self) -> (CatalogHeader, BTreeMap<String, Vec<Record>>) {
        (self.header, self.items)
    }

    /// Re-stamp every record with the input position `index`, used both as
    /// system and source id.
    pub fn set_source_index(&mut self, index: i32) {
        for record in self.items.values_mut().flatten() {
            record.machine.source_system_id = index;
            record.machine.source_id = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Disk, Rom, Sample};
    use crate::machine::Machine;

    fn machine() -> Machine {
        Machine::new("Game")
    }

    #[test]
    fn admit_keys_by_hash_and_counts() {
        let mut catalog = Catalog::new(CatalogHeader::named("Test"));
        let accepted = catalog.admit(
            Record::new(Rom::new("a.bin", 1024).with_crc("DEADBEEF"), machine()),
            &FilterCriteria::default(),
        );
        assert_eq!(accepted, Admission::Accepted);
        assert!(catalog.buckets().contains_key("1024-deadbeef"));
        assert_eq!(catalog.stats().rom_count, 1);
        assert_eq!(catalog.stats().total_size, 1024);
        assert_eq!(catalog.stats().crc_count, 1);
    }

    #[test]
    fn set_source_index_restamps_records() {
        let mut catalog = Catalog::default();
        catalog.admit(
            Record::new(
                Rom::new("a.bin", 4).with_crc("11111111"),
                machine().with_source(5, "five"),
            ),
            &FilterCriteria::default(),
        );
        catalog.set_source_index(2);
        let record = catalog.records().next().unwrap();
        assert_eq!(record.machine.source_system_id, 2);
        assert_eq!(record.machine.source_id, 2);
        assert_eq!(record.machine.source_system_name, "five");
    }

    #[test]
    fn unnamed_records_are_rejected() {
        let mut catalog = Catalog::default();
        let result = catalog.admit(
            Record::new(Rom::new("", 10).with_crc("11111111"), machine()),
            &FilterCriteria::default(),
        );
        assert_eq!(result, Admission::Unnamed);
        assert!(catalog.is_empty());
    }

    #[test]
    fn filtered_records_are_dropped() {
        let mut catalog = Catalog::default();
        let criteria = FilterCriteria {
            size_gte: Some(100),
            ..FilterCriteria::default()
        };
        let result = catalog.admit(
            Record::new(Rom::new("small.bin", 10).with_crc("11111111"), machine()),
            &criteria,
        );
        assert_eq!(result, Admission::Filtered);
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn nodump_roms_do_not_add_size() {
        let mut catalog = Catalog::default();
        catalog.admit(
            Record::new(Rom::new("lost.bin", -1).with_crc("12345678"), machine()),
            &FilterCriteria::default(),
        );
        catalog.admit(
            Record::new(Disk::new("hdd").with_sha1("abc"), machine()),
            &FilterCriteria::default(),
        );
        catalog.admit(
            Record::new(Sample { name: "s".into() }, machine()),
            &FilterCriteria::default(),
        );
        let stats = catalog.stats();
        assert_eq!(stats.nodump_count, 1);
        assert_eq!(stats.total_size, 0);
        assert_eq!(stats.disk_count, 1);
        assert_eq!(stats.sha1_count, 1);
        assert_eq!(stats.item_count, 3);
        assert_eq!(*stats, CatalogStats::recompute(catalog.records()));
    }

    #[test]
    fn clone_header_resets_items() {
        let mut catalog = Catalog::new(CatalogHeader::named("Source"));
        catalog.admit(
            Record::new(Rom::new("a.bin", 4).with_crc("11111111"), machine()),
            &FilterCriteria::default(),
        );
        let empty = catalog.clone_header();
        assert_eq!(empty.header.name, "Source");
        assert!(empty.is_empty());
        assert_eq!(*empty.stats(), CatalogStats::default());
    }
}
