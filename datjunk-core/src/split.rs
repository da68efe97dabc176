//! Partitioning a single catalog by the strongest hash each record carries.

use std::fmt;

use crate::catalog::Catalog;
use crate::item::Item;
use crate::record::Record;

/// Partition a record falls into when splitting by hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashSplit {
    Nodump,
    Sha1,
    Md5,
    Crc,
    /// Kinds without hash identity, and hashable records with no hash.
    Other,
}

impl HashSplit {
    pub const ALL: [HashSplit; 5] = [
        HashSplit::Nodump,
        HashSplit::Sha1,
        HashSplit::Md5,
        HashSplit::Crc,
        HashSplit::Other,
    ];

    pub fn of(record: &Record) -> Self {
        let item = &record.item;
        if item.is_nodump() {
            Self::Nodump
        } else if item.sha1().is_some() {
            Self::Sha1
        } else if item.md5().is_some() {
            Self::Md5
        } else if matches!(item, Item::Rom(_)) && item.crc().is_some() {
            Self::Crc
        } else {
            Self::Other
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Nodump => " (Nodump)",
            Self::Sha1 => " (SHA-1)",
            Self::Md5 => " (MD5)",
            Self::Crc => " (CRC)",
            Self::Other => " (Other)",
        }
    }
}

impl fmt::Display for HashSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix().trim_matches(|c| c == ' ' || c == '(' || c == ')'))
    }
}

/// Split `catalog` into one catalog per [`HashSplit`], omitting empty ones.
pub fn split_by_hash(catalog: Catalog) -> Vec<(HashSplit, Catalog)> {
    let mut parts: Vec<(HashSplit, Catalog)> = HashSplit::ALL
        .iter()
        .map(|&split| (split, Catalog::new(catalog.header.with_suffix(split.suffix()))))
        .collect();

    let (_, buckets) = catalog.into_parts();
    for (key, records) in buckets {
        for record in records {
            let split = HashSplit::of(&record);
            if let Some((_, part)) = parts.iter_mut().find(|(s, _)| *s == split) {
                part.insert(key.clone(), record);
            }
        }
    }

    parts.retain(|(_, part)| !part.is_empty());
    parts
}
