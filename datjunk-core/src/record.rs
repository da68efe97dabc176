use std::cmp::Ordering;

use crate::item::Item;
use crate::machine::Machine;

/// How strongly a record duplicates another one.
///
/// The order is fixed by [`DupeType::rank`], not by declaration order:
/// `None < InternalHash < InternalAll < ExternalHash < ExternalAll`.
/// Anything at or above `ExternalHash` is a cross-source duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DupeType {
    #[default]
    None,
    /// Hash matched a record from the same source.
    InternalHash,
    /// Hash, machine name and item name matched a record from the same source.
    InternalAll,
    /// Hash matched a record from a different source.
    ExternalHash,
    /// Hash, machine name and item name matched a record from a different source.
    ExternalAll,
}

impl DupeType {
    pub const fn rank(self) -> u8 {
        match self {
            Self::None => 0,
            Self::InternalHash => 1,
            Self::InternalAll => 2,
            Self::ExternalHash => 3,
            Self::ExternalAll => 4,
        }
    }

    /// True for `ExternalHash` and `ExternalAll`.
    pub fn is_external(self) -> bool {
        self >= Self::ExternalHash
    }
}

impl PartialOrd for DupeType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DupeType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

/// A single catalog entry: the item, the machine it belongs to, and the
/// duplicate classification computed by merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub item: Item,
    pub machine: Machine,
    pub dupe_type: DupeType,
}

impl Record {
    pub fn new(item: impl Into<Item>, machine: Machine) -> Self {
        Self {
            item: item.into(),
            machine,
            dupe_type: DupeType::None,
        }
    }

    pub fn source_system_id(&self) -> i32 {
        self.machine.source_system_id
    }

    /// Bucket key used for hash grouping: `"{size}-{crc}"`.
    pub fn hash_key(&self) -> String {
        format!("{}-{}", self.item.size(), self.item.crc().unwrap_or(""))
    }
}
