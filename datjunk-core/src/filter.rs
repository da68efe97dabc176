//! Record admission criteria.
//!
//! Patterns use a single wildcard convention: `*foo*` is a substring match,
//! `*foo` a suffix match, `foo*` a prefix match, anything else an exact
//! match. All comparisons ignore ASCII case.

use serde::{Deserialize, Serialize};

use crate::item::{Item, ItemKind};
use crate::record::Record;

/// Criteria a record must satisfy to enter a working catalog.
///
/// Every field is optional; an unset field never rejects anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub game_name: Option<String>,
    pub item_name: Option<String>,
    pub item_type: Option<ItemKind>,
    /// Exact size. When set, `size_gte` and `size_lte` are ignored.
    pub size_eq: Option<i64>,
    pub size_gte: Option<i64>,
    pub size_lte: Option<i64>,
    pub crc: Option<String>,
    pub md5: Option<String>,
    pub sha1: Option<String>,
    /// `Some(true)` keeps only nodumps, `Some(false)` drops them.
    pub nodump: Option<bool>,
}

impl FilterCriteria {
    /// Criteria that accept every named record.
    pub fn accept_all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn accepts(&self, record: &Record) -> bool {
        accepts(record, self)
    }
}

/// Match `value` against a wildcard `pattern`, ignoring ASCII case.
pub fn pattern_matches(pattern: &str, value: &str) -> bool {
    let pattern = pattern.to_ascii_lowercase();
    let value = value.to_ascii_lowercase();

    let leading = pattern.starts_with('*');
    let trailing = pattern.len() > 1 && pattern.ends_with('*');
    let core = {
        let start = usize::from(leading);
        let end = pattern.len() - usize::from(trailing);
        if start > end { "" } else { &pattern[start..end] }
    };

    match (leading, trailing) {
        (true, true) => value.contains(core),
        (true, false) => value.ends_with(core),
        (false, true) => value.starts_with(core),
        (false, false) => value == core,
    }
}

fn optional_matches(pattern: &Option<String>, value: &str) -> bool {
    pattern.as_deref().is_none_or(|p| pattern_matches(p, value))
}

/// Decide whether `record` passes `criteria`.
///
/// Size and CRC criteria only constrain ROMs; MD5 and SHA-1 criteria
/// constrain ROMs and disks. Other kinds are judged on names, type and
/// nodump status alone.
pub fn accepts(record: &Record, criteria: &FilterCriteria) -> bool {
    if !optional_matches(&criteria.game_name, &record.machine.name) {
        return false;
    }
    if !optional_matches(&criteria.item_name, record.item.name()) {
        return false;
    }
    if criteria.item_type.is_some_and(|kind| kind != record.item.kind()) {
        return false;
    }
    if criteria
        .nodump
        .is_some_and(|want| want != record.item.is_nodump())
    {
        return false;
    }

    match &record.item {
        Item::Rom(rom) => {
            size_passes(rom.size, criteria)
                && optional_matches(&criteria.crc, rom.crc.as_deref().unwrap_or(""))
                && optional_matches(&criteria.md5, rom.md5.as_deref().unwrap_or(""))
                && optional_matches(&criteria.sha1, rom.sha1.as_deref().unwrap_or(""))
        }
        Item::Disk(disk) => {
            optional_matches(&criteria.md5, disk.md5.as_deref().unwrap_or(""))
                && optional_matches(&criteria.sha1, disk.sha1.as_deref().unwrap_or(""))
        }
        _ => true,
    }
}

fn size_passes(size: i64, criteria: &FilterCriteria) -> bool {
    if let Some(eq) = criteria.size_eq {
        return size == eq;
    }
    criteria.size_gte.is_none_or(|min| size >= min) && criteria.size_lte.is_none_or(|max| size <= max)
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
