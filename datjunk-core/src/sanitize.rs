//! Hash canonicalization and empty-file detection.
//!
//! Hashes are stored as lowercase hex of a fixed width. Anything that
//! cannot be coerced into that shape is dropped, since an absent hash means
//! "unknown" and a malformed one would only produce false mismatches.

use crate::item::{CRC_ZERO, Item, MD5_ZERO, Rom, SHA1_ZERO};
use crate::record::Record;

/// The hash families a catalog may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashKind {
    Crc,
    Md5,
    Sha1,
}

impl HashKind {
    /// Canonical width in hex digits.
    pub const fn hex_len(self) -> usize {
        match self {
            Self::Crc => 8,
            Self::Md5 => 32,
            Self::Sha1 => 40,
        }
    }

    /// Hash of a zero-length file.
    pub const fn empty_value(self) -> &'static str {
        match self {
            Self::Crc => CRC_ZERO,
            Self::Md5 => MD5_ZERO,
            Self::Sha1 => SHA1_ZERO,
        }
    }
}

/// Canonicalize a raw hash string.
///
/// Lowercases, strips a leading `0x`, treats empty or `-` as absent, and
/// left-pads with zeros to the canonical width. Returns `None` when the
/// result is not exactly `kind.hex_len()` hex digits.
pub fn normalize_hash(raw: &str, kind: HashKind) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    let digits = lower.strip_prefix("0x").unwrap_or(&lower);
    let width = kind.hex_len();
    if digits.is_empty() || digits.len() > width {
        return None;
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    Some(format!("{digits:0>width$}"))
}

fn normalize_field(field: &mut Option<String>, kind: HashKind) {
    *field = field.as_deref().and_then(|raw| normalize_hash(raw, kind));
}

/// Canonicalize a record's hashes and classify incomplete ROMs.
///
/// - A ROM with unknown or zero size and a missing or zero CRC, or an
///   empty-file MD5 or SHA-1, becomes the canonical empty file. Its other
///   hashes are overwritten.
/// - Any other ROM with unknown or zero size is marked nodump, with a
///   warning.
pub fn sanitize(mut record: Record) -> Record {
    match &mut record.item {
        Item::Rom(rom) => {
            normalize_field(&mut rom.crc, HashKind::Crc);
            normalize_field(&mut rom.md5, HashKind::Md5);
            normalize_field(&mut rom.sha1, HashKind::Sha1);

            if rom.nodump || rom.size > 0 {
                // Sized or already flagged: nothing more to classify.
            } else if looks_like_empty_file(rom) {
                rom.size = 0;
                rom.crc = Some(CRC_ZERO.to_string());
                rom.md5 = Some(MD5_ZERO.to_string());
                rom.sha1 = Some(SHA1_ZERO.to_string());
            } else {
                log::warn!(
                    "Incomplete entry '{}' in '{}' treated as nodump",
                    rom.name,
                    record.machine.name
                );
                rom.nodump = true;
            }
        }
        Item::Disk(disk) => {
            normalize_field(&mut disk.md5, HashKind::Md5);
            normalize_field(&mut disk.sha1, HashKind::Sha1);
        }
        _ => {}
    }
    record
}

/// True when a sizeless ROM should be rewritten as the empty file: its CRC
/// is missing or zero, or its MD5 or SHA-1 is the empty-file value.
fn looks_like_empty_file(rom: &Rom) -> bool {
    let matches_empty = |value: &Option<String>, kind: HashKind| {
        value.as_deref() == Some(kind.empty_value())
    };

    rom.crc.is_none()
        || matches_empty(&rom.crc, HashKind::Crc)
        || matches_empty(&rom.md5, HashKind::Md5)
        || matches_empty(&rom.sha1, HashKind::Sha1)
}

#[cfg(test)]
#[path = "tests/sanitize_tests.rs"]
mod tests;
