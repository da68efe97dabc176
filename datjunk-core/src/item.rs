//! Item kinds carried by a catalog.
//!
//! Every kind-specific field lives inside its variant; code that needs a
//! ROM's CRC or a disk's SHA-1 matches on [`Item`] instead of casting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Canonical CRC-32 of a zero-length file.
pub const CRC_ZERO: &str = "00000000";
/// Canonical MD5 of a zero-length file.
pub const MD5_ZERO: &str = "d41d8cd98f00b204e9800998ecf8427e";
/// Canonical SHA-1 of a zero-length file.
pub const SHA1_ZERO: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";

/// Size value meaning "unknown".
pub const SIZE_UNKNOWN: i64 = -1;

/// Discriminant of an [`Item`], used by filters and codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Rom,
    Disk,
    Release,
    BiosSet,
    Sample,
    Archive,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rom => "rom",
            Self::Disk => "disk",
            Self::Release => "release",
            Self::BiosSet => "biosset",
            Self::Sample => "sample",
            Self::Archive => "archive",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rom" => Ok(Self::Rom),
            "disk" => Ok(Self::Disk),
            "release" => Ok(Self::Release),
            "biosset" | "bios" => Ok(Self::BiosSet),
            "sample" => Ok(Self::Sample),
            "archive" => Ok(Self::Archive),
            _ => Err(CoreError::UnknownItemKind(s.to_string())),
        }
    }
}

/// An expected file with a byte size and up to three hashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rom {
    pub name: String,
    /// Byte size, or [`SIZE_UNKNOWN`].
    pub size: i64,
    /// CRC-32 (8 lowercase hex digits), if known
    pub crc: Option<String>,
    /// MD5 (32 lowercase hex digits), if known
    pub md5: Option<String>,
    /// SHA-1 (40 lowercase hex digits), if known
    pub sha1: Option<String>,
    pub date: Option<String>,
    pub nodump: bool,
}

impl Rom {
    pub fn new(name: impl Into<String>, size: i64) -> Self {
        Self {
            name: name.into(),
            size,
            crc: None,
            md5: None,
            sha1: None,
            date: None,
            nodump: false,
        }
    }

    pub fn with_crc(mut self, crc: impl Into<String>) -> Self {
        self.crc = Some(crc.into());
        self
    }

    pub fn with_md5(mut self, md5: impl Into<String>) -> Self {
        self.md5 = Some(md5.into());
        self
    }

    pub fn with_sha1(mut self, sha1: impl Into<String>) -> Self {
        self.sha1 = Some(sha1.into());
        self
    }
}

/// A CHD-style disk image. Disks have no byte size in this model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disk {
    pub name: String,
    pub md5: Option<String>,
    pub sha1: Option<String>,
    pub nodump: bool,
}

impl Disk {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            md5: None,
            sha1: None,
            nodump: false,
        }
    }

    pub fn with_md5(mut self, md5: impl Into<String>) -> Self {
        self.md5 = Some(md5.into());
        self
    }

    pub fn with_sha1(mut self, sha1: impl Into<String>) -> Self {
        self.sha1 = Some(sha1.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Release {
    pub name: String,
    pub region: Option<String>,
    pub language: Option<String>,
    pub date: Option<String>,
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BiosSet {
    pub name: String,
    pub description: Option<String>,
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sample {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Archive {
    pub name: String,
}

/// One expected file or logical unit under a machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Rom(Rom),
    Disk(Disk),
    Release(Release),
    BiosSet(BiosSet),
    Sample(Sample),
    Archive(Archive),
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Rom(_) => ItemKind::Rom,
            Self::Disk(_) => ItemKind::Disk,
            Self::Release(_) => ItemKind::Release,
            Self::BiosSet(_) => ItemKind::BiosSet,
            Self::Sample(_) => ItemKind::Sample,
            Self::Archive(_) => ItemKind::Archive,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Rom(r) => &r.name,
            Self::Disk(d) => &d.name,
            Self::Release(r) => &r.name,
            Self::BiosSet(b) => &b.name,
            Self::Sample(s) => &s.name,
            Self::Archive(a) => &a.name,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        match self {
            Self::Rom(r) => r.name = name,
            Self::Disk(d) => d.name = name,
            Self::Release(r) => r.name = name,
            Self::BiosSet(b) => b.name = name,
            Self::Sample(s) => s.name = name,
            Self::Archive(a) => a.name = name,
        }
    }

    /// Byte size for ROMs; [`SIZE_UNKNOWN`] for every other kind.
    pub fn size(&self) -> i64 {
        match self {
            Self::Rom(r) => r.size,
            _ => SIZE_UNKNOWN,
        }
    }

    pub fn crc(&self) -> Option<&str> {
        match self {
            Self::Rom(r) => r.crc.as_deref(),
            _ => None,
        }
    }

    pub fn md5(&self) -> Option<&str> {
        match self {
            Self::Rom(r) => r.md5.as_deref(),
            Self::Disk(d) => d.md5.as_deref(),
            _ => None,
        }
    }

    pub fn sha1(&self) -> Option<&str> {
        match self {
            Self::Rom(r) => r.sha1.as_deref(),
            Self::Disk(d) => d.sha1.as_deref(),
            _ => None,
        }
    }

    pub fn is_nodump(&self) -> bool {
        match self {
            Self::Rom(r) => r.nodump,
            Self::Disk(d) => d.nodump,
            _ => false,
        }
    }
}

impl From<Rom> for Item {
    fn from(rom: Rom) -> Self {
        Self::Rom(rom)
    }
}

impl From<Disk> for Item {
    fn from(disk: Disk) -> Self {
        Self::Disk(disk)
    }
}

impl From<Release> for Item {
    fn from(release: Release) -> Self {
        Self::Release(release)
    }
}

impl From<BiosSet> for Item {
    fn from(bios: BiosSet) -> Self {
        Self::BiosSet(bios)
    }
}

impl From<Sample> for Item {
    fn from(sample: Sample) -> Self {
        Self::Sample(sample)
    }
}

impl From<Archive> for Item {
    fn from(archive: Archive) -> Self {
        Self::Archive(archive)
    }
}
