use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use datjunk_core::{CatalogHeader, Record};

use crate::error::FormatError;
use crate::natural::natural_cmp;
use crate::{clrmamepro, listing, logiqx, romcenter, sabredat};

/// Serialization format for output catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Logiqx,
    ClrMamePro,
    RomCenter,
    SabreDat,
    Csv,
    Tsv,
    Sfv,
    Md5,
    Sha1,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 9] = [
        OutputFormat::Logiqx,
        OutputFormat::ClrMamePro,
        OutputFormat::RomCenter,
        OutputFormat::SabreDat,
        OutputFormat::Csv,
        OutputFormat::Tsv,
        OutputFormat::Sfv,
        OutputFormat::Md5,
        OutputFormat::Sha1,
    ];

    /// Lowercase identifier, as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Logiqx => "logiqx",
            Self::ClrMamePro => "clrmamepro",
            Self::RomCenter => "romcenter",
            Self::SabreDat => "sabredat",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Sfv => "sfv",
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
        }
    }

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Logiqx | Self::SabreDat => "xml",
            Self::ClrMamePro | Self::RomCenter => "dat",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Sfv => "sfv",
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if let Some(format) = Self::ALL.iter().find(|f| f.name() == lower) {
            return Ok(*format);
        }
        match lower.as_str() {
            "xml" => Ok(Self::Logiqx),
            "cmp" => Ok(Self::ClrMamePro),
            "rc" => Ok(Self::RomCenter),
            "sd" => Ok(Self::SabreDat),
            _ => Err(FormatError::unknown_format(s)),
        }
    }
}

/// Non-empty buckets in numeric-aware key order.
pub(crate) fn ordered_buckets(buckets: &BTreeMap<String, Vec<Record>>) -> Vec<&[Record]> {
    let mut keys: Vec<&String> = buckets.keys().collect();
    keys.sort_by(|a, b| natural_cmp(a, b));
    keys.into_iter()
        .filter_map(|key| buckets.get(key))
        .filter(|records| !records.is_empty())
        .map(Vec::as_slice)
        .collect()
}

/// Serialize a machine-bucketed catalog in `format`.
///
/// Every record in a bucket is written under the machine of the bucket's
/// first record.
pub fn write_catalog<W: Write>(
    format: OutputFormat,
    header: &CatalogHeader,
    buckets: &BTreeMap<String, Vec<Record>>,
    writer: W,
) -> Result<(), FormatError> {
    let machines = ordered_buckets(buckets);
    match format {
        OutputFormat::Logiqx => logiqx::write(header, &machines, writer),
        OutputFormat::SabreDat => sabredat::write(header, &machines, writer),
        OutputFormat::ClrMamePro => clrmamepro::write(header, &machines, writer),
        OutputFormat::RomCenter => romcenter::write(header, &machines, writer),
        OutputFormat::Csv => listing::write_separated(header, &machines, b',', writer),
        OutputFormat::Tsv => listing::write_separated(header, &machines, b'\t', writer),
        OutputFormat::Sfv => listing::write_checksums(listing::Checksum::Crc, &machines, writer),
        OutputFormat::Md5 => listing::write_checksums(listing::Checksum::Md5, &machines, writer),
        OutputFormat::Sha1 => listing::write_checksums(listing::Checksum::Sha1, &machines, writer),
    }
}
