//! Key/value field lists shared by every codec.
//!
//! XML attributes and ClrMamePro token pairs both reduce to an ordered list
//! of `(key, value)` strings, so item construction and item serialization
//! are written once here.

use datjunk_core::{Archive, BiosSet, Disk, Item, ItemKind, Release, Rom, Sample};
use datjunk_core::item::SIZE_UNKNOWN;

#[derive(Debug, Clone, Default)]
pub(crate) struct Fields(Vec<(String, String)>);

impl Fields {
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Build from alternating key/value tokens; a trailing key is dropped.
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        let mut fields = Self::default();
        let mut iter = tokens.into_iter();
        while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
            fields.push(key.to_ascii_lowercase(), value);
        }
        fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Non-empty value for `key`.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key)?.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "1" => Some(true),
            "no" | "false" | "0" => Some(false),
            _ => None,
        }
    }

    fn is_nodump(&self) -> bool {
        ["status", "flags"]
            .iter()
            .any(|key| self.get(key).is_some_and(|v| v.eq_ignore_ascii_case("nodump")))
    }

    /// Construct an item of `kind`. Fails with a reason when a field is
    /// present but unusable.
    pub fn to_item(&self, kind: ItemKind) -> Result<Item, String> {
        let name = self.get("name").unwrap_or_default().to_string();
        let item = match kind {
            ItemKind::Rom => Item::Rom(Rom {
                name,
                size: parse_size(self.get("size"))?,
                crc: self.text("crc"),
                md5: self.text("md5"),
                sha1: self.text("sha1"),
                date: self.text("date"),
                nodump: self.is_nodump(),
            }),
            ItemKind::Disk => Item::Disk(Disk {
                name,
                md5: self.text("md5"),
                sha1: self.text("sha1"),
                nodump: self.is_nodump(),
            }),
            ItemKind::Release => Item::Release(Release {
                name,
                region: self.text("region"),
                language: self.text("language"),
                date: self.text("date"),
                is_default: self.flag("default"),
            }),
            ItemKind::BiosSet => Item::BiosSet(BiosSet {
                name,
                description: self.text("description"),
                is_default: self.flag("default"),
            }),
            ItemKind::Sample => Item::Sample(Sample { name }),
            ItemKind::Archive => Item::Archive(Archive { name }),
        };
        Ok(item)
    }
}

/// Parse a size field. Absent or blank means unknown; `0x` prefixes are hex.
pub(crate) fn parse_size(raw: Option<&str>) -> Result<i64, String> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(SIZE_UNKNOWN);
    };
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => raw.parse::<i64>(),
    };
    match parsed {
        Ok(size) if size >= SIZE_UNKNOWN => Ok(size),
        _ => Err(format!("invalid size '{raw}'")),
    }
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

/// Serializable fields of an item, in conventional attribute order.
/// Unset values are omitted.
pub(crate) fn item_fields(item: &Item) -> Vec<(&'static str, String)> {
    let mut fields = vec![("name", item.name().to_string())];
    let mut opt = |key: &'static str, value: Option<&str>| {
        if let Some(value) = value {
            fields.push((key, value.to_string()));
        }
    };
    match item {
        Item::Rom(rom) => {
            if rom.size >= 0 {
                opt("size", Some(&rom.size.to_string()));
            }
            opt("crc", rom.crc.as_deref());
            opt("md5", rom.md5.as_deref());
            opt("sha1", rom.sha1.as_deref());
            opt("date", rom.date.as_deref());
            if rom.nodump {
                opt("status", Some("nodump"));
            }
        }
        Item::Disk(disk) => {
            opt("md5", disk.md5.as_deref());
            opt("sha1", disk.sha1.as_deref());
            if disk.nodump {
                opt("status", Some("nodump"));
            }
        }
        Item::Release(release) => {
            opt("region", release.region.as_deref());
            opt("language", release.language.as_deref());
            opt("date", release.date.as_deref());
            opt("default", release.is_default.map(yes_no).as_deref());
        }
        Item::BiosSet(bios) => {
            opt("description", bios.description.as_deref());
            opt("default", bios.is_default.map(yes_no).as_deref());
        }
        Item::Sample(_) | Item::Archive(_) => {}
    }
    fields
}
