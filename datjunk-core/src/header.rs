//! Catalog header metadata and its enumerated `force*` vocabularies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// ClrMamePro `forcemerging` header value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForceMerging {
    #[default]
    None,
    Split,
    Full,
}

/// ClrMamePro `forcenodump` header value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForceNodump {
    #[default]
    None,
    Obsolete,
    Required,
    Ignore,
}

/// ClrMamePro `forcepacking` header value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForcePacking {
    #[default]
    None,
    Zip,
    Unzip,
}

macro_rules! header_token {
    ($ty:ident, $field:literal, { $($variant:ident => $token:literal),+ $(,)? }) => {
        impl $ty {
            /// Header token, or `None` when the value is unset.
            pub fn token(self) -> Option<&'static str> {
                match self {
                    Self::None => None,
                    $(Self::$variant => Some($token),)+
                }
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    "" | "none" => Ok(Self::None),
                    $($token => Ok(Self::$variant),)+
                    _ => Err(CoreError::unknown_token($field, s)),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.token().unwrap_or("none"))
            }
        }
    };
}

header_token!(ForceMerging, "forcemerging", { Split => "split", Full => "full" });
header_token!(ForceNodump, "forcenodump", {
    Obsolete => "obsolete",
    Required => "required",
    Ignore => "ignore",
});
header_token!(ForcePacking, "forcepacking", { Zip => "zip", Unzip => "unzip" });

/// Descriptive metadata for a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogHeader {
    pub name: String,
    pub description: String,
    pub category: String,
    pub version: String,
    pub date: String,
    pub author: String,
    pub email: String,
    pub homepage: String,
    pub url: String,
    pub comment: String,
    /// Machine names encode a directory hierarchy.
    pub is_superdat: bool,
    pub force_merging: ForceMerging,
    pub force_nodump: ForceNodump,
    pub force_packing: ForcePacking,
    /// Merge each machine's items before writing.
    pub dedupe_on_write: bool,
}

impl CatalogHeader {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            description: name.clone(),
            name,
            ..Self::default()
        }
    }

    /// Copy of this header with `suffix` appended to name and description.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        let mut header = self.clone();
        header.name.push_str(suffix);
        header.description.push_str(suffix);
        header
    }
}
