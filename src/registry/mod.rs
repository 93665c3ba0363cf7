//! Registry vocabulary
//!
//! Every dump file belongs to exactly one registry, derived from the file
//! name prefix. The registry also decides which record schema its dump uses.

use crate::error::{NetblockError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Registry that produced a dump file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Afrinic,
    Apnic,
    Arin,
    Lacnic,
    Ripe,
    Level3,
    Nttcom,
    Radb,
    Tc,
}

/// Record schema used by a registry's dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// RPSL-like `name: value` objects (inetnum, route, route-set, ...)
    Rpsl,
    /// ARIN bulk format with separate organization and network objects
    OrgNet,
}

impl Source {
    pub const ALL: [Source; 9] = [
        Source::Afrinic,
        Source::Apnic,
        Source::Arin,
        Source::Lacnic,
        Source::Ripe,
        Source::Level3,
        Source::Nttcom,
        Source::Radb,
        Source::Tc,
    ];

    /// Lowercase tag written to the output
    pub fn tag(&self) -> &'static str {
        match self {
            Source::Afrinic => "afrinic",
            Source::Apnic => "apnic",
            Source::Arin => "arin",
            Source::Lacnic => "lacnic",
            Source::Ripe => "ripe",
            Source::Level3 => "level3",
            Source::Nttcom => "nttcom",
            Source::Radb => "radb",
            Source::Tc => "tc",
        }
    }

    pub fn schema(&self) -> Schema {
        match self {
            Source::Arin => Schema::OrgNet,
            _ => Schema::Rpsl,
        }
    }

    /// Determine the registry from a dump file name such as `ripe.db.inetnum.gz`
    ///
    /// Only the final path component is considered.
    pub fn from_filename(filename: &str) -> Result<Self> {
        let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
        let lower = name.to_ascii_lowercase();

        Source::ALL
            .into_iter()
            .find(|source| lower.starts_with(source.tag()))
            .ok_or_else(|| NetblockError::UnknownSource(filename.to_string()))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Source {
    type Err = NetblockError;

    /// Parse an exact tag, case-insensitively (`RIPE` -> `ripe`)
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Source::ALL
            .into_iter()
            .find(|source| source.tag() == lower)
            .ok_or_else(|| NetblockError::UnknownSource(s.to_string()))
    }
}
