//! Raw registry blocks and their classification

use crate::registry::Source;

/// Name of the synthetic attribute carrying the dump's registry tag
pub const SOURCE_ATTRIBUTE: &str = "cust_source";

/// Kind of object a block holds, decided by its first line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// ARIN organization object (`OrgID:`)
    Organization,
    /// ARIN network object (`NetHandle:` / `V6NetHandle:`)
    Network,
    /// RPSL object holding an address range (`inetnum:`, `route:`, ...)
    FreeText,
}

impl RecordKind {
    const ORGANIZATION_STARTS: &'static [&'static str] = &["OrgID:"];
    const NETWORK_STARTS: &'static [&'static str] = &["NetHandle:", "V6NetHandle:"];
    const FREE_TEXT_STARTS: &'static [&'static str] =
        &["inetnum:", "inet6num:", "route:", "route6:", "route-set:"];

    /// Classify a block by its first line; `None` for objects we do not keep
    pub fn classify(first_line: &str) -> Option<Self> {
        let starts_with_any =
            |prefixes: &[&str]| prefixes.iter().any(|prefix| first_line.starts_with(prefix));

        if starts_with_any(Self::ORGANIZATION_STARTS) {
            Some(RecordKind::Organization)
        } else if starts_with_any(Self::NETWORK_STARTS) {
            Some(RecordKind::Network)
        } else if starts_with_any(Self::FREE_TEXT_STARTS) {
            Some(RecordKind::FreeText)
        } else {
            None
        }
    }
}

/// One logical record from a dump, comments removed
#[derive(Debug, Clone)]
pub struct RawBlock {
    pub source: Source,
    pub kind: RecordKind,
    pub lines: Vec<String>,
}

impl RawBlock {
    /// Finalize accumulated lines into a block, appending the source attribute
    ///
    /// Returns `None` when the first line does not start a kept record.
    pub fn finalize(source: Source, mut lines: Vec<String>) -> Option<Self> {
        let kind = RecordKind::classify(lines.first()?)?;
        lines.push(format!("{}: {}", SOURCE_ATTRIBUTE, source));
        Some(Self { source, kind, lines })
    }

    /// First line, used to identify the block in log messages
    pub fn first_line(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or_default()
    }

    /// Full block text, one attribute line per line
    pub fn body(&self) -> String {
        self.lines.join("\n")
    }
}
