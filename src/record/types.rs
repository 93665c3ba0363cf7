//! Output record type

use crate::registry::Source;
use serde::Serialize;

/// One output row: a CIDR block and its ownership metadata
///
/// Field order is the TSV column order. Every field except `cidr` and
/// `source` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    pub cidr: String,
    pub netname: String,
    pub description: String,
    pub country: String,
    pub maintained_by: String,
    pub created: String,
    pub last_modified: String,
    pub source: Source,
}

/// Record fields shared by every CIDR a block fans out to
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordTemplate {
    pub netname: String,
    pub description: String,
    pub country: String,
    pub maintained_by: String,
    pub created: String,
    pub last_modified: String,
}

impl RecordTemplate {
    /// One record per CIDR, in the given order
    pub fn fan_out(&self, cidrs: Vec<String>, source: Source) -> Vec<NormalizedRecord> {
        cidrs
            .into_iter()
            .map(|cidr| NormalizedRecord {
                cidr,
                netname: self.netname.clone(),
                description: self.description.clone(),
                country: self.country.clone(),
                maintained_by: self.maintained_by.clone(),
                created: self.created.clone(),
                last_modified: self.last_modified.clone(),
                source,
            })
            .collect()
    }
}
