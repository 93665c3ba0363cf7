//! Organization lookup for ARIN network objects
//!
//! ARIN keeps customer data in separate `OrgID:` objects; network objects
//! only reference them. The table lives for one dump file.

use crate::error::{NetblockError, Result};
use std::collections::HashMap;

/// Organization name and country registered under an OrgID
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrgEntry {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Default)]
pub struct OrgResolver {
    entries: HashMap<String, OrgEntry>,
}

impl OrgResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an organization, replacing any earlier entry for the same OrgID
    pub fn register(&mut self, org_id: &str, name: String, country: String) {
        self.entries
            .insert(org_id.to_string(), OrgEntry { name, country });
    }

    pub fn resolve(&self, org_id: &str) -> Result<&OrgEntry> {
        self.entries
            .get(org_id)
            .ok_or_else(|| NetblockError::OrgNotFound(org_id.to_string()))
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_resolve() {
        let mut orgs = OrgResolver::new();
        orgs.register("ORG-A", "Example Inc".to_string(), "US".to_string());
        let entry = orgs.resolve("ORG-A").unwrap();
        assert_eq!(entry.name, "Example Inc");
        assert_eq!(entry.country, "US");
    }

    #[test]
    fn test_last_write_wins() {
        let mut orgs = OrgResolver::new();
        orgs.register("ORG-A", "Old".to_string(), "US".to_string());
        orgs.register("ORG-A", "New".to_string(), "CA".to_string());
        assert_eq!(orgs.len(), 1);
        assert_eq!(orgs.resolve("ORG-A").unwrap().name, "New");
    }

    #[test]
    fn test_miss_and_reset() {
        let mut orgs = OrgResolver::new();
        assert!(matches!(orgs.resolve("ORG-A"), Err(NetblockError::OrgNotFound(_))));

        orgs.register("ORG-A", "Example".to_string(), "US".to_string());
        orgs.reset();
        assert!(orgs.is_empty());
        assert!(orgs.resolve("ORG-A").is_err());
    }
}
