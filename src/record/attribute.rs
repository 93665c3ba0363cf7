//! Attribute extraction from raw record bodies
//!
//! Registry objects are `name: value` lines. An attribute may repeat, in
//! which case its values are joined into one whitespace-normalized string,
//! or it may be a list (route-set members) whose values must stay apart.

/// Value of a parsed attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Attribute seen once
    Single(String),
    /// Attribute repeated, or a list attribute split on commas
    Many(Vec<String>),
}

impl AttrValue {
    /// All values joined with single spaces, empty values dropped
    pub fn joined(&self) -> String {
        match self {
            AttrValue::Single(value) => collapse_whitespace(value),
            AttrValue::Many(values) => join_values(values.iter().map(String::as_str)),
        }
    }

    /// First non-empty value
    pub fn first(&self) -> Option<&str> {
        match self {
            AttrValue::Single(value) => Some(value.trim()).filter(|v| !v.is_empty()),
            AttrValue::Many(values) => values.iter().map(|v| v.trim()).find(|v| !v.is_empty()),
        }
    }

    /// Individual values, in order of appearance
    pub fn values(&self) -> Vec<&str> {
        match self {
            AttrValue::Single(value) => vec![value.as_str()],
            AttrValue::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, AttrValue::Many(_))
    }
}

/// Extract an attribute from a raw record body
///
/// Every line of the form `name: value` contributes, with `name` matched
/// case-sensitively. Values are trimmed, empty ones discarded, the rest
/// joined with a space and any whitespace run collapsed. Returns `None` when
/// no line carries the attribute.
pub fn extract(body: &str, name: &str) -> Option<String> {
    let mut found = false;
    let values = body.lines().filter_map(|line| {
        let value = line.strip_prefix(name)?.strip_prefix(':')?;
        found = true;
        Some(value)
    });
    let joined = join_values(values);

    if found { Some(joined) } else { None }
}

/// Extract an attribute, rendering an absent one as the empty string
pub fn extract_or_empty(body: &str, name: &str) -> String {
    extract(body, name).unwrap_or_default()
}

fn join_values<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let parts: Vec<&str> = values.map(str::trim).filter(|v| !v.is_empty()).collect();
    collapse_whitespace(&parts.join(" "))
}

/// Collapse every run of whitespace (tabs included) into a single space
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "inetnum: 193.0.0.0 - 193.0.7.255\n\
                        netname: RIPE-NCC\n\
                        descr:   RIPE Network\t Coordination Centre  \n\
                        descr:\n\
                        descr: \tAmsterdam,\t\tNetherlands\n\
                        country: NL\n";

    #[test]
    fn test_extract_single() {
        assert_eq!(extract(BODY, "netname").as_deref(), Some("RIPE-NCC"));
    }

    #[test]
    fn test_extract_joins_and_collapses() {
        assert_eq!(
            extract(BODY, "descr").as_deref(),
            Some("RIPE Network Coordination Centre Amsterdam, Netherlands")
        );
    }

    #[test]
    fn test_extract_is_idempotent() {
        let once = extract(BODY, "descr").unwrap();
        let again = extract(&format!("descr: {}\n", once), "descr").unwrap();
        assert_eq!(once, again);
    }

    #[test]
    fn test_absent_vs_empty() {
        assert_eq!(extract(BODY, "mnt-by"), None);
        assert_eq!(extract("remarks:\n", "remarks").as_deref(), Some(""));
        assert_eq!(extract_or_empty(BODY, "mnt-by"), "");
    }

    #[test]
    fn test_name_match_is_exact() {
        // "inetnum" must not match "inet6num", nor "netname" match "netname-x"
        let body = "inet6num: 2001:db8::/32\nnetname-x: foo\n";
        assert_eq!(extract(body, "inetnum"), None);
        assert_eq!(extract(body, "netname"), None);
        assert_eq!(extract(body, "Netname"), None);
    }

    #[test]
    fn test_attr_value_joined() {
        let many = AttrValue::Many(vec!["a\tb".to_string(), "".to_string(), " c ".to_string()]);
        assert_eq!(many.joined(), "a b c");
        assert_eq!(AttrValue::Single("  x   y ".to_string()).joined(), "x y");
    }

    #[test]
    fn test_attr_value_first() {
        let many = AttrValue::Many(vec![" ".to_string(), "10.0.0.0/8".to_string()]);
        assert_eq!(many.first(), Some("10.0.0.0/8"));
        assert_eq!(AttrValue::Single(String::new()).first(), None);
    }
}
