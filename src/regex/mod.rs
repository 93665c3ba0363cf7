//! Regular expressions for recognising address-range notations
//!
//! This module provides pre-compiled regular expressions for the range
//! notations found in registry dumps: start-end pairs for both address
//! families and (possibly truncated) IPv4 CIDR literals.

use once_cell::sync::Lazy;
use regex::Regex;

/// IPv4 start-end range
/// Matches ranges like `192.168.0.0 - 192.168.1.255` anywhere in the text.
/// Neither address may run on into further digits or dots.
pub static IPV4_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\d.])((?:\d{1,3}\.){3}\d{1,3})\s*-\s*((?:\d{1,3}\.){3}\d{1,3})(?:$|[^\d.])")
        .expect("Failed to compile IPv4 range regex")
});

/// IPv6 start-end range
/// Matches ranges like `2001:db8:: - 2001:db8::ffff`, bounded like the IPv4 one
pub static IPV6_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:^|[^0-9a-fA-F:.])([0-9a-fA-F]*:[0-9a-fA-F:.]*)\s*-\s*([0-9a-fA-F]*:[0-9a-fA-F:.]*)(?:$|[^0-9a-fA-F:.])",
    )
    .expect("Failed to compile IPv6 range regex")
});

/// IPv4 CIDR literal with one to four octets
/// Matches `1.0.0.0/8` as well as the truncated `1.0/16` and `1/8`
pub static IPV4_CIDR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((?:\d{1,3}\.){0,3}\d{1,3})/(\d{1,2})$")
        .expect("Failed to compile IPv4 CIDR regex")
});

/// RPSL range operator suffix on a route-set member
/// Matches `^-`, `^+`, `^24` and `^24-32`
pub static RANGE_OPERATOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\^(?:[-+]|\d{1,3}(?:-\d{1,3})?)$")
        .expect("Failed to compile range operator regex")
});

/// Find the first IPv4 start-end pair in text
pub fn find_ipv4_range(text: &str) -> Option<(String, String)> {
    IPV4_RANGE_RE
        .captures(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
}

/// Find the first IPv6 start-end pair in text
pub fn find_ipv6_range(text: &str) -> Option<(String, String)> {
    IPV6_RANGE_RE
        .captures(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
}

/// Split an IPv4 CIDR literal into its (possibly truncated) address and prefix length
pub fn split_ipv4_cidr(text: &str) -> Option<(String, String)> {
    IPV4_CIDR_RE
        .captures(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
}

/// Remove a trailing RPSL range operator from a prefix
pub fn strip_range_operator(text: &str) -> &str {
    match RANGE_OPERATOR_RE.find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_range_regex() {
        let range = find_ipv4_range("193.0.0.0 - 193.0.7.255").unwrap();
        assert_eq!(range.0, "193.0.0.0");
        assert_eq!(range.1, "193.0.7.255");
    }

    #[test]
    fn test_ipv4_range_without_spaces() {
        let range = find_ipv4_range("10.0.0.0-10.0.0.255").unwrap();
        assert_eq!(range, ("10.0.0.0".to_string(), "10.0.0.255".to_string()));
    }

    #[test]
    fn test_ipv4_range_first_match_only() {
        let range = find_ipv4_range("1.0.0.0 - 1.0.0.255, 2.0.0.0 - 2.0.0.255").unwrap();
        assert_eq!(range.0, "1.0.0.0");
    }

    #[test]
    fn test_ipv4_range_rejects_overlong_octets() {
        assert!(find_ipv4_range("10.0.0.0 - 10.0.0.2555").is_none());
        assert!(find_ipv4_range("1110.0.0.0 - 1.0.0.255").is_none());
        assert!(find_ipv4_range("10.0.0.0 - 10.0.0.255.1").is_none());
    }

    #[test]
    fn test_ipv4_range_inside_text() {
        let range = find_ipv4_range("block (10.0.0.0 - 10.0.0.255) assigned").unwrap();
        assert_eq!(range, ("10.0.0.0".to_string(), "10.0.0.255".to_string()));
    }

    #[test]
    fn test_ipv6_range_regex() {
        let range = find_ipv6_range("2001:db8:: - 2001:db8:0:ffff:ffff:ffff:ffff:ffff").unwrap();
        assert_eq!(range.0, "2001:db8::");
        assert_eq!(range.1, "2001:db8:0:ffff:ffff:ffff:ffff:ffff");
    }

    #[test]
    fn test_ipv6_cidr_is_not_a_range() {
        assert!(find_ipv6_range("2001:db8::/32").is_none());
    }

    #[test]
    fn test_ipv4_cidr_regex() {
        assert_eq!(
            split_ipv4_cidr("1.0/16"),
            Some(("1.0".to_string(), "16".to_string()))
        );
        assert!(split_ipv4_cidr("1.0.0.0.0/8").is_none());
        assert!(split_ipv4_cidr("2001:db8::/32").is_none());
    }

    #[test]
    fn test_strip_range_operator() {
        assert_eq!(strip_range_operator("10.0.0.0/8^+"), "10.0.0.0/8");
        assert_eq!(strip_range_operator("10.0.0.0/8^24-32"), "10.0.0.0/8");
        assert_eq!(strip_range_operator("10.0.0.0/8"), "10.0.0.0/8");
    }
}
