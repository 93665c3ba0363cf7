//! Address range normalization
//!
//! Converts the range notations found in registry dumps into canonical CIDR
//! strings:
//!
//! - start-end pairs (`192.168.0.0 - 192.168.1.255`) become the minimal set of
//!   aligned blocks covering exactly that range, for IPv4 and IPv6
//! - IPv6 CIDR literals are validated and returned unchanged
//! - truncated IPv4 CIDR literals (`1.0/16`) are padded to four octets
//!
//! Nothing that fails validation is ever returned; callers get an
//! [`NetblockError::InvalidRange`] instead.

use crate::error::{NetblockError, Result};
use crate::regex::{find_ipv4_range, find_ipv6_range, split_ipv4_cidr};
use ipnetwork::{Ipv4Network, Ipv6Network};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Normalize any supported range notation into one or more CIDR strings
///
/// A start-end pair anywhere in the text takes precedence; only the first
/// pair is used. Otherwise the text must be a single CIDR literal.
pub fn normalize(text: &str) -> Result<Vec<String>> {
    let text = text.trim();

    if let Some((start, end)) = find_ipv4_range(text) {
        return ipv4_range_to_cidrs(&start, &end);
    }
    if let Some((start, end)) = find_ipv6_range(text) {
        return ipv6_range_to_cidrs(&start, &end);
    }

    normalize_cidr(text).map(|cidr| vec![cidr])
}

/// Normalize a start-end pair only, as used by the non-RPSL network objects
pub fn normalize_start_end(text: &str) -> Result<Vec<String>> {
    if let Some((start, end)) = find_ipv4_range(text) {
        return ipv4_range_to_cidrs(&start, &end);
    }
    if let Some((start, end)) = find_ipv6_range(text) {
        return ipv6_range_to_cidrs(&start, &end);
    }
    Err(NetblockError::range(text))
}

/// Validate a single CIDR literal, expanding truncated IPv4 shorthand
pub fn normalize_cidr(text: &str) -> Result<String> {
    if let Some((addr, prefix)) = split_ipv4_cidr(text) {
        let octets = addr.split('.').count();
        let cidr = if octets < 4 {
            format!("{}{}/{}", addr, ".0".repeat(4 - octets), prefix)
        } else {
            text.to_string()
        };
        return match cidr.parse::<Ipv4Network>() {
            Ok(_) => Ok(cidr),
            Err(_) => Err(NetblockError::range(text)),
        };
    }

    if text.contains(':') && text.contains('/') && text.parse::<Ipv6Network>().is_ok() {
        return Ok(text.to_string());
    }

    Err(NetblockError::range(text))
}

/// Minimal covering CIDR set for an inclusive IPv4 range
pub fn ipv4_range_to_cidrs(start: &str, end: &str) -> Result<Vec<String>> {
    let (first, last) = match (start.parse::<Ipv4Addr>(), end.parse::<Ipv4Addr>()) {
        (Ok(first), Ok(last)) => (u32::from(first), u32::from(last)),
        _ => return Err(NetblockError::range(format!("{} - {}", start, end))),
    };
    if last < first {
        return Err(NetblockError::range(format!("{} - {}", start, end)));
    }

    covering_blocks(first as u128, last as u128, 32)
        .into_iter()
        .map(|(network, prefix)| {
            Ipv4Network::new(Ipv4Addr::from(network as u32), prefix)
                .map(|net| net.to_string())
                .map_err(|e| NetblockError::range(e.to_string()))
        })
        .collect()
}

/// Minimal covering CIDR set for an inclusive IPv6 range
pub fn ipv6_range_to_cidrs(start: &str, end: &str) -> Result<Vec<String>> {
    let (first, last) = match (start.parse::<Ipv6Addr>(), end.parse::<Ipv6Addr>()) {
        (Ok(first), Ok(last)) => (u128::from(first), u128::from(last)),
        _ => return Err(NetblockError::range(format!("{} - {}", start, end))),
    };
    if last < first {
        return Err(NetblockError::range(format!("{} - {}", start, end)));
    }

    covering_blocks(first, last, 128)
        .into_iter()
        .map(|(network, prefix)| {
            Ipv6Network::new(Ipv6Addr::from(network), prefix)
                .map(|net| net.to_string())
                .map_err(|e| NetblockError::range(e.to_string()))
        })
        .collect()
}

/// Split `[first, last]` into the fewest aligned blocks, in ascending order
///
/// Returns `(network, prefix_len)` pairs for an address space of `bits` bits.
/// `ipnetwork` has no range-to-subnets iterator, so the split is done on the
/// integer form and `ipnetwork` only builds and formats the resulting blocks.
fn covering_blocks(first: u128, last: u128, bits: u32) -> Vec<(u128, u8)> {
    let mut blocks = Vec::new();
    let mut current = first;

    loop {
        // Largest block aligned on `current`, shrunk until it ends inside the range.
        let mut host_bits = if current == 0 {
            bits
        } else {
            current.trailing_zeros().min(bits)
        };
        let mut span = host_mask(host_bits);
        while current + span > last {
            host_bits -= 1;
            span = host_mask(host_bits);
        }

        blocks.push((current, (bits - host_bits) as u8));

        let block_end = current + span;
        if block_end >= last {
            break;
        }
        current = block_end + 1;
    }

    blocks
}

fn host_mask(host_bits: u32) -> u128 {
    if host_bits >= 128 {
        u128::MAX
    } else {
        (1u128 << host_bits) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v4(addr: &str) -> u32 {
        u32::from(addr.parse::<Ipv4Addr>().unwrap())
    }

    /// Checks that blocks are aligned, ascending, gapless and exactly cover the range
    fn assert_exact_cover(start: &str, end: &str, cidrs: &[String]) {
        let mut expected = v4(start) as u64;
        for cidr in cidrs {
            let net: Ipv4Network = cidr.parse().unwrap();
            let network = u32::from(net.network()) as u64;
            assert_eq!(network, u32::from(net.ip()) as u64, "unaligned block {}", cidr);
            assert_eq!(network, expected, "gap or overlap at {}", cidr);
            expected = network + (1u64 << (32 - net.prefix()));
        }
        assert_eq!(expected, v4(end) as u64 + 1);
    }

    #[test]
    fn test_overlong_octet_is_rejected() {
        assert!(normalize("10.0.0.0 - 10.0.0.2555").is_err());
        assert!(normalize("1110.0.0.0 - 1.0.0.255").is_err());
        assert!(normalize_start_end("10.0.0.0 - 10.0.0.2555").is_err());
    }

    #[test]
    fn test_aligned_range_single_block() {
        let cidrs = normalize("192.168.0.0 - 192.168.1.255").unwrap();
        assert_eq!(cidrs, vec!["192.168.0.0/23"]);
    }

    #[test]
    fn test_single_address_range() {
        let cidrs = normalize("10.0.0.1 - 10.0.0.1").unwrap();
        assert_eq!(cidrs, vec!["10.0.0.1/32"]);
    }

    #[test]
    fn test_unaligned_range_splits() {
        let cidrs = ipv4_range_to_cidrs("10.0.0.1", "10.0.0.10").unwrap();
        assert_eq!(
            cidrs,
            vec!["10.0.0.1/32", "10.0.0.2/31", "10.0.0.4/30", "10.0.0.8/31", "10.0.0.10/32"]
        );
        assert_exact_cover("10.0.0.1", "10.0.0.10", &cidrs);
    }

    #[test]
    fn test_exact_cover_on_awkward_ranges() {
        let ranges = [
            ("0.0.0.0", "255.255.255.255"),
            ("41.0.0.0", "41.31.255.255"),
            ("196.1.0.0", "196.1.3.127"),
            ("203.0.113.7", "203.0.114.200"),
            ("255.255.255.0", "255.255.255.255"),
        ];
        for (start, end) in ranges {
            let cidrs = ipv4_range_to_cidrs(start, end).unwrap();
            assert_exact_cover(start, end, &cidrs);
        }
    }

    #[test]
    fn test_whole_address_space() {
        assert_eq!(
            ipv4_range_to_cidrs("0.0.0.0", "255.255.255.255").unwrap(),
            vec!["0.0.0.0/0"]
        );
        assert_eq!(
            ipv6_range_to_cidrs("::", "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff").unwrap(),
            vec!["::/0"]
        );
    }

    #[test]
    fn test_reversed_range_rejected() {
        assert!(ipv4_range_to_cidrs("10.0.0.10", "10.0.0.1").is_err());
    }

    #[test]
    fn test_invalid_octet_rejected() {
        assert!(normalize("10.0.0.0 - 10.0.0.300").is_err());
    }

    #[test]
    fn test_ipv6_range() {
        let cidrs = normalize("2001:db8:: - 2001:db8:0:ffff:ffff:ffff:ffff:ffff").unwrap();
        assert_eq!(cidrs, vec!["2001:db8::/48"]);
    }

    #[test]
    fn test_ipv6_cidr_unchanged() {
        assert_eq!(normalize("2001:DB8::/32").unwrap(), vec!["2001:DB8::/32"]);
    }

    #[test]
    fn test_shorthand_expansion() {
        assert_eq!(normalize("1.0/16").unwrap(), vec!["1.0.0.0/16"]);
        assert_eq!(normalize("1.0.0/24").unwrap(), vec!["1.0.0.0/24"]);
        assert_eq!(normalize("1/8").unwrap(), vec!["1.0.0.0/8"]);
        assert_eq!(normalize("1.0.0.0/8").unwrap(), vec!["1.0.0.0/8"]);
    }

    #[test]
    fn test_bad_prefix_length_rejected() {
        assert!(normalize("1.0/33").is_err());
    }

    #[test]
    fn test_unparseable_input() {
        assert!(normalize("RS-EXAMPLE").is_err());
        assert!(normalize("").is_err());
        assert!(normalize("AS65000").is_err());
    }

    #[test]
    fn test_start_end_only() {
        assert!(normalize_start_end("8.0.0.0 - 8.255.255.255").is_ok());
        assert!(normalize_start_end("8.0.0.0/8").is_err());
    }
}
