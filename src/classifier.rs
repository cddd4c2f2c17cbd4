/* src/classifier.rs */

use std::net::Ipv4Addr;

use crate::error::{IpUtilError, Result};

/// IPv4 loopback address, the canonical form loopback is normalized to.
pub const IPV4_LOOPBACK: &str = "127.0.0.1";

/// IPv6 loopback in compressed form.
pub const IPV6_LOOPBACK_SHORT: &str = "::1";

/// IPv6 loopback with all eight groups written out.
pub const IPV6_LOOPBACK_FULL: &str = "0:0:0:0:0:0:0:1";

/// Private IPv4 blocks, matched by literal prefix.
const PRIVATE_IPV4_PREFIXES: [&str; 3] = ["192.168.", "10.", "172.16."];

const IPV4_MAPPED_PREFIX: &str = "::ffff:";
const SIX_TO_FOUR_PREFIX: &str = "2002:";

/// Check whether `ip` is a loopback or private address.
///
/// Recognizes `127.0.0.1`, both IPv6 loopback forms, and the `192.168.*.*`,
/// `10.*.*.*` and `172.16.*.*` blocks. Only the literal `172.16.` prefix is
/// matched, not the whole `172.16.0.0/12` range.
///
/// # Examples
///
/// ```rust
/// use ip_util::is_local_ip;
///
/// assert!(is_local_ip("192.168.1.1"));
/// assert!(is_local_ip("::1"));
/// assert!(!is_local_ip("8.8.8.8"));
/// ```
pub fn is_local_ip(ip: &str) -> bool {
    is_loopback(ip)
        || PRIVATE_IPV4_PREFIXES
            .iter()
            .any(|prefix| ip.starts_with(prefix))
}

/// Check whether `ip` is an IPv6 form that carries an IPv4 address.
///
/// Accepts the full-form loopback `0:0:0:0:0:0:0:1`, IPv4-mapped addresses
/// (`::ffff:a.b.c.d`) and 6to4 addresses (`2002:xxxx:xxxx::`). The short
/// loopback `::1` is not accepted.
pub fn is_convertible_ipv6(ip: &str) -> bool {
    ip == IPV6_LOOPBACK_FULL
        || ipv4_mapped_suffix(ip).is_some()
        || six_to_four_groups(ip).is_some()
}

/// Replace either IPv6 loopback spelling with `127.0.0.1`. Anything else is
/// returned unchanged.
pub fn normalize_loopback(ip: &str) -> &str {
    if ip == IPV6_LOOPBACK_SHORT || ip == IPV6_LOOPBACK_FULL {
        IPV4_LOOPBACK
    } else {
        ip
    }
}

/// Extract the IPv4 address carried by a convertible IPv6 form.
///
/// # Examples
///
/// ```rust
/// use ip_util::convert_to_ipv4;
/// use std::net::Ipv4Addr;
///
/// assert_eq!(convert_to_ipv4("2002:c0a8:0101::").unwrap(), Ipv4Addr::new(192, 168, 1, 1));
/// assert!(convert_to_ipv4("::1").is_err());
/// ```
pub fn convert_to_ipv4(ip: &str) -> Result<Ipv4Addr> {
    if ip == IPV6_LOOPBACK_FULL {
        return Ok(Ipv4Addr::LOCALHOST);
    }

    if let Some(quad) = ipv4_mapped_suffix(ip) {
        return quad
            .parse::<Ipv4Addr>()
            .map_err(|_| IpUtilError::InvalidIpFormat(ip.to_string()));
    }

    if let Some((high, low)) = six_to_four_groups(ip) {
        let [a, b] = high.to_be_bytes();
        let [c, d] = low.to_be_bytes();
        return Ok(Ipv4Addr::new(a, b, c, d));
    }

    Err(IpUtilError::NotConvertible(ip.to_string()))
}

fn is_loopback(ip: &str) -> bool {
    ip == IPV4_LOOPBACK || ip == IPV6_LOOPBACK_SHORT || ip == IPV6_LOOPBACK_FULL
}

/// Returns the dotted-quad part of `::ffff:a.b.c.d`.
fn ipv4_mapped_suffix(ip: &str) -> Option<&str> {
    let prefix = ip.get(..IPV4_MAPPED_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(IPV4_MAPPED_PREFIX) {
        return None;
    }

    let quad = &ip[IPV4_MAPPED_PREFIX.len()..];
    is_dotted_quad(quad).then_some(quad)
}

// Shape only: four groups of one to three digits. Octet ranges are checked on conversion.
fn is_dotted_quad(s: &str) -> bool {
    let mut parts = 0;
    for part in s.split('.') {
        parts += 1;
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }
    parts == 4
}

/// Returns the two hex groups of `2002:xxxx:xxxx::`.
fn six_to_four_groups(ip: &str) -> Option<(u16, u16)> {
    let body = ip.strip_prefix(SIX_TO_FOUR_PREFIX)?.strip_suffix("::")?;
    let (high, low) = body.split_once(':')?;
    Some((hex_group(high)?, hex_group(low)?))
}

fn hex_group(group: &str) -> Option<u16> {
    if group.is_empty() || group.len() > 4 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(group, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_local_ip() {
        assert!(is_local_ip("127.0.0.1"));
        assert!(is_local_ip("192.168.1.1"));
        assert!(is_local_ip("10.0.0.1"));
        assert!(is_local_ip("172.16.0.1"));
        assert!(!is_local_ip("8.8.8.8"));

        assert!(is_local_ip("::1"));
        assert!(is_local_ip("0:0:0:0:0:0:0:1"));
    }

    #[test]
    fn test_is_local_ip_only_matches_literal_172_16_prefix() {
        assert!(is_local_ip("172.16.255.254"));
        assert!(!is_local_ip("172.20.0.1"));
        assert!(!is_local_ip("172.31.255.255"));
    }

    #[test]
    fn test_is_local_ip_rejects_garbage() {
        assert!(!is_local_ip(""));
        assert!(!is_local_ip("unknown"));
        assert!(!is_local_ip("127.0.0.2"));
        assert!(!is_local_ip("203.0.113.10"));
    }

    #[test]
    fn test_is_convertible_ipv6() {
        assert!(is_convertible_ipv6("0:0:0:0:0:0:0:1"));
        assert!(is_convertible_ipv6("::ffff:192.168.1.1"));
        assert!(!is_convertible_ipv6("192.168.1.1"));

        assert!(is_convertible_ipv6("2002:c0a8:0101::"));
    }

    #[test]
    fn test_short_loopback_is_not_convertible() {
        assert!(!is_convertible_ipv6("::1"));
        assert!(convert_to_ipv4("::1").is_err());
    }

    #[test]
    fn test_is_convertible_ipv6_rejects_other_forms() {
        assert!(!is_convertible_ipv6("2001:db8::1"));
        assert!(!is_convertible_ipv6("::ffff:"));
        assert!(!is_convertible_ipv6("::ffff:1.2.3"));
        assert!(!is_convertible_ipv6("::ffff:1.2.3.4.5"));
        assert!(!is_convertible_ipv6("2002:c0a8::"));
        assert!(!is_convertible_ipv6("2002:c0a8:0101::1"));
        assert!(!is_convertible_ipv6("2002:zzzz:0101::"));
        assert!(!is_convertible_ipv6(""));
    }

    #[test]
    fn test_classification_is_stable() {
        for ip in ["127.0.0.1", "8.8.8.8", "::ffff:10.0.0.1", "2002:c0a8:0101::", "::1"] {
            assert_eq!(is_local_ip(ip), is_local_ip(ip));
            assert_eq!(is_convertible_ipv6(ip), is_convertible_ipv6(ip));
        }
    }

    #[test]
    fn test_normalize_loopback() {
        assert_eq!(normalize_loopback("::1"), "127.0.0.1");
        assert_eq!(normalize_loopback("0:0:0:0:0:0:0:1"), "127.0.0.1");
        assert_eq!(normalize_loopback("::ffff:127.0.0.1"), "::ffff:127.0.0.1");
        assert_eq!(normalize_loopback("10.0.0.1"), "10.0.0.1");
    }

    #[test]
    fn test_convert_to_ipv4() {
        assert_eq!(convert_to_ipv4("0:0:0:0:0:0:0:1"), Ok(Ipv4Addr::LOCALHOST));
        assert_eq!(
            convert_to_ipv4("::ffff:192.168.1.1"),
            Ok(Ipv4Addr::new(192, 168, 1, 1))
        );
        assert_eq!(
            convert_to_ipv4("::FFFF:203.0.113.9"),
            Ok(Ipv4Addr::new(203, 0, 113, 9))
        );
        assert_eq!(
            convert_to_ipv4("2002:c0a8:0101::"),
            Ok(Ipv4Addr::new(192, 168, 1, 1))
        );
        assert_eq!(
            convert_to_ipv4("2002:cb00:7107::"),
            Ok(Ipv4Addr::new(203, 0, 113, 7))
        );
    }

    #[test]
    fn test_convert_to_ipv4_errors() {
        assert_eq!(
            convert_to_ipv4("192.168.1.1"),
            Err(IpUtilError::NotConvertible("192.168.1.1".to_string()))
        );
        assert_eq!(
            convert_to_ipv4("::ffff:300.1.1.1"),
            Err(IpUtilError::InvalidIpFormat("::ffff:300.1.1.1".to_string()))
        );
    }
}
