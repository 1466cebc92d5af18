//! Token-level helpers shared by the extraction passes.

use std::net::{Ipv4Addr, Ipv6Addr};

/// Largest range a single `vlan a-b` / `a to b` item may expand to.
const MAX_VLAN_RANGE: u32 = 4096;

/// Split a line on whitespace.
pub(crate) fn split(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Text after a leading keyword prefix, trimmed. `None` if the line does
/// not start with `prefix` or nothing follows it.
pub(crate) fn rest_after<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(prefix)?.trim();
    (!rest.is_empty()).then_some(rest)
}

/// Tokens following the first token equal to `keyword` (case-insensitive).
pub(crate) fn after_keyword<'a, 'b>(tokens: &'b [&'a str], keyword: &str) -> Option<&'b [&'a str]> {
    let pos = tokens.iter().position(|t| t.eq_ignore_ascii_case(keyword))?;
    Some(&tokens[pos + 1..])
}

/// True if the token is a non-empty run of ASCII digits.
pub(crate) fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Derive a VLAN id from a VLAN-interface name.
///
/// Only names starting with "vlan" (any case) qualify, e.g. `Vlan100`,
/// `Vlanif100`, `vlan100`. The id is every digit of the name concatenated,
/// so a compound name like `Vlan100.5` yields 1005. That is a known
/// limitation of the rule, kept so ids stay stable across dialects.
pub(crate) fn vlan_interface_id(name: &str) -> Option<u32> {
    if !name.to_lowercase().starts_with("vlan") {
        return None;
    }
    let digits: String = name.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Parse VLAN list tokens into ids.
///
/// Accepts comma lists (`10,20`), dash ranges (`30-35`) and the Huawei
/// `to` form (`30 to 35`). Any token that is not part of a list makes the
/// whole line invalid, so `vlan internal allocation policy` yields nothing.
pub(crate) fn parse_vlan_list(tokens: &[&str]) -> Option<Vec<u32>> {
    let mut ids = Vec::new();
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        for item in token.split(',').filter(|s| !s.is_empty()) {
            match item.split_once('-') {
                Some((start, end)) => ids.extend(expand_range(start, end)?),
                None if is_numeric(item) => ids.push(item.parse().ok()?),
                None => return None,
            }
        }

        if iter.peek().is_some_and(|t| t.eq_ignore_ascii_case("to")) {
            iter.next();
            let end = iter.next()?;
            let start = ids.pop()?;
            ids.extend(expand_range(&start.to_string(), end)?);
        }
    }

    (!ids.is_empty()).then_some(ids)
}

fn expand_range(start: &str, end: &str) -> Option<Vec<u32>> {
    if !is_numeric(start) || !is_numeric(end) {
        return None;
    }
    let start: u32 = start.parse().ok()?;
    let end: u32 = end.parse().ok()?;
    if end < start || end - start >= MAX_VLAN_RANGE {
        log::trace!("ignoring VLAN range {}-{}", start, end);
        return None;
    }
    Some((start..=end).collect())
}

/// Validate an IPv4 address token.
pub(crate) fn ipv4(token: &str) -> Option<Ipv4Addr> {
    token.parse().ok()
}

/// Parse `addr/len` or `addr` plus an optional separate length token.
pub(crate) fn ipv6_with_prefix(tokens: &[&str]) -> Option<(Ipv6Addr, Option<u8>)> {
    let first = tokens.first()?;
    let (addr, prefix): (&str, Option<u8>) = match first.split_once('/') {
        Some((addr, len)) => (addr, len.parse().ok()),
        None => (*first, tokens.get(1).and_then(|t| t.parse().ok())),
    };
    let addr: Ipv6Addr = addr.parse().ok()?;
    Some((addr, prefix.filter(|&p| p <= 128)))
}

/// Convert an IPv4 prefix length into a dotted mask.
pub(crate) fn prefix_to_mask(prefix: u8) -> Option<Ipv4Addr> {
    if prefix > 32 {
        return None;
    }
    let bits = u32::MAX.checked_shl(32 - u32::from(prefix)).unwrap_or(0);
    Some(Ipv4Addr::from(bits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_after() {
        assert_eq!(rest_after("name CustomerA", "name "), Some("CustomerA"));
        assert_eq!(rest_after("description Link to PE2 ", "description "), Some("Link to PE2"));
        assert_eq!(rest_after("name ", "name "), None);
        assert_eq!(rest_after("shutdown", "name "), None);
    }

    #[test]
    fn test_after_keyword() {
        let tokens = split("mpls l2vc 10.0.0.9 300 raw");
        assert_eq!(after_keyword(&tokens, "l2vc"), Some(&["10.0.0.9", "300", "raw"][..]));
        assert_eq!(after_keyword(&tokens, "xconnect"), None);
    }

    #[test]
    fn test_vlan_interface_id() {
        assert_eq!(vlan_interface_id("Vlan100"), Some(100));
        assert_eq!(vlan_interface_id("Vlanif300"), Some(300));
        assert_eq!(vlan_interface_id("vlan-200"), Some(200));
        assert_eq!(vlan_interface_id("Vlan"), None);
        assert_eq!(vlan_interface_id("GigabitEthernet0/1"), None);
        // digits are concatenated
        assert_eq!(vlan_interface_id("Vlan100.5"), Some(1005));
    }

    #[test]
    fn test_parse_vlan_list() {
        assert_eq!(parse_vlan_list(&["100"]), Some(vec![100]));
        assert_eq!(parse_vlan_list(&["10,20,30-32"]), Some(vec![10, 20, 30, 31, 32]));
        assert_eq!(
            parse_vlan_list(&["10", "20", "30", "to", "32"]),
            Some(vec![10, 20, 30, 31, 32])
        );
        assert_eq!(parse_vlan_list(&["internal", "allocation"]), None);
        assert_eq!(parse_vlan_list(&[]), None);
        assert_eq!(parse_vlan_list(&["1-4000000"]), None);
        assert_eq!(parse_vlan_list(&["20-10"]), None);
    }

    #[test]
    fn test_ipv6_with_prefix() {
        let (addr, prefix) = ipv6_with_prefix(&["2001:db8::1/64"]).unwrap();
        assert_eq!(addr.to_string(), "2001:db8::1");
        assert_eq!(prefix, Some(64));

        let (_, prefix) = ipv6_with_prefix(&["2001:db8::1", "64"]).unwrap();
        assert_eq!(prefix, Some(64));

        let (_, prefix) = ipv6_with_prefix(&["2001:db8::1"]).unwrap();
        assert_eq!(prefix, None);

        assert!(ipv6_with_prefix(&["auto"]).is_none());
    }

    #[test]
    fn test_prefix_to_mask() {
        assert_eq!(prefix_to_mask(24), Some(Ipv4Addr::new(255, 255, 255, 0)));
        assert_eq!(prefix_to_mask(30), Some(Ipv4Addr::new(255, 255, 255, 252)));
        assert_eq!(prefix_to_mask(32), Some(Ipv4Addr::new(255, 255, 255, 255)));
        assert_eq!(prefix_to_mask(0), Some(Ipv4Addr::new(0, 0, 0, 0)));
        assert_eq!(prefix_to_mask(33), None);
    }
}
