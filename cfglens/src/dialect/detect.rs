//! Vendor detection by keyword sniffing.
//!
//! The whole document is lowercased once and searched for three disjoint
//! keyword sets. Sets are tested in a fixed priority order (Huawei, Cisco,
//! MikroTik) and the first set with any hit wins. There is no scoring.

use std::sync::LazyLock;

use memchr::memmem::Finder;
use regex::Regex;

use super::VendorKind;

/// A vendor together with the keywords that identify it.
struct Signature {
    vendor: VendorKind,
    keywords: Vec<Finder<'static>>,
    pattern: Option<Regex>,
}

impl Signature {
    fn new(vendor: VendorKind, keywords: &[&'static str]) -> Self {
        Self {
            vendor,
            keywords: keywords.iter().map(|&k| Finder::new(k.as_bytes())).collect(),
            pattern: None,
        }
    }

    fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    fn matches(&self, lower: &str) -> bool {
        self.keywords
            .iter()
            .any(|finder| finder.find(lower.as_bytes()).is_some())
            || self.pattern.as_ref().is_some_and(|p| p.is_match(lower))
    }
}

/// VRP version strings look like "Software Version V200R010C00SPC600".
const VRP_VERSION_PATTERN: &str = r"software version v\d{3}r\d{3}";

/// Signatures in priority order.
static SIGNATURES: LazyLock<Vec<Signature>> = LazyLock::new(|| {
    let huawei = Signature::new(
        VendorKind::Huawei,
        &["vrp version", "huawei versatile routing platform", "display version"],
    )
    .with_pattern(Regex::new(VRP_VERSION_PATTERN).unwrap());

    vec![
        huawei,
        Signature::new(
            VendorKind::Cisco,
            &["cisco ios", "cisco nexus", "version 15.", "version 16."],
        ),
        Signature::new(
            VendorKind::Mikrotik,
            &["routeros", "mikrotik", "/interface", "/ip address"],
        ),
    ]
});

/// Classify raw configuration text into a vendor dialect.
///
/// Pure function of `text`: no state, no side effects.
pub fn detect(text: &str) -> VendorKind {
    let lower = text.to_lowercase();
    SIGNATURES
        .iter()
        .find(|signature| signature.matches(&lower))
        .map(|signature| signature.vendor)
        .unwrap_or(VendorKind::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_cisco() {
        let text = "Cisco IOS Software, Version 15.2(4)M7\nhostname R1\n";
        assert_eq!(detect(text), VendorKind::Cisco);
        assert_eq!(detect("! NX-OS\nCisco Nexus Operating System"), VendorKind::Cisco);
        assert_eq!(detect("version 16.9\nhostname edge"), VendorKind::Cisco);
    }

    #[test]
    fn test_signatures_compile() {
        let huawei = &SIGNATURES[0];
        assert_eq!(huawei.vendor, VendorKind::Huawei);
        assert!(huawei.pattern.as_ref().is_some_and(|p| p.is_match("software version v800r011")));
    }

    #[test]
    fn test_detect_huawei() {
        assert_eq!(detect("VRP Version 5.170\n#\nsysname PE1"), VendorKind::Huawei);
        assert_eq!(
            detect("Huawei Versatile Routing Platform Software"),
            VendorKind::Huawei
        );
        assert_eq!(
            detect("!Software Version V200R010C00SPC600\n#\nsysname CE1"),
            VendorKind::Huawei
        );
    }

    #[test]
    fn test_detect_mikrotik() {
        let text = "/interface vlan\nadd name=vlan100 vlan-id=100 interface=ether1\n/ip address\n";
        assert_eq!(detect(text), VendorKind::Mikrotik);
        assert_eq!(detect("# jan/02/2024 by RouterOS 7.12"), VendorKind::Mikrotik);
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect("The quick brown fox jumps over the lazy dog."), VendorKind::Unknown);
        assert_eq!(detect(""), VendorKind::Unknown);
    }

    #[test]
    fn test_priority_huawei_over_cisco() {
        // Both keyword sets hit: Huawei is tested first
        let text = "display version\nCisco IOS Software, Version 15.2";
        assert_eq!(detect(text), VendorKind::Huawei);
    }

    #[test]
    fn test_priority_cisco_over_mikrotik() {
        let text = "Cisco IOS Software\n/interface bridge";
        assert_eq!(detect(text), VendorKind::Cisco);
    }

    #[test]
    fn test_detect_is_deterministic() {
        let text = "hostname R1\ninterface Vlan10\n";
        assert_eq!(detect(text), detect(text));
    }
}
