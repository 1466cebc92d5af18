//! Interface records.

use std::fmt;

use serde::Serialize;

/// Interface category, derived from the interface name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InterfaceKind {
    #[serde(rename = "gigabit")]
    Gigabit,
    #[serde(rename = "fastethernet")]
    FastEthernet,
    #[serde(rename = "10gigabit")]
    TenGigabit,
    #[serde(rename = "loopback")]
    Loopback,
    #[serde(rename = "vlan")]
    Vlan,
    #[serde(rename = "tunnel")]
    Tunnel,
    #[serde(rename = "other")]
    Other,
}

/// Name fragments per category, tested in order. First hit wins.
///
/// The short aliases are broad: `TenGigabitEthernet` contains `gig` and so
/// lands in [`InterfaceKind::Gigabit`] before the 10G aliases are tried.
const KIND_ALIASES: &[(InterfaceKind, &[&str])] = &[
    (InterfaceKind::Gigabit, &["gigabit", "gig", "ge-", "ge"]),
    (InterfaceKind::FastEthernet, &["fastethernet", "fast", "fe-", "fa"]),
    (InterfaceKind::TenGigabit, &["10gig", "tengig", "xe-", "te"]),
    (InterfaceKind::Loopback, &["loopback", "lo"]),
    (InterfaceKind::Vlan, &["vlan", "vlanif"]),
    (InterfaceKind::Tunnel, &["tunnel", "tun"]),
];

impl InterfaceKind {
    /// Classify an interface by substrings of its name (case-insensitive).
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        KIND_ALIASES
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|alias| lower.contains(alias)))
            .map(|(kind, _)| *kind)
            .unwrap_or(InterfaceKind::Other)
    }

    /// Label used in tables and exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            InterfaceKind::Gigabit => "gigabit",
            InterfaceKind::FastEthernet => "fastethernet",
            InterfaceKind::TenGigabit => "10gigabit",
            InterfaceKind::Loopback => "loopback",
            InterfaceKind::Vlan => "vlan",
            InterfaceKind::Tunnel => "tunnel",
            InterfaceKind::Other => "other",
        }
    }
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Administrative state of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceStatus {
    #[default]
    Unknown,
    Up,
    Shutdown,
}

impl InterfaceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterfaceStatus::Unknown => "unknown",
            InterfaceStatus::Up => "up",
            InterfaceStatus::Shutdown => "shutdown",
        }
    }
}

impl fmt::Display for InterfaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceRecord {
    /// Interface name as written in the config (e.g. "GigabitEthernet0/1").
    pub name: String,

    /// Category derived from the name.
    #[serde(rename = "type")]
    pub kind: InterfaceKind,

    /// IPv4 address.
    pub ip_address: Option<String>,

    /// Subnet mask (dotted or as written by the vendor).
    pub subnet_mask: Option<String>,

    /// Free-text description.
    pub description: Option<String>,

    /// Administrative status.
    pub status: InterfaceStatus,

    /// Access VLAN tag.
    pub vlan: Option<u32>,
}

impl InterfaceRecord {
    /// Create a record with only the name set; the kind is derived from it.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: InterfaceKind::from_name(&name),
            name,
            ip_address: None,
            subnet_mask: None,
            description: None,
            status: InterfaceStatus::Unknown,
            vlan: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_name() {
        assert_eq!(InterfaceKind::from_name("GigabitEthernet0/1"), InterfaceKind::Gigabit);
        assert_eq!(InterfaceKind::from_name("FastEthernet0/0"), InterfaceKind::FastEthernet);
        assert_eq!(InterfaceKind::from_name("xe-0/0/1"), InterfaceKind::TenGigabit);
        assert_eq!(InterfaceKind::from_name("Loopback0"), InterfaceKind::Loopback);
        assert_eq!(InterfaceKind::from_name("Vlan100"), InterfaceKind::Vlan);
        assert_eq!(InterfaceKind::from_name("Vlanif100"), InterfaceKind::Vlan);
        assert_eq!(InterfaceKind::from_name("Tunnel1"), InterfaceKind::Tunnel);
        assert_eq!(InterfaceKind::from_name("Ethernet0/0"), InterfaceKind::Other);
        assert_eq!(InterfaceKind::from_name("ether1"), InterfaceKind::Other);
    }

    #[test]
    fn test_kind_first_match_wins() {
        // "gig" is tested before the 10G aliases
        assert_eq!(
            InterfaceKind::from_name("TenGigabitEthernet1/0/1"),
            InterfaceKind::Gigabit
        );
    }

    #[test]
    fn test_new_record_defaults() {
        let record = InterfaceRecord::new("Loopback0");
        assert_eq!(record.kind, InterfaceKind::Loopback);
        assert_eq!(record.status, InterfaceStatus::Unknown);
        assert!(record.ip_address.is_none());
        assert!(record.vlan.is_none());
    }
}
