//! Unified per-VLAN records.

use std::collections::BTreeSet;

use serde::Serialize;

/// MTU reported for a VLAN with no explicit pseudowire MTU.
pub const DEFAULT_MTU: u32 = 1500;

/// Everything the document says about one VLAN id.
///
/// Built by merging four independent signals: `vlan N` declarations,
/// VLAN-interface blocks, access-port bindings, and pseudowire bindings
/// on VLAN interfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VlanContext {
    /// VLAN id. Not clamped to 1-4094.
    pub vlan_id: u32,

    /// Name/description from the `vlan N` block.
    pub description: Option<String>,

    /// Interfaces bound to this VLAN as access ports.
    pub accesses: BTreeSet<String>,

    /// IPv4 address of the VLAN interface.
    pub ipv4: Option<String>,

    /// IPv4 mask, as written.
    pub mask4: Option<String>,

    /// IPv6 address of the VLAN interface.
    pub ipv6: Option<String>,

    /// IPv6 prefix length.
    pub mask6: Option<u8>,

    /// Whether a pseudowire/xconnect is bound to the VLAN interface.
    pub l2vc_bound: bool,

    /// Pseudowire peer.
    pub neighbor: Option<String>,

    /// VC/VPLS id of the pseudowire.
    pub vpls_id: Option<u32>,

    /// Pseudowire MTU.
    pub mtu: u32,

    /// Whether the pseudowire runs in raw mode.
    pub raw_mode: bool,
}

impl VlanContext {
    /// Create an empty context for `vlan_id` with default MTU.
    pub fn new(vlan_id: u32) -> Self {
        Self {
            vlan_id,
            description: None,
            accesses: BTreeSet::new(),
            ipv4: None,
            mask4: None,
            ipv6: None,
            mask6: None,
            l2vc_bound: false,
            neighbor: None,
            vpls_id: None,
            mtu: DEFAULT_MTU,
            raw_mode: false,
        }
    }

    /// Access interfaces, sorted and joined for display.
    pub fn accesses_joined(&self) -> String {
        self.accesses
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
