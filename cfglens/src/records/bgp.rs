//! BGP summary records.

use indexmap::IndexSet;
use serde::Serialize;

/// VRF name used when no address-family/VPN-instance context is active.
pub const DEFAULT_VRF: &str = "default";

/// A configured BGP peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BgpNeighbor {
    /// Peer address.
    #[serde(rename = "ip")]
    pub peer_ip: String,

    /// Peer autonomous system, as written (plain or asdot).
    pub remote_as: String,

    /// VRF the peer was declared in.
    pub vrf: String,

    /// Description tied to the same peer address.
    pub description: Option<String>,
}

impl BgpNeighbor {
    pub fn new(peer_ip: impl Into<String>, remote_as: impl Into<String>, vrf: Option<&str>) -> Self {
        Self {
            peer_ip: peer_ip.into(),
            remote_as: remote_as.into(),
            vrf: vrf.unwrap_or(DEFAULT_VRF).to_string(),
            description: None,
        }
    }
}

/// An advertised prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BgpNetwork {
    pub network: String,
    pub vrf: String,
}

impl BgpNetwork {
    pub fn new(network: impl Into<String>, vrf: Option<&str>) -> Self {
        Self {
            network: network.into(),
            vrf: vrf.unwrap_or(DEFAULT_VRF).to_string(),
        }
    }
}

/// Aggregate view of the single BGP process in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BgpSummary {
    /// Local autonomous system of the last process line seen.
    pub local_as: Option<String>,

    /// Configured router ID.
    pub router_id: Option<String>,

    /// Peers in declaration order.
    pub neighbors: Vec<BgpNeighbor>,

    /// Advertised networks in declaration order.
    pub networks: Vec<BgpNetwork>,

    /// VRF names in first-seen order.
    pub vrfs: IndexSet<String>,
}

impl BgpSummary {
    /// Check whether anything BGP-related was found.
    ///
    /// A process with an AS but no peers still counts as configured.
    pub fn is_empty(&self) -> bool {
        self.local_as.is_none() && self.neighbors.is_empty()
    }

    /// Record a VRF name, keeping first-seen order.
    pub fn add_vrf(&mut self, vrf: &str) {
        if !self.vrfs.contains(vrf) {
            self.vrfs.insert(vrf.to_string());
        }
    }

    /// Render the summary as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
