//! L2VPN circuit records.

use std::fmt;

use serde::Serialize;

/// Placeholder for circuit fields the config line did not carry.
const UNKNOWN: &str = "unknown";

/// Transport encapsulation of a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Encapsulation {
    Mpls,
    Ethernet,
    L2tp,
    Unknown,
}

impl Encapsulation {
    /// Infer the encapsulation from keywords present in a config line.
    pub fn infer(line: &str) -> Self {
        let lower = line.to_lowercase();
        if lower.contains("mpls") {
            Encapsulation::Mpls
        } else if lower.contains("ethernet") {
            Encapsulation::Ethernet
        } else if lower.contains("l2tp") {
            Encapsulation::L2tp
        } else {
            Encapsulation::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Encapsulation::Mpls => "mpls",
            Encapsulation::Ethernet => "ethernet",
            Encapsulation::L2tp => "l2tp",
            Encapsulation::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for Encapsulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One L2VPN construct, tagged by the keyword that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum L2vpnCircuit {
    /// Point-to-point cross-connect (`xconnect <peer> <vc-id> ...`).
    Xconnect {
        peer: String,
        vc_id: String,
        encapsulation: Encapsulation,
    },

    /// Bridge domain declaration.
    BridgeDomain { id: String },

    /// Huawei Virtual Switch Instance with its PW signaling protocol.
    Vsi { name: String, signaling: String },

    /// Huawei L2 virtual circuit.
    L2vc {
        peer: String,
        vc_id: String,
        signaling: String,
    },

    /// RouterOS VPLS interface.
    Vpls { name: String, peer: String },

    /// RouterOS L2TP client/server interface.
    L2tp { name: String },
}

impl L2vpnCircuit {
    /// Circuit type label, as used in exports.
    pub fn kind(&self) -> &'static str {
        match self {
            L2vpnCircuit::Xconnect { .. } => "xconnect",
            L2vpnCircuit::BridgeDomain { .. } => "bridge-domain",
            L2vpnCircuit::Vsi { .. } => "vsi",
            L2vpnCircuit::L2vc { .. } => "l2vc",
            L2vpnCircuit::Vpls { .. } => "vpls",
            L2vpnCircuit::L2tp { .. } => "l2tp",
        }
    }

    /// Name of the VSI/VPLS/L2TP instance or bridge-domain id.
    pub fn name(&self) -> Option<&str> {
        match self {
            L2vpnCircuit::BridgeDomain { id } => Some(id),
            L2vpnCircuit::Vsi { name, .. }
            | L2vpnCircuit::Vpls { name, .. }
            | L2vpnCircuit::L2tp { name } => Some(name),
            L2vpnCircuit::Xconnect { .. } | L2vpnCircuit::L2vc { .. } => None,
        }
    }

    /// Remote peer address.
    pub fn peer(&self) -> Option<&str> {
        match self {
            L2vpnCircuit::Xconnect { peer, .. }
            | L2vpnCircuit::L2vc { peer, .. }
            | L2vpnCircuit::Vpls { peer, .. } => Some(peer),
            L2vpnCircuit::L2tp { .. } => Some("configured"),
            L2vpnCircuit::BridgeDomain { .. } | L2vpnCircuit::Vsi { .. } => None,
        }
    }

    /// Virtual circuit id.
    pub fn vc_id(&self) -> Option<&str> {
        match self {
            L2vpnCircuit::Xconnect { vc_id, .. } | L2vpnCircuit::L2vc { vc_id, .. } => Some(vc_id),
            _ => None,
        }
    }

    /// Encapsulation, fixed per variant except for xconnects.
    pub fn encapsulation(&self) -> Encapsulation {
        match self {
            L2vpnCircuit::Xconnect { encapsulation, .. } => *encapsulation,
            L2vpnCircuit::BridgeDomain { .. } | L2vpnCircuit::Vsi { .. } => Encapsulation::Ethernet,
            L2vpnCircuit::L2vc { .. } | L2vpnCircuit::Vpls { .. } => Encapsulation::Mpls,
            L2vpnCircuit::L2tp { .. } => Encapsulation::L2tp,
        }
    }

    /// Pseudowire signaling protocol.
    pub fn signaling(&self) -> Option<&str> {
        match self {
            L2vpnCircuit::Vsi { signaling, .. } | L2vpnCircuit::L2vc { signaling, .. } => {
                Some(signaling)
            }
            _ => None,
        }
    }
}

/// Take the token at `index`, or "unknown" when the line is too short.
pub(crate) fn token_or_unknown(tokens: &[&str], index: usize) -> String {
    tokens.get(index).copied().unwrap_or(UNKNOWN).to_string()
}
