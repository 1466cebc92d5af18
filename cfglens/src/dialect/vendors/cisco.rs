//! Cisco IOS / IOS-XE dialect.
//!
//! Block structure is indentation plus `!` separators:
//!
//! ```text
//! interface Vlan100
//!  description CLIENTE-A
//!  ip address 10.100.0.1 255.255.255.0
//!  xconnect 10.0.0.9 100 encapsulation mpls
//! !
//! router bgp 65000
//!  bgp router-id 1.1.1.1
//!  neighbor 10.0.0.2 remote-as 65001
//! !
//! ```

use crate::buffer::LineBuffer;
use crate::dialect::{ConfigDialect, ExtractOptions, VendorKind};
use crate::extract::bgp::{BgpSyntax, VrfMarker, block_bgp};
use crate::extract::interfaces::{AccessVlanRule, InterfaceSyntax, block_interfaces};
use crate::extract::tokens::split;
use crate::extract::vlan::{VlanSyntax, block_vlan_contexts};
use crate::records::{BgpSummary, Encapsulation, InterfaceRecord, L2vpnCircuit, VlanContext};

const INTERFACES: InterfaceSyntax = InterfaceSyntax {
    enable: "no shutdown",
    access_vlan: AccessVlanRule::SwitchportAccess,
};

const BGP: BgpSyntax = BgpSyntax {
    process: "router bgp ",
    router_id: "bgp router-id ",
    vrf: VrfMarker::Prefix("address-family ipv4 vrf "),
    neighbor: "neighbor",
    remote_as: "remote-as",
    block_end: Some("!"),
};

const VLANS: VlanSyntax = VlanSyntax {
    block_end: &["!", "exit"],
    name_keywords: &["name"],
    access_prefixes: &["switchport access vlan "],
    pseudowire_prefixes: &["xconnect "],
    batch_keyword: None,
};

/// Cisco IOS running-config dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct CiscoIos;

impl ConfigDialect for CiscoIos {
    fn kind(&self) -> VendorKind {
        VendorKind::Cisco
    }

    fn interfaces(&self, lines: &LineBuffer) -> Vec<InterfaceRecord> {
        block_interfaces(lines, &INTERFACES)
    }

    fn bgp(&self, lines: &LineBuffer) -> BgpSummary {
        block_bgp(lines, &BGP)
    }

    fn l2vpn(&self, lines: &LineBuffer) -> Vec<L2vpnCircuit> {
        let mut circuits = Vec::new();

        for line in lines.iter() {
            if line.to_lowercase().contains("xconnect") {
                if let Some(circuit) = xconnect(line) {
                    circuits.push(circuit);
                }
            } else if line.starts_with("bridge-domain ") {
                if let Some(id) = split(line).get(1) {
                    circuits.push(L2vpnCircuit::BridgeDomain { id: id.to_string() });
                }
            }
        }

        log::debug!("cisco l2vpn pass: {} circuits", circuits.len());
        circuits
    }

    fn vlan_contexts(&self, lines: &LineBuffer, options: &ExtractOptions) -> Vec<VlanContext> {
        block_vlan_contexts(lines, &VLANS, options.default_mtu)
    }
}

/// Parse `xconnect <peer> <vc-id> [encapsulation ..]`.
///
/// Peer and VC id are the two tokens after the `xconnect` keyword; when the
/// keyword is glued to other text they are read from the start of the line.
fn xconnect(line: &str) -> Option<L2vpnCircuit> {
    let tokens = split(line);
    let base = tokens
        .iter()
        .position(|t| t.eq_ignore_ascii_case("xconnect"))
        .unwrap_or(0);

    let peer = tokens.get(base + 1)?;
    let vc_id = tokens.get(base + 2)?;
    Some(L2vpnCircuit::Xconnect {
        peer: peer.to_string(),
        vc_id: vc_id.to_string(),
        encapsulation: Encapsulation::infer(line),
    })
}
