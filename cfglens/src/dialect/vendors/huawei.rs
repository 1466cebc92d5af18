//! Huawei VRP dialect.
//!
//! Blocks are separated by `#` lines. VLAN interfaces are `Vlanif<N>`,
//! access ports use `port default vlan N`, and L2VPN constructs are VSIs
//! and `mpls l2vc` circuits.

use crate::buffer::LineBuffer;
use crate::dialect::{ConfigDialect, ExtractOptions, VendorKind};
use crate::extract::bgp::{BgpSyntax, VrfMarker, block_bgp};
use crate::extract::interfaces::{AccessVlanRule, InterfaceSyntax, block_interfaces};
use crate::extract::tokens::{after_keyword, rest_after, split};
use crate::extract::vlan::{VlanSyntax, block_vlan_contexts};
use crate::records::{BgpSummary, InterfaceRecord, L2vpnCircuit, VlanContext, token_or_unknown};

const INTERFACES: InterfaceSyntax = InterfaceSyntax {
    enable: "undo shutdown",
    access_vlan: AccessVlanRule::AnyVlanToken,
};

const BGP: BgpSyntax = BgpSyntax {
    process: "bgp ",
    router_id: "router-id ",
    vrf: VrfMarker::Contains("ipv4-family vpn-instance"),
    neighbor: "peer",
    remote_as: "as-number",
    block_end: None,
};

const VLANS: VlanSyntax = VlanSyntax {
    block_end: &["#", "quit"],
    name_keywords: &["description", "name"],
    access_prefixes: &["port default vlan ", "switchport access vlan "],
    pseudowire_prefixes: &["mpls l2vc ", "xconnect "],
    batch_keyword: Some("batch"),
};

/// Signaling recorded for `mpls l2vc` circuits.
const L2VC_SIGNALING: &str = "ldp";

/// Huawei VRP current-configuration dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuaweiVrp;

impl ConfigDialect for HuaweiVrp {
    fn kind(&self) -> VendorKind {
        VendorKind::Huawei
    }

    fn interfaces(&self, lines: &LineBuffer) -> Vec<InterfaceRecord> {
        block_interfaces(lines, &INTERFACES)
    }

    fn bgp(&self, lines: &LineBuffer) -> BgpSummary {
        block_bgp(lines, &BGP)
    }

    fn l2vpn(&self, lines: &LineBuffer) -> Vec<L2vpnCircuit> {
        let mut circuits = Vec::new();
        let mut current_vsi: Option<String> = None;

        for line in lines.iter() {
            if line.starts_with("vsi ") {
                current_vsi = split(line).get(1).map(|name| name.to_string());
            } else if line == "#" {
                current_vsi = None;
            } else if let (Some(vsi), Some(signaling)) = (&current_vsi, rest_after(line, "pwsignal ")) {
                circuits.push(L2vpnCircuit::Vsi {
                    name: vsi.clone(),
                    signaling: signaling.to_string(),
                });
            } else if line.to_lowercase().contains("l2vc") {
                let tokens = split(line);
                let args = after_keyword(&tokens, "l2vc").unwrap_or(tokens.as_slice());
                circuits.push(L2vpnCircuit::L2vc {
                    peer: token_or_unknown(args, 0),
                    vc_id: token_or_unknown(args, 1),
                    signaling: L2VC_SIGNALING.to_string(),
                });
            }
        }

        log::debug!("huawei l2vpn pass: {} circuits", circuits.len());
        circuits
    }

    fn vlan_contexts(&self, lines: &LineBuffer, options: &ExtractOptions) -> Vec<VlanContext> {
        block_vlan_contexts(lines, &VLANS, options.default_mtu)
    }
}
