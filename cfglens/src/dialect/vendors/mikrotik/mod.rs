//! MikroTik RouterOS dialect.
//!
//! RouterOS exports have no blocks to walk, so every pass here works on the
//! command list produced by [`routeros::commands`]. Cross references
//! (addresses on VLAN interfaces, VLAN interfaces on VPLS tunnels) are
//! resolved by interface name after the whole export has been read.

mod routeros;

use std::net::Ipv4Addr;

use indexmap::{IndexMap, IndexSet};
use routeros::{Command, commands};

use crate::buffer::LineBuffer;
use crate::dialect::{ConfigDialect, ExtractOptions, VendorKind};
use crate::extract::tokens::{
    ipv4, ipv6_with_prefix, is_numeric, parse_vlan_list, prefix_to_mask, vlan_interface_id,
};
use crate::extract::vlan::{Pseudowire, VlanAccumulator};
use crate::records::{
    BgpNeighbor, BgpNetwork, BgpSummary, DEFAULT_VRF, InterfaceRecord, InterfaceStatus, L2vpnCircuit,
    VlanContext,
};

const IP_ADDRESS: &str = "/ip address";
const IPV6_ADDRESS: &str = "/ipv6 address";
const INTERFACE_VLAN: &str = "/interface vlan";
const INTERFACE_VPLS: &str = "/interface vpls";
const INTERFACE_BRIDGE: &str = "/interface bridge";
const BRIDGE_PORT: &str = "/interface bridge port";
const BRIDGE_VLAN: &str = "/interface bridge vlan";

/// Bridge port PVID that means "untagged default", not an access VLAN.
const DEFAULT_PVID: u32 = 1;

/// MikroTik RouterOS export dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouterOs;

impl ConfigDialect for RouterOs {
    fn kind(&self) -> VendorKind {
        VendorKind::Mikrotik
    }

    fn interfaces(&self, lines: &LineBuffer) -> Vec<InterfaceRecord> {
        let cmds = commands(lines);
        let vlan_ids = vlan_interfaces(&cmds);

        cmds.iter()
            .filter(|c| c.is(IP_ADDRESS))
            .filter_map(|c| {
                let address = c.get("address")?;
                let interface = c.get("interface")?;

                let mut record = InterfaceRecord::new(interface);
                let (network, mask) = cidr_network(address);
                record.ip_address = Some(network);
                record.subnet_mask = mask;
                record.description = c.get("comment").map(str::to_string);
                record.status = InterfaceStatus::Up;
                record.vlan = vlan_ids.get(interface).map(|v| v.id);
                Some(record)
            })
            .collect()
    }

    fn bgp(&self, lines: &LineBuffer) -> BgpSummary {
        let mut summary = BgpSummary::default();

        for cmd in commands(lines) {
            match cmd.section.as_str() {
                // v6 instance, v7 template
                "/routing bgp instance" | "/routing bgp template" => {
                    process_settings(&mut summary, &cmd);
                }
                // v7
                "/routing bgp connection" => {
                    process_settings(&mut summary, &cmd);
                    if let Some(neighbor) = neighbor(&cmd, "remote.address", "remote.as") {
                        add_neighbor(&mut summary, neighbor);
                    }
                }
                // v6
                "/routing bgp peer" => {
                    if let Some(neighbor) = neighbor(&cmd, "remote-address", "remote-as") {
                        add_neighbor(&mut summary, neighbor);
                    }
                }
                "/routing bgp network" => {
                    if let Some(network) = cmd.get("network") {
                        summary.networks.push(BgpNetwork::new(network, None));
                    }
                }
                _ => {}
            }
        }

        log::debug!(
            "routeros bgp pass: as={:?} neighbors={} networks={}",
            summary.local_as,
            summary.neighbors.len(),
            summary.networks.len()
        );
        summary
    }

    fn l2vpn(&self, lines: &LineBuffer) -> Vec<L2vpnCircuit> {
        commands(lines)
            .iter()
            .filter_map(|cmd| {
                let name = cmd.get("name")?.to_string();
                if cmd.under(INTERFACE_VPLS) {
                    let peer = cmd.get("remote-peer").unwrap_or("unknown").to_string();
                    Some(L2vpnCircuit::Vpls { name, peer })
                } else if cmd.under("/interface l2tp-client") || cmd.under("/interface l2tp-server") {
                    Some(L2vpnCircuit::L2tp { name })
                } else {
                    None
                }
            })
            .collect()
    }

    fn vlan_contexts(&self, lines: &LineBuffer, options: &ExtractOptions) -> Vec<VlanContext> {
        let cmds = commands(lines);
        let vlans = vlan_interfaces(&cmds);
        let vpls: IndexMap<&str, &Command> = cmds
            .iter()
            .filter(|c| c.is(INTERFACE_VPLS))
            .filter_map(|c| Some((c.get("name")?, c)))
            .collect();

        let mut acc = VlanAccumulator::new();

        for vlan in vlans.values() {
            acc.declare(vlan.id);
            if let Some(comment) = vlan.comment {
                acc.describe(vlan.id, comment);
            }
            if let Some(tunnel) = vlan.parent.and_then(|p| vpls.get(p)) {
                acc.bind_pseudowire(vlan.id, &vpls_pseudowire(tunnel));
            }
        }

        let resolve = |interface: &str| vlans.get(interface).map(|v| v.id).or_else(|| vlan_interface_id(interface));
        let bridges = bridge_names(&cmds);
        // VLAN interfaces and bridges are never access ports
        let is_access_port = |port: &str| resolve(port).is_none() && !bridges.contains(port);

        for cmd in &cmds {
            if cmd.is(IP_ADDRESS) {
                let (Some(address), Some(id)) = (cmd.get("address"), cmd.get("interface").and_then(resolve)) else {
                    continue;
                };
                let (host, prefix) = address.split_once('/').unwrap_or((address, ""));
                if ipv4(host).is_none() {
                    continue;
                }
                let info = acc.vlanif(id);
                info.ipv4 = Some(host.to_string());
                info.mask4 = prefix.parse().ok().and_then(prefix_to_mask).map(|m| m.to_string());
            } else if cmd.is(IPV6_ADDRESS) {
                let (Some(address), Some(id)) = (cmd.get("address"), cmd.get("interface").and_then(resolve)) else {
                    continue;
                };
                if let Some((addr, prefix)) = ipv6_with_prefix(&[address]) {
                    let info = acc.vlanif(id);
                    info.ipv6 = Some(addr.to_string());
                    info.mask6 = prefix;
                }
            } else if cmd.is(BRIDGE_PORT) {
                let Some(interface) = cmd.get("interface") else {
                    continue;
                };
                let pvid = cmd.get("pvid").filter(|p| is_numeric(p)).and_then(|p| p.parse().ok());
                if let Some(pvid) = pvid.filter(|&p| p != DEFAULT_PVID) {
                    if is_access_port(interface) {
                        acc.bind_access(pvid, interface);
                    }
                }
            } else if cmd.is(BRIDGE_VLAN) {
                let ids = cmd
                    .get("vlan-ids")
                    .and_then(|ids| parse_vlan_list(&list(ids)))
                    .unwrap_or_default();
                let ports = cmd.get("untagged").map(list).unwrap_or_default();
                for id in ids {
                    acc.declare(id);
                    for port in ports.iter().copied().filter(|&p| is_access_port(p)) {
                        acc.bind_access(id, port);
                    }
                }
            }
        }

        let contexts = acc.finish(options.default_mtu);
        log::debug!("routeros vlan pass: {} contexts", contexts.len());
        contexts
    }
}

/// One `/interface vlan` entry.
#[derive(Debug, Clone, Copy)]
struct VlanInterface<'a> {
    id: u32,
    parent: Option<&'a str>,
    comment: Option<&'a str>,
}

/// Map VLAN interface names to their entries, in export order.
fn vlan_interfaces(cmds: &[Command]) -> IndexMap<&str, VlanInterface<'_>> {
    cmds.iter()
        .filter(|c| c.is(INTERFACE_VLAN))
        .filter_map(|c| {
            let name = c.get("name")?;
            let id = c.get("vlan-id").filter(|v| is_numeric(v))?.parse().ok()?;
            Some((
                name,
                VlanInterface {
                    id,
                    parent: c.get("interface"),
                    comment: c.get("comment"),
                },
            ))
        })
        .collect()
}

/// Names of every bridge, declared or referenced by a port or VLAN entry.
fn bridge_names(cmds: &[Command]) -> IndexSet<&str> {
    cmds.iter()
        .filter_map(|c| {
            if c.is(INTERFACE_BRIDGE) {
                c.get("name")
            } else if c.is(BRIDGE_PORT) || c.is(BRIDGE_VLAN) {
                c.get("bridge")
            } else {
                None
            }
        })
        .collect()
}

/// Pseudowire data carried by a VPLS interface.
fn vpls_pseudowire(cmd: &Command) -> Pseudowire {
    Pseudowire {
        neighbor: cmd.get("remote-peer").map(str::to_string),
        vc_id: cmd
            .get("vpls-id")
            .and_then(|id| id.rsplit(':').next())
            .filter(|id| is_numeric(id))
            .and_then(|id| id.parse().ok()),
        mtu: cmd.get("mtu").and_then(|m| m.parse().ok()),
        raw: cmd.get("pw-type") == Some("raw-ethernet"),
    }
}

/// Split a RouterOS comma list.
fn list(value: &str) -> Vec<&str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
}

/// Network address and dotted mask of an `addr/len` value.
///
/// Host bits are cleared, so `10.0.0.1/24` becomes `10.0.0.0` with
/// `255.255.255.0`. A bare address is a /32. Anything that does not parse
/// keeps the text before `/` and has no mask.
fn cidr_network(address: &str) -> (String, Option<String>) {
    let (host, prefix) = match address.split_once('/') {
        Some((host, len)) => (host, len.parse::<u8>().ok()),
        None => (address, Some(32)),
    };

    match (ipv4(host), prefix.and_then(prefix_to_mask)) {
        (Some(addr), Some(mask)) => {
            let network = Ipv4Addr::from(u32::from(addr) & u32::from(mask));
            (network.to_string(), Some(mask.to_string()))
        }
        _ => (host.to_string(), None),
    }
}

/// Apply `as=` and `router-id=` from an instance, template or connection.
fn process_settings(summary: &mut BgpSummary, cmd: &Command) {
    if let Some(local_as) = cmd.get("as") {
        summary.local_as = Some(local_as.to_string());
    }
    if let Some(router_id) = cmd.get("router-id") {
        summary.router_id = Some(router_id.to_string());
    }
}

fn neighbor(cmd: &Command, address_key: &str, as_key: &str) -> Option<BgpNeighbor> {
    let address = cmd.get(address_key)?;
    let remote_as = cmd.get(as_key)?;
    let peer_ip = address.split_once('/').map_or(address, |(ip, _)| ip);

    let mut neighbor = BgpNeighbor::new(peer_ip, remote_as, cmd.get("vrf"));
    neighbor.description = cmd.get("comment").map(str::to_string);
    Some(neighbor)
}

fn add_neighbor(summary: &mut BgpSummary, neighbor: BgpNeighbor) {
    if neighbor.vrf != DEFAULT_VRF {
        summary.add_vrf(&neighbor.vrf);
    }
    summary.neighbors.push(neighbor);
}

#[cfg(test)]
mod tests {
    use super::*;

    const V6_EXPORT: &str = r#"# jan/02/2024 10:00:00 by RouterOS 6.49.10
# software id = ABCD-1234
/interface vpls
add disabled=no l2mtu=1526 mac-address=02:11:22:33:44:55 name=vpls300 \
    pw-type=raw-ethernet remote-peer=10.0.0.9 vpls-id=65000:300 mtu=1580
/interface vlan
add interface=ether2 name=vlan100 vlan-id=100 comment="CLIENTE A"
add interface=vpls300 name=vlan300 vlan-id=300
/interface l2tp-client
add connect-to=203.0.113.1 name=l2tp-out1 user=pe1
/interface bridge port
add bridge=br-100 interface=ether5 pvid=100
add bridge=br-100 interface=ether6
/ip address
add address=10.100.0.1/24 interface=vlan100 network=10.100.0.0
add address=192.0.2.10/30 interface=ether1 comment=uplink
/ipv6 address
add address=2001:db8:100::1/64 advertise=no interface=vlan100
/routing bgp instance
set default as=65000 router-id=1.1.1.1
/routing bgp network
add network=192.0.2.0/24
/routing bgp peer
add name=upstream remote-address=192.0.2.9 remote-as=65001 comment="Transit A"
add name=broken remote-address=192.0.2.13
"#;

    const V7_EXPORT: &str = r#"/routing bgp template
set default as=65010 router-id=10.255.0.1
/routing bgp connection
add name=to-core remote.address=10.255.0.2/32 remote.as=65010 local.role=ibgp
add name=cust remote.address=172.16.0.2 remote.as=65100 vrf=CUST-A
"#;

    #[test]
    fn test_interfaces() {
        let records = RouterOs.interfaces(&LineBuffer::new(V6_EXPORT));
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].name, "vlan100");
        assert_eq!(records[0].ip_address.as_deref(), Some("10.100.0.0"));
        assert_eq!(records[0].subnet_mask.as_deref(), Some("255.255.255.0"));
        assert_eq!(records[0].status, InterfaceStatus::Up);
        assert_eq!(records[0].vlan, Some(100));

        assert_eq!(records[1].ip_address.as_deref(), Some("192.0.2.8"));
        assert_eq!(records[1].subnet_mask.as_deref(), Some("255.255.255.252"));
        assert_eq!(records[1].description.as_deref(), Some("uplink"));
        assert_eq!(records[1].vlan, None);
    }

    #[test]
    fn test_cidr_network() {
        assert_eq!(
            cidr_network("10.0.0.1"),
            ("10.0.0.1".to_string(), Some("255.255.255.255".to_string()))
        );
        assert_eq!(cidr_network("10.0.0.300/24"), ("10.0.0.300".to_string(), None));
    }

    #[test]
    fn test_bgp_v6() {
        let summary = RouterOs.bgp(&LineBuffer::new(V6_EXPORT));
        assert_eq!(summary.local_as.as_deref(), Some("65000"));
        assert_eq!(summary.router_id.as_deref(), Some("1.1.1.1"));
        assert_eq!(summary.neighbors.len(), 1);
        assert_eq!(summary.neighbors[0].peer_ip, "192.0.2.9");
        assert_eq!(summary.neighbors[0].remote_as, "65001");
        assert_eq!(summary.neighbors[0].description.as_deref(), Some("Transit A"));
        assert_eq!(summary.networks[0].network, "192.0.2.0/24");
    }

    #[test]
    fn test_bgp_v7() {
        let summary = RouterOs.bgp(&LineBuffer::new(V7_EXPORT));
        assert_eq!(summary.local_as.as_deref(), Some("65010"));
        assert_eq!(summary.router_id.as_deref(), Some("10.255.0.1"));
        assert_eq!(summary.neighbors.len(), 2);
        assert_eq!(summary.neighbors[0].peer_ip, "10.255.0.2");
        assert_eq!(summary.neighbors[0].vrf, "default");
        assert_eq!(summary.neighbors[1].vrf, "CUST-A");
        assert!(summary.vrfs.contains("CUST-A"));
        assert_eq!(summary.vrfs.len(), 1);
    }

    #[test]
    fn test_l2vpn() {
        let circuits = RouterOs.l2vpn(&LineBuffer::new(V6_EXPORT));
        assert_eq!(
            circuits,
            vec![
                L2vpnCircuit::Vpls {
                    name: "vpls300".into(),
                    peer: "10.0.0.9".into(),
                },
                L2vpnCircuit::L2tp {
                    name: "l2tp-out1".into(),
                },
            ]
        );
    }

    #[test]
    fn test_vpls_without_peer() {
        let circuits = RouterOs.l2vpn(&LineBuffer::new("/interface vpls add name=v1\n"));
        assert_eq!(circuits[0].peer(), Some("unknown"));
    }

    #[test]
    fn test_vlan_contexts() {
        let contexts = RouterOs.vlan_contexts(&LineBuffer::new(V6_EXPORT), &ExtractOptions::default());
        let ids: Vec<u32> = contexts.iter().map(|c| c.vlan_id).collect();
        assert_eq!(ids, vec![100, 300]);

        let cust = &contexts[0];
        assert_eq!(cust.description.as_deref(), Some("CLIENTE A"));
        assert_eq!(cust.ipv4.as_deref(), Some("10.100.0.1"));
        assert_eq!(cust.mask4.as_deref(), Some("255.255.255.0"));
        assert_eq!(cust.ipv6.as_deref(), Some("2001:db8:100::1"));
        assert_eq!(cust.mask6, Some(64));
        assert_eq!(cust.accesses_joined(), "ether5");
        assert!(!cust.l2vc_bound);

        let tunnel = &contexts[1];
        assert!(tunnel.l2vc_bound);
        assert_eq!(tunnel.neighbor.as_deref(), Some("10.0.0.9"));
        assert_eq!(tunnel.vpls_id, Some(300));
        assert_eq!(tunnel.mtu, 1580);
        assert!(tunnel.raw_mode);
    }

    #[test]
    fn test_bridge_vlan_table() {
        let export = "/interface bridge vlan\nadd bridge=br1 tagged=sfp1 untagged=ether2,ether3 vlan-ids=40\n";
        let contexts = RouterOs.vlan_contexts(&LineBuffer::new(export), &ExtractOptions::default());
        assert_eq!(contexts.len(), 1);
        assert_eq!(contexts[0].vlan_id, 40);
        assert_eq!(contexts[0].accesses_joined(), "ether2, ether3");
    }

    #[test]
    fn test_bridge_vlan_untagged_skips_bridge_and_vlan_interfaces() {
        let export = "\
/interface bridge
add name=br1 vlan-filtering=yes
/interface vlan
add interface=br1 name=mgmt vlan-id=40
/interface bridge vlan
add bridge=br1 untagged=br1,mgmt,ether2,vlan40 vlan-ids=40
";
        let contexts = RouterOs.vlan_contexts(&LineBuffer::new(export), &ExtractOptions::default());
        assert_eq!(contexts.len(), 1);
        assert_eq!(contexts[0].accesses_joined(), "ether2");
    }

    #[test]
    fn test_bridge_port_default_pvid_ignored() {
        let export = "\
/interface bridge port
add bridge=br1 interface=ether7 pvid=1
add bridge=br1 interface=ether8 pvid=80
";
        let contexts = RouterOs.vlan_contexts(&LineBuffer::new(export), &ExtractOptions::default());
        let ids: Vec<u32> = contexts.iter().map(|c| c.vlan_id).collect();
        assert_eq!(ids, vec![80]);
        assert_eq!(contexts[0].accesses_joined(), "ether8");
    }

    #[test]
    fn test_address_on_undeclared_vlan_name() {
        let export = "/ip address add address=10.7.0.1/24 interface=vlan7\n";
        let contexts = RouterOs.vlan_contexts(&LineBuffer::new(export), &ExtractOptions::default());
        assert_eq!(contexts.len(), 1);
        assert_eq!(contexts[0].vlan_id, 7);
        assert_eq!(contexts[0].ipv4.as_deref(), Some("10.7.0.1"));
    }
}
