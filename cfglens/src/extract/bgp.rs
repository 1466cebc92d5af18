//! BGP pass for block-structured dialects (Cisco IOS, Huawei VRP).

use super::tokens::{rest_after, split};
use crate::buffer::LineBuffer;
use crate::records::{BgpNeighbor, BgpNetwork, BgpSummary};

/// How a dialect opens a VRF context inside the BGP process.
#[derive(Debug, Clone, Copy)]
pub(crate) enum VrfMarker {
    /// Line starts with the prefix, e.g. `address-family ipv4 vrf `.
    Prefix(&'static str),
    /// Line contains the marker anywhere, e.g. `ipv4-family vpn-instance`.
    Contains(&'static str),
}

impl VrfMarker {
    fn matches(&self, line: &str) -> bool {
        match self {
            VrfMarker::Prefix(prefix) => line.starts_with(prefix),
            VrfMarker::Contains(marker) => line.contains(marker),
        }
    }
}

/// Per-dialect keywords of the BGP pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BgpSyntax {
    /// Process line prefix; the next token is the local AS.
    pub process: &'static str,
    /// Router-id line prefix; the last token is the id.
    pub router_id: &'static str,
    pub vrf: VrfMarker,
    /// Keyword starting a peer line (`neighbor`, `peer`).
    pub neighbor: &'static str,
    /// Token that must appear for a peer line to declare the remote AS.
    pub remote_as: &'static str,
    /// Bare line that closes the process block, if the dialect has one.
    pub block_end: Option<&'static str>,
}

/// Parser state: outside or inside the BGP process block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BgpState {
    Outside,
    InProcess,
}

/// Run the BGP pass over `lines`.
///
/// The VRF register persists until the next VRF line, even across the end
/// of the process block.
pub(crate) fn block_bgp(lines: &LineBuffer, syntax: &BgpSyntax) -> BgpSummary {
    let mut summary = BgpSummary::default();
    let mut state = BgpState::Outside;
    let mut current_vrf: Option<String> = None;
    let neighbor_prefix = format!("{} ", syntax.neighbor);

    for line in lines.iter() {
        if let Some(rest) = rest_after(line, syntax.process) {
            summary.local_as = rest.split_whitespace().next().map(str::to_string);
            state = BgpState::InProcess;
            continue;
        }

        if state == BgpState::Outside {
            continue;
        }

        if line.starts_with(syntax.router_id) {
            summary.router_id = split(line).last().map(|t| t.to_string());
        } else if syntax.vrf.matches(line) {
            if let Some(vrf) = split(line).last() {
                summary.add_vrf(vrf);
                current_vrf = Some(vrf.to_string());
            }
        } else if line.starts_with(&neighbor_prefix) {
            let parts = split(line);
            if parts.len() >= 4 && line.contains(syntax.remote_as) {
                let mut neighbor =
                    BgpNeighbor::new(parts[1], parts[parts.len() - 1], current_vrf.as_deref());
                neighbor.description = peer_description(lines, syntax.neighbor, parts[1]);
                summary.neighbors.push(neighbor);
            }
        } else if line.starts_with("network ") {
            if let Some(network) = split(line).get(1) {
                summary
                    .networks
                    .push(BgpNetwork::new(*network, current_vrf.as_deref()));
            }
        } else if syntax.block_end == Some(line) {
            state = BgpState::Outside;
        }
    }

    log::debug!(
        "bgp pass: as={:?} neighbors={} networks={} vrfs={}",
        summary.local_as,
        summary.neighbors.len(),
        summary.networks.len(),
        summary.vrfs.len()
    );
    summary
}

/// Look up a peer's description anywhere in the document.
///
/// Takes the first line containing `<keyword> <ip> description`.
fn peer_description(lines: &LineBuffer, keyword: &str, ip: &str) -> Option<String> {
    let needle = format!("{} {} description", keyword, ip);
    lines
        .find_containing(&needle)
        .and_then(|line| line.split_once("description "))
        .map(|(_, text)| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
