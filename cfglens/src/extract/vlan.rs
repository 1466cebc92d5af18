//! VLAN context correlation.
//!
//! Four independent signals feed one accumulator while the buffer is
//! walked once:
//!
//! 1. descriptions from `vlan N` blocks
//! 2. access-port bindings (`switchport access vlan N` and friends)
//! 3. VLAN-interface data: addresses and pseudowire bindings
//! 4. the set of every id seen by any of the above
//!
//! Nothing is merged until [`VlanAccumulator::finish`], which emits one
//! [`VlanContext`] per id in ascending order. An id seen by any signal is
//! never dropped, even when it carries no other data.
//!
//! # Parser states
//!
//! ```text
//!                 vlan N                     interface X
//! ┌───────────┐ ──────────► ┌─────────────┐ ─────────────► ┌──────────────┐
//! │ NoContext │             │ InVlanBlock │                │ InInterface  │
//! └───────────┘ ◄────────── └─────────────┘ ◄───────────── └──────────────┘
//!                block end                      vlan N
//! ```
//!
//! `interface X` and `vlan N` are accepted from every state; the dialect's
//! block terminator (`!`, `#`, ...) returns to `NoContext`.

use std::collections::{BTreeMap, BTreeSet};

use super::tokens::{
    ipv4, ipv6_with_prefix, is_numeric, parse_vlan_list, rest_after, split, vlan_interface_id,
};
use crate::buffer::LineBuffer;
use crate::records::VlanContext;

/// Tokens after the peer address searched for the VC id.
const VC_ID_LOOKAHEAD: usize = 3;

/// Addressing and pseudowire data of one VLAN interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct VlanIfInfo {
    pub ipv4: Option<String>,
    pub mask4: Option<String>,
    pub ipv6: Option<String>,
    pub mask6: Option<u8>,
    pub l2vc_bound: bool,
    pub neighbor: Option<String>,
    pub vpls_id: Option<u32>,
    pub mtu: Option<u32>,
    pub raw_mode: bool,
}

/// A pseudowire binding parsed from the tokens after `xconnect`/`l2vc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Pseudowire {
    pub neighbor: Option<String>,
    pub vc_id: Option<u32>,
    pub mtu: Option<u32>,
    pub raw: bool,
}

impl Pseudowire {
    /// Parse `<peer> [<vc-id>] [encapsulation ..] [mtu <n>] [raw]`.
    ///
    /// The first token is the peer. The VC id is the first purely numeric
    /// token within a short window after the peer, skipping the value of
    /// an `mtu` pair.
    pub fn parse(tokens: &[&str]) -> Self {
        let mut pw = Pseudowire {
            neighbor: tokens.first().map(|t| t.to_string()),
            ..Default::default()
        };

        let window = tokens.len().min(VC_ID_LOOKAHEAD + 1);
        pw.vc_id = (1..window)
            .filter(|&i| !tokens[i - 1].eq_ignore_ascii_case("mtu"))
            .map(|i| tokens[i])
            .find(|t| is_numeric(t))
            .and_then(|t| t.parse().ok());

        pw.mtu = tokens
            .windows(2)
            .find(|pair| pair[0].eq_ignore_ascii_case("mtu"))
            .and_then(|pair| pair[1].parse().ok());

        pw.raw = tokens.iter().any(|t| t.eq_ignore_ascii_case("raw"));
        pw
    }
}

/// Accumulates the four VLAN signals and merges them at the end.
#[derive(Debug, Default)]
pub(crate) struct VlanAccumulator {
    descriptions: BTreeMap<u32, String>,
    accesses: BTreeMap<u32, BTreeSet<String>>,
    vlanif: BTreeMap<u32, VlanIfInfo>,
    present: BTreeSet<u32>,
}

impl VlanAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `id` exists.
    pub fn declare(&mut self, id: u32) {
        self.present.insert(id);
    }

    pub fn describe(&mut self, id: u32, description: impl Into<String>) {
        self.descriptions.insert(id, description.into());
        self.present.insert(id);
    }

    pub fn bind_access(&mut self, id: u32, interface: impl Into<String>) {
        self.accesses.entry(id).or_default().insert(interface.into());
        self.present.insert(id);
    }

    /// VLAN-interface data for `id`, created on first use.
    pub fn vlanif(&mut self, id: u32) -> &mut VlanIfInfo {
        self.present.insert(id);
        self.vlanif.entry(id).or_default()
    }

    pub fn bind_pseudowire(&mut self, id: u32, pw: &Pseudowire) {
        let info = self.vlanif(id);
        info.l2vc_bound = true;
        if pw.neighbor.is_some() {
            info.neighbor.clone_from(&pw.neighbor);
        }
        if pw.vc_id.is_some() {
            info.vpls_id = pw.vc_id;
        }
        if pw.mtu.is_some() {
            info.mtu = pw.mtu;
        }
        info.raw_mode |= pw.raw;
    }

    /// Merge all signals into one context per id, ascending.
    pub fn finish(mut self, default_mtu: u32) -> Vec<VlanContext> {
        let ids: BTreeSet<u32> = self
            .present
            .iter()
            .chain(self.descriptions.keys())
            .chain(self.accesses.keys())
            .chain(self.vlanif.keys())
            .copied()
            .collect();

        ids.into_iter()
            .map(|id| {
                let mut ctx = VlanContext::new(id);
                ctx.mtu = default_mtu;
                ctx.description = self.descriptions.remove(&id);
                ctx.accesses = self.accesses.remove(&id).unwrap_or_default();
                if let Some(info) = self.vlanif.remove(&id) {
                    ctx.ipv4 = info.ipv4;
                    ctx.mask4 = info.mask4;
                    ctx.ipv6 = info.ipv6;
                    ctx.mask6 = info.mask6;
                    ctx.l2vc_bound = info.l2vc_bound;
                    ctx.neighbor = info.neighbor;
                    ctx.vpls_id = info.vpls_id;
                    ctx.mtu = info.mtu.unwrap_or(default_mtu);
                    ctx.raw_mode = info.raw_mode;
                }
                ctx
            })
            .collect()
    }
}

/// Per-dialect keywords of the VLAN context pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct VlanSyntax {
    /// Bare lines that close the current block.
    pub block_end: &'static [&'static str],
    /// Keywords naming a VLAN inside a `vlan N` block.
    pub name_keywords: &'static [&'static str],
    /// Line prefixes binding an access port; the last token is the id.
    pub access_prefixes: &'static [&'static str],
    /// Line prefixes of a pseudowire binding on a VLAN interface.
    pub pseudowire_prefixes: &'static [&'static str],
    /// Sub-keyword of `vlan` that declares many ids at once (`vlan batch`).
    pub batch_keyword: Option<&'static str>,
}

/// Parser state of the VLAN pass.
#[derive(Debug, Clone, PartialEq, Eq)]
enum VlanPassState {
    NoContext,
    InVlanBlock(u32),
    InInterface { name: String, vlan: Option<u32> },
}

/// Run the VLAN context pass over `lines`.
pub(crate) fn block_vlan_contexts(
    lines: &LineBuffer,
    syntax: &VlanSyntax,
    default_mtu: u32,
) -> Vec<VlanContext> {
    let mut acc = VlanAccumulator::new();
    let mut state = VlanPassState::NoContext;

    for line in lines.iter() {
        state = step(&mut acc, state, line, syntax);
    }

    let contexts = acc.finish(default_mtu);
    log::debug!("vlan pass: {} contexts", contexts.len());
    contexts
}

/// Apply one line and return the next state.
fn step(acc: &mut VlanAccumulator, state: VlanPassState, line: &str, syntax: &VlanSyntax) -> VlanPassState {
    if let Some(name) = rest_after(line, "interface ") {
        let vlan = vlan_interface_id(name);
        if let Some(id) = vlan {
            acc.declare(id);
        }
        return VlanPassState::InInterface {
            name: name.to_string(),
            vlan,
        };
    }

    let tokens = split(line);
    if tokens.first() == Some(&"vlan") {
        if let Some(next) = vlan_declaration(acc, &tokens[1..], syntax) {
            return next;
        }
    }

    if syntax.block_end.contains(&line) {
        return VlanPassState::NoContext;
    }

    match &state {
        VlanPassState::NoContext => {}
        VlanPassState::InVlanBlock(id) => {
            let description = syntax
                .name_keywords
                .iter()
                .find_map(|kw| line.strip_prefix(kw).and_then(|rest| rest_after(rest, " ")));
            if let Some(text) = description {
                acc.describe(*id, text);
            }
        }
        VlanPassState::InInterface { name, vlan: None } => {
            if let Some(id) = access_binding(line, &tokens, syntax) {
                acc.bind_access(id, name.as_str());
            }
        }
        VlanPassState::InInterface { vlan: Some(id), .. } => {
            vlan_interface_line(acc, *id, line, &tokens, syntax);
        }
    }

    state
}

/// Handle a line starting with `vlan`. Returns the next state when the line
/// was a declaration.
fn vlan_declaration(acc: &mut VlanAccumulator, args: &[&str], syntax: &VlanSyntax) -> Option<VlanPassState> {
    if let (Some(batch), Some(first)) = (syntax.batch_keyword, args.first()) {
        if first.eq_ignore_ascii_case(batch) {
            for id in parse_vlan_list(&args[1..])? {
                acc.declare(id);
            }
            return Some(VlanPassState::NoContext);
        }
    }

    let ids = parse_vlan_list(args)?;
    if let [id] = ids.as_slice() {
        acc.declare(*id);
        return Some(VlanPassState::InVlanBlock(*id));
    }
    for id in ids {
        acc.declare(id);
    }
    Some(VlanPassState::NoContext)
}

fn access_binding(line: &str, tokens: &[&str], syntax: &VlanSyntax) -> Option<u32> {
    syntax
        .access_prefixes
        .iter()
        .any(|prefix| line.starts_with(prefix))
        .then(|| tokens.last())
        .flatten()
        .filter(|t| is_numeric(t))
        .and_then(|t| t.parse().ok())
}

fn vlan_interface_line(acc: &mut VlanAccumulator, id: u32, line: &str, tokens: &[&str], syntax: &VlanSyntax) {
    // secondary/sub addresses never replace the primary one
    let is_secondary = tokens
        .iter()
        .any(|t| t.eq_ignore_ascii_case("secondary") || t.eq_ignore_ascii_case("sub"));

    if line.starts_with("ip address ") && !is_secondary {
        if let Some(addr) = tokens.get(2).filter(|t| ipv4(t).is_some()) {
            let info = acc.vlanif(id);
            info.ipv4 = Some(addr.to_string());
            info.mask4 = tokens.get(3).map(|m| m.to_string());
        }
    } else if line.starts_with("ipv6 address ") {
        if tokens.iter().any(|t| t.eq_ignore_ascii_case("link-local")) {
            return;
        }
        if let Some((addr, prefix)) = ipv6_with_prefix(&tokens[2..]) {
            let info = acc.vlanif(id);
            info.ipv6 = Some(addr.to_string());
            info.mask6 = prefix;
        }
    } else if let Some(rest) = syntax
        .pseudowire_prefixes
        .iter()
        .find_map(|prefix| rest_after(line, prefix))
    {
        let args = split(rest);
        if args.is_empty() {
            return;
        }
        acc.bind_pseudowire(id, &Pseudowire::parse(&args));
    }
}
