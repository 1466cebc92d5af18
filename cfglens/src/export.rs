//! Tabular export of extracted records.
//!
//! Every builder produces a [`Table`] that can be printed as padded text
//! or written out as CSV. Column headers match the analyzer's reports.
//!
//! # Example
//!
//! ```rust
//! use cfglens::AnalysisEngine;
//! use cfglens::export::{Style, vlan_table};
//!
//! let mut engine = AnalysisEngine::new();
//! engine.load("version 15.2\nvlan 10\n name USERS\n!\n").unwrap();
//!
//! let table = vlan_table(&engine.vlan_contexts().unwrap(), Style::Csv);
//! assert!(table.render_csv().starts_with("Vlan,Descrição,Acessos"));
//! ```

use std::fmt;

use crate::records::{BgpNeighbor, BgpNetwork, InterfaceRecord, L2vpnCircuit, VlanContext};

const VLAN_HEADERS: [&str; 12] = [
    "Vlan", "Descrição", "Acessos", "IP", "MASK4", "IPv6", "MASK6", "L2VC", "NEIGHBOR", "VPLS-ID",
    "MTU", "RAW",
];

const INTERFACE_HEADERS: [&str; 7] = [
    "Interface",
    "Tipo",
    "IP Address",
    "Subnet Mask",
    "Status",
    "VLAN",
    "Descrição",
];

const BGP_NEIGHBOR_HEADERS: [&str; 4] = ["Peer IP", "Remote AS", "VRF", "Descrição"];

const BGP_NETWORK_HEADERS: [&str; 2] = ["Rede", "VRF"];

const L2VPN_HEADERS: [&str; 6] = ["Tipo", "Nome/VSI", "Peer", "VC ID", "Encapsulation", "Signaling"];

/// How missing values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// Missing values shown as `-`.
    #[default]
    Display,
    /// Missing values left empty.
    Csv,
}

impl Style {
    fn missing(&self) -> &'static str {
        match self {
            Style::Display => "-",
            Style::Csv => "",
        }
    }

    fn cell<T: ToString>(&self, value: Option<T>) -> String {
        value.map_or_else(|| self.missing().to_string(), |v| v.to_string())
    }

    fn flag(&self, value: bool) -> String {
        if value { "sim" } else { "não" }.to_string()
    }
}

/// A rendered table: header row plus data rows of equal width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as CSV: header line then one line per row, `\n` terminated.
    pub fn render_csv(&self) -> String {
        let mut out = String::new();
        for row in std::iter::once(&self.headers).chain(&self.rows) {
            let line: Vec<String> = row.iter().map(|cell| csv_field(cell)).collect();
            out.push_str(&line.join(","));
            out.push('\n');
        }
        out
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        for row in std::iter::once(&self.headers).chain(&self.rows) {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
                .collect();
            writeln!(f, "{}", cells.join("  ").trim_end())?;
        }
        Ok(())
    }
}

/// Quote a CSV field if it holds a comma, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// VLAN context table, one row per VLAN id.
pub fn vlan_table(contexts: &[VlanContext], style: Style) -> Table {
    let mut table = Table::new(&VLAN_HEADERS);
    for ctx in contexts {
        let accesses = (!ctx.accesses.is_empty()).then(|| ctx.accesses_joined());
        table.rows.push(vec![
            ctx.vlan_id.to_string(),
            style.cell(ctx.description.as_deref()),
            style.cell(accesses),
            style.cell(ctx.ipv4.as_deref()),
            style.cell(ctx.mask4.as_deref()),
            style.cell(ctx.ipv6.as_deref()),
            style.cell(ctx.mask6),
            style.flag(ctx.l2vc_bound),
            style.cell(ctx.neighbor.as_deref()),
            style.cell(ctx.vpls_id),
            ctx.mtu.to_string(),
            style.flag(ctx.raw_mode),
        ]);
    }
    table
}

/// Interface table.
pub fn interface_table(records: &[InterfaceRecord], style: Style) -> Table {
    let mut table = Table::new(&INTERFACE_HEADERS);
    for record in records {
        table.rows.push(vec![
            record.name.clone(),
            record.kind.to_string(),
            style.cell(record.ip_address.as_deref()),
            style.cell(record.subnet_mask.as_deref()),
            record.status.as_str().to_string(),
            style.cell(record.vlan),
            style.cell(record.description.as_deref()),
        ]);
    }
    table
}

/// BGP neighbor table.
pub fn bgp_neighbor_table(neighbors: &[BgpNeighbor], style: Style) -> Table {
    let mut table = Table::new(&BGP_NEIGHBOR_HEADERS);
    for neighbor in neighbors {
        table.rows.push(vec![
            neighbor.peer_ip.clone(),
            neighbor.remote_as.clone(),
            neighbor.vrf.clone(),
            style.cell(neighbor.description.as_deref()),
        ]);
    }
    table
}

/// BGP network table.
pub fn bgp_network_table(networks: &[BgpNetwork]) -> Table {
    let mut table = Table::new(&BGP_NETWORK_HEADERS);
    for network in networks {
        table
            .rows
            .push(vec![network.network.clone(), network.vrf.clone()]);
    }
    table
}

/// L2VPN circuit table.
pub fn l2vpn_table(circuits: &[L2vpnCircuit], style: Style) -> Table {
    let mut table = Table::new(&L2VPN_HEADERS);
    for circuit in circuits {
        table.rows.push(vec![
            circuit.kind().to_string(),
            style.cell(circuit.name()),
            style.cell(circuit.peer()),
            style.cell(circuit.vc_id()),
            circuit.encapsulation().to_string(),
            style.cell(circuit.signaling()),
        ]);
    }
    table
}
