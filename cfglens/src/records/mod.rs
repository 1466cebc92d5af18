//! Normalized records produced by the extraction passes.
//!
//! All records are plain data derived from one document. They serialize
//! with serde so the presentation layer can export them as-is.

mod bgp;
mod interface;
mod l2vpn;
mod vlan;

pub use bgp::{BgpNeighbor, BgpNetwork, BgpSummary, DEFAULT_VRF};
pub use interface::{InterfaceKind, InterfaceRecord, InterfaceStatus};
pub use l2vpn::{Encapsulation, L2vpnCircuit};
pub(crate) use l2vpn::token_or_unknown;
pub use vlan::{DEFAULT_MTU, VlanContext};
