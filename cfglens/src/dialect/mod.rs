//! Vendor dialects.
//!
//! A dialect knows how one vendor writes its running configuration and
//! turns a [`LineBuffer`] into normalized records. Dialects are stateless;
//! [`dialect_for`] hands out shared instances.

mod detect;
mod kind;
pub mod vendors;

pub use detect::detect;
pub use kind::VendorKind;

use crate::buffer::LineBuffer;
use crate::records::{BgpSummary, DEFAULT_MTU, InterfaceRecord, L2vpnCircuit, VlanContext};

/// Options shared by the extraction passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// MTU reported for VLAN contexts that set none.
    pub default_mtu: u32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            default_mtu: DEFAULT_MTU,
        }
    }
}

/// Extraction behavior of one vendor dialect.
///
/// Every method is a pure function of the buffer. Calling one twice on the
/// same buffer yields equal results.
pub trait ConfigDialect: Send + Sync {
    /// The vendor this dialect parses.
    fn kind(&self) -> VendorKind;

    /// Interface records, in declaration order.
    fn interfaces(&self, lines: &LineBuffer) -> Vec<InterfaceRecord>;

    /// BGP process, neighbors, networks and VRFs.
    fn bgp(&self, lines: &LineBuffer) -> BgpSummary;

    /// L2VPN circuits, in document order.
    fn l2vpn(&self, lines: &LineBuffer) -> Vec<L2vpnCircuit>;

    /// One context per VLAN id seen anywhere, ascending by id.
    fn vlan_contexts(&self, lines: &LineBuffer, options: &ExtractOptions) -> Vec<VlanContext>;
}

/// Get the dialect for a vendor. `Unknown` has none.
pub fn dialect_for(kind: VendorKind) -> Option<&'static dyn ConfigDialect> {
    match kind {
        VendorKind::Cisco => Some(&vendors::CiscoIos),
        VendorKind::Huawei => Some(&vendors::HuaweiVrp),
        VendorKind::Mikrotik => Some(&vendors::RouterOs),
        VendorKind::Unknown => None,
    }
}
