//! Builder for creating analysis engines.

use super::AnalysisEngine;
use crate::dialect::{ExtractOptions, VendorKind};

/// Builder for constructing an [`AnalysisEngine`].
///
/// # Example
///
/// ```rust
/// use cfglens::{AnalysisEngine, VendorKind};
///
/// let mut engine = AnalysisEngine::builder()
///     .vendor(VendorKind::Huawei)
///     .default_mtu(9000)
///     .build();
///
/// let vendor = engine.load("vlan 10\n").unwrap();
/// assert_eq!(vendor, VendorKind::Huawei);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    vendor: Option<VendorKind>,
    options: ExtractOptions,
}

impl EngineBuilder {
    /// Create a builder with detection enabled and a 1500 byte default MTU.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip detection and parse every document as `vendor`.
    pub fn vendor(mut self, vendor: VendorKind) -> Self {
        self.vendor = Some(vendor);
        self
    }

    /// Set the MTU reported for VLAN contexts that configure none.
    pub fn default_mtu(mut self, mtu: u32) -> Self {
        self.options.default_mtu = mtu;
        self
    }

    /// Build the engine.
    ///
    /// The engine is empty; call [`AnalysisEngine::load`] before extracting.
    pub fn build(self) -> AnalysisEngine {
        AnalysisEngine::with_options(self.options, self.vendor)
    }
}
