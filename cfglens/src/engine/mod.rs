//! Analysis engine.
//!
//! One engine owns one document. [`AnalysisEngine::load`] splits the text
//! into a [`LineBuffer`] and records the vendor; every extraction call then
//! runs the matching dialect over that buffer from scratch.
//!
//! ```text
//! new() ──► load(text) ──► interfaces() / bgp() / l2vpn() / vlan_contexts()
//!              │                     ▲
//!              └── set_vendor(kind) ─┘
//! ```

mod builder;

pub use builder::EngineBuilder;

use crate::buffer::LineBuffer;
use crate::dialect::{ConfigDialect, ExtractOptions, VendorKind, detect, dialect_for};
use crate::error::{EngineError, Result};
use crate::records::{BgpSummary, InterfaceRecord, L2vpnCircuit, VlanContext};

/// The loaded document and the vendor it is parsed as.
#[derive(Debug)]
struct Document {
    lines: LineBuffer,
    vendor: VendorKind,
}

/// Runs the vendor extractors over a single running configuration.
#[derive(Debug, Default)]
pub struct AnalysisEngine {
    options: ExtractOptions,
    vendor_override: Option<VendorKind>,
    document: Option<Document>,
}

impl AnalysisEngine {
    /// Create an engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for configuring an engine.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub(crate) fn with_options(options: ExtractOptions, vendor_override: Option<VendorKind>) -> Self {
        Self {
            options,
            vendor_override,
            document: None,
        }
    }

    /// Load a document and determine its vendor.
    ///
    /// The vendor comes from the builder override if one was set, otherwise
    /// from keyword detection. An engine holds one document for its whole
    /// life; loading a second one fails with [`EngineError::AlreadyLoaded`].
    pub fn load(&mut self, text: &str) -> Result<VendorKind> {
        if self.document.is_some() {
            return Err(EngineError::AlreadyLoaded.into());
        }

        let lines = LineBuffer::new(text);
        let vendor = match self.vendor_override {
            Some(vendor) => {
                log::info!("Vendor override: {}", vendor);
                vendor
            }
            None => detect(text),
        };

        log::debug!("Loaded {} lines, vendor {}", lines.len(), vendor);
        if !vendor.is_known() {
            log::warn!("No vendor signature matched; extraction will return empty results");
        }

        self.document = Some(Document { lines, vendor });
        Ok(vendor)
    }

    /// Replace the vendor of the loaded document.
    ///
    /// Used to retry extraction after detection returned `Unknown`.
    pub fn set_vendor(&mut self, vendor: VendorKind) -> Result<()> {
        let document = self.document.as_mut().ok_or(EngineError::NotLoaded)?;
        log::info!("Vendor changed: {} -> {}", document.vendor, vendor);
        document.vendor = vendor;
        Ok(())
    }

    /// Vendor of the loaded document, or `None` before `load`.
    pub fn vendor(&self) -> Option<VendorKind> {
        self.document.as_ref().map(|d| d.vendor)
    }

    /// Number of lines in the loaded document.
    pub fn line_count(&self) -> Result<usize> {
        Ok(self.document()?.lines.len())
    }

    /// Check if a document has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// Extraction options in effect.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract interface records.
    pub fn interfaces(&self) -> Result<Vec<InterfaceRecord>> {
        Ok(self
            .dialect()?
            .map(|(dialect, lines)| dialect.interfaces(lines))
            .unwrap_or_default())
    }

    /// Extract the BGP summary.
    pub fn bgp(&self) -> Result<BgpSummary> {
        Ok(self
            .dialect()?
            .map(|(dialect, lines)| dialect.bgp(lines))
            .unwrap_or_default())
    }

    /// Extract L2VPN circuits.
    pub fn l2vpn(&self) -> Result<Vec<L2vpnCircuit>> {
        Ok(self
            .dialect()?
            .map(|(dialect, lines)| dialect.l2vpn(lines))
            .unwrap_or_default())
    }

    /// Extract per-VLAN contexts, ascending by VLAN id.
    pub fn vlan_contexts(&self) -> Result<Vec<VlanContext>> {
        Ok(self
            .dialect()?
            .map(|(dialect, lines)| dialect.vlan_contexts(lines, &self.options))
            .unwrap_or_default())
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| EngineError::NotLoaded.into())
    }

    /// Dialect and buffer of the loaded document; `None` for `Unknown`.
    fn dialect(&self) -> Result<Option<(&'static dyn ConfigDialect, &LineBuffer)>> {
        let document = self.document()?;
        Ok(dialect_for(document.vendor).map(|dialect| (dialect, &document.lines)))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::error::Error;

    const CISCO_PE: &str = "\
Building configuration...
version 15.2
hostname PE1
!
vlan 100
 name CLIENTE-A
!
interface GigabitEthernet0/1
 switchport access vlan 100
!
interface Vlan100
 ip address 10.100.0.1 255.255.255.0
 xconnect 10.0.0.9 100 encapsulation mpls
!
router bgp 65000
 neighbor 10.0.0.2 remote-as 65001
!
";

    const HUAWEI_PE: &str = "\
!Software Version V200R010C00SPC600
#
sysname PE2
#
vlan batch 10 20 30 to 35
#
vlan 300
 description CLIENTE-B
#
interface Vlanif300
 mpls l2vc 10.0.0.9 300 raw
#
";

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_extract_before_load() {
        let engine = AnalysisEngine::new();
        assert!(!engine.is_loaded());
        assert_eq!(engine.vendor(), None);
        assert_eq!(engine.interfaces().unwrap_err(), Error::Engine(EngineError::NotLoaded));
        assert_eq!(engine.bgp().unwrap_err(), Error::Engine(EngineError::NotLoaded));
        assert_eq!(engine.l2vpn().unwrap_err(), Error::Engine(EngineError::NotLoaded));
        assert_eq!(engine.vlan_contexts().unwrap_err(), Error::Engine(EngineError::NotLoaded));
        assert!(engine.line_count().is_err());
    }

    #[test]
    fn test_set_vendor_before_load() {
        let mut engine = AnalysisEngine::new();
        assert!(engine.set_vendor(VendorKind::Cisco).is_err());
    }

    #[test]
    fn test_load_twice() {
        let mut engine = AnalysisEngine::new();
        engine.load(CISCO_PE).unwrap();
        let err = engine.load(HUAWEI_PE).unwrap_err();
        assert_eq!(err, Error::Engine(EngineError::AlreadyLoaded));
        assert_eq!(engine.vendor(), Some(VendorKind::Cisco));
    }

    #[test]
    fn test_load_detects_vendor() {
        let mut engine = AnalysisEngine::new();
        assert_eq!(engine.load(CISCO_PE).unwrap(), VendorKind::Cisco);
        assert!(engine.is_loaded());
        assert_eq!(engine.line_count().unwrap(), CISCO_PE.lines().count());
    }

    #[test]
    fn test_unknown_vendor_is_empty() {
        init_logging();
        let mut engine = AnalysisEngine::new();
        let vendor = engine.load("hello world\nnothing to see\n").unwrap();
        assert_eq!(vendor, VendorKind::Unknown);
        assert!(engine.interfaces().unwrap().is_empty());
        assert!(engine.bgp().unwrap().is_empty());
        assert!(engine.l2vpn().unwrap().is_empty());
        assert!(engine.vlan_contexts().unwrap().is_empty());
    }

    #[test]
    fn test_set_vendor_retries_extraction() {
        let text = "interface GigabitEthernet0/0\n ip address 10.0.0.1 255.255.255.0\n";
        let mut engine = AnalysisEngine::new();
        assert_eq!(engine.load(text).unwrap(), VendorKind::Unknown);
        assert!(engine.interfaces().unwrap().is_empty());

        engine.set_vendor(VendorKind::Cisco).unwrap();
        let records = engine.interfaces().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ip_address.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_builder_override_and_mtu() {
        let mut engine = AnalysisEngine::builder()
            .vendor(VendorKind::Huawei)
            .default_mtu(9100)
            .build();
        assert_eq!(engine.load("vlan 7\n").unwrap(), VendorKind::Huawei);

        let contexts = engine.vlan_contexts().unwrap();
        assert_eq!(contexts.len(), 1);
        assert_eq!(contexts[0].mtu, 9100);
        assert_eq!(engine.options().default_mtu, 9100);
    }

    #[test]
    fn test_cisco_pe_end_to_end() {
        init_logging();
        let mut engine = AnalysisEngine::new();
        engine.load(CISCO_PE).unwrap();

        let contexts = engine.vlan_contexts().unwrap();
        assert_eq!(contexts.len(), 1);
        let ctx = &contexts[0];
        assert_eq!(ctx.vlan_id, 100);
        assert_eq!(ctx.description.as_deref(), Some("CLIENTE-A"));
        assert_eq!(ctx.accesses_joined(), "GigabitEthernet0/1");
        assert_eq!(ctx.ipv4.as_deref(), Some("10.100.0.1"));
        assert_eq!(ctx.mask4.as_deref(), Some("255.255.255.0"));
        assert!(ctx.l2vc_bound);
        assert_eq!(ctx.neighbor.as_deref(), Some("10.0.0.9"));
        assert_eq!(ctx.vpls_id, Some(100));
        assert_eq!(ctx.mtu, 1500);
        assert!(!ctx.raw_mode);

        assert_eq!(engine.l2vpn().unwrap().len(), 1);
        assert_eq!(engine.bgp().unwrap().local_as.as_deref(), Some("65000"));
    }

    #[test]
    fn test_huawei_pe_end_to_end() {
        init_logging();
        let mut engine = AnalysisEngine::new();
        assert_eq!(engine.load(HUAWEI_PE).unwrap(), VendorKind::Huawei);

        let contexts = engine.vlan_contexts().unwrap();
        let ids: Vec<u32> = contexts.iter().map(|c| c.vlan_id).collect();
        assert_eq!(ids, vec![10, 20, 30, 31, 32, 33, 34, 35, 300]);

        let ctx = contexts.last().unwrap();
        assert_eq!(ctx.description.as_deref(), Some("CLIENTE-B"));
        assert!(ctx.l2vc_bound);
        assert_eq!(ctx.neighbor.as_deref(), Some("10.0.0.9"));
        assert_eq!(ctx.vpls_id, Some(300));
        assert!(ctx.raw_mode);
    }

    #[test]
    fn test_vlan_contexts_idempotent() {
        let mut engine = AnalysisEngine::new();
        engine.load(HUAWEI_PE).unwrap();
        assert_eq!(engine.vlan_contexts().unwrap(), engine.vlan_contexts().unwrap());
    }

    #[test]
    fn test_vlan_ids_are_union_of_signals() {
        let text = "\
vlan 5
 name ONLY-NAME
!
interface FastEthernet0/3
 switchport access vlan 6
!
interface Vlan7
 description no data
!
";
        let mut engine = AnalysisEngine::builder().vendor(VendorKind::Cisco).build();
        engine.load(text).unwrap();

        let ids: BTreeSet<u32> = engine.vlan_contexts().unwrap().iter().map(|c| c.vlan_id).collect();
        assert_eq!(ids, BTreeSet::from([5, 6, 7]));
    }
}
