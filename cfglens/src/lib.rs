//! # cfglens
//!
//! Multi-vendor router running-config analyzer.
//!
//! cfglens reads the text of a router's running configuration, works out
//! which vendor wrote it, and extracts normalized records: interfaces, the
//! BGP process, L2VPN circuits and a per-VLAN view that correlates VLAN
//! declarations, access ports, VLAN-interface addressing and pseudowires.
//!
//! ## Features
//!
//! - Keyword-based vendor detection (Cisco IOS, Huawei VRP, MikroTik RouterOS)
//! - Block-structured parsing for IOS/VRP, command-list parsing for RouterOS
//! - Per-VLAN context correlation across four independent signals
//! - CSV and plain-text table export, JSON for BGP
//!
//! ## Quick Start
//!
//! ```rust
//! use cfglens::{AnalysisEngine, VendorKind};
//!
//! let config = "\
//! version 15.2
//! vlan 100
//!  name CLIENTE-A
//! !
//! interface Vlan100
//!  ip address 10.100.0.1 255.255.255.0
//!  xconnect 10.0.0.9 100 encapsulation mpls
//! !
//! ";
//!
//! let mut engine = AnalysisEngine::new();
//! assert_eq!(engine.load(config)?, VendorKind::Cisco);
//!
//! for ctx in engine.vlan_contexts()? {
//!     println!("{} {:?} -> {:?}", ctx.vlan_id, ctx.description, ctx.neighbor);
//! }
//! # Ok::<(), cfglens::Error>(())
//! ```

pub mod buffer;
pub mod dialect;
pub mod engine;
pub mod error;
pub mod export;
mod extract;
pub mod records;

// Re-export main types for convenience
pub use buffer::{LineBuffer, decode_config};
pub use dialect::{ConfigDialect, ExtractOptions, VendorKind, detect, dialect_for};
pub use engine::{AnalysisEngine, EngineBuilder};
pub use error::{DialectError, EngineError, Error, Result};
pub use records::{
    BgpNeighbor, BgpNetwork, BgpSummary, Encapsulation, InterfaceKind, InterfaceRecord,
    InterfaceStatus, L2vpnCircuit, VlanContext,
};
