//! Extraction passes shared by the block-structured dialects.
//!
//! Cisco IOS and Huawei VRP both open a context with a declaration line
//! (`interface X`, `vlan N`, `bgp N`) and fill it from the lines that
//! follow. The passes here run that state machine once; each dialect only
//! supplies its keywords through a syntax table.

pub(crate) mod bgp;
pub(crate) mod interfaces;
pub(crate) mod tokens;
pub(crate) mod vlan;
