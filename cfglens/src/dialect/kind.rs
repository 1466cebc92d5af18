//! Vendor dialect identifiers.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DialectError;

/// Configuration dialect of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorKind {
    Cisco,
    Huawei,
    Mikrotik,
    #[default]
    Unknown,
}

impl VendorKind {
    /// All dialects that have an extractor implementation.
    pub const SUPPORTED: [VendorKind; 3] =
        [VendorKind::Cisco, VendorKind::Huawei, VendorKind::Mikrotik];

    pub fn as_str(&self) -> &'static str {
        match self {
            VendorKind::Cisco => "cisco",
            VendorKind::Huawei => "huawei",
            VendorKind::Mikrotik => "mikrotik",
            VendorKind::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, VendorKind::Unknown)
    }
}

impl fmt::Display for VendorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VendorKind {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cisco" => Ok(VendorKind::Cisco),
            "huawei" => Ok(VendorKind::Huawei),
            "mikrotik" | "routeros" => Ok(VendorKind::Mikrotik),
            "unknown" => Ok(VendorKind::Unknown),
            _ => Err(DialectError::UnknownVendor { name: s.to_string() }),
        }
    }
}
