//! Vendor dialect implementations.

pub mod cisco;
pub mod huawei;
pub mod mikrotik;

pub use cisco::CiscoIos;
pub use huawei::HuaweiVrp;
pub use mikrotik::RouterOs;
