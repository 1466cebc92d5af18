//! Error types for cfglens.
//!
//! Extraction never fails on data: malformed or unrecognized lines are
//! skipped. The errors here describe misuse of the engine and bad vendor
//! overrides.

use thiserror::Error;

/// Main error type for cfglens operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Engine lifecycle errors
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Dialect/vendor errors
    #[error("Dialect error: {0}")]
    Dialect(#[from] DialectError),
}

/// Engine lifecycle errors (load ordering, reuse).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Extraction requested before a document was loaded
    #[error("Engine not loaded - call load() first")]
    NotLoaded,

    /// A second document was loaded into the same engine
    #[error("Engine already holds a document - create a new engine per document")]
    AlreadyLoaded,
}

/// Dialect/vendor errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialectError {
    /// Vendor name did not match any known dialect
    #[error("Unknown vendor '{name}'")]
    UnknownVendor { name: String },
}

/// Result type alias using cfglens's Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err: Error = EngineError::NotLoaded.into();
        assert_eq!(
            err.to_string(),
            "Engine error: Engine not loaded - call load() first"
        );

        let err: Error = DialectError::UnknownVendor {
            name: "juniper".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Dialect error: Unknown vendor 'juniper'");
    }
}
