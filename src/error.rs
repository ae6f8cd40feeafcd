use thiserror::Error;

/// Errors that stop a run before any row is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// No row in the scan window carries the header label in column 1
    #[error("Header row not found: no \"{label}\" in column 1 of rows 1..={scanned_rows}")]
    HeaderNotFound { label: String, scanned_rows: u32 },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
