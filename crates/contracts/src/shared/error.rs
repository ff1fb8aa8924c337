use thiserror::Error;

/// Failure of a catalog lookup
///
/// Every variant ends in the same place on screen (the unknown marker);
/// the distinction only matters for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("not found")]
    NotFound,
}

