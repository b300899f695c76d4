//! Custom error types for the catalog aggregator
//!
//! This module defines the error taxonomy shared by the catalog services.
//! Per-folder and per-event errors are isolated at their boundary and never
//! abort a whole catalog request; only the fatal variants do.

use thiserror::Error;

/// Custom error type for catalog aggregation
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A folder carries a descriptor file whose content is missing or
    /// malformed; scoped to that single folder
    #[error("Invalid event descriptor in {folder}: {reason}")]
    Descriptor { folder: String, reason: String },

    /// Media listing failed for a single event (network error, non-success
    /// status, timeout); the event degrades to an empty media list
    #[error("Media resolution failed for {event}: {reason}")]
    MediaResolution { event: String, reason: String },

    /// The catalog root directory cannot be read at all
    #[error("Catalog root unreadable: {0}")]
    RootUnreadable(String),

    /// Remote listing credentials entirely absent while a remote backend is
    /// the configured strategy
    #[error("Remote listing credentials not configured: {0}")]
    Credentials(String),
}

impl CatalogError {
    /// Whether this error aborts the whole catalog request rather than the
    /// folder or event it originated in
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CatalogError::RootUnreadable(_) | CatalogError::Credentials(_)
        )
    }
}

/// Type alias for Result with CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;
