use thiserror::Error;

/// Errors that can occur when querying a lazy tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogLazyTreeError {
    /// The requested entry is absent, or is only present as a tombstone
    /// when a live entry was asked for.
    #[error("Entry not found: {0}")]
    NotFound(String),
}

impl DialogLazyTreeError {
    pub(crate) fn not_found(reason: &str) -> Self {
        DialogLazyTreeError::NotFound(reason.to_string())
    }
}
