//! Errors surfaced by `HashTable`.

use thiserror::Error;

/// Failures of the strict operations and of capacity validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashTableError {
    /// Requested bucket count is below what the table accepts.
    #[error("invalid capacity {capacity}: must be at least {minimum}")]
    InvalidCapacity {
        /// The rejected bucket count
        capacity: usize,
        /// The smallest accepted bucket count
        minimum: usize,
    },

    /// Strict lookup or delete on a key the table does not hold.
    #[error("key not found: {key:?}")]
    KeyNotFound {
        /// The missing key
        key: String,
    },
}

impl HashTableError {
    pub(crate) fn key_not_found(key: &str) -> Self {
        HashTableError::KeyNotFound {
            key: key.to_owned(),
        }
    }
}

/// Result alias for table operations.
pub type Result<T> = core::result::Result<T, HashTableError>;
