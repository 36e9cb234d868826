//! # Repository Errors

use thiserror::Error;

use crate::model::{ItemId, ValidationError};
use crate::storage::StorageError;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository operation failures. None of them change the collection.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No item stored under this id
    #[error("no item with id {0}")]
    NotFound(ItemId),

    /// Every id up to `ItemId::MAX` is taken
    #[error("no free item id left, the largest id {} is in use", ItemId::MAX)]
    IdsExhausted,

    /// Draft failed a field rule
    #[error("invalid item: {0}")]
    Invalid(#[from] ValidationError),

    /// Data file could not be read or written
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl RepositoryError {
    /// Whether the error is a missing id
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound(_))
    }
}
