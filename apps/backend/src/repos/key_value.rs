//! Minimal per-aggregate persistence contract.

use thiserror::Error;

use crate::errors::domain::{DomainError, InfraErrorKind};

/// Failure reported by a backing store adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("stored data corrupt: {0}")]
    Corrupt(String),
}

impl From<StoreError> for DomainError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(detail) => {
                DomainError::infra(InfraErrorKind::StorageFailure, detail)
            }
            StoreError::Corrupt(detail) => {
                DomainError::infra(InfraErrorKind::DataCorruption, detail)
            }
        }
    }
}

/// A key-value store holding one aggregate type.
///
/// Calls are synchronous and may block. Implementations must be shareable
/// across threads; any serialization between writers is theirs to provide.
pub trait KeyValueStore<K, V>: Send + Sync {
    /// Insert or replace the value stored under `id`.
    fn save(&self, id: &K, value: &V) -> Result<(), StoreError>;

    fn find(&self, id: &K) -> Result<Option<V>, StoreError>;

    fn exists(&self, id: &K) -> Result<bool, StoreError>;

    fn find_all(&self) -> Result<Vec<V>, StoreError>;

    fn count(&self) -> Result<u64, StoreError>;

    fn delete(&self, id: &K) -> Result<(), StoreError>;

    fn delete_all(&self) -> Result<(), StoreError>;
}
