//! The session-store seam over the shared external key-value store.

use async_trait::async_trait;

use crate::errors::domain::DomainError;

/// Abstraction over the shared, externally-reachable key-value store.
///
/// An absent key or field is a valid "not yet initialized" state and is
/// reported as `None`/`false`, never as an error. Connectivity failures
/// surface as `Infra(StoreUnavailable)`; callers that parse stored values
/// raise `Infra(CorruptState)` on malformed data instead of guessing a
/// default.
///
/// All operations are safe to retry: scalar writes are last-write-wins,
/// the conditional write is idempotent once settled, and duplicate list
/// appends are tolerated because roll logs are observational only.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read one field of a stored mapping.
    async fn get_field(&self, key: &str, field: &str) -> Result<Option<String>, DomainError>;

    /// Write one field of a stored mapping (last write wins).
    async fn set_field(&self, key: &str, field: &str, value: &str) -> Result<(), DomainError>;

    /// Atomically create a field only if it is absent.
    ///
    /// Returns `true` iff this call created the field. This is the
    /// conditional write that session construction races on.
    async fn set_field_if_absent(
        &self,
        key: &str,
        field: &str,
        value: &str,
    ) -> Result<bool, DomainError>;

    /// Append a value to the named list. Append-only; entries are never
    /// mutated or removed.
    async fn append_to_list(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Whether any value is stored under the key.
    async fn exists(&self, key: &str) -> Result<bool, DomainError>;
}
