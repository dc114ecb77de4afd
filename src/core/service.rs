//! Collaborator contract for fetching and mutating records

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Data and mutation collaborator for every record kind
///
/// Records are addressed by kind name (`"customer"`, `"request"`, ...) and id.
/// Implementations decide how references come back: as bare ids or
/// populated objects. Payloads handed to `create`/`update` carry references
/// as bare ids.
#[async_trait]
pub trait RecordService: Send + Sync {
    /// Get a record by id
    async fn get(&self, kind: &str, id: &str) -> Result<Option<Value>>;

    /// List all records of a kind
    async fn list(&self, kind: &str) -> Result<Vec<Value>>;

    /// Create a record, returning it with its assigned id
    async fn create(&self, kind: &str, payload: Value) -> Result<Value>;

    /// Replace an existing record
    async fn update(&self, kind: &str, id: &str, payload: Value) -> Result<Value>;

    /// Delete a record
    async fn delete(&self, kind: &str, id: &str) -> Result<()>;
}
