//! The document store seam.
//!
//! [`DocumentStore`] is the minimal surface the seeding pipeline needs from a
//! partitioned document database. The production backend is
//! [`CosmosClient`](crate::cosmos::CosmosClient); tests and dry runs use
//! [`MemoryStore`](crate::memory::MemoryStore).

use async_trait::async_trait;

use crate::error::StoreError;

/// Outcome of an idempotent create-if-absent call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    Created,
    AlreadyExists,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create the database unless it already exists.
    async fn ensure_database(&self, database: &str) -> Result<Provisioned, StoreError>;

    /// Create a container partitioned on `partition_key_path` unless it
    /// already exists.
    async fn ensure_container(
        &self,
        database: &str,
        container: &str,
        partition_key_path: &str,
    ) -> Result<Provisioned, StoreError>;

    /// Create (never upsert) one document in the given partition.
    async fn create_document(
        &self,
        database: &str,
        container: &str,
        partition_key: &str,
        document: &serde_json::Value,
    ) -> Result<(), StoreError>;
}
