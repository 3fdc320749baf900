//! Store provisioning and single-record writes.
//!
//! [`ensure_store`] makes the database and partitioned container available
//! and returns a [`StoreHandle`]; it is safe to call on every run.
//! [`StoreHandle::write_record`] performs one create per record and reports
//! a typed [`WriteError`] instead of aborting.

use std::sync::Arc;

use lostfound_core::record::{LostItemRecord, PARTITION_KEY_PATH};
use lostfound_core::types::RecordId;

use crate::error::{ProvisioningError, WriteError};
use crate::store::DocumentStore;

/// Default database name for seeded records.
pub const DEFAULT_DATABASE: &str = "MaterializedViewsDB";

/// Default container name for seeded records.
pub const DEFAULT_CONTAINER: &str = "LostItems";

/// Names of the target database and container for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub database: String,
    pub container: String,
    pub partition_key_path: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            container: DEFAULT_CONTAINER.to_string(),
            partition_key_path: PARTITION_KEY_PATH.to_string(),
        }
    }
}

/// A provisioned container, shared for the whole session.
#[derive(Clone)]
pub struct StoreHandle {
    store: Arc<dyn DocumentStore>,
    settings: StoreSettings,
}

/// What a successful write created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReceipt {
    pub id: RecordId,
    pub partition_key: String,
}

/// Ensure the database and container exist, creating only what is missing.
pub async fn ensure_store(
    store: Arc<dyn DocumentStore>,
    settings: &StoreSettings,
) -> Result<StoreHandle, ProvisioningError> {
    let db_outcome = store
        .ensure_database(&settings.database)
        .await
        .map_err(|e| ProvisioningError::from_store("database", e))?;
    tracing::info!(database = %settings.database, outcome = ?db_outcome, "Database ready");

    let container_outcome = store
        .ensure_container(
            &settings.database,
            &settings.container,
            &settings.partition_key_path,
        )
        .await
        .map_err(|e| ProvisioningError::from_store("container", e))?;
    tracing::info!(
        database = %settings.database,
        container = %settings.container,
        partition_key_path = %settings.partition_key_path,
        outcome = ?container_outcome,
        "Container ready"
    );

    Ok(StoreHandle {
        store,
        settings: settings.clone(),
    })
}

impl StoreHandle {
    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Create `record` in the partition named by its `createUserPlace`.
    pub async fn write_record(&self, record: &LostItemRecord) -> Result<WriteReceipt, WriteError> {
        let partition_key = record.partition_key();
        if partition_key.is_empty() {
            return Err(WriteError::InvalidPartitionKey(format!(
                "record {} has an empty partition key",
                record.id
            )));
        }

        let document = serde_json::to_value(record)
            .map_err(|e| WriteError::Unknown(format!("failed to serialize record: {e}")))?;

        self.store
            .create_document(
                &self.settings.database,
                &self.settings.container,
                partition_key,
                &document,
            )
            .await?;

        tracing::debug!(record_id = %record.id, partition = %partition_key, "Record created");
        Ok(WriteReceipt {
            id: record.id.clone(),
            partition_key: partition_key.to_string(),
        })
    }
}
