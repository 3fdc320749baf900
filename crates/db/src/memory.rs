//! In-process [`DocumentStore`] used for tests and dry runs.
//!
//! Mirrors the store semantics the pipeline relies on: create-if-absent for
//! databases and containers, create-only documents keyed by
//! `(partition, id)`, and a partition key that must match the document's
//! partition key field. Failures can be injected for a specific write.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::StoreError;
use crate::store::{DocumentStore, Provisioned};

#[derive(Debug)]
struct MemoryContainer {
    partition_key_path: String,
    documents: BTreeMap<(String, String), serde_json::Value>,
}

#[derive(Debug, Default)]
struct MemoryState {
    databases: BTreeMap<String, BTreeMap<String, MemoryContainer>>,
    /// Number of `create_document` calls seen so far.
    write_attempts: usize,
    /// 1-based write attempt number -> injected failure.
    injected: HashMap<usize, StoreError>,
}

/// Thread-safe in-memory document store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    offline: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails as unreachable.
    pub fn offline() -> Self {
        Self {
            state: Mutex::default(),
            offline: true,
        }
    }

    /// Make the `attempt`-th `create_document` call (1-based) fail with `error`.
    pub fn fail_nth_write(&self, attempt: usize, error: StoreError) {
        self.lock().injected.insert(attempt, error);
    }

    /// Number of databases that exist.
    pub fn database_count(&self) -> usize {
        self.lock().databases.len()
    }

    /// Number of containers in `database`.
    pub fn container_count(&self, database: &str) -> usize {
        self.lock().databases.get(database).map_or(0, BTreeMap::len)
    }

    /// Partition key path a container was created with.
    pub fn partition_key_path(&self, database: &str, container: &str) -> Option<String> {
        self.lock()
            .databases
            .get(database)
            .and_then(|db| db.get(container))
            .map(|c| c.partition_key_path.clone())
    }

    /// All stored documents as `(partition, id, document)`, ordered by key.
    pub fn documents(
        &self,
        database: &str,
        container: &str,
    ) -> Vec<(String, String, serde_json::Value)> {
        self.lock()
            .databases
            .get(database)
            .and_then(|db| db.get(container))
            .map(|c| {
                c.documents
                    .iter()
                    .map(|((pk, id), doc)| (pk.clone(), id.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of `create_document` calls seen, successful or not.
    pub fn write_attempts(&self) -> usize {
        self.lock().write_attempts
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline {
            Err(StoreError::Unreachable("memory store is offline".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ensure_database(&self, database: &str) -> Result<Provisioned, StoreError> {
        self.check_online()?;
        let mut state = self.lock();
        if state.databases.contains_key(database) {
            return Ok(Provisioned::AlreadyExists);
        }
        state.databases.insert(database.to_string(), BTreeMap::new());
        Ok(Provisioned::Created)
    }

    async fn ensure_container(
        &self,
        database: &str,
        container: &str,
        partition_key_path: &str,
    ) -> Result<Provisioned, StoreError> {
        self.check_online()?;
        let mut state = self.lock();
        let db = state.databases.get_mut(database).ok_or_else(|| StoreError::Status {
            status: 404,
            message: format!("database '{database}' does not exist"),
        })?;
        if db.contains_key(container) {
            return Ok(Provisioned::AlreadyExists);
        }
        db.insert(
            container.to_string(),
            MemoryContainer {
                partition_key_path: partition_key_path.to_string(),
                documents: BTreeMap::new(),
            },
        );
        Ok(Provisioned::Created)
    }

    async fn create_document(
        &self,
        database: &str,
        container: &str,
        partition_key: &str,
        document: &serde_json::Value,
    ) -> Result<(), StoreError> {
        self.check_online()?;
        let mut state = self.lock();
        state.write_attempts += 1;
        let attempt = state.write_attempts;
        if let Some(err) = state.injected.remove(&attempt) {
            return Err(err);
        }

        let coll = state
            .databases
            .get_mut(database)
            .and_then(|db| db.get_mut(container))
            .ok_or_else(|| StoreError::Status {
                status: 404,
                message: format!("container '{database}/{container}' does not exist"),
            })?;

        let field = coll.partition_key_path.trim_start_matches('/');
        match document.get(field).and_then(serde_json::Value::as_str) {
            Some(value) if !value.is_empty() && value == partition_key => {}
            _ => {
                return Err(StoreError::InvalidPartitionKey(format!(
                    "document field '{field}' does not match partition key '{partition_key}'"
                )))
            }
        }

        let id = document
            .get("id")
            .and_then(serde_json::Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| StoreError::Status {
                status: 400,
                message: "document is missing a string 'id'".into(),
            })?
            .to_string();

        let key = (partition_key.to_string(), id);
        if coll.documents.contains_key(&key) {
            return Err(StoreError::Conflict);
        }
        coll.documents.insert(key, document.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
