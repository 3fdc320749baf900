//! Document store access for seeded lost-item records.
//!
//! - [`DocumentStore`] is the backend seam.
//! - [`CosmosClient`] talks to Cosmos DB over its REST API.
//! - [`MemoryStore`] keeps everything in process for tests and dry runs.
//! - [`ensure_store`] and [`StoreHandle::write_record`] are what the seeding
//!   loop calls.

pub mod cosmos;
pub mod error;
pub mod memory;
pub mod provisioner;
pub mod store;

pub use cosmos::CosmosClient;
pub use error::{ProvisioningError, StoreError, WriteError};
pub use memory::MemoryStore;
pub use provisioner::{ensure_store, StoreHandle, StoreSettings, WriteReceipt};
pub use store::{DocumentStore, Provisioned};
