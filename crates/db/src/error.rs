//! Error types for the store layer.
//!
//! [`StoreError`] is what a [`DocumentStore`](crate::store::DocumentStore)
//! backend reports. The provisioner narrows it into [`ProvisioningError`]
//! (fatal for a session) or [`WriteError`] (recoverable per record).

/// Raw failure reported by a store backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The endpoint could not be reached (DNS, connect, TLS, timeout).
    #[error("Store unreachable: {0}")]
    Unreachable(String),

    /// The store rejected the credentials.
    #[error("Store rejected credentials (HTTP {status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// A resource with the same id already exists.
    #[error("Resource already exists")]
    Conflict,

    /// Request rate too large.
    #[error("Request throttled (retry after {retry_after_ms:?} ms)")]
    Throttled { retry_after_ms: Option<u64> },

    /// The partition key was empty or did not match the document.
    #[error("Invalid partition key: {0}")]
    InvalidPartitionKey(String),

    /// Any other non-success response.
    #[error("Store returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The client could not be configured (bad endpoint or key material).
    #[error("Invalid store configuration: {0}")]
    Configuration(String),
}

/// Failure to make the database or container available. Fatal for a run.
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
    #[error("Store endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("Store credentials rejected: {0}")]
    Unauthorized(String),

    #[error("Failed to provision {resource}: {message}")]
    Rejected {
        resource: &'static str,
        message: String,
    },
}

impl ProvisioningError {
    pub(crate) fn from_store(resource: &'static str, err: StoreError) -> Self {
        match err {
            StoreError::Unreachable(msg) => Self::Unreachable(msg),
            StoreError::Unauthorized { message, .. } => Self::Unauthorized(message),
            other => Self::Rejected {
                resource,
                message: other.to_string(),
            },
        }
    }
}

/// Failure to create a single record. Recoverable; the batch continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    #[error("Conflict: a document with this id already exists")]
    Conflict,

    #[error("Throttled (retry after {retry_after_ms:?} ms)")]
    Throttled { retry_after_ms: Option<u64> },

    #[error("Invalid partition key: {0}")]
    InvalidPartitionKey(String),

    #[error("Unknown store failure: {0}")]
    Unknown(String),
}

impl WriteError {
    /// Short failure kind for logs and tallies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Conflict => "conflict",
            Self::Throttled { .. } => "throttled",
            Self::InvalidPartitionKey(_) => "invalid_partition_key",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl From<StoreError> for WriteError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => Self::Conflict,
            StoreError::Throttled { retry_after_ms } => Self::Throttled { retry_after_ms },
            StoreError::InvalidPartitionKey(msg) => Self::InvalidPartitionKey(msg),
            other => Self::Unknown(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
