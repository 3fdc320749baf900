//! Cosmos DB (SQL API) REST client.
//!
//! Implements [`DocumentStore`] against the account endpoint using
//! [`reqwest`] and master-key authorization. Only the three calls the
//! seeding pipeline needs are wrapped: create database, create container,
//! and create document.

pub mod auth;
pub mod headers;

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{ACCEPT, AUTHORIZATION};

use crate::error::StoreError;
use crate::store::{DocumentStore, Provisioned};

use self::auth::{http_date, MasterKey};
use self::headers::{
    classify_failure, parse_retry_after, partition_key_header, API_VERSION, HEADER_DATE,
    HEADER_IS_UPSERT, HEADER_PARTITION_KEY, HEADER_RETRY_AFTER_MS, HEADER_VERSION,
};

/// HTTP request timeout for a single REST call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for one Cosmos DB account.
#[derive(Debug)]
pub struct CosmosClient {
    client: reqwest::Client,
    endpoint: String,
    key: MasterKey,
}

impl CosmosClient {
    /// Create a client for `endpoint` (e.g. `https://acct.documents.azure.com:443/`)
    /// authenticated with a base64 master key.
    pub fn new(endpoint: &str, master_key: &str) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Configuration(e.to_string()))?;
        Self::with_client(client, endpoint, master_key)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        endpoint: &str,
        master_key: &str,
    ) -> Result<Self, StoreError> {
        let endpoint = endpoint.trim().trim_end_matches('/').to_string();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(StoreError::Configuration(format!(
                "endpoint '{endpoint}' must be an http(s) URL"
            )));
        }
        let key = MasterKey::from_base64(master_key)?;
        Ok(Self {
            client,
            endpoint,
            key,
        })
    }

    /// Account endpoint without a trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue a signed `POST` that creates a resource.
    ///
    /// `resource_link` is the parent link the service expects in the
    /// signature (`""` for databases, `dbs/{db}` for containers,
    /// `dbs/{db}/colls/{coll}` for documents). Returns `Ok(())` on `201`.
    async fn post_create(
        &self,
        path: &str,
        resource_type: &str,
        resource_link: &str,
        body: &serde_json::Value,
        partition_key: Option<&str>,
    ) -> Result<(), StoreError> {
        let date = http_date(Utc::now());
        let token = self
            .key
            .authorization("POST", resource_type, resource_link, &date)?;

        let mut request = self
            .client
            .post(format!("{}/{}", self.endpoint, path))
            .header(AUTHORIZATION, token)
            .header(HEADER_DATE, &date)
            .header(HEADER_VERSION, API_VERSION)
            .header(ACCEPT, "application/json")
            .json(body);
        if let Some(pk) = partition_key {
            request = request
                .header(HEADER_PARTITION_KEY, partition_key_header(pk))
                .header(HEADER_IS_UPSERT, "False");
        }

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let retry_after = parse_retry_after(
            response
                .headers()
                .get(HEADER_RETRY_AFTER_MS)
                .and_then(|v| v.to_str().ok()),
        );
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(classify_failure(status.as_u16(), retry_after, &text))
    }
}

/// Collapse "already exists" into [`Provisioned::AlreadyExists`].
fn create_if_absent(result: Result<(), StoreError>) -> Result<Provisioned, StoreError> {
    match result {
        Ok(()) => Ok(Provisioned::Created),
        Err(StoreError::Conflict) => Ok(Provisioned::AlreadyExists),
        Err(e) => Err(e),
    }
}

#[async_trait]
impl DocumentStore for CosmosClient {
    async fn ensure_database(&self, database: &str) -> Result<Provisioned, StoreError> {
        let body = serde_json::json!({ "id": database });
        let outcome = create_if_absent(self.post_create("dbs", "dbs", "", &body, None).await)?;
        tracing::debug!(database, ?outcome, "Database ensured");
        Ok(outcome)
    }

    async fn ensure_container(
        &self,
        database: &str,
        container: &str,
        partition_key_path: &str,
    ) -> Result<Provisioned, StoreError> {
        let body = serde_json::json!({
            "id": container,
            "partitionKey": {
                "paths": [partition_key_path],
                "kind": "Hash",
                "version": 2,
            },
        });
        let link = format!("dbs/{database}");
        let outcome = create_if_absent(
            self.post_create(&format!("{link}/colls"), "colls", &link, &body, None)
                .await,
        )?;
        tracing::debug!(database, container, ?outcome, "Container ensured");
        Ok(outcome)
    }

    async fn create_document(
        &self,
        database: &str,
        container: &str,
        partition_key: &str,
        document: &serde_json::Value,
    ) -> Result<(), StoreError> {
        let link = format!("dbs/{database}/colls/{container}");
        self.post_create(
            &format!("{link}/docs"),
            "docs",
            &link,
            document,
            Some(partition_key),
        )
        .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
