//! Header names and response classification for the Cosmos DB REST API.

use serde::Deserialize;

use crate::error::StoreError;

/// REST API version sent on every request.
pub const API_VERSION: &str = "2018-12-31";

pub const HEADER_DATE: &str = "x-ms-date";
pub const HEADER_VERSION: &str = "x-ms-version";
pub const HEADER_PARTITION_KEY: &str = "x-ms-documentdb-partitionkey";
pub const HEADER_IS_UPSERT: &str = "x-ms-documentdb-is-upsert";
pub const HEADER_RETRY_AFTER_MS: &str = "x-ms-retry-after-ms";

/// JSON-array partition key header value with non-ASCII characters escaped
/// as `\uXXXX`, since header values must be visible ASCII.
pub fn partition_key_header(value: &str) -> String {
    let mut out = String::from("[\"");
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{unit:04x}"));
                }
            }
        }
    }
    out.push_str("\"]");
    out
}

/// Error payload returned by the service on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Pull a readable message out of an error response body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ErrorBody {
            code: Some(code), ..
        }) => code,
        _ => body.to_string(),
    }
}

/// Map a non-success status into a [`StoreError`].
pub fn classify_failure(status: u16, retry_after_ms: Option<u64>, body: &str) -> StoreError {
    let message = error_message(body);
    match status {
        401 | 403 => StoreError::Unauthorized { status, message },
        409 => StoreError::Conflict,
        429 => StoreError::Throttled { retry_after_ms },
        400 if message.to_lowercase().contains("partition") => {
            StoreError::InvalidPartitionKey(message)
        }
        _ => StoreError::Status { status, message },
    }
}

/// Parse the `x-ms-retry-after-ms` header value.
pub fn parse_retry_after(value: Option<&str>) -> Option<u64> {
    value.and_then(|v| v.trim().parse().ok())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
