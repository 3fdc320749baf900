//! Master-key request signing for the Cosmos DB REST API.
//!
//! Each request carries an `authorization` header built from an HMAC-SHA256
//! over the lowercased verb, resource type and `x-ms-date`, plus the
//! resource link exactly as addressed.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use lostfound_core::types::Timestamp;

use crate::error::StoreError;

type HmacSha256 = Hmac<Sha256>;

/// Decoded account master key.
#[derive(Clone)]
pub struct MasterKey {
    bytes: Vec<u8>,
}

impl MasterKey {
    /// Decode a base64 master key as shown in the account's key blade.
    pub fn from_base64(encoded: &str) -> Result<Self, StoreError> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| StoreError::Configuration(format!("master key is not base64: {e}")))?;
        if bytes.is_empty() {
            return Err(StoreError::Configuration("master key is empty".into()));
        }
        Ok(Self { bytes })
    }

    /// URL-encoded `authorization` header value for one request.
    pub fn authorization(
        &self,
        verb: &str,
        resource_type: &str,
        resource_link: &str,
        date: &str,
    ) -> Result<String, StoreError> {
        let payload = format!(
            "{}\n{}\n{}\n{}\n\n",
            verb.to_lowercase(),
            resource_type.to_lowercase(),
            resource_link,
            date.to_lowercase()
        );
        let mut mac = HmacSha256::new_from_slice(&self.bytes)
            .map_err(|e| StoreError::Configuration(e.to_string()))?;
        mac.update(payload.as_bytes());
        let signature = BASE64.encode(mac.finalize().into_bytes());
        Ok(percent_encode(&format!("type=master&ver=1.0&sig={signature}")))
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterKey(<redacted>)")
    }
}

/// RFC 1123 date as expected in `x-ms-date`.
pub fn http_date(now: Timestamp) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

// ---------------------------------------------------------------------------
// percent-encoding helper (no extra dep)
// ---------------------------------------------------------------------------

/// Encode everything outside the RFC 3986 unreserved set.
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const KEY: &str = "bG9jYWwtZW11bGF0b3Itc3R5bGUtbWFzdGVyLWtleSE=";
    const DATE: &str = "Tue, 05 Nov 2024 09:30:00 GMT";

    #[test]
    fn signs_document_create() {
        let key = MasterKey::from_base64(KEY).unwrap();
        let token = key
            .authorization("POST", "docs", "dbs/MaterializedViewsDB/colls/LostItems", DATE)
            .unwrap();
        assert_eq!(
            token,
            "type%3Dmaster%26ver%3D1.0%26sig%3DAjXr7agJkRz5nPgGZ6ORde%2BOwhTINdKs8U9yecJSU7c%3D"
        );
    }

    #[test]
    fn signs_database_create_with_empty_link() {
        let key = MasterKey::from_base64(KEY).unwrap();
        let token = key.authorization("POST", "dbs", "", DATE).unwrap();
        assert_eq!(
            token,
            "type%3Dmaster%26ver%3D1.0%26sig%3DWNCYeK5bTBhwnHkn8wf5cU0%2BS77QV9In9HOdbM%2BdZmM%3D"
        );
    }

    #[test]
    fn rejects_non_base64_key() {
        assert!(MasterKey::from_base64("not base64!!").is_err());
        assert!(MasterKey::from_base64("").is_err());
    }

    #[test]
    fn debug_redacts_key() {
        let key = MasterKey::from_base64(KEY).unwrap();
        assert_eq!(format!("{key:?}"), "MasterKey(<redacted>)");
    }

    #[test]
    fn http_date_is_rfc1123() {
        let now = chrono::Utc.with_ymd_and_hms(2024, 11, 5, 9, 30, 0).unwrap();
        assert_eq!(http_date(now), DATE);
    }

    #[test]
    fn percent_encode_keeps_unreserved() {
        assert_eq!(percent_encode("aZ09-_.~"), "aZ09-_.~");
        assert_eq!(percent_encode("a=b&c+/"), "a%3Db%26c%2B%2F");
    }
}
