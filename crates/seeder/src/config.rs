//! Layered seeder configuration.
//!
//! Sources, later ones winning:
//!
//! 1. `appsettings.json` (optional)
//! 2. `appsettings.development.json` (optional)
//! 3. Environment variables (a `.env` file is loaded by `main` first)
//!
//! | File key     | Env var       | Required | Description                               |
//! |--------------|---------------|----------|-------------------------------------------|
//! | `CosmosUri`  | `COSMOS_URI`  | yes*     | Account endpoint                          |
//! | `CosmosKey`  | `COSMOS_KEY`  | yes*     | Base64 master key                         |
//! | `SeedRandom` | `SEED_RANDOM` | no       | Fixed RNG seed for reproducible batches   |
//! | --           | `SEED_STORE`  | no       | `cosmos` (default) or `memory` (dry run)  |
//!
//! \* not required when `SEED_STORE=memory`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use lostfound_db::StoreSettings;

/// Base configuration file name.
pub const BASE_FILE: &str = "appsettings.json";

/// Environment override file name.
pub const OVERRIDE_FILE: &str = "appsettings.development.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Missing required configuration '{0}'")]
    Missing(&'static str),

    #[error("Invalid value for '{key}': {message}")]
    Invalid { key: &'static str, message: String },
}

/// Which document store the session writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Cosmos { uri: String, key: String },
    Memory,
}

/// Fully resolved configuration for one seeding session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeederConfig {
    pub backend: StoreBackend,
    pub seed: Option<u64>,
    pub store: StoreSettings,
}

/// Raw file contents; every key optional so files can be partial.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FileConfig {
    cosmos_uri: Option<String>,
    cosmos_key: Option<String>,
    seed_random: Option<u64>,
}

impl FileConfig {
    fn overlay(self, over: FileConfig) -> FileConfig {
        FileConfig {
            cosmos_uri: over.cosmos_uri.or(self.cosmos_uri),
            cosmos_key: over.cosmos_key.or(self.cosmos_key),
            seed_random: over.seed_random.or(self.seed_random),
        }
    }
}

impl SeederConfig {
    /// Load from the JSON files in `dir` and the process environment.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        Self::load_with(dir, |key| std::env::var(key).ok())
    }

    /// Load from the JSON files in `dir`, resolving environment variables
    /// through `env`.
    pub fn load_with<F>(dir: &Path, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = read_optional(&dir.join(BASE_FILE))?;
        let over = read_optional(&dir.join(OVERRIDE_FILE))?;
        let file = base.overlay(over);

        // A blank variable counts as unset so it never hides a file value.
        let env = |key: &str| env(key).and_then(non_blank);
        let uri = env("COSMOS_URI").or(file.cosmos_uri.and_then(non_blank));
        let key = env("COSMOS_KEY").or(file.cosmos_key.and_then(non_blank));

        let seed = match env("SEED_RANDOM") {
            Some(raw) => Some(raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "SEED_RANDOM",
                message: e.to_string(),
            })?),
            None => file.seed_random,
        };

        let backend = match env("SEED_STORE").as_deref() {
            None | Some("cosmos") => StoreBackend::Cosmos {
                uri: uri.ok_or(ConfigError::Missing("CosmosUri"))?,
                key: key.ok_or(ConfigError::Missing("CosmosKey"))?,
            },
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "SEED_STORE",
                    message: format!("expected 'cosmos' or 'memory', got '{other}'"),
                })
            }
        };

        Ok(Self {
            backend,
            seed,
            store: StoreSettings::default(),
        })
    }
}

fn non_blank(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn read_optional(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(FileConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn reads_base_file() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            BASE_FILE,
            r#"{ "CosmosUri": "https://base.documents.azure.com:443/", "CosmosKey": "a2V5" }"#,
        );

        let config = SeederConfig::load_with(dir.path(), env_of(&[])).unwrap();
        assert_eq!(
            config.backend,
            StoreBackend::Cosmos {
                uri: "https://base.documents.azure.com:443/".into(),
                key: "a2V5".into(),
            }
        );
        assert_eq!(config.seed, None);
        assert_eq!(config.store, StoreSettings::default());
    }

    #[test]
    fn override_file_wins_over_base() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            BASE_FILE,
            r#"{ "CosmosUri": "https://base.example", "CosmosKey": "a2V5", "SeedRandom": 1 }"#,
        );
        write(dir.path(), OVERRIDE_FILE, r#"{ "CosmosUri": "https://dev.example" }"#);

        let config = SeederConfig::load_with(dir.path(), env_of(&[])).unwrap();
        assert_matches!(
            config.backend,
            StoreBackend::Cosmos { uri, .. } if uri == "https://dev.example"
        );
        assert_eq!(config.seed, Some(1));
    }

    #[test]
    fn environment_wins_over_files() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            BASE_FILE,
            r#"{ "CosmosUri": "https://base.example", "CosmosKey": "a2V5" }"#,
        );

        let config = SeederConfig::load_with(
            dir.path(),
            env_of(&[("COSMOS_URI", "https://env.example"), ("SEED_RANDOM", "99")]),
        )
        .unwrap();
        assert_matches!(
            config.backend,
            StoreBackend::Cosmos { uri, .. } if uri == "https://env.example"
        );
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn blank_environment_values_fall_back_to_files() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            BASE_FILE,
            r#"{ "CosmosUri": "https://base.example", "CosmosKey": "a2V5", "SeedRandom": 5 }"#,
        );

        let config = SeederConfig::load_with(
            dir.path(),
            env_of(&[
                ("COSMOS_URI", ""),
                ("COSMOS_KEY", "   "),
                ("SEED_RANDOM", ""),
                ("SEED_STORE", " "),
            ]),
        )
        .unwrap();
        assert_eq!(
            config.backend,
            StoreBackend::Cosmos {
                uri: "https://base.example".into(),
                key: "a2V5".into(),
            }
        );
        assert_eq!(config.seed, Some(5));
    }

    #[test]
    fn blank_seed_without_file_value_is_unset() {
        let dir = tempfile::tempdir().unwrap();
        let config = SeederConfig::load_with(
            dir.path(),
            env_of(&[("SEED_STORE", "memory"), ("SEED_RANDOM", "  ")]),
        )
        .unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn missing_uri_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            SeederConfig::load_with(dir.path(), env_of(&[("COSMOS_KEY", "a2V5")])).unwrap_err();
        assert_matches!(err, ConfigError::Missing("CosmosUri"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            BASE_FILE,
            r#"{ "CosmosUri": "https://base.example", "CosmosKey": "  " }"#,
        );
        let err = SeederConfig::load_with(dir.path(), env_of(&[])).unwrap_err();
        assert_matches!(err, ConfigError::Missing("CosmosKey"));
    }

    #[test]
    fn memory_backend_needs_no_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            SeederConfig::load_with(dir.path(), env_of(&[("SEED_STORE", "memory")])).unwrap();
        assert_eq!(config.backend, StoreBackend::Memory);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            SeederConfig::load_with(dir.path(), env_of(&[("SEED_STORE", "sqlite")])).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { key: "SEED_STORE", .. });
    }

    #[test]
    fn bad_seed_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = SeederConfig::load_with(
            dir.path(),
            env_of(&[("SEED_STORE", "memory"), ("SEED_RANDOM", "abc")]),
        )
        .unwrap_err();
        assert_matches!(err, ConfigError::Invalid { key: "SEED_RANDOM", .. });
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), BASE_FILE, "{ not json");
        let err = SeederConfig::load_with(dir.path(), env_of(&[])).unwrap_err();
        assert_matches!(err, ConfigError::Parse { .. });
    }
}
