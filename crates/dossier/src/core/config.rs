//! Configuration loading and management.
//!
//! [`DossierConfig`] can be built programmatically, loaded from TOML, YAML or
//! JSON, or discovered as `dossier.toml` in the current directory or one of its
//! parents.

use crate::text::NormalizationConfig;
use crate::{DossierError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up by [`DossierConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "dossier.toml";

/// Public Google Cloud Storage endpoint used when none is configured.
pub const DEFAULT_GCS_ENDPOINT: &str = "https://storage.googleapis.com";

/// Nominal upper bound for a single document. Larger objects are still
/// processed, but logged.
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 50 * 1024 * 1024;

/// Main configuration.
///
/// # Example
///
/// ```rust
/// use dossier::{DossierConfig, StorageConfig};
///
/// let config: DossierConfig = toml::from_str(r#"
/// [storage]
/// backend = "filesystem"
/// root = "/srv/documents"
/// "#).unwrap();
///
/// assert!(matches!(config.storage, StorageConfig::Filesystem { .. }));
/// assert!(config.normalization.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DossierConfig {
    /// Object storage backend used for remote references
    #[serde(default)]
    pub storage: StorageConfig,

    /// Profile used when a caller asks for normalized text
    #[serde(default)]
    pub normalization: Option<NormalizationConfig>,

    /// Size above which a fetched document is logged as oversized
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: u64,
}

/// Storage backend selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Google Cloud Storage JSON API (or a compatible emulator)
    Gcs {
        #[serde(default = "default_gcs_endpoint")]
        endpoint: String,
        #[serde(default)]
        user_agent: Option<String>,
    },
    /// Local directory; bucket `b` and path `p` map to `root/b/p`
    Filesystem { root: PathBuf },
    /// In-process store, empty on start
    Memory,
}

fn default_gcs_endpoint() -> String {
    DEFAULT_GCS_ENDPOINT.to_string()
}

fn default_max_document_bytes() -> u64 {
    DEFAULT_MAX_DOCUMENT_BYTES
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Gcs {
            endpoint: default_gcs_endpoint(),
            user_agent: None,
        }
    }
}

impl Default for DossierConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            normalization: None,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        DossierError::validation_with_source(format!("Failed to read config file {}", path.display()), e)
    })
}

impl DossierConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `DossierError::Validation` if the file cannot be read or is invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = read_config_file(path)?;

        toml::from_str(&content)
            .map_err(|e| DossierError::validation_with_source(format!("Invalid TOML in {}", path.display()), e))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = read_config_file(path)?;

        serde_yaml_ng::from_str(&content)
            .map_err(|e| DossierError::validation_with_source(format!("Invalid YAML in {}", path.display()), e))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = read_config_file(path)?;

        serde_json::from_str(&content)
            .map_err(|e| DossierError::validation_with_source(format!("Invalid JSON in {}", path.display()), e))
    }

    /// Load configuration, choosing the parser from the file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Self::from_toml_file(path),
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(DossierError::validation(format!(
                "Unsupported config file format: {} (expected .toml, .yaml, .yml or .json)",
                path.display()
            ))),
        }
    }

    /// Discover `dossier.toml` in the current directory or its parents.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(DossierError::Io)?;

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "using discovered config");
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}
