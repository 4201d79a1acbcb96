//! Configuration loading integration tests.
//!
//! Tests the config loading APIs:
//! - from_file() with TOML/YAML/JSON
//! - discover() for searching parent directories
//! - Error handling for invalid configs

use dossier::text::{NormalizationConfig, WhitespaceMode};
use dossier::{DossierConfig, DossierError, StorageConfig};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test a full TOML config round-trips into the expected values.
#[test]
fn test_from_file_toml_full() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dossier.toml");

    let toml_content = r#"
max_document_bytes = 10485760

[storage]
backend = "gcs"
endpoint = "http://localhost:4443"
user_agent = "deal-room/1.0"

[normalization]
whitespace = "preserve"
unicode_nfc = true
trim = false
"#;
    fs::write(&config_path, toml_content).unwrap();

    let config = DossierConfig::from_file(&config_path).unwrap();

    assert_eq!(config.max_document_bytes, 10 * 1024 * 1024);
    assert_eq!(
        config.storage,
        StorageConfig::Gcs {
            endpoint: "http://localhost:4443".to_string(),
            user_agent: Some("deal-room/1.0".to_string()),
        }
    );
    assert_eq!(
        config.normalization,
        Some(NormalizationConfig {
            whitespace: WhitespaceMode::Preserve,
            ascii_only: false,
            unicode_nfc: true,
            trim: false,
        })
    );
}

/// Test YAML and JSON produce the same config as TOML.
#[test]
fn test_formats_agree() {
    let temp_dir = TempDir::new().unwrap();

    let toml_path = temp_dir.path().join("c.toml");
    fs::write(&toml_path, "[storage]\nbackend = \"filesystem\"\nroot = \"/data\"\n").unwrap();

    let yaml_path = temp_dir.path().join("c.yml");
    fs::write(&yaml_path, "storage:\n  backend: filesystem\n  root: /data\n").unwrap();

    let json_path = temp_dir.path().join("c.json");
    fs::write(&json_path, r#"{"storage": {"backend": "filesystem", "root": "/data"}}"#).unwrap();

    let from_toml = DossierConfig::from_file(&toml_path).unwrap();
    let from_yaml = DossierConfig::from_file(&yaml_path).unwrap();
    let from_json = DossierConfig::from_file(&json_path).unwrap();

    assert_eq!(from_toml, from_yaml);
    assert_eq!(from_toml, from_json);
    assert_eq!(
        from_toml.storage,
        StorageConfig::Filesystem {
            root: PathBuf::from("/data")
        }
    );
}

/// Test filesystem backend requires a root.
#[test]
fn test_filesystem_backend_without_root_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dossier.toml");
    fs::write(&config_path, "[storage]\nbackend = \"filesystem\"\n").unwrap();

    let err = DossierConfig::from_toml_file(&config_path).unwrap_err();
    assert!(matches!(err, DossierError::Validation { .. }));
    assert!(err.to_string().contains("dossier.toml"));
}

/// Test invalid YAML is reported with the file name.
#[test]
fn test_invalid_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dossier.yaml");
    fs::write(&config_path, "storage: [unclosed").unwrap();

    let err = DossierConfig::from_yaml_file(&config_path).unwrap_err();
    assert!(err.to_string().contains("Invalid YAML"));
}

/// Test discover() finds config in current directory.
#[test]
#[serial_test::serial]
fn test_discover_finds_config_in_current_dir() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("dossier.toml"), "[storage]\nbackend = \"memory\"\n").unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_dir.path()).unwrap();

    let result = DossierConfig::discover();

    std::env::set_current_dir(original_dir).unwrap();

    let config = result.unwrap().expect("Should find config in current directory");
    assert_eq!(config.storage, StorageConfig::Memory);
}

/// Test discover() walks up to a parent directory.
#[test]
#[serial_test::serial]
fn test_discover_finds_config_in_parent_dir() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("dossier.toml"),
        "[normalization]\nascii_only = true\n",
    )
    .unwrap();

    let nested = temp_dir.path().join("deals").join("2024");
    fs::create_dir_all(&nested).unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(&nested).unwrap();

    let result = DossierConfig::discover();

    std::env::set_current_dir(original_dir).unwrap();

    let config = result.unwrap().expect("Should find config in parent directory");
    assert_eq!(config.normalization, Some(NormalizationConfig::legacy_ascii()));
}

/// Test discover() surfaces a broken config instead of skipping it.
#[test]
#[serial_test::serial]
fn test_discover_reports_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("dossier.toml"), "max_document_bytes = \"big\"").unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_dir.path()).unwrap();

    let result = DossierConfig::discover();

    std::env::set_current_dir(original_dir).unwrap();

    assert!(matches!(result, Err(DossierError::Validation { .. })));
}
