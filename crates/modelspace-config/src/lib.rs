//! File-backed import configuration.
//!
//! A `modelspace.toml` carries an `[import]` table mirroring the import
//! options. Every key is optional; missing keys take the documented defaults.
//!
//! ```toml
//! [import]
//! models_dir = "models"
//! recursive = true
//! associate = true
//! table_name_format = "snakeCase"
//! exclude = ["index.toml"]
//! schemas = ["tenant_a", "tenant_b"]
//! ```

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// Conventional configuration file name.
pub const CONFIG_FILE_NAME: &str = "modelspace.toml";

/// Tag selecting the built-in snake case table-name formatter.
pub const SNAKE_CASE: &str = "snakeCase";

/// Directory name always skipped while walking (vendored dependencies).
pub const VENDOR_DIR: &str = "node_modules";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// ConfigFile
/// top level document; only the `[import]` table is read
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigFile {
    pub import: ImportConfig,
}

///
/// ImportConfig
///
/// `table_name_format` is kept as the raw tag. It is resolved the first
/// time a model file is processed, so an unknown tag loads fine here.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models_dir: Option<PathBuf>,

    pub recursive: bool,
    pub associate: bool,

    #[serde(alias = "tableNameFormat")]
    pub table_name_format: String,

    pub exclude: Vec<String>,
    pub schemas: Vec<String>,

    #[serde(alias = "skipDirs")]
    pub skip_dirs: Vec<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            models_dir: None,
            recursive: true,
            associate: true,
            table_name_format: SNAKE_CASE.to_string(),
            exclude: Vec::new(),
            schemas: Vec::new(),
            skip_dirs: vec![VENDOR_DIR.to_string()],
        }
    }
}

impl ImportConfig {
    /// Parse the `[import]` table out of a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;

        Ok(file.import)
    }

    /// Load and parse a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    /// Look for `modelspace.toml` in `dir`, falling back to defaults when absent.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }

        Self::from_file(path)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = ImportConfig::from_toml_str("").unwrap();

        assert_eq!(config, ImportConfig::default());
        assert!(config.recursive);
        assert!(config.associate);
        assert_eq!(config.table_name_format, SNAKE_CASE);
        assert_eq!(config.skip_dirs, vec![VENDOR_DIR.to_string()]);
    }

    #[test]
    fn import_table_overrides_defaults() {
        let config = ImportConfig::from_toml_str(
            r#"
            [import]
            models_dir = "models"
            recursive = false
            associate = false
            exclude = ["Service.toml"]
            schemas = ["a", "b"]
            "#,
        )
        .unwrap();

        assert_eq!(config.models_dir, Some(PathBuf::from("models")));
        assert!(!config.recursive);
        assert!(!config.associate);
        assert_eq!(config.exclude, vec!["Service.toml".to_string()]);
        assert_eq!(config.schemas, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn unknown_table_name_format_is_not_rejected_at_load() {
        let config = ImportConfig::from_toml_str(
            r#"
            [import]
            tableNameFormat = "kebabCase"
            "#,
        )
        .unwrap();

        assert_eq!(config.table_name_format, "kebabCase");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ImportConfig::from_toml_str(
            r"
            [import]
            recursiv = true
            ",
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn discover_falls_back_to_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ImportConfig::discover(dir.path()).unwrap();

        assert_eq!(config, ImportConfig::default());
    }

    #[test]
    fn discover_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[import]\nexclude = [\"Person.toml\"]\n",
        )
        .unwrap();

        let config = ImportConfig::discover(dir.path()).unwrap();
        assert_eq!(config.exclude, vec!["Person.toml".to_string()]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ImportConfig::from_file("/definitely/not/here.toml").unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
