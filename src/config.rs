//! Process configuration
//!
//! Loaded once at startup from a JSON file. Every field has a default, so
//! `{}` is a valid configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::Severity;
use crate::store::{ClientOptions, TableSchema};

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// What the write handler does when persisting a valid record fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteFailurePolicy {
    /// Return the store failure to the caller
    #[default]
    Surface,
    /// Log the failure and report success
    Log,
}

/// Roster configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Table holding student records (default: "SchoolStudents")
    #[serde(default = "default_table_name")]
    pub table_name: String,

    /// Secondary index on last name (default: "studentLastNameGsi")
    #[serde(default = "default_last_name_index")]
    pub last_name_index: String,

    /// Store endpoint (default: "http://localhost:8000").
    /// Reported at startup only; the in-memory store ignores it.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Store region (default: "us-west-2").
    /// Reported at startup only; the in-memory store ignores it.
    #[serde(default = "default_region")]
    pub region: String,

    /// Retries after a transient store failure (default: 5)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Per-call store timeout in milliseconds (default: 5000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub write_failure_policy: WriteFailurePolicy,

    /// Minimum log severity (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: Severity,

    /// JSON file the in-memory store is loaded from and saved to
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

fn default_table_name() -> String {
    "SchoolStudents".to_string()
}

fn default_last_name_index() -> String {
    "studentLastNameGsi".to_string()
}

fn default_endpoint() -> String {
    "http://localhost:8000".to_string()
}

fn default_region() -> String {
    "us-west-2".to_string()
}

fn default_max_retries() -> u32 {
    5
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_name: default_table_name(),
            last_name_index: default_last_name_index(),
            endpoint: default_endpoint(),
            region: default_region(),
            max_retries: default_max_retries(),
            timeout_ms: default_timeout_ms(),
            write_failure_policy: WriteFailurePolicy::default(),
            log_level: default_log_level(),
            data_file: None,
        }
    }
}

impl Config {
    /// Read, parse and validate a config file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.table_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "table_name",
                reason: "must not be empty".into(),
            });
        }
        if self.last_name_index.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "last_name_index",
                reason: "must not be empty".into(),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms",
                reason: "must be greater than 0".into(),
            });
        }
        Ok(())
    }

    pub fn table_schema(&self) -> TableSchema {
        TableSchema::new(&self.table_name, &self.last_name_index)
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: Duration::from_millis(self.timeout_ms),
            max_retries: self.max_retries,
            ..ClientOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let file = write_config("{}");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.table_name, "SchoolStudents");
        assert_eq!(config.last_name_index, "studentLastNameGsi");
        assert_eq!(config.endpoint, "http://localhost:8000");
        assert_eq!(config.region, "us-west-2");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.write_failure_policy, WriteFailurePolicy::Surface);
        assert_eq!(config.log_level, Severity::Info);
        assert!(config.data_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let file = write_config(
            r#"{
                "table_name": "Pupils",
                "max_retries": 0,
                "timeout_ms": 250,
                "write_failure_policy": "log",
                "log_level": "error",
                "data_file": "/tmp/students.json"
            }"#,
        );
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.table_name, "Pupils");
        assert_eq!(config.write_failure_policy, WriteFailurePolicy::Log);
        assert_eq!(config.log_level, Severity::Error);
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/students.json")));

        let options = config.client_options();
        assert_eq!(options.timeout, Duration::from_millis(250));
        assert_eq!(options.max_retries, 0);
        assert_eq!(config.table_schema(), TableSchema::new("Pupils", "studentLastNameGsi"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let file = write_config(r#"{"timeout_ms": 0}"#);
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "timeout_ms", .. }));
    }

    #[test]
    fn test_empty_table_name_rejected() {
        let file = write_config(r#"{"table_name": ""}"#);
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "table_name", .. }));
    }

    #[test]
    fn test_blank_index_name_rejected() {
        let file = write_config(r#"{"last_name_index": "   "}"#);
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "last_name_index", .. }));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let file = write_config(r#"{"write_failure_policy": "ignore"}"#);
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
