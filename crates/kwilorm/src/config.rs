//! TOML configuration for a [`Database`](crate::Database).

use crate::connector::ConnectorConfig;
use crate::error::OrmResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Name used when a connection is registered without one.
pub const DEFAULT_CONNECTION: &str = "default";

fn default_connection_name() -> String {
    DEFAULT_CONNECTION.to_string()
}

/// Registry-wide settings plus the named connections to open.
///
/// ```toml
/// secret_key = "s3cr3t"
/// sync = false
/// default_connection = "default"
///
/// [connections.default]
/// host = "test-db.kwil.xyz"
/// protocol = "https"
/// moat = "my-moat"
/// private_key = "..."
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Secret key handed to every connector.
    pub secret_key: String,
    /// Execution-mode flag forwarded with every statement.
    #[serde(default)]
    pub sync: bool,
    /// Connection selected as current after loading.
    #[serde(default = "default_connection_name")]
    pub default_connection: String,
    #[serde(default)]
    pub connections: BTreeMap<String, ConnectorConfig>,
}

impl DatabaseConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            sync: false,
            default_connection: default_connection_name(),
            connections: BTreeMap::new(),
        }
    }

    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    pub fn with_connection(mut self, name: impl Into<String>, config: ConnectorConfig) -> Self {
        self.connections.insert(name.into(), config);
        self
    }

    pub fn with_default_connection(mut self, name: impl Into<String>) -> Self {
        self.default_connection = name.into();
        self
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(contents: &str) -> OrmResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> OrmResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
