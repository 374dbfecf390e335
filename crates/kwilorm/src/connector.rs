//! Boundary to the external KwilDB connector.
//!
//! The connector signals failure by answering with a bare message instead of
//! a result object. [`ConnectorReply`] makes that an explicit variant, and
//! [`ConnectorReply::into_result`] is the single place where it becomes an
//! [`OrmError::Execution`].

use crate::error::{OrmError, OrmResult};
use crate::value::{Record, Value};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Fallback host when a connection config leaves it unset.
pub const DEFAULT_HOST: &str = "test-db.kwil.xyz";
/// Fallback protocol when a connection config leaves it unset.
pub const DEFAULT_PROTOCOL: &str = "https";

/// Successful statement output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryOutput {
    #[serde(rename = "rowCount", default)]
    pub row_count: u64,
    #[serde(default)]
    pub rows: Vec<Record>,
}

impl QueryOutput {
    pub fn new(row_count: u64, rows: Vec<Record>) -> Self {
        Self { row_count, rows }
    }

    /// Output of a SELECT: `row_count` mirrors the number of rows.
    pub fn from_rows(rows: Vec<Record>) -> Self {
        Self {
            row_count: rows.len() as u64,
            rows,
        }
    }

    /// Output of a write statement without returned rows.
    pub fn affected(row_count: u64) -> Self {
        Self {
            row_count,
            rows: Vec::new(),
        }
    }
}

/// What the connector answers to a statement.
///
/// On the wire this is either an object (`{"rowCount": .., "rows": [..]}`)
/// or a bare string carrying the error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConnectorReply {
    Error(String),
    Output(QueryOutput),
}

impl ConnectorReply {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Turn an error reply into [`OrmError::Execution`] carrying the message.
    pub fn into_result(self) -> OrmResult<QueryOutput> {
        match self {
            Self::Output(output) => Ok(output),
            Self::Error(message) => Err(OrmError::Execution(message)),
        }
    }
}

impl From<QueryOutput> for ConnectorReply {
    fn from(output: QueryOutput) -> Self {
        Self::Output(output)
    }
}

/// Funding currently available on the moat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoatFunding {
    pub funding: String,
}

/// Amount debited from the moat so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoatDebit {
    pub debit: String,
}

/// A live connector to one KwilDB moat.
///
/// Implementations report statement failures through
/// [`ConnectorReply::Error`] rather than through a Rust error.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Execute a statement with positional `$n` parameters.
    async fn prepared_statement(&self, sql: &str, params: &[Value], sync: bool) -> ConnectorReply;

    /// Execute a statement without parameters.
    async fn query(&self, sql: &str, sync: bool) -> ConnectorReply;

    async fn moat_funding(&self) -> OrmResult<MoatFunding>;

    async fn moat_debit(&self) -> OrmResult<MoatDebit>;
}

/// Settings for one connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    pub moat: String,
    pub private_key: String,
}

impl ConnectorConfig {
    pub fn new(moat: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            host: None,
            protocol: None,
            moat: moat.into(),
            private_key: private_key.into(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Copy of this config with the fallback host and protocol filled in.
    pub fn resolved(&self) -> Self {
        Self {
            host: Some(self.host().to_string()),
            protocol: Some(self.protocol().to_string()),
            moat: self.moat.clone(),
            private_key: self.private_key.clone(),
        }
    }

    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn protocol(&self) -> &str {
        self.protocol.as_deref().unwrap_or(DEFAULT_PROTOCOL)
    }
}

/// Builds connectors from configs; the seam where the real KwilDB client
/// is plugged in.
pub trait ConnectorFactory: Send + Sync {
    fn create(&self, config: &ConnectorConfig, secret_key: &str) -> OrmResult<Arc<dyn Connector>>;
}

impl<F> ConnectorFactory for F
where
    F: Fn(&ConnectorConfig, &str) -> OrmResult<Arc<dyn Connector>> + Send + Sync,
{
    fn create(&self, config: &ConnectorConfig, secret_key: &str) -> OrmResult<Arc<dyn Connector>> {
        self(config, secret_key)
    }
}
