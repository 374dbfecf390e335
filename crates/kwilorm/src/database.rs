//! Named connection registry.

use crate::config::{DEFAULT_CONNECTION, DatabaseConfig};
use crate::connector::{Connector, ConnectorConfig, ConnectorFactory, QueryOutput};
use crate::error::{OrmError, OrmResult};
use crate::monitor::QueryHook;
use crate::session::Session;
use crate::table::TableQuery;
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Holds named connectors, the current connection name, the secret key
/// handed to new connectors, and the sync flag forwarded with every
/// statement.
///
/// # Example
///
/// ```rust,ignore
/// use kwilorm::{ConnectorConfig, Database};
///
/// let mut db = Database::new("secret", kwil_factory);
/// db.connect_default(&ConnectorConfig::new("my-moat", private_key))?;
///
/// let user = db.table("users")?.find(1).await?;
/// ```
pub struct Database {
    connections: HashMap<String, Arc<dyn Connector>>,
    current: String,
    secret_key: String,
    sync: bool,
    factory: Arc<dyn ConnectorFactory>,
    hook: Option<Arc<dyn QueryHook>>,
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.connections.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Database")
            .field("connections", &names)
            .field("current", &self.current)
            .field("sync", &self.sync)
            .field("hook", &self.hook.is_some())
            .finish_non_exhaustive()
    }
}

impl Database {
    pub fn new(secret_key: impl Into<String>, factory: impl ConnectorFactory + 'static) -> Self {
        Self {
            connections: HashMap::new(),
            current: DEFAULT_CONNECTION.to_string(),
            secret_key: secret_key.into(),
            sync: false,
            factory: Arc::new(factory),
            hook: None,
        }
    }

    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Build a registry and open every configured connection.
    ///
    /// The configured `default_connection` becomes current; it must be one of
    /// the configured connections unless none are configured.
    pub fn from_config(
        config: &DatabaseConfig,
        factory: impl ConnectorFactory + 'static,
    ) -> OrmResult<Self> {
        let mut db = Self::new(config.secret_key.clone(), factory).with_sync(config.sync);
        for (name, connector_config) in &config.connections {
            db.connect(connector_config, name)?;
        }

        if !db.connections.is_empty() && !db.set_current_connection(&config.default_connection) {
            return Err(OrmError::not_found(format!(
                "Could not find connection \"{}\"",
                config.default_connection
            )));
        }
        if db.connections.is_empty() {
            db.current = config.default_connection.clone();
        }
        Ok(db)
    }

    // ==================== Connections ====================

    /// Create a connector from `config` and store it under `name`.
    ///
    /// Unset host and protocol fall back to their defaults. An existing
    /// connection with the same name is replaced.
    pub fn connect(&mut self, config: &ConnectorConfig, name: &str) -> OrmResult<()> {
        let resolved = config.resolved();
        let connector = self.factory.create(&resolved, &self.secret_key)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "kwilorm.connection",
            name,
            host = resolved.host(),
            protocol = resolved.protocol(),
            moat = %resolved.moat,
            "registered connection"
        );

        self.connections.insert(name.to_string(), connector);
        Ok(())
    }

    /// [`Database::connect`] under the `"default"` name.
    pub fn connect_default(&mut self, config: &ConnectorConfig) -> OrmResult<()> {
        self.connect(config, DEFAULT_CONNECTION)
    }

    /// Store an already constructed connector under `name`.
    pub fn register(&mut self, name: &str, connector: Arc<dyn Connector>) {
        self.connections.insert(name.to_string(), connector);
    }

    pub fn has_connection(&self, name: &str) -> bool {
        self.connections.contains_key(name)
    }

    /// Look up a connection by name.
    pub fn connection(&self, name: &str) -> OrmResult<Arc<dyn Connector>> {
        self.connections
            .get(name)
            .cloned()
            .ok_or_else(|| OrmError::not_found(format!("Could not find connection \"{}\"", name)))
    }

    /// The connection currently selected.
    pub fn current_connection(&self) -> OrmResult<Arc<dyn Connector>> {
        self.connection(&self.current)
    }

    pub fn current_connection_name(&self) -> &str {
        &self.current
    }

    /// Select the connection used by [`Database::table`] and the helpers.
    ///
    /// Unregistered names are ignored and `false` is returned.
    pub fn set_current_connection(&mut self, name: &str) -> bool {
        if !self.connections.contains_key(name) {
            return false;
        }
        self.current = name.to_string();
        true
    }

    pub fn set_sync(&mut self, sync: bool) {
        self.sync = sync;
    }

    pub fn is_syncing(&self) -> bool {
        self.sync
    }

    /// Install a hook run before every statement.
    ///
    /// A statement the hook refuses fails with [`OrmError::HookAborted`].
    pub fn set_hook(&mut self, hook: impl QueryHook + 'static) {
        self.hook = Some(Arc::new(hook));
    }

    pub fn clear_hook(&mut self) {
        self.hook = None;
    }

    /// Execution handle on the current connection.
    pub fn session(&self) -> OrmResult<Session> {
        let connector = self.current_connection()?;
        Ok(Session::new(connector, self.sync).with_hook(self.hook.clone()))
    }

    /// Start a query on `name` using the current connection.
    pub fn table(&self, name: &str) -> OrmResult<TableQuery> {
        Ok(TableQuery::new(self.session()?, name))
    }

    // ==================== Moat ====================

    pub async fn moat_funding(&self) -> OrmResult<String> {
        let connector = self.current_connection()?;
        Ok(connector.moat_funding().await?.funding)
    }

    pub async fn moat_debit(&self) -> OrmResult<String> {
        let connector = self.current_connection()?;
        Ok(connector.moat_debit().await?.debit)
    }

    // ==================== DDL ====================

    pub async fn create_schema(&self, name: &str) -> OrmResult<()> {
        self.execute_ddl(&format!("CREATE SCHEMA {}", name)).await
    }

    pub async fn drop_schema(&self, name: &str) -> OrmResult<()> {
        self.execute_ddl(&format!("DROP SCHEMA {}", name)).await
    }

    /// `CREATE TABLE name (col type,...,constraint,...)`.
    pub async fn create_table(
        &self,
        name: &str,
        columns: &[(&str, &str)],
        constraints: &[&str],
    ) -> OrmResult<()> {
        if columns.is_empty() {
            return Err(OrmError::validation(format!(
                "create_table '{}': at least one column is required",
                name
            )));
        }

        let definitions: Vec<String> = columns
            .iter()
            .map(|(column, ty)| format!("{} {}", column, ty))
            .chain(constraints.iter().map(|c| c.to_string()))
            .collect();
        self.execute_ddl(&format!("CREATE TABLE {} ({})", name, definitions.join(",")))
            .await
    }

    pub async fn drop_table(&self, name: &str) -> OrmResult<()> {
        self.execute_ddl(&format!("DROP TABLE {}", name)).await
    }

    async fn execute_ddl(&self, sql: &str) -> OrmResult<()> {
        self.session()?.prepared_statement(sql, &[]).await?;
        Ok(())
    }

    // ==================== Passthrough ====================

    pub async fn raw_query(&self, sql: &str) -> OrmResult<QueryOutput> {
        self.session()?.query(sql).await
    }

    pub async fn raw_prepared_statement(
        &self,
        sql: &str,
        values: &[Value],
    ) -> OrmResult<QueryOutput> {
        self.session()?.prepared_statement(sql, values).await
    }
}
