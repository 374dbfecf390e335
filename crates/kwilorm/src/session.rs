//! Execution handle shared by the registry and table queries.

use crate::builder::BuiltQuery;
use crate::connector::{Connector, ConnectorReply, QueryOutput};
use crate::error::{OrmError, OrmResult};
use crate::monitor::{HookAction, QueryContext, QueryHook};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// A connector plus the execution settings every statement is sent with.
///
/// Cloning is cheap: the connector and hook are shared.
#[derive(Clone)]
pub struct Session {
    connector: Arc<dyn Connector>,
    sync: bool,
    hook: Option<Arc<dyn QueryHook>>,
    table: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("sync", &self.sync)
            .field("hook", &self.hook.is_some())
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(connector: Arc<dyn Connector>, sync: bool) -> Self {
        Self {
            connector,
            sync,
            hook: None,
            table: None,
        }
    }

    pub fn with_hook(mut self, hook: Option<Arc<dyn QueryHook>>) -> Self {
        self.hook = hook;
        self
    }

    /// Tag statements with the table they were built for.
    pub fn for_table(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    pub fn connector(&self) -> &Arc<dyn Connector> {
        &self.connector
    }

    pub fn is_syncing(&self) -> bool {
        self.sync
    }

    /// Execute a built statement.
    pub async fn prepared(&self, query: &BuiltQuery) -> OrmResult<QueryOutput> {
        self.prepared_statement(query.sql(), query.params()).await
    }

    /// Execute SQL with positional parameters.
    pub async fn prepared_statement(&self, sql: &str, params: &[Value]) -> OrmResult<QueryOutput> {
        self.before(sql, params.len())?;
        let reply = self
            .connector
            .prepared_statement(sql, params, self.sync)
            .await;
        self.finish(sql, reply)
    }

    /// Execute SQL without parameters.
    pub async fn query(&self, sql: &str) -> OrmResult<QueryOutput> {
        self.before(sql, 0)?;
        let reply = self.connector.query(sql, self.sync).await;
        self.finish(sql, reply)
    }

    fn before(&self, sql: &str, param_count: usize) -> OrmResult<()> {
        let Some(hook) = &self.hook else {
            return Ok(());
        };
        let ctx = QueryContext::new(sql, param_count)
            .with_table(self.table.as_deref())
            .with_sync(self.sync);
        match hook.before_query(&ctx) {
            HookAction::Continue => Ok(()),
            HookAction::Abort(reason) => Err(OrmError::HookAborted(reason)),
        }
    }

    fn finish(&self, sql: &str, reply: ConnectorReply) -> OrmResult<QueryOutput> {
        if let ConnectorReply::Error(message) = &reply {
            self.log_rejection(sql, message);
        }
        reply.into_result()
    }

    #[cfg(feature = "tracing")]
    fn log_rejection(&self, sql: &str, message: &str) {
        tracing::debug!(
            target: "kwilorm.sql",
            table = self.table.as_deref().unwrap_or("-"),
            sql,
            error = %message,
            "connector rejected statement"
        );
    }

    #[cfg(not(feature = "tracing"))]
    fn log_rejection(&self, _sql: &str, _message: &str) {}
}
