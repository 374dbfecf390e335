use super::truncate_sql_bytes;
use super::types::{HookAction, QueryContext, QueryHook};
use std::borrow::Cow;
use tracing::Level;

/// Logs every statement on the `kwilorm.sql` target before it is sent.
///
/// Never refuses a statement. Install it with [`Database::set_hook`], alone or
/// inside a [`CompositeHook`](super::CompositeHook).
///
/// [`Database::set_hook`]: crate::Database::set_hook
#[derive(Debug, Clone)]
pub struct TracingSqlHook {
    pub level: Level,
    /// SQL longer than this many bytes is cut and suffixed with `...`.
    pub max_sql_length: Option<usize>,
}

impl Default for TracingSqlHook {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl TracingSqlHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub(crate) fn truncate_sql<'a>(&self, sql: &'a str) -> Cow<'a, str> {
        match self.max_sql_length {
            Some(max) if sql.len() > max => {
                Cow::Owned(format!("{}...", truncate_sql_bytes(sql, max)))
            }
            _ => Cow::Borrowed(sql),
        }
    }
}

impl QueryHook for TracingSqlHook {
    fn before_query(&self, ctx: &QueryContext) -> HookAction {
        let sql = self.truncate_sql(&ctx.sql);
        let table = ctx.table.as_deref().unwrap_or("-");

        // `tracing::event!` needs a constant level.
        macro_rules! statement_event {
            ($level:expr) => {
                tracing::event!(
                    target: "kwilorm.sql",
                    $level,
                    query_type = %ctx.query_type,
                    table,
                    param_count = ctx.param_count,
                    sync = ctx.sync,
                    sql = %sql,
                )
            };
        }

        match self.level {
            Level::ERROR => statement_event!(Level::ERROR),
            Level::WARN => statement_event!(Level::WARN),
            Level::INFO => statement_event!(Level::INFO),
            Level::DEBUG => statement_event!(Level::DEBUG),
            Level::TRACE => statement_event!(Level::TRACE),
        }
        HookAction::Continue
    }
}
