//! Statement hooks and SQL logging.
//!
//! Every statement a [`Session`](crate::Session) sends goes through the
//! installed [`QueryHook`] first. A hook can log the statement or refuse it.
//!
//! # Example
//!
//! ```rust,ignore
//! use kwilorm::monitor::{CompositeHook, RequireWhereHook, TracingSqlHook};
//!
//! db.set_hook(
//!     CompositeHook::new()
//!         .add(TracingSqlHook::new())
//!         .add(RequireWhereHook),
//! );
//! ```

mod hooks;
mod types;

#[cfg(feature = "tracing")]
mod tracing_hook;


pub use hooks::{CompositeHook, RequireWhereHook};
pub use types::{HookAction, QueryContext, QueryHook, QueryType};

#[cfg(feature = "tracing")]
pub use tracing_hook::TracingSqlHook;

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
