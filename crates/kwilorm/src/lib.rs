//! # kwilorm
//!
//! A fluent query builder and connection registry for KwilDB connectors.
//!
//! ## Features
//!
//! - **Chainable table queries**: filters, projection, ordering and limit
//!   accumulate on a [`TableQuery`]; terminal calls render and send one statement
//! - **Managed placeholders**: `$1, $2, ...` are numbered at build time, across
//!   multi-row inserts and UPDATE SET lists followed by WHERE clauses
//! - **Explicit connector boundary**: connector failures arrive as
//!   [`ConnectorReply::Error`] and surface as [`OrmError::Execution`]
//! - **Named connections**: a [`Database`] keeps several connectors and a current one
//! - **Hooks**: inspect, log or refuse statements before they are sent
//!
//! ## Example
//!
//! ```ignore
//! use kwilorm::prelude::*;
//!
//! let mut db = Database::new("secret", kwil_factory);
//! db.connect_default(&ConnectorConfig::new("my-moat", private_key))?;
//!
//! // INSERT INTO users (name,age) VALUES ($1,$2),($3,$4)
//! db.table("users")?
//!     .insert([
//!         record! { "name" => "alice", "age" => 31 },
//!         record! { "name" => "bob", "age" => 27 },
//!     ])
//!     .await?;
//!
//! // UPDATE users SET age=$1 WHERE name = $2
//! db.table("users")?
//!     .and_where("name", "=", "alice")
//!     .update(record! { "age" => 32 })
//!     .await?;
//!
//! // SELECT * FROM users WHERE age BETWEEN $1 AND $2 ORDER BY age DESC LIMIT 10
//! let rows = db
//!     .table("users")?
//!     .and_between("age", 18, 40)
//!     .order_by("age", Order::Desc)
//!     .limit(10)
//!     .get()
//!     .await?;
//! ```

pub mod builder;
pub mod condition;
pub mod config;
pub mod connector;
pub mod database;
pub mod error;
pub mod monitor;
pub mod prelude;
pub mod row;
pub mod session;
pub mod table;
pub mod value;

pub use builder::{
    Aggregate, AggregateBuilder, BuiltQuery, DeleteBuilder, Filterable, InsertBuilder,
    MutationBuilder, SelectBuilder, SqlBuilder, UpdateBuilder, WhereBuilder,
};
pub use condition::{Condition, ConditionKind, Op, Order};
pub use config::{DEFAULT_CONNECTION, DatabaseConfig};
pub use connector::{
    Connector, ConnectorConfig, ConnectorFactory, ConnectorReply, MoatDebit, MoatFunding,
    QueryOutput,
};
pub use database::Database;
pub use error::{OrmError, OrmResult};
pub use monitor::{CompositeHook, HookAction, QueryContext, QueryHook, QueryType};
pub use row::{FromRecord, FromValue, RecordExt};
pub use session::Session;
pub use table::{Affected, TableQuery};
pub use value::{Record, Value};

#[cfg(feature = "tracing")]
pub use monitor::TracingSqlHook;
