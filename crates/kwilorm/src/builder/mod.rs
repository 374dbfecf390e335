//! Structured SQL builder.
//!
//! Parameter-safe builders for the statements a table query can issue.
//!
//! ## Design
//!
//! - SQL is still explicit (strings), but common patterns are structured.
//! - Placeholders are managed automatically ($1, $2, ...) and assigned at
//!   build time, so an UPDATE's WHERE clause continues after its SET values.
//! - Builders are plain values: every modifier takes `self` and returns it.

pub mod aggregate;
pub mod delete;
pub mod insert;
pub mod select;
pub mod traits;
pub mod update;
pub mod where_builder;

pub use aggregate::{Aggregate, AggregateBuilder};
pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use select::SelectBuilder;
pub use traits::{BuiltQuery, Filterable, MutationBuilder, SqlBuilder};
pub use update::UpdateBuilder;
pub use where_builder::{WhereBuilder, WhereClause};
