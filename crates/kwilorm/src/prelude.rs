//! Convenient imports.
//!
//! ```ignore
//! use kwilorm::prelude::*;
//! ```

pub use crate::builder::{Filterable, MutationBuilder, SqlBuilder};
pub use crate::condition::{Op, Order};
pub use crate::connector::{Connector, ConnectorConfig, ConnectorReply, QueryOutput};
pub use crate::database::Database;
pub use crate::error::{OrmError, OrmResult};
pub use crate::record;
pub use crate::row::{FromRecord, RecordExt};
pub use crate::table::{Affected, TableQuery};
pub use crate::value::{Record, Value};
