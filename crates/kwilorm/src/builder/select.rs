use super::traits::{BuiltQuery, Filterable, SqlBuilder};
use super::where_builder::WhereBuilder;
use crate::condition::Order;
use crate::error::OrmResult;

/// SELECT builder.
///
/// # Example
///
/// ```rust
/// use kwilorm::builder::{Filterable, SelectBuilder, SqlBuilder};
/// use kwilorm::Order;
///
/// let query = SelectBuilder::new("users")
///     .columns(["id", "name"])
///     .and_eq("status", "active")
///     .order_by("id", Order::Desc)
///     .limit(10)
///     .build()
///     .unwrap();
/// assert_eq!(
///     query.sql(),
///     "SELECT id,name FROM users WHERE status = $1 ORDER BY id DESC LIMIT 10"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    table: String,
    /// Projection; empty means `*`
    columns: Vec<String>,
    where_builder: WhereBuilder,
    order: Option<(String, Order)>,
    limit: Option<u64>,
}

impl SelectBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            where_builder: WhereBuilder::new(),
            order: None,
            limit: None,
        }
    }

    /// Replace the projection list.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the WHERE conditions.
    pub fn with_where(mut self, where_builder: WhereBuilder) -> Self {
        self.where_builder = where_builder;
        self
    }

    /// Set the single ORDER BY pair; a later call overwrites it.
    pub fn order_by(mut self, field: &str, order: Order) -> Self {
        self.order = Some((field.to_string(), order));
        self
    }

    pub fn order_by_opt(mut self, order: Option<(String, Order)>) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn limit_opt(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }
}

impl Filterable for SelectBuilder {
    fn where_builder_mut(&mut self) -> &mut WhereBuilder {
        &mut self.where_builder
    }
}

impl SqlBuilder for SelectBuilder {
    fn render(&self) -> OrmResult<BuiltQuery> {
        let fields = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(",")
        };
        let where_clause = self.where_builder.render(0)?;

        let mut sql = format!("SELECT {} FROM {}", fields, self.table);
        if !where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&where_clause.sql);
        }
        if let Some((field, order)) = &self.order {
            sql.push_str(&format!(" ORDER BY {} {}", field, order.as_sql()));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        Ok(BuiltQuery::new(sql, where_clause.params))
    }

    fn validate(&self) -> OrmResult<()> {
        self.where_builder.validate()
    }
}
