use super::traits::{BuiltQuery, Filterable, SqlBuilder};
use super::where_builder::WhereBuilder;
use crate::error::OrmResult;
use crate::session::Session;
use crate::value::Value;

/// Aggregate function applied over the filtered rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregate {
    Count,
    Max(String),
    Min(String),
    Sum(String),
    Avg(String),
}

impl Aggregate {
    /// SQL expression, e.g. `COUNT(*)` or `MAX(price)`.
    pub fn sql_expr(&self) -> String {
        match self {
            Aggregate::Count => "COUNT(*)".to_string(),
            Aggregate::Max(field) => format!("MAX({field})"),
            Aggregate::Min(field) => format!("MIN({field})"),
            Aggregate::Sum(field) => format!("SUM({field})"),
            Aggregate::Avg(field) => format!("AVG({field})"),
        }
    }

    /// Column name the database gives the unaliased aggregate.
    pub fn column(&self) -> &'static str {
        match self {
            Aggregate::Count => "count",
            Aggregate::Max(_) => "max",
            Aggregate::Min(_) => "min",
            Aggregate::Sum(_) => "sum",
            Aggregate::Avg(_) => "avg",
        }
    }
}

/// `SELECT <AGG> FROM table WHERE ...` builder.
#[derive(Debug, Clone)]
pub struct AggregateBuilder {
    table: String,
    aggregate: Aggregate,
    where_builder: WhereBuilder,
}

impl AggregateBuilder {
    pub fn new(table: &str, aggregate: Aggregate) -> Self {
        Self {
            table: table.to_string(),
            aggregate,
            where_builder: WhereBuilder::new(),
        }
    }

    pub fn count(table: &str) -> Self {
        Self::new(table, Aggregate::Count)
    }

    /// Replace the WHERE conditions.
    pub fn with_where(mut self, where_builder: WhereBuilder) -> Self {
        self.where_builder = where_builder;
        self
    }

    pub fn aggregate(&self) -> &Aggregate {
        &self.aggregate
    }

    /// Execute and return the aggregate cell of the first row.
    ///
    /// The cell is looked up by its default column name, falling back to the
    /// first column for connectors that name it differently.
    pub async fn fetch_scalar(&self, session: &Session) -> OrmResult<Option<Value>> {
        let Some(row) = self.fetch_opt(session).await? else {
            return Ok(None);
        };
        let cell = row
            .get(self.aggregate.column())
            .or_else(|| row.values().next())
            .cloned();
        Ok(cell)
    }
}

impl Filterable for AggregateBuilder {
    fn where_builder_mut(&mut self) -> &mut WhereBuilder {
        &mut self.where_builder
    }
}

impl SqlBuilder for AggregateBuilder {
    fn render(&self) -> OrmResult<BuiltQuery> {
        let where_clause = self.where_builder.render(0)?;

        let mut sql = format!("SELECT {} FROM {}", self.aggregate.sql_expr(), self.table);
        if !where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&where_clause.sql);
        }

        Ok(BuiltQuery::new(sql, where_clause.params))
    }

    fn validate(&self) -> OrmResult<()> {
        self.where_builder.validate()
    }
}
