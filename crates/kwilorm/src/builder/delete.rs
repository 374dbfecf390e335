use super::traits::{BuiltQuery, Filterable, MutationBuilder, SqlBuilder};
use super::where_builder::WhereBuilder;
use crate::error::OrmResult;

/// DELETE builder.
///
/// A DELETE without conditions removes every row; that is left to the caller.
#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    table: String,
    where_builder: WhereBuilder,
    limit: Option<u64>,
}

impl DeleteBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            where_builder: WhereBuilder::new(),
            limit: None,
        }
    }

    /// Replace the WHERE conditions.
    pub fn with_where(mut self, where_builder: WhereBuilder) -> Self {
        self.where_builder = where_builder;
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

impl Filterable for DeleteBuilder {
    fn where_builder_mut(&mut self) -> &mut WhereBuilder {
        &mut self.where_builder
    }
}

impl SqlBuilder for DeleteBuilder {
    fn render(&self) -> OrmResult<BuiltQuery> {
        let where_clause = self.where_builder.render(0)?;

        let mut sql = format!("DELETE FROM {}", self.table);
        if !where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&where_clause.sql);
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

impl MutationBuilder for DeleteBuilder {}
