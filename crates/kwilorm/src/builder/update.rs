use super::traits::{BuiltQuery, Filterable, MutationBuilder, SqlBuilder};
use super::where_builder::WhereBuilder;
use crate::error::{OrmError, OrmResult};
use crate::value::{Record, Value};

/// UPDATE builder.
///
/// SET values take placeholders `$1..$k`; WHERE placeholders continue at
/// `$k+1`.
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    table: String,
    set_fields: Record,
    where_builder: WhereBuilder,
}

impl UpdateBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            set_fields: Record::new(),
            where_builder: WhereBuilder::new(),
        }
    }

    /// Set a column. Setting the same column twice keeps its first position
    /// and the last value.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.set_fields.insert(column.to_string(), value.into());
        self
    }

    /// Set every column of `values`, in order.
    pub fn set_all(mut self, values: Record) -> Self {
        self.set_fields.extend(values);
        self
    }

    /// Replace the WHERE conditions.
    pub fn with_where(mut self, where_builder: WhereBuilder) -> Self {
        self.where_builder = where_builder;
        self
    }
}

impl Filterable for UpdateBuilder {
    fn where_builder_mut(&mut self) -> &mut WhereBuilder {
        &mut self.where_builder
    }
}

impl SqlBuilder for UpdateBuilder {
    fn render(&self) -> OrmResult<BuiltQuery> {
        let mut params: Vec<Value> = Vec::with_capacity(self.set_fields.len());
        let mut set_parts = Vec::with_capacity(self.set_fields.len());
        for (column, value) in &self.set_fields {
            params.push(value.clone());
            set_parts.push(format!("{}=${}", column, params.len()));
        }

        let where_clause = self.where_builder.render(params.len())?;

        let mut sql = format!("UPDATE {} SET {}", self.table, set_parts.join(","));
        if !where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&where_clause.sql);
        }
        params.extend(where_clause.params);

        Ok(BuiltQuery::new(sql, params))
    }

    fn validate(&self) -> OrmResult<()> {
        if self.set_fields.is_empty() {
            return Err(OrmError::validation(
                "UpdateBuilder: SET clause cannot be empty",
            ));
        }
        self.where_builder.validate()
    }
}

impl MutationBuilder for UpdateBuilder {}
