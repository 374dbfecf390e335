use super::where_builder::WhereBuilder;
use crate::condition::{Condition, Op};
use crate::error::OrmResult;
use crate::row::FromRecord;
use crate::session::Session;
use crate::value::{Record, Value};

/// A rendered statement: SQL text plus its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    sql: String,
    params: Vec<Value>,
}

impl BuiltQuery {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

/// Base trait for statement builders.
pub trait SqlBuilder: Sync {
    /// Render SQL and params without validating first.
    fn render(&self) -> OrmResult<BuiltQuery>;

    /// Validate builder state.
    fn validate(&self) -> OrmResult<()> {
        Ok(())
    }

    /// Validate, then render.
    fn build(&self) -> OrmResult<BuiltQuery> {
        self.validate()?;
        self.render()
    }

    /// Debug helper.
    fn to_sql(&self) -> OrmResult<String> {
        self.build().map(|q| q.sql)
    }

    /// Execute and return all rows.
    fn fetch_all(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = OrmResult<Vec<Record>>> + Send {
        async move {
            let query = self.build()?;
            Ok(session.prepared(&query).await?.rows)
        }
    }

    /// Execute and return the first row, if any.
    fn fetch_opt(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = OrmResult<Option<Record>>> + Send {
        async move { Ok(self.fetch_all(session).await?.into_iter().next()) }
    }

    /// Execute and map all rows to `T`.
    fn fetch_all_as<T: FromRecord>(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = OrmResult<Vec<T>>> + Send {
        async move {
            let rows = self.fetch_all(session).await?;
            rows.iter().map(T::from_record).collect()
        }
    }
}

/// Trait for mutation builders (INSERT/UPDATE/DELETE).
pub trait MutationBuilder: SqlBuilder {
    /// Execute and return the affected row count.
    fn execute(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = OrmResult<u64>> + Send {
        async move {
            let query = self.build()?;
            Ok(session.prepared(&query).await?.row_count)
        }
    }
}

/// Chainable WHERE modifiers, shared by every builder that filters rows.
///
/// Conditions are joined with `AND` in the order they were added.
pub trait Filterable: Sized {
    fn where_builder_mut(&mut self) -> &mut WhereBuilder;

    /// Add a prebuilt condition.
    fn filter(mut self, condition: Condition) -> Self {
        self.where_builder_mut().push(condition);
        self
    }

    /// Add a comparison written as an operator string (`"="`, `"!="`, `"<"`,
    /// `"<="`, `">"`, `">="`, `"like"`).
    ///
    /// An unknown operator makes the statement fail validation when built.
    fn and_where(mut self, field: &str, op: &str, value: impl Into<Value>) -> Self {
        self.where_builder_mut().push_op(field, op, value.into());
        self
    }

    /// Add a comparison with a typed operator.
    fn and_cmp(self, field: &str, op: Op, value: impl Into<Value>) -> Self {
        self.filter(Condition::compare(field, op, value))
    }

    fn and_eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.and_cmp(field, Op::Eq, value)
    }

    fn and_ne(self, field: &str, value: impl Into<Value>) -> Self {
        self.and_cmp(field, Op::Ne, value)
    }

    fn and_lt(self, field: &str, value: impl Into<Value>) -> Self {
        self.and_cmp(field, Op::Lt, value)
    }

    fn and_lte(self, field: &str, value: impl Into<Value>) -> Self {
        self.and_cmp(field, Op::Lte, value)
    }

    fn and_gt(self, field: &str, value: impl Into<Value>) -> Self {
        self.and_cmp(field, Op::Gt, value)
    }

    fn and_gte(self, field: &str, value: impl Into<Value>) -> Self {
        self.and_cmp(field, Op::Gte, value)
    }

    fn and_like(self, field: &str, pattern: impl Into<Value>) -> Self {
        self.and_cmp(field, Op::Like, pattern)
    }

    fn and_null(self, field: &str) -> Self {
        self.filter(Condition::is_null(field))
    }

    fn and_not_null(self, field: &str) -> Self {
        self.filter(Condition::is_not_null(field))
    }

    /// Add `field IN (...)`. An empty list fails validation when built.
    fn and_in<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.filter(Condition::in_list(field, values))
    }

    /// Add `field BETWEEN low AND high`.
    fn and_between(self, field: &str, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        self.filter(Condition::between(field, low, high))
    }
}
