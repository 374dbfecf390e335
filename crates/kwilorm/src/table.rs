//! Fluent per-table query.

use crate::builder::{
    Aggregate, AggregateBuilder, DeleteBuilder, Filterable, InsertBuilder, MutationBuilder,
    SelectBuilder, SqlBuilder, UpdateBuilder, WhereBuilder,
};
use crate::condition::Order;
use crate::connector::QueryOutput;
use crate::error::{OrmError, OrmResult};
use crate::row::FromRecord;
use crate::session::Session;
use crate::value::{Record, Value};

/// Result of a write statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affected {
    pub affected_rows: u64,
}

/// A query against one table.
///
/// Modifiers (`and_*`, `select`, `order_by`, `limit`) accumulate state and
/// return the query; terminal methods (`get`, `insert`, `update`, ...) read
/// that state without resetting it, render one statement and send it. Create
/// a fresh query for each independent statement.
///
/// # Example
///
/// ```rust,ignore
/// use kwilorm::prelude::*;
///
/// let adults = db
///     .table("users")?
///     .and_where("age", ">=", 18)
///     .and_not_null("email")
///     .order_by("name", Order::Asc)
///     .limit(20)
///     .get()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct TableQuery {
    session: Session,
    table: String,
    where_builder: WhereBuilder,
    columns: Vec<String>,
    order: Option<(String, Order)>,
    limit: Option<u64>,
}

impl TableQuery {
    pub fn new(session: Session, table: &str) -> Self {
        Self {
            session: session.for_table(table),
            table: table.to_string(),
            where_builder: WhereBuilder::new(),
            columns: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn is_syncing(&self) -> bool {
        self.session.is_syncing()
    }

    pub fn conditions(&self) -> &WhereBuilder {
        &self.where_builder
    }

    // ==================== Modifiers ====================

    /// Replace the projection list; an empty list selects `*`.
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the ordering. Only one ORDER BY is kept; a second call overwrites.
    pub fn order_by(mut self, field: &str, order: Order) -> Self {
        self.order = Some((field.to_string(), order));
        self
    }

    /// Cap the number of rows for `get` and `delete`.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    // ==================== Statement builders ====================

    pub fn select_builder(&self) -> SelectBuilder {
        SelectBuilder::new(&self.table)
            .columns(self.columns.iter().cloned())
            .with_where(self.where_builder.clone())
            .order_by_opt(self.order.clone())
            .limit_opt(self.limit)
    }

    pub fn insert_builder<I>(&self, rows: I) -> InsertBuilder
    where
        I: IntoIterator<Item = Record>,
    {
        InsertBuilder::new(&self.table).rows(rows)
    }

    pub fn update_builder(&self, values: Record) -> UpdateBuilder {
        UpdateBuilder::new(&self.table)
            .set_all(values)
            .with_where(self.where_builder.clone())
    }

    pub fn delete_builder(&self) -> DeleteBuilder {
        DeleteBuilder::new(&self.table)
            .with_where(self.where_builder.clone())
            .limit_opt(self.limit)
    }

    pub fn aggregate_builder(&self, aggregate: Aggregate) -> AggregateBuilder {
        AggregateBuilder::new(&self.table, aggregate).with_where(self.where_builder.clone())
    }

    // ==================== Writes ====================

    /// Insert one or more rows in a single statement.
    ///
    /// Columns are taken from the first row; every row must have the same
    /// columns.
    pub async fn insert<I>(&self, rows: I) -> OrmResult<Affected>
    where
        I: IntoIterator<Item = Record>,
    {
        let affected_rows = self.insert_builder(rows).execute(&self.session).await?;
        Ok(Affected { affected_rows })
    }

    /// Update the matching rows.
    pub async fn update(&self, values: Record) -> OrmResult<Affected> {
        let affected_rows = self
            .update_builder(values)
            .execute(&self.session)
            .await?;
        Ok(Affected { affected_rows })
    }

    /// Delete the matching rows (all rows when there are no conditions).
    pub async fn delete(&self) -> OrmResult<Affected> {
        let affected_rows = self.delete_builder().execute(&self.session).await?;
        Ok(Affected { affected_rows })
    }

    pub async fn truncate(&self) -> OrmResult<()> {
        let sql = format!("TRUNCATE {}", self.table);
        self.session.prepared_statement(&sql, &[]).await?;
        Ok(())
    }

    // ==================== Reads ====================

    pub async fn get(&self) -> OrmResult<Vec<Record>> {
        self.select_builder().fetch_all(&self.session).await
    }

    pub async fn get_as<T: FromRecord>(&self) -> OrmResult<Vec<T>> {
        self.select_builder().fetch_all_as(&self.session).await
    }

    /// Like [`TableQuery::get`] with the limit forced to 1. The query's own
    /// limit is left untouched.
    pub async fn first(&self) -> OrmResult<Option<Record>> {
        self.select_builder()
            .limit(1)
            .fetch_opt(&self.session)
            .await
    }

    pub async fn first_as<T: FromRecord>(&self) -> OrmResult<Option<T>> {
        self.first().await?.as_ref().map(T::from_record).transpose()
    }

    /// Fetch the row whose `id` column equals `id`.
    ///
    /// Conditions, projection, ordering and limit on this query are ignored.
    pub async fn find(&self, id: impl Into<Value>) -> OrmResult<Option<Record>> {
        SelectBuilder::new(&self.table)
            .and_eq("id", id)
            .fetch_opt(&self.session)
            .await
    }

    pub async fn find_as<T: FromRecord>(&self, id: impl Into<Value>) -> OrmResult<Option<T>> {
        self.find(id).await?.as_ref().map(T::from_record).transpose()
    }

    // ==================== Aggregates ====================

    /// Number of matching rows.
    ///
    /// Integer cells and integral numeric text (`"12"`, `"12.0"`) are
    /// accepted; anything else is a [`OrmError::Decode`].
    pub async fn count(&self) -> OrmResult<i64> {
        let cell = self
            .aggregate_builder(Aggregate::Count)
            .fetch_scalar(&self.session)
            .await?;
        match cell {
            Some(value) => value
                .to_i64()
                .ok_or_else(|| OrmError::decode("count", format!("not an integer: {value}"))),
            None => Err(OrmError::decode("count", "no row returned")),
        }
    }

    /// `MAX(field)` over matching rows; NaN when the result is not numeric.
    pub async fn max(&self, field: &str) -> OrmResult<f64> {
        self.float_aggregate(Aggregate::Max(field.to_string())).await
    }

    /// `MIN(field)` over matching rows; NaN when the result is not numeric.
    pub async fn min(&self, field: &str) -> OrmResult<f64> {
        self.float_aggregate(Aggregate::Min(field.to_string())).await
    }

    /// `SUM(field)` over matching rows; NaN when the result is not numeric.
    pub async fn sum(&self, field: &str) -> OrmResult<f64> {
        self.float_aggregate(Aggregate::Sum(field.to_string())).await
    }

    /// `AVG(field)` over matching rows; NaN when the result is not numeric.
    pub async fn avg(&self, field: &str) -> OrmResult<f64> {
        self.float_aggregate(Aggregate::Avg(field.to_string())).await
    }

    async fn float_aggregate(&self, aggregate: Aggregate) -> OrmResult<f64> {
        let cell = self
            .aggregate_builder(aggregate)
            .fetch_scalar(&self.session)
            .await?;
        Ok(cell.map_or(f64::NAN, |value| value.to_f64_lossy()))
    }

    // ==================== Passthrough ====================

    pub async fn raw_query(&self, sql: &str) -> OrmResult<QueryOutput> {
        self.session.query(sql).await
    }

    pub async fn raw_prepared_statement(
        &self,
        sql: &str,
        values: &[Value],
    ) -> OrmResult<QueryOutput> {
        self.session.prepared_statement(sql, values).await
    }
}

impl Filterable for TableQuery {
    fn where_builder_mut(&mut self) -> &mut WhereBuilder {
        &mut self.where_builder
    }
}
