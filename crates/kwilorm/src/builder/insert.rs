use super::traits::{BuiltQuery, MutationBuilder, SqlBuilder};
use crate::error::{OrmError, OrmResult};
use crate::value::{Record, Value};

/// Multi-row INSERT builder.
///
/// Columns come from the first row, in its key order. Every other row must
/// carry exactly the same set of columns (in any order); values are laid out
/// row-major following the first row's column order.
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    table: String,
    rows: Vec<Record>,
}

impl InsertBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            rows: Vec::new(),
        }
    }

    /// Append one row.
    pub fn row(mut self, row: Record) -> Self {
        self.rows.push(row);
        self
    }

    /// Append several rows.
    pub fn rows<I>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        self.rows.extend(rows);
        self
    }

    fn columns(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl SqlBuilder for InsertBuilder {
    fn render(&self) -> OrmResult<BuiltQuery> {
        let columns = self.columns();
        let width = columns.len();
        let mut params: Vec<Value> = Vec::with_capacity(width * self.rows.len());
        let mut groups = Vec::with_capacity(self.rows.len());

        for (row_idx, row) in self.rows.iter().enumerate() {
            let placeholders: Vec<String> = (0..width)
                .map(|col_idx| format!("${}", width * row_idx + col_idx + 1))
                .collect();
            groups.push(format!("({})", placeholders.join(",")));

            for column in &columns {
                let value = row.get(*column).ok_or_else(|| {
                    OrmError::validation(format!(
                        "InsertBuilder: row {} is missing column '{}'",
                        row_idx, column
                    ))
                })?;
                params.push(value.clone());
            }
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES {}",
            self.table,
            columns.join(","),
            groups.join(",")
        );
        Ok(BuiltQuery::new(sql, params))
    }

    fn validate(&self) -> OrmResult<()> {
        let Some(first) = self.rows.first() else {
            return Err(OrmError::validation(
                "InsertBuilder: at least one row is required",
            ));
        };
        if first.is_empty() {
            return Err(OrmError::validation(
                "InsertBuilder: rows must have at least one column",
            ));
        }

        for (idx, row) in self.rows.iter().enumerate().skip(1) {
            let same_columns =
                row.len() == first.len() && first.keys().all(|key| row.contains_key(key));
            if !same_columns {
                return Err(OrmError::validation(format!(
                    "InsertBuilder: row {} has columns [{}], expected [{}]",
                    idx,
                    row.keys().map(String::as_str).collect::<Vec<_>>().join(","),
                    first.keys().map(String::as_str).collect::<Vec<_>>().join(",")
                )));
            }
        }
        Ok(())
    }
}

impl MutationBuilder for InsertBuilder {}
