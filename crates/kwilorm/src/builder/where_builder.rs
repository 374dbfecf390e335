//! Shared WHERE clause builder for SELECT, UPDATE, DELETE and aggregates.

use crate::condition::{Condition, ConditionKind, Op};
use crate::error::{OrmError, OrmResult};
use crate::value::Value;

/// Accumulates WHERE conditions in insertion order.
///
/// Placeholders are not assigned when a condition is added: they are
/// computed by [`WhereBuilder::render`] from the number of placeholders the
/// statement has already consumed, so the same conditions can follow the SET
/// list of an UPDATE or open a SELECT.
#[derive(Debug, Clone, Default)]
pub struct WhereBuilder {
    conditions: Vec<Condition>,
    /// Build error (validated at render time)
    build_error: Option<String>,
}

/// A rendered WHERE clause: either empty, or `"WHERE ..."` with its params.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<Value>,
}

impl WhereClause {
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

impl WhereBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any conditions have been added.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Get the build error, if any.
    pub fn build_error(&self) -> Option<&str> {
        self.build_error.as_deref()
    }

    /// Number of placeholders the rendered clause will use.
    pub fn param_count(&self) -> usize {
        self.conditions.iter().map(Condition::param_count).sum()
    }

    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    /// Add a comparison given as an operator string (`"="`, `"<"`, `"like"`, ...).
    ///
    /// An unknown operator is remembered and reported by [`WhereBuilder::render`].
    pub fn push_op(&mut self, field: &str, op: &str, value: Value) {
        match op.parse::<Op>() {
            Ok(op) => self.push(Condition::compare(field, op, value)),
            Err(err) => {
                if self.build_error.is_none() {
                    self.build_error = Some(format!("condition on '{field}': {err}"));
                }
            }
        }
    }

    pub fn validate(&self) -> OrmResult<()> {
        if let Some(err) = &self.build_error {
            return Err(OrmError::Validation(err.clone()));
        }
        self.conditions.iter().try_for_each(Condition::validate)
    }

    /// Render the clause with placeholder numbering starting after `base`.
    ///
    /// For example, `render(2)` numbers the first placeholder `$3`.
    pub fn render(&self, base: usize) -> OrmResult<WhereClause> {
        self.validate()?;

        if self.conditions.is_empty() {
            return Ok(WhereClause::default());
        }

        let mut params: Vec<Value> = Vec::with_capacity(self.param_count());
        let mut parts = Vec::with_capacity(self.conditions.len());

        for condition in &self.conditions {
            let field = &condition.field;
            let part = match &condition.kind {
                ConditionKind::Compare(op, value) => {
                    let p = placeholder(base, params.len() + 1);
                    params.push(value.clone());
                    format!("{} {} {}", field, op.as_sql(), p)
                }
                ConditionKind::IsNull => format!("{} IS NULL", field),
                ConditionKind::IsNotNull => format!("{} IS NOT NULL", field),
                ConditionKind::Between(low, high) => {
                    let p1 = placeholder(base, params.len() + 1);
                    let p2 = placeholder(base, params.len() + 2);
                    params.push(low.clone());
                    params.push(high.clone());
                    format!("{} BETWEEN {} AND {}", field, p1, p2)
                }
                ConditionKind::In(values) => {
                    let placeholders: Vec<String> = (0..values.len())
                        .map(|offset| placeholder(base, params.len() + 1 + offset))
                        .collect();
                    params.extend(values.iter().cloned());
                    format!("{} IN ({})", field, placeholders.join(","))
                }
            };
            parts.push(part);
        }

        Ok(WhereClause {
            sql: format!("WHERE {}", parts.join(" AND ")),
            params,
        })
    }
}

fn placeholder(base: usize, index: usize) -> String {
    format!("${}", base + index)
}
