//! Filter conditions accumulated by the builders.
//!
//! A [`Condition`] pairs a column with a [`ConditionKind`]. Conditions are only
//! rendered (and numbered) when a statement is built, see
//! [`WhereBuilder`](crate::builder::WhereBuilder).

use crate::error::{OrmError, OrmResult};
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// Comparison operator taking a single value.
///
/// # Example
/// ```
/// use kwilorm::Op;
///
/// let op: Op = "!=".parse().unwrap();
/// assert_eq!(op, Op::Ne);
/// assert_eq!(Op::Like.as_sql(), "LIKE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// column = value
    Eq,
    /// column != value
    Ne,
    /// column < value
    Lt,
    /// column <= value
    Lte,
    /// column > value
    Gt,
    /// column >= value
    Gte,
    /// column LIKE pattern (the pattern is bound, never inlined)
    Like,
}

impl Op {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Like => "LIKE",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for Op {
    type Err = OrmError;

    fn from_str(s: &str) -> OrmResult<Self> {
        match s.trim() {
            "=" => Ok(Op::Eq),
            "!=" | "<>" => Ok(Op::Ne),
            "<" => Ok(Op::Lt),
            "<=" => Ok(Op::Lte),
            ">" => Ok(Op::Gt),
            ">=" => Ok(Op::Gte),
            other if other.eq_ignore_ascii_case("like") => Ok(Op::Like),
            other => Err(OrmError::validation(format!("unknown operator '{other}'"))),
        }
    }
}

/// Sort direction for `ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

impl FromStr for Order {
    type Err = OrmError;

    fn from_str(s: &str) -> OrmResult<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("asc") {
            Ok(Order::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Order::Desc)
        } else {
            Err(OrmError::validation(format!("unknown sort order '{s}'")))
        }
    }
}

/// What a condition tests.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionKind {
    Compare(Op, Value),
    IsNull,
    IsNotNull,
    Between(Value, Value),
    In(Vec<Value>),
}

/// One filter on a column.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub kind: ConditionKind,
}

impl Condition {
    pub fn compare(field: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            kind: ConditionKind::Compare(op, value.into()),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Op::Eq, value)
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ConditionKind::IsNull,
        }
    }

    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ConditionKind::IsNotNull,
        }
    }

    pub fn between(field: impl Into<String>, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            kind: ConditionKind::Between(low.into(), high.into()),
        }
    }

    pub fn in_list<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            field: field.into(),
            kind: ConditionKind::In(values.into_iter().map(Into::into).collect()),
        }
    }

    /// Number of placeholders this condition occupies once rendered.
    pub fn param_count(&self) -> usize {
        match &self.kind {
            ConditionKind::Compare(..) => 1,
            ConditionKind::IsNull | ConditionKind::IsNotNull => 0,
            ConditionKind::Between(..) => 2,
            ConditionKind::In(values) => values.len(),
        }
    }

    pub fn validate(&self) -> OrmResult<()> {
        match &self.kind {
            ConditionKind::In(values) if values.is_empty() => Err(OrmError::validation(format!(
                "IN list for '{}' cannot be empty",
                self.field
            ))),
            _ => Ok(()),
        }
    }
}
