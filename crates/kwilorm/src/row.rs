//! Row mapping traits and utilities

use crate::error::{OrmError, OrmResult};
use crate::value::{Record, Value};
use serde::de::DeserializeOwned;

/// Trait for types that can be built from a result [`Record`].
///
/// Any `serde::Deserialize` type gets this for free: the record is viewed as
/// a JSON object whose keys are the column names.
pub trait FromRecord: Sized {
    fn from_record(record: &Record) -> OrmResult<Self>;
}

impl<T: DeserializeOwned> FromRecord for T {
    fn from_record(record: &Record) -> OrmResult<Self> {
        let object = serde_json::to_value(record)
            .map_err(|e| OrmError::decode("*", e.to_string()))?;
        serde_json::from_value(object).map_err(|e| OrmError::decode("*", e.to_string()))
    }
}

/// Conversion from a single cell.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.to_i64()
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            other => Some(other.to_f64_lossy()).filter(|v| !v.is_nan()),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s.clone()),
            Value::Int(v) => Some(v.to_string()),
            Value::Float(v) => Some(v.to_string()),
            Value::Null => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            Some(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

/// Extension methods for reading typed columns out of a [`Record`].
pub trait RecordExt {
    /// Get a typed column value, returning an error on a missing column or
    /// an incompatible cell.
    fn try_get_column<T: FromValue>(&self, column: &str) -> OrmResult<T>;
}

impl RecordExt for Record {
    fn try_get_column<T: FromValue>(&self, column: &str) -> OrmResult<T> {
        let value = self
            .get(column)
            .ok_or_else(|| OrmError::decode(column, "column not present in row"))?;
        T::from_value(value).ok_or_else(|| {
            OrmError::decode(
                column,
                format!(
                    "cannot convert {value} to {}",
                    std::any::type_name::<T>()
                ),
            )
        })
    }
}
