//! Result rows and their conversion into domain entities
//!
//! A query returns loosely typed [`Row`]s. Each resource declares a db row
//! type implementing [`FromRow`] where nullable columns are `Option<_>`,
//! and a domain entity built from it with absent values collapsed to the
//! zero value of their type.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::error::{SdkError, SdkResult};
use super::identifier::ObjectIdentifier;

/// One column value of a result row
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Text(String),
    Int(i64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Int(i)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

impl From<DateTime<Utc>> for Cell {
    fn from(t: DateTime<Utc>) -> Self {
        Cell::Timestamp(t)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

/// A result row keyed by lower-case column name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: HashMap<String, Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<Cell>) -> Self {
        self.columns
            .insert(column.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Build a row from a JSON object, as returned by most drivers
    pub fn from_json(value: &serde_json::Value) -> SdkResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| SdkError::conversion("<row>", "expected a JSON object"))?;

        let mut row = Row::new();
        for (column, value) in object {
            let cell = match value {
                serde_json::Value::Null => Cell::Null,
                serde_json::Value::String(s) => Cell::Text(s.clone()),
                serde_json::Value::Bool(b) => Cell::Bool(*b),
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => Cell::Int(i),
                    None => {
                        return Err(SdkError::conversion(
                            column,
                            format!("number {n} is not an integer"),
                        ));
                    }
                },
                other => {
                    return Err(SdkError::conversion(
                        column,
                        format!("unsupported value {other}"),
                    ));
                }
            };
            row = row.with(column.as_str(), cell);
        }
        Ok(row)
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.columns.get(column)
    }

    fn non_null(&self, column: &str) -> Option<&Cell> {
        self.get(column).filter(|cell| **cell != Cell::Null)
    }

    fn required<T>(&self, column: &str, value: SdkResult<Option<T>>) -> SdkResult<T> {
        value?.ok_or_else(|| SdkError::conversion(column, "missing or null"))
    }

    pub fn opt_string(&self, column: &str) -> SdkResult<Option<String>> {
        match self.non_null(column) {
            None => Ok(None),
            Some(Cell::Text(s)) => Ok(Some(s.clone())),
            Some(other) => Err(mismatch(column, "text", other)),
        }
    }

    pub fn string(&self, column: &str) -> SdkResult<String> {
        self.required(column, self.opt_string(column))
    }

    /// Integer column; numeric text is accepted
    pub fn opt_int(&self, column: &str) -> SdkResult<Option<i64>> {
        match self.non_null(column) {
            None => Ok(None),
            Some(Cell::Int(i)) => Ok(Some(*i)),
            Some(Cell::Text(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| SdkError::conversion(column, format!("'{s}' is not an integer"))),
            Some(other) => Err(mismatch(column, "integer", other)),
        }
    }

    pub fn int(&self, column: &str) -> SdkResult<i64> {
        self.required(column, self.opt_int(column))
    }

    /// Boolean column; `true`/`false` text is accepted in any case
    pub fn opt_bool(&self, column: &str) -> SdkResult<Option<bool>> {
        match self.non_null(column) {
            None => Ok(None),
            Some(Cell::Bool(b)) => Ok(Some(*b)),
            Some(Cell::Text(s)) if s.eq_ignore_ascii_case("true") => Ok(Some(true)),
            Some(Cell::Text(s)) if s.eq_ignore_ascii_case("false") => Ok(Some(false)),
            Some(other) => Err(mismatch(column, "boolean", other)),
        }
    }

    pub fn bool(&self, column: &str) -> SdkResult<bool> {
        self.required(column, self.opt_bool(column))
    }

    /// Timestamp column; RFC 3339 text is accepted
    pub fn opt_timestamp(&self, column: &str) -> SdkResult<Option<DateTime<Utc>>> {
        match self.non_null(column) {
            None => Ok(None),
            Some(Cell::Timestamp(t)) => Ok(Some(*t)),
            Some(Cell::Text(s)) => DateTime::parse_from_rfc3339(s)
                .map(|t| Some(t.with_timezone(&Utc)))
                .map_err(|e| SdkError::conversion(column, format!("'{s}': {e}"))),
            Some(other) => Err(mismatch(column, "timestamp", other)),
        }
    }

    pub fn timestamp(&self, column: &str) -> SdkResult<DateTime<Utc>> {
        self.required(column, self.opt_timestamp(column))
    }
}

fn mismatch(column: &str, expected: &str, got: &Cell) -> SdkError {
    SdkError::conversion(column, format!("expected {expected}, got {got:?}"))
}

/// A typed db row decoded from a [`Row`]
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> SdkResult<Self>;
}

/// Convert db rows into domain entities, preserving source order
pub fn convert_rows<R, E: From<R>>(rows: Vec<R>) -> Vec<E> {
    rows.into_iter().map(E::from).collect()
}

/// First entity matching `predicate`; later matches are ignored
pub fn find_one<E>(
    entities: impl IntoIterator<Item = E>,
    kind: &'static str,
    id: &dyn ObjectIdentifier,
    predicate: impl FnMut(&E) -> bool,
) -> SdkResult<E> {
    entities
        .into_iter()
        .find(predicate)
        .ok_or_else(|| SdkError::not_found(kind, id.fully_qualified_name()))
}
