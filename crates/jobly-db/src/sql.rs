//! Helpers for building parameterized SQL.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::Postgres;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;

use crate::{DbError, DbResult};

/// Field-name to column-name overrides for a partial update.
///
/// Fields without an entry map to a column of the same name.
#[derive(Debug, Clone, Default)]
pub struct ColumnAliases {
    aliases: HashMap<String, String>,
}

impl ColumnAliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.aliases.insert(field.into(), column.into());
        self
    }

    pub fn column_for<'a>(&'a self, field: &'a str) -> &'a str {
        self.aliases.get(field).map(String::as_str).unwrap_or(field)
    }
}

/// The `SET` part of an `UPDATE` and its positional values.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate<V> {
    /// `"col_a"=$1, "col_b"=$2`
    pub set_clause: String,
    /// Bind values, in placeholder order.
    pub values: Vec<V>,
}

impl<V> PartialUpdate<V> {
    /// Index of the first placeholder after the `SET` values.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Turn an ordered list of `(field, value)` pairs into a `SET` clause.
///
/// Columns are double-quoted; values are returned separately for binding and
/// never appear in the SQL text. Fails with [`DbError::InvalidInput`] when
/// there is nothing to update.
pub fn sql_for_partial_update<V>(
    fields: Vec<(&str, V)>,
    aliases: &ColumnAliases,
) -> DbResult<PartialUpdate<V>> {
    if fields.is_empty() {
        return Err(DbError::InvalidInput("no data".to_string()));
    }

    let mut columns = Vec::with_capacity(fields.len());
    let mut values = Vec::with_capacity(fields.len());
    for (idx, (field, value)) in fields.into_iter().enumerate() {
        columns.push(format!("\"{}\"=${}", aliases.column_for(field), idx + 1));
        values.push(value);
    }

    Ok(PartialUpdate {
        set_clause: columns.join(", "),
        values,
    })
}

/// A nullable scalar carrying its column type, so that `NULL` binds with the
/// type Postgres expects for the target column.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    Int(Option<i32>),
    Numeric(Option<Decimal>),
}

impl SqlValue {
    pub fn bind_to<'q, O>(
        self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        match self {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::Int(v) => query.bind(v),
            SqlValue::Numeric(v) => query.bind(v),
        }
    }
}
