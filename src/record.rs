// 🗃️ Record Layer - One trait for every registry table
//
// Each entity knows its table, its columns, how to bind itself and how to
// read itself back. The generic functions below do the SQL once for all of them.

use crate::validation::{RegistryError, RegistryResult};
use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, Type, Value, ValueRef};
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

// ============================================================================
// RECORD STATUS
// ============================================================================

/// Record status flag stored as a one-letter code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "A")]
    Active,
    #[serde(rename = "I")]
    Inactive,
}

impl Status {
    pub fn code(&self) -> &'static str {
        match self {
            Status::Active => "A",
            Status::Inactive => "I",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(Status::Active),
            "I" => Some(Status::Inactive),
            _ => None,
        }
    }
}

impl FromSql for Status {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = value.as_str()?;
        Status::from_code(code)
            .ok_or_else(|| FromSqlError::Other(format!("unknown status code {:?}", code).into()))
    }
}

impl From<Status> for Value {
    fn from(status: Status) -> Self {
        Value::Text(status.code().to_string())
    }
}

// ============================================================================
// RECORD TRAIT
// ============================================================================

/// A row in one of the registry tables.
///
/// `from_row` receives rows selected as `id, COLUMNS...`, so column `i` of
/// `COLUMNS` is at index `i + 1`.
pub trait Record: Sized + Serialize {
    /// Singular entity name used in errors and the audit trail
    const ENTITY: &'static str;
    const TABLE: &'static str;
    /// Every column except `id`, in bind order
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: i64);

    /// Values for `COLUMNS`, same order
    fn values(&self) -> Vec<Value>;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Record-level rules run before every write.
    ///
    /// May normalise fields and fill in derived values. Storage-level
    /// constraints (unique columns, foreign keys) are left to the database.
    fn clean(&mut self, _conn: &Connection) -> RegistryResult<()> {
        Ok(())
    }
}

fn select_sql<R: Record>() -> String {
    format!("SELECT id, {} FROM {}", R::COLUMNS.join(", "), R::TABLE)
}

// ============================================================================
// GENERIC CRUD
// ============================================================================

/// Insert a new row and return its id
pub fn insert<R: Record>(conn: &Connection, record: &R) -> RegistryResult<i64> {
    let placeholders: Vec<String> = (1..=R::COLUMNS.len()).map(|i| format!("?{}", i)).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        R::TABLE,
        R::COLUMNS.join(", "),
        placeholders.join(", ")
    );

    conn.execute(&sql, params_from_iter(record.values()))
        .map_err(|e| RegistryError::from_write(R::ENTITY, e))?;

    Ok(conn.last_insert_rowid())
}

/// Overwrite every column of row `id`
pub fn update<R: Record>(conn: &Connection, id: i64, record: &R) -> RegistryResult<()> {
    let assignments: Vec<String> = R::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{} = ?{}", col, i + 1))
        .collect();
    let sql = format!(
        "UPDATE {} SET {} WHERE id = ?{}",
        R::TABLE,
        assignments.join(", "),
        R::COLUMNS.len() + 1
    );

    let mut values = record.values();
    values.push(Value::Integer(id));

    let changed = conn
        .execute(&sql, params_from_iter(values))
        .map_err(|e| RegistryError::from_write(R::ENTITY, e))?;

    if changed == 0 {
        return Err(RegistryError::NotFound { entity: R::ENTITY, id });
    }
    Ok(())
}

pub fn find<R: Record>(conn: &Connection, id: i64) -> RegistryResult<Option<R>> {
    let sql = format!("{} WHERE id = ?1", select_sql::<R>());
    let record = conn.query_row(&sql, [id], |row| R::from_row(row)).optional()?;
    Ok(record)
}

pub fn get<R: Record>(conn: &Connection, id: i64) -> RegistryResult<R> {
    find(conn, id)?.ok_or(RegistryError::NotFound { entity: R::ENTITY, id })
}

/// All rows, oldest first
pub fn list<R: Record>(conn: &Connection) -> RegistryResult<Vec<R>> {
    let sql = format!("{} ORDER BY id", select_sql::<R>());
    let mut stmt = conn.prepare(&sql)?;
    let records = stmt
        .query_map([], |row| R::from_row(row))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Rows matching a WHERE clause written against the entity's own columns
pub fn list_where<R: Record>(
    conn: &Connection,
    clause: &str,
    params: impl rusqlite::Params,
) -> RegistryResult<Vec<R>> {
    let sql = format!("{} WHERE {} ORDER BY id", select_sql::<R>(), clause);
    let mut stmt = conn.prepare(&sql)?;
    let records = stmt
        .query_map(params, |row| R::from_row(row))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Delete row `id`; dependent rows go with it through ON DELETE CASCADE
pub fn delete<R: Record>(conn: &Connection, id: i64) -> RegistryResult<()> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", R::TABLE);
    let changed = conn
        .execute(&sql, [id])
        .map_err(|e| RegistryError::from_write(R::ENTITY, e))?;

    if changed == 0 {
        return Err(RegistryError::NotFound { entity: R::ENTITY, id });
    }
    Ok(())
}

pub fn count<R: Record>(conn: &Connection) -> RegistryResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", R::TABLE);
    let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(count)
}

/// True when the query returns at least one row
pub fn exists(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> RegistryResult<bool> {
    let found = conn
        .query_row(sql, params, |_| Ok(()))
        .optional()?
        .is_some();
    Ok(found)
}

// ============================================================================
// COLUMN HELPERS
// ============================================================================

/// Decimals live in TEXT columns so no precision is lost
pub fn decimal_value(value: Decimal) -> Value {
    Value::Text(value.to_string())
}

pub fn decimal_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub fn optional_text(value: &Option<String>) -> Value {
    match value {
        Some(text) => Value::Text(text.clone()),
        None => Value::Null,
    }
}

pub fn date_value(date: Option<NaiveDate>) -> Value {
    match date {
        Some(d) => Value::Text(d.format("%Y-%m-%d").to_string()),
        None => Value::Null,
    }
}

pub fn date_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|s| {
        NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

/// Serde helper: an empty CSV cell takes the field's default value
pub fn empty_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// At most two decimal places, strictly below `limit`
pub fn check_money(
    errors: &mut crate::validation::ValidationErrors,
    field: &str,
    value: Decimal,
    limit: i64,
) {
    if value.normalize().scale() > 2 {
        errors.add(field, "Must have at most 2 decimal places");
    }
    if value >= Decimal::new(limit, 0) {
        errors.add(field, format!("Must be less than {}", limit));
    }
}

// ============================================================================
// TESTS
// ============================================================================
