// 🏛️ Municipality Entity - Belongs to one Region

use crate::record::{check_money, decimal_at, decimal_value, Record, Status};
use crate::validation::{RegistryResult, ValidationErrors};
use rusqlite::types::Value;
use rusqlite::{Connection, Row};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const MUNICIPALITY_NAME_MAX: usize = 20;

/// Budget column holds 8 digits with 2 decimals
pub const BUDGET_LIMIT: i64 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Municipality {
    #[serde(default)]
    pub id: Option<i64>,

    /// Unique across all municipalities
    pub name: String,

    #[serde(default, deserialize_with = "crate::record::empty_as_default")]
    pub annual_budget: Decimal,

    #[serde(default, deserialize_with = "crate::record::empty_as_default")]
    pub dwelling_count: i64,

    pub region_id: i64,

    #[serde(default, deserialize_with = "crate::record::empty_as_default")]
    pub status: Status,
}

impl Municipality {
    pub fn new(name: &str, region_id: i64) -> Self {
        Municipality {
            id: None,
            name: name.to_string(),
            annual_budget: Decimal::ZERO,
            dwelling_count: 0,
            region_id,
            status: Status::Active,
        }
    }

    pub fn with_budget(mut self, annual_budget: Decimal) -> Self {
        self.annual_budget = annual_budget;
        self
    }
}

impl Record for Municipality {
    const ENTITY: &'static str = "municipality";
    const TABLE: &'static str = "municipalities";
    const COLUMNS: &'static [&'static str] =
        &["name", "annual_budget", "dwelling_count", "region_id", "status"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            decimal_value(self.annual_budget),
            Value::Integer(self.dwelling_count),
            Value::Integer(self.region_id),
            self.status.into(),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Municipality {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            annual_budget: decimal_at(row, 2)?,
            dwelling_count: row.get(3)?,
            region_id: row.get(4)?,
            status: row.get(5)?,
        })
    }

    fn clean(&mut self, _conn: &Connection) -> RegistryResult<()> {
        self.name = self.name.trim().to_string();

        let mut errors = ValidationErrors::new(Self::ENTITY);
        errors.require_text("name", &self.name);
        errors.max_len("name", &self.name, MUNICIPALITY_NAME_MAX);

        if self.annual_budget < Decimal::ZERO {
            errors.add("annual_budget", "Must not be negative");
        }
        check_money(&mut errors, "annual_budget", self.annual_budget, BUDGET_LIMIT);

        if self.dwelling_count < 0 {
            errors.add("dwelling_count", "Must not be negative");
        }

        errors.finish()
    }
}
