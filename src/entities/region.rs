// 🗺️ Region Entity - Top of the geographic hierarchy
//
// Region → Municipality → Urban Zone → Dwelling
// Deleting a region takes everything below it.

use crate::record::{Record, Status};
use crate::validation::{RegistryResult, ValidationErrors};
use rusqlite::types::Value;
use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

pub const REGION_NAME_MAX: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    #[serde(default)]
    pub id: Option<i64>,

    /// Unique across all regions
    pub name: String,

    #[serde(default, deserialize_with = "crate::record::empty_as_default")]
    pub status: Status,
}

impl Region {
    pub fn new(name: &str) -> Self {
        Region {
            id: None,
            name: name.to_string(),
            status: Status::Active,
        }
    }
}

impl Record for Region {
    const ENTITY: &'static str = "region";
    const TABLE: &'static str = "regions";
    const COLUMNS: &'static [&'static str] = &["name", "status"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![Value::Text(self.name.clone()), self.status.into()]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Region {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            status: row.get(2)?,
        })
    }

    fn clean(&mut self, _conn: &Connection) -> RegistryResult<()> {
        self.name = self.name.trim().to_string();

        let mut errors = ValidationErrors::new(Self::ENTITY);
        errors.require_text("name", &self.name);
        errors.max_len("name", &self.name, REGION_NAME_MAX);
        errors.finish()
    }
}
