// 🏘️ Urban Zone Entity - Belongs to one Municipality

use crate::record::{Record, Status};
use crate::validation::{RegistryResult, ValidationErrors};
use rusqlite::types::Value;
use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

pub const ZONE_NAME_MAX: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrbanZone {
    #[serde(default)]
    pub id: Option<i64>,

    /// Unique across all zones
    pub name: String,

    pub municipality_id: i64,

    #[serde(default, deserialize_with = "crate::record::empty_as_default")]
    pub status: Status,
}

impl UrbanZone {
    pub fn new(name: &str, municipality_id: i64) -> Self {
        UrbanZone {
            id: None,
            name: name.to_string(),
            municipality_id,
            status: Status::Active,
        }
    }
}

impl Record for UrbanZone {
    const ENTITY: &'static str = "urban_zone";
    const TABLE: &'static str = "urban_zones";
    const COLUMNS: &'static [&'static str] = &["name", "municipality_id", "status"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Integer(self.municipality_id),
            self.status.into(),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(UrbanZone {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            municipality_id: row.get(2)?,
            status: row.get(3)?,
        })
    }

    fn clean(&mut self, _conn: &Connection) -> RegistryResult<()> {
        self.name = self.name.trim().to_string();

        let mut errors = ValidationErrors::new(Self::ENTITY);
        errors.require_text("name", &self.name);
        errors.max_len("name", &self.name, ZONE_NAME_MAX);
        errors.finish()
    }
}
