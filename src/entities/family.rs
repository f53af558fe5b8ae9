// 👪 Family Entity - The household that persons belong to and houses are assigned to

use crate::record::{Record, Status};
use crate::validation::{RegistryResult, ValidationErrors};
use rusqlite::types::Value;
use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

pub const FAMILY_NAME_MAX: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Family {
    #[serde(default)]
    pub id: Option<i64>,

    pub name: String,

    #[serde(default, deserialize_with = "crate::record::empty_as_default")]
    pub member_count: i64,

    #[serde(default, deserialize_with = "crate::record::empty_as_default")]
    pub status: Status,
}

impl Family {
    pub fn new(name: &str) -> Self {
        Family {
            id: None,
            name: name.to_string(),
            member_count: 0,
            status: Status::Active,
        }
    }

    pub fn with_members(mut self, member_count: i64) -> Self {
        self.member_count = member_count;
        self
    }
}

impl Record for Family {
    const ENTITY: &'static str = "family";
    const TABLE: &'static str = "families";
    const COLUMNS: &'static [&'static str] = &["name", "member_count", "status"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Integer(self.member_count),
            self.status.into(),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Family {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            member_count: row.get(2)?,
            status: row.get(3)?,
        })
    }

    fn clean(&mut self, _conn: &Connection) -> RegistryResult<()> {
        self.name = self.name.trim().to_string();

        let mut errors = ValidationErrors::new(Self::ENTITY);
        errors.require_text("name", &self.name);
        errors.max_len("name", &self.name, FAMILY_NAME_MAX);
        if self.member_count < 0 {
            errors.add("member_count", "Must not be negative");
        }
        errors.finish()
    }
}
