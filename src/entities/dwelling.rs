// 🏠 Dwelling Entities - Dwelling types and the dwellings themselves
//
// The dwelling TYPE decides which house rules apply:
// - "Particular"  → single unit, no stair/block/floor/door
// - "BloqueCasa"  → block of units, all four sub-fields mandatory

use crate::entities::house::houses_misfit_kind;
use crate::record::{find, list_where, Record, Status};
use crate::validation::{RegistryResult, ValidationErrors};
use rusqlite::types::{FromSql, FromSqlResult, Value, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

pub const DWELLING_TYPE_DESCRIPTION_MAX: usize = 15;
pub const STREET_MAX: usize = 3;

pub const PARTICULAR: &str = "Particular";
pub const BLOQUE_CASA: &str = "BloqueCasa";

// ============================================================================
// DWELLING KIND
// ============================================================================

/// How a dwelling type constrains the houses inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellingKind {
    /// One house, no unit sub-fields
    Particular,

    /// Many houses, each addressed by stair/block/floor/door
    BlockOfUnits,

    /// Any other description: no extra rules
    Other,
}

impl DwellingKind {
    pub fn from_description(description: &str) -> Self {
        let description = description.trim();
        if description.eq_ignore_ascii_case(PARTICULAR) {
            DwellingKind::Particular
        } else if description.eq_ignore_ascii_case(BLOQUE_CASA) {
            DwellingKind::BlockOfUnits
        } else {
            DwellingKind::Other
        }
    }
}

// ============================================================================
// DWELLING TYPE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DwellingType {
    #[serde(default)]
    pub id: Option<i64>,

    /// Unique label, e.g. "Particular" or "BloqueCasa"
    pub description: String,

    #[serde(default, deserialize_with = "crate::record::empty_as_default")]
    pub status: Status,
}

impl DwellingType {
    pub fn new(description: &str) -> Self {
        DwellingType {
            id: None,
            description: description.to_string(),
            status: Status::Active,
        }
    }

    pub fn kind(&self) -> DwellingKind {
        DwellingKind::from_description(&self.description)
    }
}

impl Record for DwellingType {
    const ENTITY: &'static str = "dwelling_type";
    const TABLE: &'static str = "dwelling_types";
    const COLUMNS: &'static [&'static str] = &["description", "status"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![Value::Text(self.description.clone()), self.status.into()]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(DwellingType {
            id: Some(row.get(0)?),
            description: row.get(1)?,
            status: row.get(2)?,
        })
    }

    /// A rename can change the kind, so every dwelling of this type must
    /// still fit the new one.
    fn clean(&mut self, conn: &Connection) -> RegistryResult<()> {
        self.description = self.description.trim().to_string();

        let mut errors = ValidationErrors::new(Self::ENTITY);
        errors.require_text("description", &self.description);
        errors.max_len("description", &self.description, DWELLING_TYPE_DESCRIPTION_MAX);

        if let Some(id) = self.id {
            let dwellings: Vec<Dwelling> = list_where(conn, "dwelling_type_id = ?1", [id])?;
            for dwelling in dwellings {
                let Some(dwelling_id) = dwelling.id else { continue };
                if let Some(problem) = houses_misfit_kind(conn, dwelling_id, self.kind())? {
                    errors.add("description", problem);
                }
            }
        }

        errors.finish()
    }
}

// ============================================================================
// OCCUPANCY
// ============================================================================

/// Stored as 'S' (sí) / 'N' (no)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occupancy {
    #[serde(rename = "S")]
    Occupied,
    #[default]
    #[serde(rename = "N")]
    Vacant,
}

impl Occupancy {
    pub fn code(&self) -> &'static str {
        match self {
            Occupancy::Occupied => "S",
            Occupancy::Vacant => "N",
        }
    }
}

impl FromSql for Occupancy {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "S" => Ok(Occupancy::Occupied),
            "N" => Ok(Occupancy::Vacant),
            other => Err(rusqlite::types::FromSqlError::Other(
                format!("unknown occupancy code {:?}", other).into(),
            )),
        }
    }
}

// ============================================================================
// DWELLING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dwelling {
    #[serde(default)]
    pub id: Option<i64>,

    /// Street code; (street, number) is unique
    pub street: String,
    pub number: i64,
    pub postal_code: i64,

    #[serde(default, deserialize_with = "crate::record::empty_as_default")]
    pub occupancy: Occupancy,

    pub urban_zone_id: i64,
    pub dwelling_type_id: i64,

    #[serde(default, deserialize_with = "crate::record::empty_as_default")]
    pub status: Status,
}

impl Dwelling {
    pub fn new(
        street: &str,
        number: i64,
        postal_code: i64,
        urban_zone_id: i64,
        dwelling_type_id: i64,
    ) -> Self {
        Dwelling {
            id: None,
            street: street.to_string(),
            number,
            postal_code,
            occupancy: Occupancy::Vacant,
            urban_zone_id,
            dwelling_type_id,
            status: Status::Active,
        }
    }
}

impl Record for Dwelling {
    const ENTITY: &'static str = "dwelling";
    const TABLE: &'static str = "dwellings";
    const COLUMNS: &'static [&'static str] = &[
        "street",
        "number",
        "postal_code",
        "occupied",
        "urban_zone_id",
        "dwelling_type_id",
        "status",
    ];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.street.clone()),
            Value::Integer(self.number),
            Value::Integer(self.postal_code),
            Value::Text(self.occupancy.code().to_string()),
            Value::Integer(self.urban_zone_id),
            Value::Integer(self.dwelling_type_id),
            self.status.into(),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Dwelling {
            id: Some(row.get(0)?),
            street: row.get(1)?,
            number: row.get(2)?,
            postal_code: row.get(3)?,
            occupancy: row.get(4)?,
            urban_zone_id: row.get(5)?,
            dwelling_type_id: row.get(6)?,
            status: row.get(7)?,
        })
    }

    /// Every dwelling field is mandatory, and a type change must suit the
    /// houses already inside
    fn clean(&mut self, conn: &Connection) -> RegistryResult<()> {
        self.street = self.street.trim().to_string();

        let mut errors = ValidationErrors::new(Self::ENTITY);
        errors.require_text("street", &self.street);
        errors.max_len("street", &self.street, STREET_MAX);

        if self.number <= 0 {
            errors.add("number", "Required field must be a positive number");
        }
        if self.postal_code <= 0 {
            errors.add("postal_code", "Required field must be a positive number");
        }

        // A missing dwelling type is reported by the foreign key on write
        if let Some(id) = self.id {
            if let Some(dwelling_type) = find::<DwellingType>(conn, self.dwelling_type_id)? {
                if let Some(problem) = houses_misfit_kind(conn, id, dwelling_type.kind())? {
                    errors.add("dwelling_type_id", problem);
                }
            }
        }

        errors.finish()
    }
}

/// Dwelling type of a dwelling, if the dwelling exists
pub fn dwelling_type_of(conn: &Connection, dwelling_id: i64) -> RegistryResult<Option<DwellingType>> {
    let dwelling_type = conn
        .query_row(
            "SELECT t.id, t.description, t.status
             FROM dwellings d
             JOIN dwelling_types t ON t.id = d.dwelling_type_id
             WHERE d.id = ?1",
            [dwelling_id],
            |row| DwellingType::from_row(row),
        )
        .optional()?;
    Ok(dwelling_type)
}
