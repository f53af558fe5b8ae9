// 🚪 House Entity - A housing unit inside a dwelling, assigned to one family
//
// Rules checked on save:
// - one house per family
// - "Particular" dwelling: one house, stair/block/floor/door all empty
// - "BloqueCasa" dwelling: stair/block/floor/door all set, and the
//   (stair, block, floor, door) tuple is unique
// - stair, floor and door are digits only; every sub-field fits 2 characters
// - area is required, positive, at most 999.99

use crate::entities::dwelling::{dwelling_type_of, DwellingKind};
use crate::record::{check_money, decimal_at, decimal_value, exists, list_where, optional_text, Record, Status};
use crate::validation::{RegistryResult, ValidationErrors};
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const SUB_FIELD_MAX: usize = 2;

/// Area column holds 5 digits with 2 decimals
pub const AREA_LIMIT: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub stair: Option<String>,
    #[serde(default)]
    pub block: Option<String>,
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub door: Option<String>,

    /// Square metres
    pub area: Decimal,

    pub dwelling_id: i64,
    pub family_id: i64,

    #[serde(default, deserialize_with = "crate::record::empty_as_default")]
    pub status: Status,
}

impl House {
    /// A single-unit house (no sub-fields)
    pub fn new(dwelling_id: i64, family_id: i64, area: Decimal) -> Self {
        House {
            id: None,
            stair: None,
            block: None,
            floor: None,
            door: None,
            area,
            dwelling_id,
            family_id,
            status: Status::Active,
        }
    }

    /// A unit inside a block, addressed by stair/block/floor/door
    pub fn unit(
        dwelling_id: i64,
        family_id: i64,
        area: Decimal,
        stair: &str,
        block: &str,
        floor: &str,
        door: &str,
    ) -> Self {
        House {
            stair: Some(stair.to_string()),
            block: Some(block.to_string()),
            floor: Some(floor.to_string()),
            door: Some(door.to_string()),
            ..House::new(dwelling_id, family_id, area)
        }
    }

    fn sub_fields(&self) -> [(&'static str, &Option<String>); 4] {
        [
            ("stair", &self.stair),
            ("block", &self.block),
            ("floor", &self.floor),
            ("door", &self.door),
        ]
    }

    pub fn has_any_sub_field(&self) -> bool {
        self.sub_fields().iter().any(|(_, v)| v.is_some())
    }

    pub fn has_all_sub_fields(&self) -> bool {
        self.sub_fields().iter().all(|(_, v)| v.is_some())
    }

    /// Blank sub-fields become None so they stay out of the unit-address index
    fn normalize_sub_fields(&mut self) {
        for field in [&mut self.stair, &mut self.block, &mut self.floor, &mut self.door] {
            *field = field
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
        }
    }

    fn check_sub_field_format(&self, errors: &mut ValidationErrors) {
        for (name, value) in self.sub_fields() {
            let Some(value) = value else { continue };
            errors.max_len(name, value, SUB_FIELD_MAX);
            // block is a code, the others are numbers
            if name != "block" && !value.chars().all(|c| c.is_ascii_digit()) {
                errors.add(name, "Only digits are allowed");
            }
        }
    }

    fn check_block_of_units(&self, conn: &Connection, errors: &mut ValidationErrors) -> RegistryResult<()> {
        let mut complete = true;
        for (name, value) in self.sub_fields() {
            if value.is_none() {
                errors.add(name, "Required for houses in a block of units");
                complete = false;
            }
        }

        if complete
            && exists(
                conn,
                "SELECT 1 FROM houses
                 WHERE stair = ?1 AND block = ?2 AND floor = ?3 AND door = ?4 AND id IS NOT ?5",
                params![self.stair, self.block, self.floor, self.door, self.id],
            )?
        {
            errors.add("door", "Another house already has this stair, block, floor and door");
        }
        Ok(())
    }

    fn check_particular(&self, conn: &Connection, errors: &mut ValidationErrors) -> RegistryResult<()> {
        for (name, value) in self.sub_fields() {
            if value.is_some() {
                errors.add(name, "Must be empty for a single-unit dwelling");
            }
        }

        if exists(
            conn,
            "SELECT 1 FROM houses WHERE dwelling_id = ?1 AND id IS NOT ?2",
            params![self.dwelling_id, self.id],
        )? {
            errors.add(
                "dwelling_id",
                format!("Dwelling {} is single-unit and already has a house", self.dwelling_id),
            );
        }
        Ok(())
    }
}

impl Record for House {
    const ENTITY: &'static str = "house";
    const TABLE: &'static str = "houses";
    const COLUMNS: &'static [&'static str] = &[
        "stair",
        "block",
        "floor",
        "door",
        "area",
        "dwelling_id",
        "family_id",
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
            optional_text(&self.stair),
            optional_text(&self.block),
            optional_text(&self.floor),
            optional_text(&self.door),
            decimal_value(self.area),
            Value::Integer(self.dwelling_id),
            Value::Integer(self.family_id),
            self.status.into(),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(House {
            id: Some(row.get(0)?),
            stair: row.get(1)?,
            block: row.get(2)?,
            floor: row.get(3)?,
            door: row.get(4)?,
            area: decimal_at(row, 5)?,
            dwelling_id: row.get(6)?,
            family_id: row.get(7)?,
            status: row.get(8)?,
        })
    }

    fn clean(&mut self, conn: &Connection) -> RegistryResult<()> {
        self.normalize_sub_fields();

        let mut errors = ValidationErrors::new(Self::ENTITY);

        if self.area <= Decimal::ZERO {
            errors.add("area", "Required field must be greater than zero");
        }
        check_money(&mut errors, "area", self.area, AREA_LIMIT);

        self.check_sub_field_format(&mut errors);

        if exists(
            conn,
            "SELECT 1 FROM houses WHERE family_id = ?1 AND id IS NOT ?2",
            params![self.family_id, self.id],
        )? {
            errors.add(
                "family_id",
                format!("Family {} already has a house assigned", self.family_id),
            );
        }

        // A missing dwelling is reported by the foreign key on write
        match dwelling_type_of(conn, self.dwelling_id)?.map(|t| t.kind()) {
            Some(DwellingKind::Particular) => self.check_particular(conn, &mut errors)?,
            Some(DwellingKind::BlockOfUnits) => self.check_block_of_units(conn, &mut errors)?,
            Some(DwellingKind::Other) | None => {}
        }

        errors.finish()
    }
}

pub fn house_of_family(conn: &Connection, family_id: i64) -> RegistryResult<Option<House>> {
    let houses: Vec<House> = list_where(conn, "family_id = ?1", [family_id])?;
    Ok(houses.into_iter().next())
}

pub fn houses_in_dwelling(conn: &Connection, dwelling_id: i64) -> RegistryResult<Vec<House>> {
    list_where(conn, "dwelling_id = ?1", [dwelling_id])
}

/// Why the houses already in `dwelling_id` break the rules of `kind`, if they do
pub fn houses_misfit_kind(
    conn: &Connection,
    dwelling_id: i64,
    kind: DwellingKind,
) -> RegistryResult<Option<String>> {
    let houses = houses_in_dwelling(conn, dwelling_id)?;

    let problem = match kind {
        DwellingKind::Particular if houses.len() > 1 => Some(format!(
            "Dwelling {} has {} houses, a single-unit dwelling holds one",
            dwelling_id,
            houses.len()
        )),
        DwellingKind::Particular if houses.iter().any(House::has_any_sub_field) => Some(format!(
            "Dwelling {} has a house with stair/block/floor/door set",
            dwelling_id
        )),
        DwellingKind::BlockOfUnits if !houses.iter().all(House::has_all_sub_fields) => Some(format!(
            "Dwelling {} has a house without a full stair/block/floor/door address",
            dwelling_id
        )),
        _ => None,
    };
    Ok(problem)
}
