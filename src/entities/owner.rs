// 🔑 Owner Entity - Income holder of a family
//
// Rules checked on save:
// 1. The person behind the owner must have the owner person type
// 2. A person owns at most one family (one Owner row per person)
// 3. estimated_tax is a flat 10% of family_income

use crate::entities::person::{owner_person_of_family, Person, PersonType};
use crate::record::{check_money, decimal_at, decimal_value, exists, find, list_where, Record, Status};
use crate::tax;
use crate::validation::{RegistryResult, ValidationErrors};
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income column holds 8 digits with 2 decimals
pub const INCOME_LIMIT: i64 = 1_000_000;

/// Estimated tax is this share of the family income
pub fn estimated_tax_rate() -> Decimal {
    Decimal::new(10, 2)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub id: Option<i64>,

    pub family_income: Decimal,

    /// Derived on save, never trusted from input
    #[serde(default, deserialize_with = "crate::record::empty_as_default")]
    pub estimated_tax: Decimal,

    pub person_id: i64,

    #[serde(default, deserialize_with = "crate::record::empty_as_default")]
    pub status: Status,
}

impl Owner {
    pub fn new(person_id: i64, family_income: Decimal) -> Self {
        Owner {
            id: None,
            family_income,
            estimated_tax: Decimal::ZERO,
            person_id,
            status: Status::Active,
        }
    }
}

impl Record for Owner {
    const ENTITY: &'static str = "owner";
    const TABLE: &'static str = "owners";
    const COLUMNS: &'static [&'static str] =
        &["family_income", "estimated_tax", "person_id", "status"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![
            decimal_value(self.family_income),
            decimal_value(self.estimated_tax),
            Value::Integer(self.person_id),
            self.status.into(),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Owner {
            id: Some(row.get(0)?),
            family_income: decimal_at(row, 1)?,
            estimated_tax: decimal_at(row, 2)?,
            person_id: row.get(3)?,
            status: row.get(4)?,
        })
    }

    fn clean(&mut self, conn: &Connection) -> RegistryResult<()> {
        let mut errors = ValidationErrors::new(Self::ENTITY);

        if self.family_income <= Decimal::ZERO {
            errors.add("family_income", "Required field must be greater than zero");
        }
        check_money(&mut errors, "family_income", self.family_income, INCOME_LIMIT);

        // A missing person is reported by the foreign key on write
        if let Some(person) = find::<Person>(conn, self.person_id)? {
            let person_type: Option<PersonType> = find(conn, person.person_type_id)?;
            if !person_type.map_or(false, |t| t.is_owner()) {
                errors.add(
                    "person_id",
                    format!("Person {} does not have the owner person type", self.person_id),
                );
            }
        }

        if exists(
            conn,
            "SELECT 1 FROM owners WHERE person_id = ?1 AND id IS NOT ?2",
            params![self.person_id, self.id],
        )? {
            errors.add(
                "person_id",
                format!("Person {} is already the owner of another family", self.person_id),
            );
        }

        errors.finish()?;

        self.estimated_tax = tax::round_money(self.family_income * estimated_tax_rate());
        Ok(())
    }
}

/// Owner record of a family, reached through its owner-typed person
pub fn owner_of_family(conn: &Connection, family_id: i64) -> RegistryResult<Option<Owner>> {
    let Some(person) = owner_person_of_family(conn, family_id)? else {
        return Ok(None);
    };
    let Some(person_id) = person.id else {
        return Ok(None);
    };

    let owners: Vec<Owner> = list_where(conn, "person_id = ?1", [person_id])?;
    Ok(owners.into_iter().next())
}
