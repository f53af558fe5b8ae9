// 🧑 Person Entities - Person types and persons
//
// A family has at most ONE person whose type is the owner type.
// That person is the only one who may hold an Owner record, and keeps the
// owner type for as long as that record exists.

use crate::record::{exists, find, Record, Status};
use crate::validation::{RegistryResult, ValidationErrors};
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

pub const PERSON_TYPE_DESCRIPTION_MAX: usize = 15;
pub const PERSON_NAME_MAX: usize = 15;

/// Descriptions that mark a person type as the owner type
pub const OWNER_TYPE_LABELS: [&str; 2] = ["Owner", "Propietario"];

/// SQL predicate matching owner-type descriptions on alias `t`
const OWNER_TYPE_SQL: &str = "LOWER(TRIM(t.description)) IN ('owner', 'propietario')";

pub fn is_owner_label(description: &str) -> bool {
    let description = description.trim();
    OWNER_TYPE_LABELS
        .iter()
        .any(|label| description.eq_ignore_ascii_case(label))
}

// ============================================================================
// PERSON TYPE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonType {
    #[serde(default)]
    pub id: Option<i64>,

    /// Unique label, e.g. "Owner"
    pub description: String,

    #[serde(default, deserialize_with = "crate::record::empty_as_default")]
    pub status: Status,
}

impl PersonType {
    pub fn new(description: &str) -> Self {
        PersonType {
            id: None,
            description: description.to_string(),
            status: Status::Active,
        }
    }

    pub fn is_owner(&self) -> bool {
        is_owner_label(&self.description)
    }
}

impl Record for PersonType {
    const ENTITY: &'static str = "person_type";
    const TABLE: &'static str = "person_types";
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
        Ok(PersonType {
            id: Some(row.get(0)?),
            description: row.get(1)?,
            status: row.get(2)?,
        })
    }

    /// A rename may turn the type into (or out of) the owner type, so the
    /// persons already using it are checked against the owner rules.
    fn clean(&mut self, conn: &Connection) -> RegistryResult<()> {
        self.description = self.description.trim().to_string();

        let mut errors = ValidationErrors::new(Self::ENTITY);
        errors.require_text("description", &self.description);
        errors.max_len("description", &self.description, PERSON_TYPE_DESCRIPTION_MAX);

        if let Some(id) = self.id {
            if self.is_owner() {
                let sql = format!(
                    "SELECT 1 FROM persons p
                     JOIN person_types t ON t.id = p.person_type_id
                     WHERE p.person_type_id = ?1 OR (t.id <> ?1 AND {})
                     GROUP BY p.family_id
                     HAVING COUNT(*) > 1",
                    OWNER_TYPE_SQL
                );
                if exists(conn, &sql, [id])? {
                    errors.add(
                        "description",
                        "A family would end up with more than one owner-typed person",
                    );
                }
            } else if exists(
                conn,
                "SELECT 1 FROM owners o
                 JOIN persons p ON p.id = o.person_id
                 WHERE p.person_type_id = ?1",
                [id],
            )? {
                errors.add(
                    "description",
                    "Persons of this type hold Owner records, it must stay an owner type",
                );
            }
        }

        errors.finish()
    }
}

// ============================================================================
// PERSON
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub id: Option<i64>,

    pub name: String,
    pub family_id: i64,
    pub person_type_id: i64,

    #[serde(default, deserialize_with = "crate::record::empty_as_default")]
    pub status: Status,
}

impl Person {
    pub fn new(name: &str, family_id: i64, person_type_id: i64) -> Self {
        Person {
            id: None,
            name: name.to_string(),
            family_id,
            person_type_id,
            status: Status::Active,
        }
    }
}

impl Record for Person {
    const ENTITY: &'static str = "person";
    const TABLE: &'static str = "persons";
    const COLUMNS: &'static [&'static str] = &["name", "family_id", "person_type_id", "status"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Integer(self.family_id),
            Value::Integer(self.person_type_id),
            self.status.into(),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Person {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            family_id: row.get(2)?,
            person_type_id: row.get(3)?,
            status: row.get(4)?,
        })
    }

    fn clean(&mut self, conn: &Connection) -> RegistryResult<()> {
        self.name = self.name.trim().to_string();

        let mut errors = ValidationErrors::new(Self::ENTITY);
        errors.require_text("name", &self.name);
        errors.max_len("name", &self.name, PERSON_NAME_MAX);

        // A missing person type is reported by the foreign key on write
        let person_type: Option<PersonType> = find(conn, self.person_type_id)?;
        let owner_typed = person_type.as_ref().map_or(false, PersonType::is_owner);
        if owner_typed && family_has_other_owner(conn, self.family_id, self.id)? {
            errors.add(
                "person_type_id",
                format!("Family {} already has an owner", self.family_id),
            );
        }
        if let (false, Some(id)) = (owner_typed, self.id) {
            if exists(conn, "SELECT 1 FROM owners WHERE person_id = ?1", [id])? {
                errors.add(
                    "person_type_id",
                    format!("Person {} holds an Owner record and must keep the owner type", id),
                );
            }
        }

        errors.finish()
    }
}

/// Is there an owner-typed person in `family_id` other than `exclude`?
pub fn family_has_other_owner(
    conn: &Connection,
    family_id: i64,
    exclude: Option<i64>,
) -> RegistryResult<bool> {
    let sql = format!(
        "SELECT 1 FROM persons p
         JOIN person_types t ON t.id = p.person_type_id
         WHERE p.family_id = ?1 AND p.id IS NOT ?2 AND {}",
        OWNER_TYPE_SQL
    );
    exists(conn, &sql, params![family_id, exclude])
}

/// The owner-typed person of a family, if any
pub fn owner_person_of_family(conn: &Connection, family_id: i64) -> RegistryResult<Option<Person>> {
    let sql = format!(
        "SELECT p.id, p.name, p.family_id, p.person_type_id, p.status
         FROM persons p
         JOIN person_types t ON t.id = p.person_type_id
         WHERE p.family_id = ?1 AND {}
         ORDER BY p.id
         LIMIT 1",
        OWNER_TYPE_SQL
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map([family_id], |row| Person::from_row(row))?;
    Ok(rows.next().transpose()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_labels() {
        assert!(is_owner_label("Owner"));
        assert!(is_owner_label("propietario"));
        assert!(is_owner_label(" PROPIETARIO "));
        assert!(!is_owner_label("Inquilino"));
        assert!(PersonType::new("Owner").is_owner());
        assert!(!PersonType::new("Tenant").is_owner());
    }

    #[test]
    fn test_person_name_required() {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::setup_database(&conn).unwrap();

        let err = Person::new("   ", 1, 1).clean(&conn).unwrap_err();
        assert!(err.validation().unwrap().has_field("name"));
    }
}
