// 🏛️ Registry - The write path every record goes through
//
// save() = clean (rules + derived fields) → INSERT/UPDATE → audit event,
// all inside one SQLite transaction. A failed rule leaves nothing behind.

use crate::db::{get_events_for_entity, insert_event, open_database, setup_database, Event};
use crate::entities::dwelling::{self, DwellingType, BLOQUE_CASA, PARTICULAR};
use crate::entities::house::{self, House};
use crate::entities::owner::{self, Owner};
use crate::entities::person::PersonType;
use crate::entities::tax_payment::{self, TaxPayment};
use crate::record::{self, Record};
use crate::tax::TaxCategory;
use crate::validation::RegistryResult;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_ACTOR: &str = "civic_registry";

/// Tax payments grouped by category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: TaxCategory,
    pub payments: i64,
    pub total_amount: Decimal,
}

pub struct Registry {
    conn: Connection,
    actor: String,
}

impl Registry {
    /// Open a registry database file, creating tables if needed
    pub fn open(path: &Path) -> RegistryResult<Self> {
        Ok(Registry {
            conn: open_database(path)?,
            actor: DEFAULT_ACTOR.to_string(),
        })
    }

    pub fn open_in_memory() -> RegistryResult<Self> {
        let conn = Connection::open_in_memory()?;
        setup_database(&conn)?;
        Ok(Registry {
            conn,
            actor: DEFAULT_ACTOR.to_string(),
        })
    }

    /// Name recorded as the actor of audit events
    pub fn with_actor(mut self, actor: &str) -> Self {
        self.actor = actor.to_string();
        self
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    // ========================================================================
    // WRITE PATH
    // ========================================================================

    /// Validate and persist a record; assigns its id on first save
    pub fn save<R: Record>(&mut self, record: &mut R) -> RegistryResult<i64> {
        let tx = self.conn.transaction()?;

        record.clean(&tx)?;

        let (id, event_type) = match record.id() {
            None => (record::insert(&tx, &*record)?, "created"),
            Some(id) => {
                record::update(&tx, id, &*record)?;
                (id, "updated")
            }
        };

        let mut data = serde_json::to_value(&*record)?;
        data["id"] = serde_json::json!(id);
        insert_event(&tx, &Event::new(event_type, R::ENTITY, id, data, &self.actor))?;

        tx.commit()?;
        record.set_id(id);

        debug!(entity = R::ENTITY, id, event = event_type, "record saved");
        Ok(id)
    }

    /// Delete a record and, through cascades, everything that depends on it
    pub fn delete<R: Record>(&mut self, id: i64) -> RegistryResult<()> {
        let tx = self.conn.transaction()?;

        record::delete::<R>(&tx, id)?;
        insert_event(
            &tx,
            &Event::new("deleted", R::ENTITY, id, serde_json::json!({}), &self.actor),
        )?;

        tx.commit()?;

        debug!(entity = R::ENTITY, id, "record deleted");
        Ok(())
    }

    // ========================================================================
    // READS
    // ========================================================================

    pub fn get<R: Record>(&self, id: i64) -> RegistryResult<R> {
        record::get(&self.conn, id)
    }

    pub fn find<R: Record>(&self, id: i64) -> RegistryResult<Option<R>> {
        record::find(&self.conn, id)
    }

    pub fn list<R: Record>(&self) -> RegistryResult<Vec<R>> {
        record::list(&self.conn)
    }

    pub fn count<R: Record>(&self) -> RegistryResult<i64> {
        record::count::<R>(&self.conn)
    }

    pub fn events_for<R: Record>(&self, id: i64) -> RegistryResult<Vec<Event>> {
        get_events_for_entity(&self.conn, R::ENTITY, id)
    }

    // ========================================================================
    // LOOKUPS ALONG THE HIERARCHY
    // ========================================================================

    pub fn dwelling_type_of(&self, dwelling_id: i64) -> RegistryResult<Option<DwellingType>> {
        dwelling::dwelling_type_of(&self.conn, dwelling_id)
    }

    pub fn owner_of_family(&self, family_id: i64) -> RegistryResult<Option<Owner>> {
        owner::owner_of_family(&self.conn, family_id)
    }

    pub fn house_of_family(&self, family_id: i64) -> RegistryResult<Option<House>> {
        house::house_of_family(&self.conn, family_id)
    }

    pub fn houses_in_dwelling(&self, dwelling_id: i64) -> RegistryResult<Vec<House>> {
        house::houses_in_dwelling(&self.conn, dwelling_id)
    }

    pub fn family_income_for_house(&self, house_id: i64) -> RegistryResult<Option<Decimal>> {
        tax_payment::family_income_for_house(&self.conn, house_id)
    }

    // ========================================================================
    // CATALOGS + REPORTS
    // ========================================================================

    /// Make sure the dwelling and person types the rules depend on exist.
    ///
    /// Returns how many were created; existing descriptions are left alone.
    pub fn seed_catalogs(&mut self) -> RegistryResult<usize> {
        let mut created = 0;

        for description in [PARTICULAR, BLOQUE_CASA] {
            let existing: Vec<DwellingType> =
                record::list_where(&self.conn, "description = ?1", [description])?;
            if existing.is_empty() {
                self.save(&mut DwellingType::new(description))?;
                created += 1;
            }
        }

        let owner_types = self
            .list::<PersonType>()?
            .into_iter()
            .filter(|t| t.is_owner())
            .count();
        if owner_types == 0 {
            self.save(&mut PersonType::new("Owner"))?;
            created += 1;
        }

        Ok(created)
    }

    /// Count and total amount of tax payments per category, A to C
    pub fn tax_summary(&self) -> RegistryResult<Vec<CategoryTotal>> {
        let payments = self.list::<TaxPayment>()?;

        let summary = TaxCategory::all()
            .into_iter()
            .map(|category| {
                let in_category: Vec<&TaxPayment> = payments
                    .iter()
                    .filter(|p| p.category == Some(category))
                    .collect();
                CategoryTotal {
                    category,
                    payments: in_category.len() as i64,
                    total_amount: in_category.iter().map(|p| p.amount).sum(),
                }
            })
            .collect();

        Ok(summary)
    }
}
