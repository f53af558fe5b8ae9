use crate::validation::RegistryResult;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Event for audit trail: every write to the registry leaves one behind
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Event {
    pub event_id: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub entity_type: String,
    pub entity_id: i64,
    pub data: serde_json::Value,
    pub actor: String,
}

impl Event {
    pub fn new(
        event_type: &str,
        entity_type: &str,
        entity_id: i64,
        data: serde_json::Value,
        actor: &str,
    ) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event_type: event_type.to_string(),
            entity_type: entity_type.to_string(),
            entity_id,
            data,
            actor: actor.to_string(),
        }
    }
}

/// Open (or create) a registry database file with WAL and foreign keys on
pub fn open_database(path: &Path) -> RegistryResult<Connection> {
    let conn = Connection::open(path)?;
    // WAL for crash recovery
    let _mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    setup_database(&conn)?;
    Ok(conn)
}

pub fn setup_database(conn: &Connection) -> RegistryResult<()> {
    // Cascades below only fire with this on, and it is per-connection
    conn.pragma_update(None, "foreign_keys", "ON")?;

    // ==========================================================================
    // Geography: Region → Municipality → Urban Zone
    // ==========================================================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS regions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            status TEXT NOT NULL DEFAULT 'A'
        );

        CREATE TABLE IF NOT EXISTS municipalities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            annual_budget TEXT NOT NULL DEFAULT '0',
            dwelling_count INTEGER NOT NULL DEFAULT 0,
            region_id INTEGER NOT NULL REFERENCES regions(id) ON DELETE CASCADE,
            status TEXT NOT NULL DEFAULT 'A'
        );

        CREATE TABLE IF NOT EXISTS urban_zones (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            municipality_id INTEGER NOT NULL REFERENCES municipalities(id) ON DELETE CASCADE,
            status TEXT NOT NULL DEFAULT 'A'
        );",
    )?;

    // ==========================================================================
    // Dwellings
    // ==========================================================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS dwelling_types (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL UNIQUE,
            status TEXT NOT NULL DEFAULT 'A'
        );

        CREATE TABLE IF NOT EXISTS dwellings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            street TEXT NOT NULL,
            number INTEGER NOT NULL,
            postal_code INTEGER NOT NULL,
            occupied TEXT NOT NULL DEFAULT 'N',
            urban_zone_id INTEGER NOT NULL REFERENCES urban_zones(id) ON DELETE CASCADE,
            dwelling_type_id INTEGER NOT NULL REFERENCES dwelling_types(id) ON DELETE CASCADE,
            status TEXT NOT NULL DEFAULT 'A',
            UNIQUE (street, number)
        );",
    )?;

    // ==========================================================================
    // Households: Family, Person Type, Person, Owner
    // ==========================================================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS families (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            member_count INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'A'
        );

        CREATE TABLE IF NOT EXISTS person_types (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL UNIQUE,
            status TEXT NOT NULL DEFAULT 'A'
        );

        CREATE TABLE IF NOT EXISTS persons (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            family_id INTEGER NOT NULL REFERENCES families(id) ON DELETE CASCADE,
            person_type_id INTEGER NOT NULL REFERENCES person_types(id) ON DELETE CASCADE,
            status TEXT NOT NULL DEFAULT 'A'
        );

        CREATE TABLE IF NOT EXISTS owners (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            family_income TEXT NOT NULL,
            estimated_tax TEXT NOT NULL,
            person_id INTEGER NOT NULL UNIQUE REFERENCES persons(id) ON DELETE CASCADE,
            status TEXT NOT NULL DEFAULT 'A'
        );",
    )?;

    // ==========================================================================
    // Houses + Tax Payments
    // NULL sub-fields never collide in UNIQUE (stair, block, floor, door)
    // ==========================================================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS houses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            stair TEXT,
            block TEXT,
            floor TEXT,
            door TEXT,
            area TEXT NOT NULL,
            dwelling_id INTEGER NOT NULL REFERENCES dwellings(id) ON DELETE CASCADE,
            family_id INTEGER NOT NULL UNIQUE REFERENCES families(id) ON DELETE CASCADE,
            status TEXT NOT NULL DEFAULT 'A',
            UNIQUE (stair, block, floor, door)
        );

        CREATE TABLE IF NOT EXISTS tax_payments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            issued_on TEXT,
            family_income TEXT NOT NULL,
            category TEXT NOT NULL,
            amount TEXT NOT NULL,
            payment_status TEXT NOT NULL,
            house_id INTEGER NOT NULL UNIQUE REFERENCES houses(id) ON DELETE CASCADE
        );",
    )?;

    // ==========================================================================
    // Events Table (audit trail)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id TEXT UNIQUE NOT NULL,
            timestamp TEXT NOT NULL,
            event_type TEXT NOT NULL,
            entity_type TEXT NOT NULL,
            entity_id INTEGER NOT NULL,
            data TEXT NOT NULL,
            actor TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    // ==========================================================================
    // Indexes
    // ==========================================================================
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_persons_family ON persons(family_id);
        CREATE INDEX IF NOT EXISTS idx_houses_dwelling ON houses(dwelling_id);
        CREATE INDEX IF NOT EXISTS idx_events_entity ON events(entity_type, entity_id);
        CREATE INDEX IF NOT EXISTS idx_events_timestamp ON events(timestamp);",
    )?;

    Ok(())
}

/// Insert event into audit trail
pub fn insert_event(conn: &Connection, event: &Event) -> RegistryResult<()> {
    let data_json = serde_json::to_string(&event.data)?;

    conn.execute(
        "INSERT INTO events (
            event_id, timestamp, event_type, entity_type, entity_id, data, actor
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            event.event_id,
            event.timestamp.to_rfc3339(),
            event.event_type,
            event.entity_type,
            event.entity_id,
            data_json,
            event.actor,
        ],
    )?;

    Ok(())
}

/// Get events for a specific entity, newest first
pub fn get_events_for_entity(
    conn: &Connection,
    entity_type: &str,
    entity_id: i64,
) -> RegistryResult<Vec<Event>> {
    let mut stmt = conn.prepare(
        "SELECT event_id, timestamp, event_type, entity_type, entity_id, data, actor
         FROM events
         WHERE entity_type = ?1 AND entity_id = ?2
         ORDER BY id DESC",
    )?;

    let events = stmt
        .query_map(params![entity_type, entity_id], |row| {
            let timestamp_str: String = row.get(1)?;
            let data_json: String = row.get(5)?;

            Ok(Event {
                event_id: row.get(0)?,
                timestamp: DateTime::parse_from_rfc3339(&timestamp_str)
                    .map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e))
                    })?
                    .with_timezone(&Utc),
                event_type: row.get(2)?,
                entity_type: row.get(3)?,
                entity_id: row.get(4)?,
                data: serde_json::from_str(&data_json).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
                })?,
                actor: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(events)
}

pub fn count_events(conn: &Connection) -> RegistryResult<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;

    Ok(count)
}
