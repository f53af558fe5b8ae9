// Civic Registry - Core Library
// Municipal registry records with their write-time rules, for the CLI and tests

pub mod db;
pub mod entities;
pub mod import;
pub mod record;
pub mod registry;
pub mod tax;
pub mod validation;

// Re-export commonly used types
pub use db::{
    Event,
    open_database, setup_database, insert_event, get_events_for_entity, count_events,
};
pub use entities::{
    Region, Municipality, UrbanZone,
    DwellingType, DwellingKind, Dwelling, Occupancy,
    Family, PersonType, Person, Owner,
    House, TaxPayment, PaymentStatus,
};
pub use import::{import_csv, ImportSummary};
pub use record::{Record, Status};
pub use registry::{CategoryTotal, Registry};
pub use tax::{assess, round_money, TaxAssessment, TaxCategory};
pub use validation::{RegistryError, RegistryResult, ValidationError, ValidationErrors};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
