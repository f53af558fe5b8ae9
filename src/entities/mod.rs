// Registry entities: geography, dwellings, households, houses and taxes

pub mod dwelling;
pub mod family;
pub mod house;
pub mod municipality;
pub mod owner;
pub mod person;
pub mod region;
pub mod tax_payment;
pub mod urban_zone;

pub use dwelling::{Dwelling, DwellingKind, DwellingType, Occupancy};
pub use family::Family;
pub use house::House;
pub use municipality::Municipality;
pub use owner::Owner;
pub use person::{Person, PersonType};
pub use region::Region;
pub use tax_payment::{PaymentStatus, TaxPayment};
pub use urban_zone::UrbanZone;
