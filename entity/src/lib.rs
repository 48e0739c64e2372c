//! SeaORM entity definitions for the DocXpress database schema.
//!
//! Each module mirrors one table created by the `migration` crate. Enum-like
//! columns (roles, statuses, modes) are stored as lowercase strings and parsed
//! into typed enums by the application at the repository boundary.

pub mod prelude;

pub mod appointment;
pub mod doctor_availability;
pub mod doctor_profile;
pub mod feedback;
pub mod medical_history;
pub mod medicine_reminder;
pub mod prescription;
pub mod prescription_medicine;
pub mod user;
