//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to keep the data layer separate from business logic. Multi-row writes
//! that must stay consistent run inside a single transaction.

pub mod appointment;
pub mod doctor;
pub mod feedback;
pub mod medical_history;
pub mod prescription;
pub mod reminder;
pub mod user;

#[cfg(test)]
mod test;
