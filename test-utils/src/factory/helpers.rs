//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates an appointment together with its patient and approved doctor.
///
/// This is a convenience method that creates:
/// 1. Patient user
/// 2. Doctor user with an approved profile
/// 3. Pending appointment one day in the future
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((patient, doctor, appointment))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_appointment_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::user::Model,
        entity::appointment::Model,
    ),
    DbErr,
> {
    let patient = crate::factory::user::create_patient(db).await?;
    let (doctor, _profile) = crate::factory::doctor::create_approved_doctor(db).await?;
    let appointment =
        crate::factory::appointment::create_appointment(db, patient.id, doctor.id).await?;

    Ok((patient, doctor, appointment))
}
