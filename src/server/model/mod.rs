//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary, where string columns are parsed into typed enums,
//! and transformed to DTOs at the controller boundary.

pub mod admin;
pub mod appointment;
pub mod doctor;
pub mod feedback;
pub mod medical_history;
pub mod prescription;
pub mod reminder;
pub mod user;

/// Number of pages needed to hold `total` items at `per_page` items per page.
pub fn total_pages(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}
