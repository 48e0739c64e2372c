//! Request and response DTOs exposed by the JSON API.
//!
//! These types define the wire format consumed by the single-page frontend. They carry
//! serde and OpenAPI schema derives only; all business rules live in `server`.

pub mod admin;
pub mod api;
pub mod appointment;
pub mod doctor;
pub mod feedback;
pub mod medical_history;
pub mod prescription;
pub mod reminder;
pub mod user;
