pub mod admin;
pub mod appointment;
pub mod auth;
pub mod doctor;
pub mod feedback;
pub mod health;
pub mod medical_history;
pub mod param;
pub mod prescription;
pub mod reminder;
pub mod user;
