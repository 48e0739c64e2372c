//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Each entity has its own factory module with both a
//! `Factory` struct for customization and a `create_*` convenience function for quick
//! default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let patient = factory::user::create_patient(&db).await?;
//!
//!     // Create with all dependencies
//!     let (patient, doctor, appointment) =
//!         factory::helpers::create_appointment_with_dependencies(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let admin = factory::user::UserFactory::new(&db)
//!     .email("admin@example.com")
//!     .role("admin")
//!     .build()
//!     .await?;
//! ```

pub mod appointment;
pub mod doctor;
pub mod feedback;
pub mod helpers;
pub mod medical_history;
pub mod medicine_reminder;
pub mod prescription;
pub mod user;

pub use appointment::create_appointment;
pub use doctor::create_approved_doctor;
pub use user::{create_admin, create_patient, create_user};
