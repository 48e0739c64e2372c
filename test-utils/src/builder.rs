use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, DoctorProfile};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(DoctorProfile)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables with foreign keys should be added after their referenced
    /// tables.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the user and doctor tables.
    ///
    /// Adds, in dependency order:
    /// - User
    /// - DoctorProfile
    /// - DoctorAvailability
    pub fn with_doctor_tables(self) -> Self {
        self.with_table(User)
            .with_table(DoctorProfile)
            .with_table(DoctorAvailability)
    }

    /// Adds every table required for appointment operations.
    ///
    /// Equivalent to `with_doctor_tables()` followed by `with_table(Appointment)`.
    pub fn with_appointment_tables(self) -> Self {
        self.with_doctor_tables().with_table(Appointment)
    }

    /// Adds every table in the schema.
    ///
    /// Use this when testing functionality that spans prescriptions, feedback,
    /// medical history or reminders.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new()
    ///     .with_all_tables()
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_all_tables(self) -> Self {
        self.with_appointment_tables()
            .with_table(Prescription)
            .with_table(PrescriptionMedicine)
            .with_table(MedicalHistory)
            .with_table(Feedback)
            .with_table(MedicineReminder)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
