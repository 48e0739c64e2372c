//! Doctor profile data repository.
//!
//! Profiles are keyed by the doctor's user ID. Availability windows are stored as
//! separate rows and always replaced as a whole together with the profile.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::{
    error::AppError,
    model::doctor::{Availability, DoctorProfile, DoctorStatus, UpsertDoctorProfileParam},
    util::time::format_time,
};

pub struct DoctorRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DoctorRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates or updates a doctor's profile and replaces their availability.
    ///
    /// New profiles start as `pending`; updating an existing profile keeps its status.
    /// Profile and availability are written in one transaction.
    ///
    /// # Returns
    /// - `Ok(DoctorProfile)` - The stored profile
    /// - `Err(AppError)` - Database error during write
    pub async fn upsert_profile(
        &self,
        param: UpsertDoctorProfileParam,
    ) -> Result<DoctorProfile, AppError> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let existing = entity::prelude::DoctorProfile::find()
            .filter(entity::doctor_profile::Column::UserId.eq(param.user_id))
            .one(&txn)
            .await?;

        let entity = match existing {
            Some(existing) => {
                let mut active: entity::doctor_profile::ActiveModel = existing.into();
                active.specialization = ActiveValue::Set(param.specialization);
                active.qualification = ActiveValue::Set(param.qualification);
                active.experience_years = ActiveValue::Set(param.experience_years);
                active.fee = ActiveValue::Set(param.fee);
                active.about = ActiveValue::Set(param.about);
                active.clinic_address = ActiveValue::Set(param.clinic_address);
                active.slot_minutes = ActiveValue::Set(param.slot_minutes);
                active.updated_at = ActiveValue::Set(now);
                active.update(&txn).await?
            }
            None => {
                entity::doctor_profile::ActiveModel {
                    user_id: ActiveValue::Set(param.user_id),
                    specialization: ActiveValue::Set(param.specialization),
                    qualification: ActiveValue::Set(param.qualification),
                    experience_years: ActiveValue::Set(param.experience_years),
                    fee: ActiveValue::Set(param.fee),
                    about: ActiveValue::Set(param.about),
                    clinic_address: ActiveValue::Set(param.clinic_address),
                    slot_minutes: ActiveValue::Set(param.slot_minutes),
                    status: ActiveValue::Set(DoctorStatus::Pending.to_string()),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        entity::prelude::DoctorAvailability::delete_many()
            .filter(entity::doctor_availability::Column::DoctorId.eq(param.user_id))
            .exec(&txn)
            .await?;

        for window in param.availability {
            entity::doctor_availability::ActiveModel {
                doctor_id: ActiveValue::Set(param.user_id),
                weekday: ActiveValue::Set(window.weekday),
                start_time: ActiveValue::Set(format_time(window.start_time)),
                end_time: ActiveValue::Set(format_time(window.end_time)),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        DoctorProfile::from_entity(entity)
    }

    /// Finds the profile belonging to a doctor user.
    ///
    /// # Returns
    /// - `Ok(Some(DoctorProfile))` - Profile found
    /// - `Ok(None)` - The user has not created a profile
    pub async fn find_by_user_id(&self, user_id: i32) -> Result<Option<DoctorProfile>, AppError> {
        let entity = entity::prelude::DoctorProfile::find()
            .filter(entity::doctor_profile::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        entity.map(DoctorProfile::from_entity).transpose()
    }

    /// Gets a doctor's availability windows ordered by weekday then start time.
    pub async fn get_availability(&self, doctor_id: i32) -> Result<Vec<Availability>, AppError> {
        entity::prelude::DoctorAvailability::find()
            .filter(entity::doctor_availability::Column::DoctorId.eq(doctor_id))
            .order_by_asc(entity::doctor_availability::Column::Weekday)
            .order_by_asc(entity::doctor_availability::Column::StartTime)
            .all(self.db)
            .await?
            .into_iter()
            .map(Availability::from_entity)
            .collect()
    }

    /// Gets approved profiles with pagination.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of profiles per page
    /// - `specialization` - Optional substring filter on specialization
    ///
    /// # Returns
    /// - `Ok((profiles, total))` - Profiles for the requested page and total match count
    pub async fn get_approved_paginated(
        &self,
        page: u64,
        per_page: u64,
        specialization: Option<&str>,
    ) -> Result<(Vec<DoctorProfile>, u64), AppError> {
        let mut query = entity::prelude::DoctorProfile::find()
            .filter(entity::doctor_profile::Column::Status.eq(DoctorStatus::Approved.as_str()))
            .order_by_asc(entity::doctor_profile::Column::Id);
        if let Some(specialization) = specialization {
            // LIKE is case-insensitive for ASCII in SQLite
            query = query.filter(entity::doctor_profile::Column::Specialization.contains(specialization));
        }

        let paginator = query.paginate(self.db, per_page);
        let total = paginator.num_items().await?;
        let profiles = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(DoctorProfile::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((profiles, total))
    }

    /// Gets every profile in a given review state, oldest first.
    pub async fn get_by_status(&self, status: DoctorStatus) -> Result<Vec<DoctorProfile>, AppError> {
        entity::prelude::DoctorProfile::find()
            .filter(entity::doctor_profile::Column::Status.eq(status.as_str()))
            .order_by_asc(entity::doctor_profile::Column::CreatedAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(DoctorProfile::from_entity)
            .collect()
    }

    /// Sets the review status of a doctor's profile.
    ///
    /// # Returns
    /// - `Ok(Some(DoctorProfile))` - The updated profile
    /// - `Ok(None)` - The doctor has no profile
    pub async fn set_status(
        &self,
        user_id: i32,
        status: DoctorStatus,
    ) -> Result<Option<DoctorProfile>, AppError> {
        let Some(entity) = entity::prelude::DoctorProfile::find()
            .filter(entity::doctor_profile::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::doctor_profile::ActiveModel = entity.into();
        active.status = ActiveValue::Set(status.to_string());
        active.updated_at = ActiveValue::Set(Utc::now());
        let entity = active.update(self.db).await?;

        Ok(Some(DoctorProfile::from_entity(entity)?))
    }

    pub async fn count_by_status(&self, status: DoctorStatus) -> Result<u64, AppError> {
        let count = entity::prelude::DoctorProfile::find()
            .filter(entity::doctor_profile::Column::Status.eq(status.as_str()))
            .count(self.db)
            .await?;

        Ok(count)
    }
}
