//! Feedback data repository.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::feedback::{CreateFeedbackParam, Feedback},
};

pub struct FeedbackRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FeedbackRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a visible feedback entry.
    ///
    /// # Returns
    /// - `Ok(Feedback)` - The created feedback
    /// - `Err(AppError::DbErr)` - Database error, including duplicate feedback for the
    ///   same appointment
    pub async fn create(&self, param: CreateFeedbackParam) -> Result<Feedback, AppError> {
        let entity = entity::feedback::ActiveModel {
            appointment_id: ActiveValue::Set(param.appointment_id),
            patient_id: ActiveValue::Set(param.patient_id),
            doctor_id: ActiveValue::Set(param.doctor_id),
            rating: ActiveValue::Set(param.rating),
            comment: ActiveValue::Set(param.comment),
            hidden: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Feedback::from_entity(entity))
    }

    pub async fn exists_for_appointment(&self, appointment_id: i32) -> Result<bool, AppError> {
        let count = entity::prelude::Feedback::find()
            .filter(entity::feedback::Column::AppointmentId.eq(appointment_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets a doctor's visible feedback, newest first.
    pub async fn get_visible_by_doctor(&self, doctor_id: i32) -> Result<Vec<Feedback>, AppError> {
        let entities = entity::prelude::Feedback::find()
            .filter(entity::feedback::Column::DoctorId.eq(doctor_id))
            .filter(entity::feedback::Column::Hidden.eq(false))
            .order_by_desc(entity::feedback::Column::CreatedAt)
            .order_by_desc(entity::feedback::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Feedback::from_entity).collect())
    }

    /// Gets visible ratings grouped by doctor for the given doctors.
    ///
    /// Doctors without visible feedback are absent from the returned map.
    pub async fn get_visible_ratings(
        &self,
        doctor_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<i32>>, AppError> {
        if doctor_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let entities = entity::prelude::Feedback::find()
            .filter(entity::feedback::Column::DoctorId.is_in(doctor_ids.to_vec()))
            .filter(entity::feedback::Column::Hidden.eq(false))
            .all(self.db)
            .await?;

        let mut ratings: HashMap<i32, Vec<i32>> = HashMap::new();
        for feedback in entities {
            ratings
                .entry(feedback.doctor_id)
                .or_default()
                .push(feedback.rating);
        }

        Ok(ratings)
    }

    /// Gets all feedback including hidden entries, newest first.
    ///
    /// # Returns
    /// - `Ok((feedback, total))` - Feedback for the page and total count
    pub async fn get_all_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Feedback>, u64), AppError> {
        let paginator = entity::prelude::Feedback::find()
            .order_by_desc(entity::feedback::Column::CreatedAt)
            .order_by_desc(entity::feedback::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let feedback = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Feedback::from_entity)
            .collect();

        Ok((feedback, total))
    }

    /// Hides or unhides a feedback entry.
    ///
    /// # Returns
    /// - `Ok(Some(Feedback))` - The updated feedback
    /// - `Ok(None)` - No feedback with that ID
    pub async fn set_hidden(&self, id: i32, hidden: bool) -> Result<Option<Feedback>, AppError> {
        let Some(entity) = entity::prelude::Feedback::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::feedback::ActiveModel = entity.into();
        active.hidden = ActiveValue::Set(hidden);
        let entity = active.update(self.db).await?;

        Ok(Some(Feedback::from_entity(entity)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Feedback::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
