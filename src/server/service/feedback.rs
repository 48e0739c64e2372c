//! Patient feedback on completed appointments and its moderation.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{appointment::AppointmentRepository, feedback::FeedbackRepository},
    error::{auth::AuthError, AppError},
    model::{
        appointment::AppointmentStatus,
        feedback::{CreateFeedbackParam, DoctorFeedback, Feedback, PaginatedFeedback},
        total_pages,
    },
};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

pub struct FeedbackService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FeedbackService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Leaves feedback on the patient's own completed appointment.
    ///
    /// # Returns
    /// - `Ok(Feedback)` - Stored feedback
    /// - `Err(AppError::NotFound)` - Unknown appointment
    /// - `Err(AppError::AuthErr(AccessDenied))` - Appointment of another patient
    /// - `Err(AppError::BadRequest)` - Not completed, rating out of range or already reviewed
    pub async fn create(
        &self,
        patient_id: i32,
        appointment_id: i32,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Feedback, AppError> {
        let appointment = AppointmentRepository::new(self.db)
            .find_by_id(appointment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

        if appointment.patient_id != patient_id {
            return Err(AuthError::AccessDenied(
                patient_id,
                format!("attempted to review appointment {} of another patient", appointment_id),
            )
            .into());
        }
        if appointment.status != AppointmentStatus::Completed {
            return Err(AppError::BadRequest(
                "Feedback can only be left for completed appointments".to_string(),
            ));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::BadRequest(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let repo = FeedbackRepository::new(self.db);
        if repo.exists_for_appointment(appointment_id).await? {
            return Err(AppError::BadRequest(
                "Feedback was already left for this appointment".to_string(),
            ));
        }

        let feedback = repo
            .create(CreateFeedbackParam {
                appointment_id,
                patient_id,
                doctor_id: appointment.doctor_id,
                rating,
                comment: comment
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty()),
            })
            .await?;

        tracing::info!(
            "Patient {} rated doctor {} with {}",
            patient_id,
            feedback.doctor_id,
            rating
        );

        Ok(feedback)
    }

    /// Gets a doctor's visible feedback, newest first.
    pub async fn get_for_doctor(&self, doctor_id: i32) -> Result<DoctorFeedback, AppError> {
        let feedback = FeedbackRepository::new(self.db)
            .get_visible_by_doctor(doctor_id)
            .await?;

        Ok(DoctorFeedback {
            doctor_id,
            feedback,
        })
    }

    /// Gets all feedback, including hidden entries.
    pub async fn get_all(&self, page: u64, per_page: u64) -> Result<PaginatedFeedback, AppError> {
        let (feedback, total) = FeedbackRepository::new(self.db)
            .get_all_paginated(page, per_page)
            .await?;

        Ok(PaginatedFeedback {
            feedback,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Hides or shows a feedback entry in public listings.
    pub async fn set_hidden(&self, id: i32, hidden: bool) -> Result<Feedback, AppError> {
        let feedback = FeedbackRepository::new(self.db)
            .set_hidden(id, hidden)
            .await?
            .ok_or_else(|| AppError::NotFound("Feedback not found".to_string()))?;

        tracing::info!("Feedback {} hidden={}", id, hidden);

        Ok(feedback)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !FeedbackRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound("Feedback not found".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    /// Tests feedback on a completed appointment.
    ///
    /// Expected: first feedback stored, second rejected
    #[tokio::test]
    async fn accepts_one_feedback_per_appointment() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let patient = factory::create_patient(db).await?;
        let (doctor, _) = factory::create_approved_doctor(db).await?;
        let appointment =
            factory::appointment::create_completed_appointment(db, patient.id, doctor.id).await?;
        let service = FeedbackService::new(db);

        let feedback = service
            .create(patient.id, appointment.id, 5, Some(" Very helpful ".to_string()))
            .await?;
        assert_eq!(feedback.doctor_id, doctor.id);
        assert_eq!(feedback.comment.as_deref(), Some("Very helpful"));

        let result = service.create(patient.id, appointment.id, 4, None).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        Ok(())
    }

    /// Tests feedback preconditions.
    ///
    /// Expected: pending appointment and out-of-range rating rejected
    #[tokio::test]
    async fn rejects_invalid_feedback() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let (patient, doctor, pending) =
            factory::helpers::create_appointment_with_dependencies(db).await?;
        let completed =
            factory::appointment::create_completed_appointment(db, patient.id, doctor.id).await?;
        let service = FeedbackService::new(db);

        let result = service.create(patient.id, pending.id, 5, None).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let result = service.create(patient.id, completed.id, 6, None).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        Ok(())
    }

    /// Tests that hidden feedback leaves the public view.
    ///
    /// Expected: average recomputed over visible feedback only
    #[tokio::test]
    async fn hidden_feedback_is_excluded() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let patient = factory::create_patient(db).await?;
        let (doctor, _) = factory::create_approved_doctor(db).await?;
        let first =
            factory::appointment::create_completed_appointment(db, patient.id, doctor.id).await?;
        let second =
            factory::appointment::create_completed_appointment(db, patient.id, doctor.id).await?;
        factory::feedback::create_feedback(db, &first, 5).await?;
        let low = factory::feedback::create_feedback(db, &second, 1).await?;
        let service = FeedbackService::new(db);

        assert_eq!(service.get_for_doctor(doctor.id).await?.average_rating(), Some(3.0));

        service.set_hidden(low.id, true).await?;

        let visible = service.get_for_doctor(doctor.id).await?;
        assert_eq!(visible.feedback.len(), 1);
        assert_eq!(visible.average_rating(), Some(5.0));
        assert_eq!(service.get_all(0, 10).await?.total, 2);

        Ok(())
    }
}
