//! Appointment payment through checkout sessions.
//!
//! Starting a checkout stores a random session ID on the appointment. The payment is only
//! recorded when the same session ID is echoed back, so a client cannot mark an
//! appointment paid without going through checkout first.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::appointment::AppointmentRepository,
    error::{auth::AuthError, AppError},
    model::{
        appointment::{Appointment, AppointmentStatus, CheckoutSession, PaymentStatus},
        user::User,
    },
    util::random::alphanumeric,
};

const SESSION_ID_LENGTH: usize = 24;

pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PaymentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Starts or restarts a checkout for the patient's own unpaid appointment.
    ///
    /// # Returns
    /// - `Ok(CheckoutSession)` - Session ID, amount and hosted checkout URL
    /// - `Err(AppError::BadRequest)` - Appointment cancelled or already paid
    /// - `Err(AppError::AuthErr(AccessDenied))` - Not the actor's appointment
    pub async fn start_checkout(
        &self,
        actor: &User,
        appointment_id: i32,
        checkout_base_url: &str,
    ) -> Result<CheckoutSession, AppError> {
        let appointment = self.find_own(actor, appointment_id).await?;

        if appointment.status == AppointmentStatus::Cancelled {
            return Err(AppError::BadRequest(
                "A cancelled appointment cannot be paid".to_string(),
            ));
        }
        if appointment.payment_status == PaymentStatus::Paid {
            return Err(AppError::BadRequest("Appointment is already paid".to_string()));
        }

        let session_id = alphanumeric(SESSION_ID_LENGTH);
        let appointment = AppointmentRepository::new(self.db)
            .set_checkout_session(appointment_id, session_id.clone())
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

        tracing::info!("Checkout started for appointment {}", appointment_id);

        Ok(CheckoutSession {
            checkout_url: format!("{}/{}", checkout_base_url.trim_end_matches('/'), session_id),
            session_id,
            amount: appointment.fee,
        })
    }

    /// Marks the appointment paid when the session ID matches the stored one.
    ///
    /// # Returns
    /// - `Ok(Appointment)` - Appointment now `paid`
    /// - `Err(AppError::BadRequest)` - Already paid, or the session ID does not match
    pub async fn confirm_payment(
        &self,
        actor: &User,
        appointment_id: i32,
        session_id: &str,
    ) -> Result<Appointment, AppError> {
        let appointment = self.find_own(actor, appointment_id).await?;

        if appointment.payment_status == PaymentStatus::Paid {
            return Err(AppError::BadRequest("Appointment is already paid".to_string()));
        }
        if appointment.checkout_session_id.as_deref() != Some(session_id) {
            tracing::warn!(
                "Payment confirmation for appointment {} with unknown session",
                appointment_id
            );
            return Err(AppError::BadRequest(
                "Checkout session does not match".to_string(),
            ));
        }

        let appointment = AppointmentRepository::new(self.db)
            .mark_paid(appointment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

        tracing::info!("Appointment {} paid", appointment_id);

        Ok(appointment)
    }

    async fn find_own(&self, actor: &User, appointment_id: i32) -> Result<Appointment, AppError> {
        let appointment = AppointmentRepository::new(self.db)
            .find_by_id(appointment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

        if appointment.patient_id != actor.id {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("attempted to pay for appointment {} of another patient", appointment_id),
            )
            .into());
        }

        Ok(appointment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::data::user::UserRepository;
    use test_utils::{builder::TestBuilder, factory};

    /// Tests the full checkout flow.
    ///
    /// Expected: wrong session rejected, matching session marks the appointment paid
    #[tokio::test]
    async fn confirms_matching_session() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let (patient, _, appointment) =
            factory::helpers::create_appointment_with_dependencies(db).await?;
        let patient = UserRepository::new(db).find_by_id(patient.id).await?.unwrap();
        let service = PaymentService::new(db);

        let session = service
            .start_checkout(&patient, appointment.id, "http://pay.test/checkout/")
            .await?;
        assert_eq!(session.amount, appointment.fee);
        assert_eq!(
            session.checkout_url,
            format!("http://pay.test/checkout/{}", session.session_id)
        );

        let result = service
            .confirm_payment(&patient, appointment.id, "not-the-session")
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let paid = service
            .confirm_payment(&patient, appointment.id, &session.session_id)
            .await?;
        assert_eq!(paid.payment_status, PaymentStatus::Paid);

        let result = service
            .confirm_payment(&patient, appointment.id, &session.session_id)
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        Ok(())
    }

    /// Tests starting a second checkout for the same appointment.
    ///
    /// Expected: first session no longer confirms, second one does
    #[tokio::test]
    async fn new_checkout_replaces_session() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let (patient, _, appointment) =
            factory::helpers::create_appointment_with_dependencies(db).await?;
        let patient = UserRepository::new(db).find_by_id(patient.id).await?.unwrap();
        let service = PaymentService::new(db);

        let first = service
            .start_checkout(&patient, appointment.id, "http://pay.test")
            .await?;
        let second = service
            .start_checkout(&patient, appointment.id, "http://pay.test")
            .await?;
        assert_ne!(first.session_id, second.session_id);

        let result = service
            .confirm_payment(&patient, appointment.id, &first.session_id)
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let paid = service
            .confirm_payment(&patient, appointment.id, &second.session_id)
            .await?;
        assert_eq!(paid.payment_status, PaymentStatus::Paid);

        Ok(())
    }

    /// Tests checkout on a cancelled appointment.
    ///
    /// Expected: Err(BadRequest)
    #[tokio::test]
    async fn rejects_checkout_for_cancelled() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let patient = factory::create_patient(db).await?;
        let (doctor, _) = factory::create_approved_doctor(db).await?;
        let appointment = factory::appointment::AppointmentFactory::new(db, patient.id, doctor.id)
            .status("cancelled")
            .build()
            .await?;
        let patient = UserRepository::new(db).find_by_id(patient.id).await?.unwrap();

        let result = PaymentService::new(db)
            .start_checkout(&patient, appointment.id, "http://pay.test")
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));

        Ok(())
    }

    /// Tests confirming without ever starting a checkout.
    ///
    /// Expected: Err(BadRequest)
    #[tokio::test]
    async fn rejects_confirmation_without_checkout() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let (patient, _, appointment) =
            factory::helpers::create_appointment_with_dependencies(db).await?;
        let patient = UserRepository::new(db).find_by_id(patient.id).await?.unwrap();

        let result = PaymentService::new(db)
            .confirm_payment(&patient, appointment.id, "")
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));

        Ok(())
    }

    /// Tests paying for someone else's appointment.
    ///
    /// Expected: Err(AccessDenied)
    #[tokio::test]
    async fn rejects_other_patients() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let (_, _, appointment) =
            factory::helpers::create_appointment_with_dependencies(db).await?;
        let other = factory::create_patient(db).await?;
        let other = UserRepository::new(db).find_by_id(other.id).await?.unwrap();

        let result = PaymentService::new(db)
            .start_checkout(&other, appointment.id, "http://pay.test")
            .await;

        assert!(matches!(result, Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))));

        Ok(())
    }
}
