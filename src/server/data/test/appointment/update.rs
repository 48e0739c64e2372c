use super::*;

/// Tests the single-column appointment updates.
///
/// Expected: Ok(Some) with status, checkout session and payment state written
#[tokio::test]
async fn updates_status_and_payment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_appointment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_patient, _doctor, appointment) =
        factory::helpers::create_appointment_with_dependencies(db).await?;

    let repo = AppointmentRepository::new(db);

    let confirmed = repo
        .update_status(appointment.id, AppointmentStatus::Confirmed)
        .await?
        .unwrap();
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

    let with_session = repo
        .set_checkout_session(appointment.id, "cs_test".to_string())
        .await?
        .unwrap();
    assert_eq!(with_session.checkout_session_id, Some("cs_test".to_string()));
    assert_eq!(with_session.payment_status, PaymentStatus::Unpaid);

    let paid = repo.mark_paid(appointment.id).await?.unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::Paid);

    Ok(())
}

/// Tests updating and deleting an appointment that does not exist.
///
/// Expected: Ok(None) and Ok(false)
#[tokio::test]
async fn handles_unknown_appointment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_appointment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AppointmentRepository::new(db);

    assert!(repo
        .update_status(999, AppointmentStatus::Cancelled)
        .await?
        .is_none());
    assert!(!repo.delete(999).await?);

    Ok(())
}
