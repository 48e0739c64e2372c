use super::*;

/// Tests booking a free slot.
///
/// Expected: Ok with a pending, unpaid appointment
#[tokio::test]
async fn creates_pending_unpaid_appointment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_appointment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let patient = factory::create_patient(db).await?;
    let (doctor, _) = factory::create_approved_doctor(db).await?;
    let scheduled_at = in_days(2);

    let repo = AppointmentRepository::new(db);
    let appointment = repo
        .create(create_param(patient.id, doctor.id, scheduled_at))
        .await?;

    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.payment_status, PaymentStatus::Unpaid);
    assert_eq!(appointment.mode, AppointmentMode::Online);
    assert_eq!(appointment.scheduled_at, scheduled_at);
    assert!(!appointment.reminder_sent);

    Ok(())
}

/// Tests booking a slot that overlaps an active appointment of the same doctor.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn rejects_overlapping_slot() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_appointment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let patient = factory::create_patient(db).await?;
    let other = factory::create_patient(db).await?;
    let (doctor, _) = factory::create_approved_doctor(db).await?;
    let scheduled_at = in_days(2);

    let repo = AppointmentRepository::new(db);
    repo.create(create_param(patient.id, doctor.id, scheduled_at))
        .await?;

    let same = repo
        .create(create_param(other.id, doctor.id, scheduled_at))
        .await;
    let overlapping = repo
        .create(create_param(
            other.id,
            doctor.id,
            scheduled_at + Duration::minutes(15),
        ))
        .await;

    assert!(matches!(same, Err(AppError::Conflict(_))));
    assert!(matches!(overlapping, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests booking the slot directly after an existing appointment.
///
/// Expected: Ok since the slots touch but do not overlap
#[tokio::test]
async fn allows_adjacent_slot() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_appointment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let patient = factory::create_patient(db).await?;
    let (doctor, _) = factory::create_approved_doctor(db).await?;
    let scheduled_at = in_days(2);

    let repo = AppointmentRepository::new(db);
    repo.create(create_param(patient.id, doctor.id, scheduled_at))
        .await?;
    let next = repo
        .create(create_param(
            patient.id,
            doctor.id,
            scheduled_at + Duration::minutes(30),
        ))
        .await;

    assert!(next.is_ok());

    Ok(())
}

/// Tests that cancelled appointments and other doctors do not block a slot.
///
/// Expected: Ok for both bookings
#[tokio::test]
async fn ignores_cancelled_and_other_doctors() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_appointment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let patient = factory::create_patient(db).await?;
    let (doctor, _) = factory::create_approved_doctor(db).await?;
    let (other_doctor, _) = factory::create_approved_doctor(db).await?;
    let scheduled_at = in_days(3);

    factory::appointment::AppointmentFactory::new(db, patient.id, doctor.id)
        .scheduled_at(scheduled_at)
        .status("cancelled")
        .build()
        .await?;
    factory::appointment::AppointmentFactory::new(db, patient.id, other_doctor.id)
        .scheduled_at(scheduled_at)
        .build()
        .await?;

    let repo = AppointmentRepository::new(db);
    let result = repo
        .create(create_param(patient.id, doctor.id, scheduled_at))
        .await;

    assert!(result.is_ok());

    Ok(())
}
