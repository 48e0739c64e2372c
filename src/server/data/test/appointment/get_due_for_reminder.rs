use super::*;

/// Tests selecting appointments for the 24 hour reminder.
///
/// Verifies that only active appointments inside the window without a sent reminder
/// are returned.
///
/// Expected: Ok with the single eligible appointment
#[tokio::test]
async fn selects_unreminded_appointments_in_window() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_appointment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let patient = factory::create_patient(db).await?;
    let (doctor, _) = factory::create_approved_doctor(db).await?;
    let now = Utc::now();

    let due = factory::appointment::AppointmentFactory::new(db, patient.id, doctor.id)
        .scheduled_at(now + Duration::hours(5))
        .status("confirmed")
        .build()
        .await?;
    factory::appointment::AppointmentFactory::new(db, patient.id, doctor.id)
        .scheduled_at(now + Duration::hours(6))
        .reminder_sent(true)
        .build()
        .await?;
    factory::appointment::AppointmentFactory::new(db, patient.id, doctor.id)
        .scheduled_at(now + Duration::hours(7))
        .status("cancelled")
        .build()
        .await?;
    factory::appointment::AppointmentFactory::new(db, patient.id, doctor.id)
        .scheduled_at(now + Duration::hours(30))
        .build()
        .await?;

    let repo = AppointmentRepository::new(db);
    let appointments = repo
        .get_due_for_reminder(now, now + Duration::hours(24))
        .await?;

    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].id, due.id);

    repo.mark_reminder_sent(due.id).await?;
    let appointments = repo
        .get_due_for_reminder(now, now + Duration::hours(24))
        .await?;
    assert!(appointments.is_empty());

    Ok(())
}

/// Tests the booked times used for slot generation.
///
/// Expected: Ok with start times of active appointments inside the range only
#[tokio::test]
async fn returns_booked_times_in_range() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_appointment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let patient = factory::create_patient(db).await?;
    let (doctor, _) = factory::create_approved_doctor(db).await?;
    let day = in_days(2);

    factory::appointment::AppointmentFactory::new(db, patient.id, doctor.id)
        .scheduled_at(day)
        .build()
        .await?;
    factory::appointment::AppointmentFactory::new(db, patient.id, doctor.id)
        .scheduled_at(day + Duration::hours(1))
        .status("cancelled")
        .build()
        .await?;
    factory::appointment::AppointmentFactory::new(db, patient.id, doctor.id)
        .scheduled_at(day + Duration::days(2))
        .build()
        .await?;

    let repo = AppointmentRepository::new(db);
    let booked = repo
        .get_booked_times(doctor.id, day - Duration::hours(1), day + Duration::hours(12))
        .await?;

    assert_eq!(booked, vec![day]);

    Ok(())
}
