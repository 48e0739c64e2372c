use super::*;

/// Tests moving a confirmed appointment to a new time.
///
/// Verifies that the appointment's own slot does not count as a conflict and that the
/// status and reminder flag are reset.
///
/// Expected: Ok(Some) with pending status and reminder_sent cleared
#[tokio::test]
async fn reschedules_and_resets_status() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_appointment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let patient = factory::create_patient(db).await?;
    let (doctor, _) = factory::create_approved_doctor(db).await?;
    let original = in_days(2);
    let appointment = factory::appointment::AppointmentFactory::new(db, patient.id, doctor.id)
        .scheduled_at(original)
        .status("confirmed")
        .reminder_sent(true)
        .build()
        .await?;

    let repo = AppointmentRepository::new(db);
    let new_time = original + Duration::minutes(10);
    let rescheduled = repo
        .reschedule(RescheduleAppointmentParam {
            appointment_id: appointment.id,
            doctor_id: doctor.id,
            scheduled_at: new_time,
            slot_minutes: 30,
        })
        .await?
        .unwrap();

    assert_eq!(rescheduled.scheduled_at, new_time);
    assert_eq!(rescheduled.status, AppointmentStatus::Pending);
    assert!(!rescheduled.reminder_sent);

    Ok(())
}

/// Tests moving an appointment onto another patient's slot.
///
/// Expected: Err(Conflict) and the appointment keeps its original time
#[tokio::test]
async fn rejects_taken_slot() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_appointment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let patient = factory::create_patient(db).await?;
    let other = factory::create_patient(db).await?;
    let (doctor, _) = factory::create_approved_doctor(db).await?;
    let original = in_days(2);
    let taken = in_days(4);

    let appointment = factory::appointment::AppointmentFactory::new(db, patient.id, doctor.id)
        .scheduled_at(original)
        .build()
        .await?;
    factory::appointment::AppointmentFactory::new(db, other.id, doctor.id)
        .scheduled_at(taken)
        .status("confirmed")
        .build()
        .await?;

    let repo = AppointmentRepository::new(db);
    let result = repo
        .reschedule(RescheduleAppointmentParam {
            appointment_id: appointment.id,
            doctor_id: doctor.id,
            scheduled_at: taken,
            slot_minutes: 30,
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    let stored = repo.find_by_id(appointment.id).await?.unwrap();
    assert_eq!(stored.scheduled_at, original);

    Ok(())
}
