use super::*;

/// Tests listing a patient's appointments.
///
/// Verifies chronological ordering, that other patients' appointments are excluded and
/// that the status filter applies.
///
/// Expected: Ok with own appointments ordered by scheduled time
#[tokio::test]
async fn lists_patient_appointments_in_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_appointment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let patient = factory::create_patient(db).await?;
    let other = factory::create_patient(db).await?;
    let (doctor, _) = factory::create_approved_doctor(db).await?;

    let later = factory::appointment::AppointmentFactory::new(db, patient.id, doctor.id)
        .scheduled_at(in_days(5))
        .status("confirmed")
        .build()
        .await?;
    let sooner = factory::appointment::AppointmentFactory::new(db, patient.id, doctor.id)
        .scheduled_at(in_days(1))
        .build()
        .await?;
    factory::appointment::AppointmentFactory::new(db, other.id, doctor.id)
        .scheduled_at(in_days(3))
        .build()
        .await?;

    let repo = AppointmentRepository::new(db);
    let appointments = repo.get_by_patient(patient.id, None).await?;
    let ids: Vec<i32> = appointments.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![sooner.id, later.id]);

    let confirmed = repo
        .get_by_patient(patient.id, Some(AppointmentStatus::Confirmed))
        .await?;
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].id, later.id);

    let doctor_view = repo.get_by_doctor(doctor.id, None).await?;
    assert_eq!(doctor_view.len(), 3);

    Ok(())
}

/// Tests the shared appointment check used for history access.
///
/// Expected: true only for a doctor and patient with an appointment together
#[tokio::test]
async fn detects_shared_appointment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_appointment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (patient, doctor, _) = factory::helpers::create_appointment_with_dependencies(db).await?;
    let stranger = factory::create_patient(db).await?;

    let repo = AppointmentRepository::new(db);

    assert!(repo.has_shared_appointment(doctor.id, patient.id).await?);
    assert!(!repo.has_shared_appointment(doctor.id, stranger.id).await?);

    Ok(())
}

/// Tests the admin listing with a status filter.
///
/// Expected: Ok with only matching appointments and total count
#[tokio::test]
async fn paginates_all_with_status_filter() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_appointment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let patient = factory::create_patient(db).await?;
    let (doctor, _) = factory::create_approved_doctor(db).await?;
    for days in 1..=3 {
        factory::appointment::AppointmentFactory::new(db, patient.id, doctor.id)
            .scheduled_at(in_days(days))
            .build()
            .await?;
    }
    factory::appointment::create_completed_appointment(db, patient.id, doctor.id).await?;

    let repo = AppointmentRepository::new(db);
    let (page, total) = repo
        .get_all_paginated(0, 2, Some(AppointmentStatus::Pending))
        .await?;

    assert_eq!(total, 3);
    assert_eq!(page.len(), 2);
    assert_eq!(repo.count_by_status(AppointmentStatus::Completed).await?, 1);

    Ok(())
}
