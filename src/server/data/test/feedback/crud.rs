use super::*;

/// Tests creating feedback and the per-appointment uniqueness.
///
/// Expected: Ok for the first entry, Err(DbErr) for a second one
#[tokio::test]
async fn creates_once_per_appointment() -> Result<(), AppError> {
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

    let repo = FeedbackRepository::new(db);
    let param = CreateFeedbackParam {
        appointment_id: appointment.id,
        patient_id: patient.id,
        doctor_id: doctor.id,
        rating: 4,
        comment: Some("Helpful".to_string()),
    };

    let feedback = repo.create(param.clone()).await?;
    assert_eq!(feedback.rating, 4);
    assert!(!feedback.hidden);
    assert!(repo.exists_for_appointment(appointment.id).await?);

    let duplicate = repo.create(param).await;
    assert!(matches!(duplicate, Err(AppError::DbErr(_))));

    Ok(())
}

/// Tests that hidden feedback is excluded from the doctor's visible list and ratings.
///
/// Expected: Ok with only visible entries returned
#[tokio::test]
async fn hides_feedback_from_public_views() -> Result<(), AppError> {
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
    let kept = factory::feedback::create_feedback(db, &first, 5).await?;
    let hidden = factory::feedback::create_feedback(db, &second, 1).await?;

    let repo = FeedbackRepository::new(db);
    let updated = repo.set_hidden(hidden.id, true).await?.unwrap();
    assert!(updated.hidden);

    let visible = repo.get_visible_by_doctor(doctor.id).await?;
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, kept.id);

    let ratings = repo.get_visible_ratings(&[doctor.id]).await?;
    assert_eq!(ratings.get(&doctor.id), Some(&vec![5]));

    let (all, total) = repo.get_all_paginated(0, 10).await?;
    assert_eq!(total, 2);
    assert_eq!(all.len(), 2);

    Ok(())
}

/// Tests deleting feedback.
///
/// Expected: Ok(true) then Ok(false) for the same ID
#[tokio::test]
async fn deletes_feedback() -> Result<(), AppError> {
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
    let feedback = factory::feedback::create_feedback(db, &appointment, 3).await?;

    let repo = FeedbackRepository::new(db);

    assert!(repo.delete(feedback.id).await?);
    assert!(!repo.delete(feedback.id).await?);
    assert!(!repo.exists_for_appointment(appointment.id).await?);

    Ok(())
}
