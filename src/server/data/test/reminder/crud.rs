use super::*;

/// Tests creating a reminder round trips its dose times.
///
/// Expected: Ok with active reminder and sorted dose times
#[tokio::test]
async fn creates_active_reminder() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let patient = factory::create_patient(db).await?;

    let repo = ReminderRepository::new(db);
    let reminder = repo
        .create(CreateReminderParam {
            patient_id: patient.id,
            medicine_name: "Metformin".to_string(),
            dosage: Some("500mg".to_string()),
            times: vec![
                NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
            ],
            start_date: Utc::now().date_naive(),
            end_date: None,
        })
        .await?;

    assert!(reminder.active);
    assert_eq!(reminder.times.len(), 2);
    assert_eq!(reminder.times[1], NaiveTime::from_hms_opt(20, 30, 0).unwrap());
    assert!(reminder.last_sent_at.is_none());

    let listed = repo.get_by_patient(patient.id).await?;
    assert_eq!(listed, vec![reminder]);

    Ok(())
}

/// Tests that paused reminders are not returned to the scheduler.
///
/// Expected: Ok with only the active reminder
#[tokio::test]
async fn get_active_skips_paused() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let patient = factory::create_patient(db).await?;
    let active = factory::medicine_reminder::create_medicine_reminder(db, patient.id).await?;
    let paused = factory::medicine_reminder::create_medicine_reminder(db, patient.id).await?;

    let repo = ReminderRepository::new(db);
    let updated = repo.set_active(paused.id, false).await?.unwrap();
    assert!(!updated.active);

    let reminders = repo.get_active().await?;
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].id, active.id);

    Ok(())
}

/// Tests recording the last sent dose and deleting.
///
/// Expected: Ok with last_sent_at stored, then Ok(true) on delete
#[tokio::test]
async fn marks_sent_and_deletes() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let patient = factory::create_patient(db).await?;
    let reminder = factory::medicine_reminder::create_medicine_reminder(db, patient.id).await?;
    let dose_at = Utc::now();

    let repo = ReminderRepository::new(db);
    repo.mark_sent(reminder.id, dose_at).await?;

    let stored = repo.find_by_id(reminder.id).await?.unwrap();
    assert_eq!(stored.last_sent_at, Some(dose_at));

    assert!(repo.delete(reminder.id).await?);
    assert!(repo.find_by_id(reminder.id).await?.is_none());

    Ok(())
}
