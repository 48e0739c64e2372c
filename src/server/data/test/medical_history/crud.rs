use super::*;

/// Tests creating and listing a patient's records.
///
/// Expected: Ok with newest record first and other patients excluded
#[tokio::test]
async fn creates_and_lists_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let patient = factory::create_patient(db).await?;
    let other = factory::create_patient(db).await?;
    factory::medical_history::create_medical_history(db, other.id, "Asthma").await?;

    let repo = MedicalHistoryRepository::new(db);
    let first = repo
        .create(CreateMedicalHistoryParam {
            patient_id: patient.id,
            condition: "Hypertension".to_string(),
            diagnosed_on: NaiveDate::from_ymd_opt(2020, 5, 1),
            medications: Some("Amlodipine".to_string()),
            notes: None,
        })
        .await?;
    let second = repo
        .create(CreateMedicalHistoryParam {
            patient_id: patient.id,
            condition: "Diabetes".to_string(),
            diagnosed_on: None,
            medications: None,
            notes: None,
        })
        .await?;

    let records = repo.get_by_patient(patient.id).await?;
    let ids: Vec<i32> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    Ok(())
}

/// Tests updating and deleting a record.
///
/// Expected: Ok with changes applied, then Ok(true) on delete and the record gone
#[tokio::test]
async fn updates_and_deletes() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let patient = factory::create_patient(db).await?;
    let record =
        factory::medical_history::create_medical_history(db, patient.id, "Migraine").await?;

    let repo = MedicalHistoryRepository::new(db);
    let updated = repo
        .update(
            record.id,
            UpdateMedicalHistoryParam {
                notes: Some("Triggered by stress".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.condition, "Migraine");
    assert_eq!(updated.notes, Some("Triggered by stress".to_string()));

    assert!(repo.delete(record.id).await?);
    assert!(repo.find_by_id(record.id).await?.is_none());
    assert!(!repo.delete(record.id).await?);

    Ok(())
}
