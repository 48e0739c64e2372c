use super::*;

/// Tests replacing the medicines of a prescription.
///
/// Expected: Ok(Some) with the old medicine gone and the new list stored
#[tokio::test]
async fn replaces_medicines() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, appointment) = factory::helpers::create_appointment_with_dependencies(db).await?;
    let prescription = factory::prescription::create_prescription(db, &appointment).await?;

    let repo = PrescriptionRepository::new(db);
    let updated = repo
        .update(
            prescription.id,
            UpdatePrescriptionParam {
                notes: Some("Rest for two days".to_string()),
                medicines: Some(vec![medicine("Cetirizine")]),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.diagnosis, "Seasonal flu");
    assert_eq!(updated.notes, Some("Rest for two days".to_string()));
    assert_eq!(updated.medicines.len(), 1);
    assert_eq!(updated.medicines[0].name, "Cetirizine");

    Ok(())
}

/// Tests that an update without medicines keeps the existing list.
///
/// Expected: Ok(Some) with the original medicine still present
#[tokio::test]
async fn keeps_medicines_when_not_provided() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, appointment) = factory::helpers::create_appointment_with_dependencies(db).await?;
    let prescription = factory::prescription::create_prescription(db, &appointment).await?;

    let repo = PrescriptionRepository::new(db);
    let updated = repo
        .update(
            prescription.id,
            UpdatePrescriptionParam {
                diagnosis: Some("Common cold".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.diagnosis, "Common cold");
    assert_eq!(updated.medicines.len(), 1);

    Ok(())
}

/// Tests deleting a prescription removes its medicines.
///
/// Expected: Ok(true) and no medicine rows left
#[tokio::test]
async fn deletes_prescription_and_medicines() -> Result<(), AppError> {
    use sea_orm::{EntityTrait, PaginatorTrait};

    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, appointment) = factory::helpers::create_appointment_with_dependencies(db).await?;
    let prescription = factory::prescription::create_prescription(db, &appointment).await?;

    let repo = PrescriptionRepository::new(db);

    assert!(repo.delete(prescription.id).await?);
    assert!(repo.find_by_id(prescription.id).await?.is_none());
    let medicines = entity::prelude::PrescriptionMedicine::find().count(db).await?;
    assert_eq!(medicines, 0);

    Ok(())
}
