use super::*;

/// Tests deleting a user cascades to their appointments.
///
/// Expected: Ok(true) and the user's appointments are removed
#[tokio::test]
async fn deletes_user_and_appointments() -> Result<(), AppError> {
    use sea_orm::EntityTrait;

    let test = TestBuilder::new()
        .with_appointment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (patient, _doctor, appointment) =
        factory::helpers::create_appointment_with_dependencies(db).await?;

    let repo = UserRepository::new(db);
    let deleted = repo.delete(patient.id).await?;

    assert!(deleted);
    assert!(repo.find_by_id(patient.id).await?.is_none());
    let remaining = entity::prelude::Appointment::find_by_id(appointment.id)
        .one(db)
        .await?;
    assert!(remaining.is_none());

    Ok(())
}

/// Tests deleting a user that does not exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);

    assert!(!repo.delete(999).await?);

    Ok(())
}
