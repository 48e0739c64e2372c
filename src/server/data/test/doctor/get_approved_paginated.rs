use super::*;

/// Tests that the public listing only includes approved profiles.
///
/// Expected: Ok with pending and rejected profiles excluded
#[tokio::test]
async fn excludes_unapproved_profiles() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_doctor_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (approved, _) = factory::create_approved_doctor(db).await?;
    factory::doctor::create_pending_doctor(db).await?;
    factory::doctor::DoctorFactory::new(db)
        .status("rejected")
        .build()
        .await?;

    let repo = DoctorRepository::new(db);
    let (profiles, total) = repo.get_approved_paginated(0, 10, None).await?;

    assert_eq!(total, 1);
    assert_eq!(profiles[0].user_id, approved.id);

    Ok(())
}

/// Tests the case-insensitive specialization filter.
///
/// Expected: Ok with only profiles whose specialization contains the term
#[tokio::test]
async fn filters_by_specialization() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_doctor_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::doctor::DoctorFactory::new(db)
        .specialization("Cardiology")
        .build()
        .await?;
    factory::doctor::DoctorFactory::new(db)
        .specialization("Pediatric Cardiology")
        .build()
        .await?;
    factory::doctor::DoctorFactory::new(db)
        .specialization("Neurology")
        .build()
        .await?;

    let repo = DoctorRepository::new(db);
    let (profiles, total) = repo.get_approved_paginated(0, 10, Some("cardio")).await?;

    assert_eq!(total, 2);
    assert!(profiles
        .iter()
        .all(|p| p.specialization.to_lowercase().contains("cardio")));

    Ok(())
}
