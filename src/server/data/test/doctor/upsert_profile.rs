use super::*;

/// Tests creating a profile for a doctor without one.
///
/// Verifies that the new profile starts pending and that availability is stored.
///
/// Expected: Ok with pending profile and one availability window
#[tokio::test]
async fn creates_pending_profile() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_doctor_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_doctor_user(db).await?;

    let repo = DoctorRepository::new(db);
    let profile = repo
        .upsert_profile(profile_param(user.id, "Cardiology"))
        .await?;

    assert_eq!(profile.user_id, user.id);
    assert_eq!(profile.status, DoctorStatus::Pending);
    assert_eq!(profile.slot_minutes, 20);

    let availability = repo.get_availability(user.id).await?;
    assert_eq!(availability.len(), 1);
    assert_eq!(availability[0].start_time, time("09:00"));

    Ok(())
}

/// Tests updating an existing approved profile.
///
/// Verifies that fields change, the approval status is kept and availability is
/// replaced rather than appended.
///
/// Expected: Ok with updated fields, approved status, replaced availability
#[tokio::test]
async fn updates_profile_and_replaces_availability() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_doctor_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _profile) = factory::doctor::DoctorFactory::new(db)
        .availability(2, "08:00", "10:00")
        .availability(3, "08:00", "10:00")
        .build()
        .await?;

    let repo = DoctorRepository::new(db);
    let mut param = profile_param(user.id, "Dermatology");
    param.fee = 900;
    let profile = repo.upsert_profile(param).await?;

    assert_eq!(profile.specialization, "Dermatology");
    assert_eq!(profile.fee, 900);
    assert_eq!(profile.status, DoctorStatus::Approved);

    let availability = repo.get_availability(user.id).await?;
    assert_eq!(availability.len(), 1);
    assert_eq!(availability[0].weekday, 0);

    Ok(())
}

/// Tests finding a profile for a doctor who never created one.
///
/// Expected: Ok(None)
#[tokio::test]
async fn find_by_user_id_returns_none_without_profile() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_doctor_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_doctor_user(db).await?;

    let repo = DoctorRepository::new(db);

    assert!(repo.find_by_user_id(user.id).await?.is_none());

    Ok(())
}
