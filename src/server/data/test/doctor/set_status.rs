use super::*;

/// Tests approving a pending profile.
///
/// Expected: Ok(Some) with approved status and pending count dropping to zero
#[tokio::test]
async fn approves_pending_profile() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_doctor_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _) = factory::doctor::create_pending_doctor(db).await?;

    let repo = DoctorRepository::new(db);
    assert_eq!(repo.count_by_status(DoctorStatus::Pending).await?, 1);

    let profile = repo
        .set_status(user.id, DoctorStatus::Approved)
        .await?
        .unwrap();

    assert_eq!(profile.status, DoctorStatus::Approved);
    assert_eq!(repo.count_by_status(DoctorStatus::Pending).await?, 0);
    assert_eq!(repo.get_by_status(DoctorStatus::Approved).await?.len(), 1);

    Ok(())
}

/// Tests setting the status of a doctor without a profile.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_without_profile() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_doctor_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_doctor_user(db).await?;

    let repo = DoctorRepository::new(db);
    let result = repo.set_status(user.id, DoctorStatus::Rejected).await?;

    assert!(result.is_none());

    Ok(())
}
