use super::*;

/// Tests updating a subset of profile fields.
///
/// Verifies that set fields are written and unset fields keep their stored value.
///
/// Expected: Ok(Some) with only the provided fields changed
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .name("Before")
        .phone("555-0000")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let updated = repo
        .update_profile(
            user.id,
            UpdateUserParam {
                name: Some("After".to_string()),
                address: Some("1 Main St".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.name, "After");
    assert_eq!(updated.address, Some("1 Main St".to_string()));
    assert_eq!(updated.phone, Some("555-0000".to_string()));

    Ok(())
}

/// Tests updating a user that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let result = repo.update_profile(999, UpdateUserParam::default()).await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests replacing the password hash.
///
/// Expected: Ok with the new hash stored
#[tokio::test]
async fn updates_password_hash() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_patient(db).await?;

    let repo = UserRepository::new(db);
    repo.update_password_hash(user.id, "new-hash".to_string())
        .await?;

    let stored = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(stored.password_hash, "new-hash");

    Ok(())
}
