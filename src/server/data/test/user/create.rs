use super::*;

/// Tests creating a new user.
///
/// Verifies that the repository stores the user with the requested role and that the
/// record can be looked up again by its email.
///
/// Expected: Ok with user created and findable by email
#[tokio::test]
async fn creates_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(create_param("jane@example.com", Role::Doctor))
        .await?;

    assert_eq!(user.email, "jane@example.com");
    assert_eq!(user.role, Role::Doctor);
    assert_eq!(user.phone, Some("555-0100".to_string()));

    let found = repo.find_by_email("jane@example.com").await?;
    assert_eq!(found, Some(user));

    Ok(())
}

/// Tests creating a user with an email that is already registered.
///
/// Expected: Err from the unique email index
#[tokio::test]
async fn fails_for_duplicate_email() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(create_param("dup@example.com", Role::Patient))
        .await?;

    let result = repo
        .create(create_param("dup@example.com", Role::Patient))
        .await;

    assert!(matches!(result, Err(AppError::DbErr(_))));

    Ok(())
}

/// Tests looking up an email that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn find_by_email_returns_none_for_unknown() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let found = repo.find_by_email("nobody@example.com").await?;

    assert!(found.is_none());

    Ok(())
}
