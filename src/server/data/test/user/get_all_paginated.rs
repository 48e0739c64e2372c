use super::*;

/// Tests pagination with multiple pages.
///
/// Verifies that the repository returns the requested page and the total number of
/// users rather than the number of pages.
///
/// Expected: Ok with correct page of users and total count
#[tokio::test]
async fn returns_correct_page_of_users() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..5 {
        factory::create_patient(db).await?;
    }

    let repo = UserRepository::new(db);
    let (users, total) = repo.get_all_paginated(0, 2, None).await?;
    assert_eq!(users.len(), 2);
    assert_eq!(total, 5);

    let (users, _) = repo.get_all_paginated(2, 2, None).await?;
    assert_eq!(users.len(), 1);

    Ok(())
}

/// Tests filtering the listing by role.
///
/// Expected: Ok with only users of the requested role
#[tokio::test]
async fn filters_by_role() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_patient(db).await?;
    factory::create_patient(db).await?;
    factory::create_admin(db).await?;

    let repo = UserRepository::new(db);
    let (users, total) = repo.get_all_paginated(0, 10, Some(Role::Admin)).await?;

    assert_eq!(total, 1);
    assert!(users.iter().all(|u| u.role == Role::Admin));
    assert!(repo.admin_exists().await?);
    assert_eq!(repo.count_by_role(Role::Patient).await?, 2);

    Ok(())
}

/// Tests pagination with an empty table.
///
/// Expected: Ok with empty vector and zero total
#[tokio::test]
async fn returns_empty_for_no_users() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let (users, total) = repo.get_all_paginated(0, 10, None).await?;

    assert!(users.is_empty());
    assert_eq!(total, 0);
    assert!(!repo.admin_exists().await?);

    Ok(())
}
