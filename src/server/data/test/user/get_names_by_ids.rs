use super::*;

/// Tests resolving display names for a set of users.
///
/// Expected: Ok with a name for each existing ID and unknown IDs absent
#[tokio::test]
async fn resolves_names() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::user::UserFactory::new(db).name("Alice").build().await?;
    let bob = factory::user::UserFactory::new(db).name("Bob").build().await?;

    let repo = UserRepository::new(db);
    let names = repo.get_names_by_ids(&[alice.id, bob.id, 999]).await?;

    assert_eq!(names.len(), 2);
    assert_eq!(names.get(&alice.id), Some(&"Alice".to_string()));
    assert_eq!(names.get(&bob.id), Some(&"Bob".to_string()));

    Ok(())
}
