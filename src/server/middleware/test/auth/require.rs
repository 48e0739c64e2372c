use super::*;

/// Tests a valid token for a permitted role.
///
/// Expected: Ok(User) matching the token's user
#[tokio::test]
async fn grants_access_to_permitted_role() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();

    let patient = load(db, factory::create_patient(db).await?.id).await;
    let headers = bearer(&jwt.issue(&patient)?);

    let user = AuthGuard::new(db, &jwt, &headers)
        .require(&[Role::Patient, Role::Admin])
        .await?;

    assert_eq!(user.id, patient.id);
    assert_eq!(user.role, Role::Patient);

    Ok(())
}

/// Tests a valid token for a role outside the list.
///
/// Expected: Err(AuthError::AccessDenied) naming the user
#[tokio::test]
async fn denies_other_roles() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();

    let patient = load(db, factory::create_patient(db).await?.id).await;
    let headers = bearer(&jwt.issue(&patient)?);

    let result = AuthGuard::new(db, &jwt, &headers)
        .require(&[Role::Admin])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, message))) => {
            assert_eq!(user_id, patient.id);
            assert!(message.contains("patient"));
        }
        other => panic!("Expected AccessDenied, got: {:?}", other),
    }

    Ok(())
}

/// Tests that an empty role list admits any authenticated user.
///
/// Expected: Ok(User)
#[tokio::test]
async fn empty_role_list_grants_access() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();

    let doctor = load(db, factory::user::create_doctor_user(db).await?.id).await;
    let headers = bearer(&jwt.issue(&doctor)?);

    let user = AuthGuard::new(db, &jwt, &headers).require(&[]).await?;

    assert_eq!(user.id, doctor.id);

    Ok(())
}

/// Tests a request without an Authorization header.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn rejects_missing_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();
    let headers = HeaderMap::new();

    let result = AuthGuard::new(db, &jwt, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    Ok(())
}

/// Tests a token signed with a different secret.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_foreign_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();

    let patient = load(db, factory::create_patient(db).await?.id).await;
    let token = JwtService::new("another-secret", 1).issue(&patient)?;
    let headers = bearer(&token);

    let result = AuthGuard::new(db, &jwt, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests a valid token whose user was deleted afterwards.
///
/// Expected: Err(AuthError::UserNotFound)
#[tokio::test]
async fn rejects_deleted_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();

    let patient = load(db, factory::create_patient(db).await?.id).await;
    let headers = bearer(&jwt.issue(&patient)?);
    UserRepository::new(db).delete(patient.id).await?;

    let result = AuthGuard::new(db, &jwt, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotFound(id))) if id == patient.id
    ));

    Ok(())
}
