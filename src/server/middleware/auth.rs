use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{Role, User},
    service::auth::jwt::JwtService,
};

/// Resolves the bearer token of a request to a user and checks its role.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtService,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtService, headers: &'a HeaderMap) -> Self {
        Self { db, jwt, headers }
    }

    /// Authenticates the request and requires the user's role to be one of `roles`.
    ///
    /// An empty `roles` slice admits any authenticated user. The user is reloaded from
    /// the database so deleted accounts and changed roles take effect immediately.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated user with a permitted role
    /// - `Err(AuthError::MissingToken)` - No bearer token on the request
    /// - `Err(AuthError::InvalidToken)` - Token failed verification
    /// - `Err(AuthError::UserNotFound)` - Token names a deleted user
    /// - `Err(AuthError::AccessDenied)` - Role not permitted
    pub async fn require(&self, roles: &[Role]) -> Result<User, AppError> {
        let token = bearer_token(self.headers).ok_or(AuthError::MissingToken)?;
        let claims = self.jwt.verify(token)?;

        let Some(user) = UserRepository::new(self.db).find_by_id(claims.id).await? else {
            return Err(AuthError::UserNotFound(claims.id).into());
        };

        if !roles.is_empty() && !roles.contains(&user.role) {
            let allowed = roles
                .iter()
                .map(Role::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(AuthError::AccessDenied(
                user.id,
                format!("role {} is not one of [{}]", user.role, allowed),
            )
            .into());
        }

        Ok(user)
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
