//! Registration and login.
//!
//! Accounts authenticate with email and password and receive a bearer token from
//! `JwtService`. Admin accounts can only be registered with the one-time code issued at
//! startup by `AdminCodeService`.

pub mod jwt;
pub mod password;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{CreateUserParam, RegisterParam, Role, User},
    service::{
        admin::code::AdminCodeService,
        auth::{
            jwt::JwtService,
            password::{hash_password, verify_password},
        },
    },
};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtService,
    admin_codes: &'a AdminCodeService,
}

impl<'a> AuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        jwt: &'a JwtService,
        admin_codes: &'a AdminCodeService,
    ) -> Self {
        Self {
            db,
            jwt,
            admin_codes,
        }
    }

    /// Creates an account and returns it with a fresh access token.
    ///
    /// The email is trimmed and lowercased before the uniqueness check. The admin code
    /// is only consumed once every other check has passed.
    ///
    /// # Returns
    /// - `Ok((token, User))` - Account created
    /// - `Err(AppError::BadRequest)` - Invalid name, email or password, or email taken
    /// - `Err(AppError::AuthErr(InvalidAdminCode))` - Admin role without a valid code
    pub async fn register(&self, param: RegisterParam) -> Result<(String, User), AppError> {
        let name = param.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("Name is required".to_string()));
        }

        let email = normalize_email(&param.email);
        if !is_plausible_email(&email) {
            return Err(AppError::BadRequest("A valid email is required".to_string()));
        }

        validate_password(&param.password)?;

        let user_repo = UserRepository::new(self.db);
        if user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::BadRequest(
                "Email is already registered".to_string(),
            ));
        }

        if param.role == Role::Admin {
            let code = param.admin_code.as_deref().unwrap_or_default();
            if !self.admin_codes.validate_and_consume(code).await {
                return Err(AuthError::InvalidAdminCode.into());
            }
        }

        let user = user_repo
            .create(CreateUserParam {
                name,
                email,
                password_hash: hash_password(&param.password)?,
                role: param.role,
                phone: param.phone,
                gender: param.gender,
            })
            .await?;

        tracing::info!("Registered user {} as {}", user.id, user.role);

        let token = self.jwt.issue(&user)?;
        Ok((token, user))
    }

    /// Authenticates with email and password.
    ///
    /// Unknown email and wrong password produce the same error.
    ///
    /// # Returns
    /// - `Ok((token, User))` - Credentials matched
    /// - `Err(AppError::AuthErr(InvalidCredentials))` - No match
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User), AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.find_by_email(&normalize_email(email)).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.jwt.issue(&user)?;
        Ok((token, user))
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    }
}

/// Rejects passwords shorter than `MIN_PASSWORD_LENGTH`.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}
