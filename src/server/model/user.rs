//! User domain models and parameters.
//!
//! Provides the account model shared by patients, doctors and admins along with the
//! `Role` enum used for route gating. Includes parameter types for registration,
//! profile updates and paginated listing.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    model::user::{PaginatedUsersDto, RegisterDto, UpdateProfileDto, UserDto},
    server::{
        error::{internal::InternalError, AppError},
        util::parse::parse_request_value,
    },
};

/// Account role carried in access tokens and checked by `AuthGuard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            "admin" => Ok(Role::Admin),
            other => Err(InternalError::UnknownStoredValue {
                kind: "role",
                value: other.to_string(),
            }),
        }
    }
}

/// Registered account.
///
/// The password hash never leaves the service layer; `into_dto` drops it.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub name: String,
    /// Lowercased, unique login email.
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub role: Role,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts the user domain model to a DTO for API responses.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role.to_string(),
            phone: self.phone,
            gender: self.gender,
            date_of_birth: self.date_of_birth,
            address: self.address,
            created_at: self.created_at,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(AppError::InternalErr(UnknownStoredValue))` - Stored role is not recognized
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        let role = entity.role.parse::<Role>()?;

        Ok(Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            password_hash: entity.password_hash,
            role,
            phone: entity.phone,
            gender: entity.gender,
            date_of_birth: entity.date_of_birth,
            address: entity.address,
            created_at: entity.created_at,
        })
    }
}

/// Registration request after role parsing; fields are validated by `AuthService`.
#[derive(Debug, Clone)]
pub struct RegisterParam {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub phone: Option<String>,
    pub gender: Option<String>,
    /// Required when `role` is `Admin`.
    pub admin_code: Option<String>,
}

impl RegisterParam {
    /// Builds registration parameters from the request body.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Role is not `patient`, `doctor` or `admin`
    pub fn from_dto(dto: RegisterDto) -> Result<Self, AppError> {
        Ok(Self {
            name: dto.name,
            email: dto.email,
            password: dto.password,
            role: parse_request_value(&dto.role, "role")?,
            phone: dto.phone,
            gender: dto.gender,
            admin_code: dto.admin_code,
        })
    }
}

/// Parameters for inserting a new account.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub phone: Option<String>,
    pub gender: Option<String>,
}

/// Profile fields a user may change about themselves.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserParam {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
}

impl UpdateUserParam {
    pub fn from_dto(dto: UpdateProfileDto) -> Self {
        Self {
            name: dto.name,
            phone: dto.phone,
            gender: dto.gender,
            date_of_birth: dto.date_of_birth,
            address: dto.address,
        }
    }
}

/// Parameters for paginated user queries.
#[derive(Debug, Clone)]
pub struct GetAllUsersParam {
    /// Zero-indexed page number.
    pub page: u64,
    pub per_page: u64,
    /// Restrict results to a single role.
    pub role: Option<Role>,
}

/// Paginated collection of users with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    /// Total number of users across all pages.
    pub total: u64,
    /// Current page number (zero-indexed).
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            users: self.users.into_iter().map(User::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
