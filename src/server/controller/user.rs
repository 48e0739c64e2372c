use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        user::{ChangePasswordDto, PaginatedUsersDto, UpdateProfileDto, UserDto},
    },
    server::{
        controller::param::{default_per_page, paginate},
        error::AppError,
        middleware::auth::AuthGuard,
        model::user::{GetAllUsersParam, Role, UpdateUserParam},
        service::user::UserService,
        state::AppState,
        util::parse::parse_optional_value,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

#[derive(Deserialize)]
pub struct UserListQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    pub role: Option<String>,
}

/// Get the authenticated user's profile.
///
/// # Access Control
/// - Any authenticated user
///
/// # Returns
/// - `200 OK` - Own profile
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    get,
    path = "/user/me",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own profile", body = UserDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Update the authenticated user's profile.
///
/// Only fields present in the body are changed.
///
/// # Access Control
/// - Any authenticated user
///
/// # Returns
/// - `200 OK` - Updated profile
/// - `400 Bad Request` - Blank name
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    put,
    path = "/user/me",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = UserDto),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_me(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let user = UserService::new(&state.db)
        .update_profile(user.id, UpdateUserParam::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Change the authenticated user's password.
///
/// # Returns
/// - `204 No Content` - Password changed
/// - `400 Bad Request` - New password too short
/// - `401 Unauthorized` - Missing token or wrong current password
#[utoipa::path(
    put,
    path = "/user/password",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    request_body = ChangePasswordDto,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "New password rejected", body = ErrorDto),
        (status = 401, description = "Wrong current password or not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    UserService::new(&state.db)
        .change_password(&user, &payload.current_password, &payload.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List all users with pagination.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - Page of users
/// - `400 Bad Request` - Unknown role filter
/// - `403 Forbidden` - Caller is not an admin
#[utoipa::path(
    get,
    path = "/user/all",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("per_page" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("role" = Option<String>, Query, description = "Filter by role")
    ),
    responses(
        (status = 200, description = "Page of users", body = PaginatedUsersDto),
        (status = 400, description = "Invalid role filter", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Admin])
        .await?;

    let (page, per_page) = paginate(query.page, query.per_page)?;
    let param = GetAllUsersParam {
        page,
        per_page,
        role: parse_optional_value(query.role.as_deref(), "role")?,
    };
    let users = UserService::new(&state.db).get_all_users(param).await?;

    Ok((StatusCode::OK, Json(users.into_dto())))
}

/// Delete a user account together with everything it owns.
///
/// # Access Control
/// - `Admin`, who cannot delete their own account
///
/// # Returns
/// - `204 No Content` - User deleted
/// - `400 Bad Request` - Admin tried to delete themself
/// - `404 Not Found` - Unknown user
#[utoipa::path(
    delete,
    path = "/user/{id}",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Cannot delete own account", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Admin])
        .await?;

    UserService::new(&state.db).delete_user(admin.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
