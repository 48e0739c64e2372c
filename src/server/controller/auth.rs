use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ErrorDto,
        user::{AuthResponseDto, LoginDto, RegisterDto},
    },
    server::{
        error::AppError, model::user::RegisterParam, service::auth::AuthService, state::AppState,
    },
};

/// Tag for grouping authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Register a new account.
///
/// Creates a patient or doctor account and returns an access token. The `admin` role
/// is only granted together with the one-time admin code logged at startup.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `201 Created` - Account created, token and user returned
/// - `400 Bad Request` - Invalid fields, duplicate email or wrong admin code
/// - `500 Internal Server Error` - Database or hashing error
#[utoipa::path(
    post,
    path = "/user/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = AuthResponseDto),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let param = RegisterParam::from_dto(payload)?;
    let (token, user) = AuthService::new(&state.db, &state.jwt, &state.admin_code_service)
        .register(param)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponseDto {
            token,
            user: user.into_dto(),
        }),
    ))
}

/// Log in with email and password.
///
/// Unknown emails and wrong passwords produce the same response.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Token and user
/// - `401 Unauthorized` - Invalid email or password
#[utoipa::path(
    post,
    path = "/user/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = AuthResponseDto),
        (status = 401, description = "Invalid email or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let (token, user) = AuthService::new(&state.db, &state.jwt, &state.admin_code_service)
        .login(&payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(AuthResponseDto {
            token,
            user: user.into_dto(),
        }),
    ))
}
