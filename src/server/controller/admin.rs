use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        admin::{AdminStatsDto, UpdateDoctorStatusDto},
        api::ErrorDto,
        doctor::DoctorProfileDto,
    },
    server::{
        controller::param::StatusQuery,
        error::AppError,
        middleware::auth::AuthGuard,
        model::{doctor::DoctorStatus, user::Role},
        service::admin::AdminService,
        state::AppState,
        util::parse::{parse_optional_value, parse_request_value},
    },
};

/// Tag for grouping admin endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

/// List doctor profiles by review status.
///
/// # Access Control
/// - `Admin`
///
/// # Arguments
/// - `status` - `pending` (default), `approved` or `rejected`
///
/// # Returns
/// - `200 OK` - Matching doctor profiles
/// - `400 Bad Request` - Unknown status
/// - `403 Forbidden` - Caller is not an admin
#[utoipa::path(
    get,
    path = "/admin/doctors",
    tag = ADMIN_TAG,
    security(("bearer_auth" = [])),
    params(
        ("status" = Option<String>, Query, description = "Review status (default: pending)")
    ),
    responses(
        (status = 200, description = "Doctor profiles", body = Vec<DoctorProfileDto>),
        (status = 400, description = "Invalid status", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_doctors(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Admin])
        .await?;

    let status = parse_optional_value(query.status.as_deref(), "doctor status")?
        .unwrap_or(DoctorStatus::Pending);
    let doctors = AdminService::new(&state.db)
        .get_doctors_by_status(status)
        .await?;

    let doctor_dtos: Vec<DoctorProfileDto> = doctors.into_iter().map(|d| d.into_dto()).collect();

    Ok((StatusCode::OK, Json(doctor_dtos)))
}

/// Approve or reject a doctor profile.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - Updated profile
/// - `400 Bad Request` - Status other than `approved` or `rejected`
/// - `404 Not Found` - No profile for this doctor
#[utoipa::path(
    put,
    path = "/admin/doctors/{id}/status",
    tag = ADMIN_TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Doctor user ID")
    ),
    request_body = UpdateDoctorStatusDto,
    responses(
        (status = 200, description = "Status updated", body = DoctorProfileDto),
        (status = 400, description = "Invalid status", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Doctor not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_doctor_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateDoctorStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Admin])
        .await?;

    let status: DoctorStatus = parse_request_value(&payload.status, "doctor status")?;
    let doctor = AdminService::new(&state.db)
        .set_doctor_status(id, status)
        .await?;

    Ok((StatusCode::OK, Json(doctor.into_dto())))
}

/// Platform counters for the admin dashboard.
#[utoipa::path(
    get,
    path = "/admin/stats",
    tag = ADMIN_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard counters", body = AdminStatsDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Admin])
        .await?;

    let stats = AdminService::new(&state.db).get_stats().await?;

    Ok((StatusCode::OK, Json(stats.into_dto())))
}
