use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        doctor::{DoctorProfileDto, DoctorSlotsDto, PaginatedDoctorsDto, UpsertDoctorProfileDto},
    },
    server::{
        controller::param::{default_per_page, paginate},
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            doctor::{GetDoctorsParam, UpsertDoctorProfileParam},
            user::Role,
        },
        service::doctor::DoctorService,
        state::AppState,
        util::time::parse_request_date,
    },
};

/// Tag for grouping doctor endpoints in OpenAPI documentation
pub static DOCTOR_TAG: &str = "doctor";

#[derive(Deserialize)]
pub struct DoctorListQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    pub specialization: Option<String>,
}

#[derive(Deserialize)]
pub struct SlotsQuery {
    pub date: String,
}

/// Create or replace the calling doctor's profile.
///
/// A new profile starts in `pending` review; later saves keep the current status. The
/// availability list replaces all previously stored windows.
///
/// # Access Control
/// - `Doctor`
///
/// # Returns
/// - `200 OK` - Saved profile
/// - `400 Bad Request` - Invalid fee, slot length or availability window
/// - `403 Forbidden` - Caller is not a doctor
#[utoipa::path(
    put,
    path = "/doc/profile",
    tag = DOCTOR_TAG,
    security(("bearer_auth" = [])),
    request_body = UpsertDoctorProfileDto,
    responses(
        (status = 200, description = "Profile saved", body = DoctorProfileDto),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a doctor", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upsert_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpsertDoctorProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let doctor = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Doctor])
        .await?;

    let param = UpsertDoctorProfileParam::from_dto(doctor.id, payload)?;
    let profile = DoctorService::new(&state.db).upsert_profile(param).await?;

    Ok((StatusCode::OK, Json(profile.into_dto())))
}

/// Get the calling doctor's own profile regardless of approval status.
#[utoipa::path(
    get,
    path = "/doc/profile",
    tag = DOCTOR_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own profile", body = DoctorProfileDto),
        (status = 403, description = "User is not a doctor", body = ErrorDto),
        (status = 404, description = "No profile created yet", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_own_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let doctor = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Doctor])
        .await?;

    let profile = DoctorService::new(&state.db)
        .get_own_profile(doctor.id)
        .await?;

    Ok((StatusCode::OK, Json(profile.into_dto())))
}

/// List approved doctors.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Page of approved doctors, optionally filtered by specialization
#[utoipa::path(
    get,
    path = "/doc/list",
    tag = DOCTOR_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("per_page" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("specialization" = Option<String>, Query, description = "Substring of the specialization")
    ),
    responses(
        (status = 200, description = "Page of doctors", body = PaginatedDoctorsDto),
        (status = 400, description = "Page out of range", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_doctors(
    State(state): State<AppState>,
    Query(query): Query<DoctorListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, per_page) = paginate(query.page, query.per_page)?;
    let param = GetDoctorsParam {
        page,
        per_page,
        specialization: query
            .specialization
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    };
    let doctors = DoctorService::new(&state.db).list_doctors(param).await?;

    Ok((StatusCode::OK, Json(doctors.into_dto())))
}

/// Get an approved doctor's public profile.
#[utoipa::path(
    get,
    path = "/doc/{id}",
    tag = DOCTOR_TAG,
    params(
        ("id" = i32, Path, description = "Doctor user ID")
    ),
    responses(
        (status = 200, description = "Doctor profile", body = DoctorProfileDto),
        (status = 404, description = "Doctor not found or not approved", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let doctor = DoctorService::new(&state.db).get_doctor(id).await?;

    Ok((StatusCode::OK, Json(doctor.into_dto())))
}

/// Get the free slot start times of an approved doctor on a date.
///
/// Slots already in the past and slots overlapping a pending or confirmed
/// appointment are left out.
///
/// # Arguments
/// - `id` - Doctor user ID
/// - `date` - Day to inspect, format `YYYY-MM-DD` (UTC)
///
/// # Returns
/// - `200 OK` - Slot list, empty when the doctor does not work that day
/// - `400 Bad Request` - Malformed date
/// - `404 Not Found` - Doctor not found or not approved
#[utoipa::path(
    get,
    path = "/doc/{id}/slots",
    tag = DOCTOR_TAG,
    params(
        ("id" = i32, Path, description = "Doctor user ID"),
        ("date" = String, Query, description = "Date in YYYY-MM-DD format (UTC)")
    ),
    responses(
        (status = 200, description = "Free slots", body = DoctorSlotsDto),
        (status = 400, description = "Invalid date", body = ErrorDto),
        (status = 404, description = "Doctor not found or not approved", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_free_slots(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<SlotsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_request_date(&query.date)?;
    let slots = DoctorService::new(&state.db)
        .get_free_slots(id, date, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(slots.into_dto())))
}
