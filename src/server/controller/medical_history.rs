use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    model::{
        api::ErrorDto,
        medical_history::{CreateMedicalHistoryDto, MedicalHistoryDto, UpdateMedicalHistoryDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            medical_history::{
                CreateMedicalHistoryParam, MedicalHistory, UpdateMedicalHistoryParam,
            },
            user::Role,
        },
        service::medical_history::MedicalHistoryService,
        state::AppState,
    },
};

/// Tag for grouping medical history endpoints in OpenAPI documentation
pub static MEDICAL_HISTORY_TAG: &str = "medical history";

fn into_dtos(records: Vec<MedicalHistory>) -> Vec<MedicalHistoryDto> {
    records.into_iter().map(|r| r.into_dto()).collect()
}

/// Add a record to the calling patient's medical history.
///
/// # Access Control
/// - `Patient`
///
/// # Returns
/// - `201 Created` - Stored record
/// - `400 Bad Request` - Empty condition or diagnosis date in the future
#[utoipa::path(
    post,
    path = "/history/add",
    tag = MEDICAL_HISTORY_TAG,
    security(("bearer_auth" = [])),
    request_body = CreateMedicalHistoryDto,
    responses(
        (status = 201, description = "Record created", body = MedicalHistoryDto),
        (status = 400, description = "Invalid record", body = ErrorDto),
        (status = 403, description = "User is not a patient", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateMedicalHistoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let patient = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Patient])
        .await?;

    let record = MedicalHistoryService::new(&state.db)
        .create(
            CreateMedicalHistoryParam::from_dto(patient.id, payload),
            Utc::now().date_naive(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(record.into_dto())))
}

/// The calling patient's own medical history, newest first.
#[utoipa::path(
    get,
    path = "/history",
    tag = MEDICAL_HISTORY_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Records", body = Vec<MedicalHistoryDto>),
        (status = 403, description = "User is not a patient", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_own_records(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let patient = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Patient])
        .await?;

    let records = MedicalHistoryService::new(&state.db)
        .get_own(patient.id)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(records))))
}

/// Read a patient's medical history.
///
/// # Access Control
/// - `Admin`
/// - `Doctor` who has at least one appointment with the patient
#[utoipa::path(
    get,
    path = "/history/patient/{patient_id}",
    tag = MEDICAL_HISTORY_TAG,
    security(("bearer_auth" = [])),
    params(
        ("patient_id" = i32, Path, description = "Patient user ID")
    ),
    responses(
        (status = 200, description = "Records", body = Vec<MedicalHistoryDto>),
        (status = 403, description = "No appointment with this patient", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_patient_records(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(patient_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Doctor, Role::Admin])
        .await?;

    let records = MedicalHistoryService::new(&state.db)
        .get_for_patient(&user, patient_id)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(records))))
}

#[utoipa::path(
    put,
    path = "/history/{id}",
    tag = MEDICAL_HISTORY_TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Record ID")
    ),
    request_body = UpdateMedicalHistoryDto,
    responses(
        (status = 200, description = "Record updated", body = MedicalHistoryDto),
        (status = 400, description = "Invalid record", body = ErrorDto),
        (status = 403, description = "Record belongs to another patient", body = ErrorDto),
        (status = 404, description = "Record not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMedicalHistoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let patient = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Patient])
        .await?;

    let record = MedicalHistoryService::new(&state.db)
        .update(
            &patient,
            id,
            UpdateMedicalHistoryParam::from_dto(payload),
            Utc::now().date_naive(),
        )
        .await?;

    Ok((StatusCode::OK, Json(record.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/history/{id}",
    tag = MEDICAL_HISTORY_TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Record ID")
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 403, description = "Record belongs to another patient", body = ErrorDto),
        (status = 404, description = "Record not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let patient = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Patient])
        .await?;

    MedicalHistoryService::new(&state.db)
        .delete(&patient, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
