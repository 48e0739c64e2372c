use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        prescription::{CreatePrescriptionDto, PrescriptionDto, UpdatePrescriptionDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            prescription::{Prescription, UpdatePrescriptionParam, WritePrescriptionParam},
            user::Role,
        },
        service::prescription::PrescriptionService,
        state::AppState,
    },
};

/// Tag for grouping prescription endpoints in OpenAPI documentation
pub static PRESCRIPTION_TAG: &str = "prescription";

fn into_dtos(prescriptions: Vec<Prescription>) -> Vec<PrescriptionDto> {
    prescriptions.into_iter().map(|p| p.into_dto()).collect()
}

/// Write the prescription for one of the doctor's appointments.
///
/// The appointment must be confirmed or completed and may carry only one
/// prescription.
///
/// # Access Control
/// - `Doctor` owning the appointment
///
/// # Returns
/// - `201 Created` - Stored prescription
/// - `400 Bad Request` - Missing diagnosis, invalid medicine, wrong appointment status or duplicate
/// - `403 Forbidden` - Appointment belongs to another doctor
/// - `404 Not Found` - Appointment not found
#[utoipa::path(
    post,
    path = "/prescription/add",
    tag = PRESCRIPTION_TAG,
    security(("bearer_auth" = [])),
    request_body = CreatePrescriptionDto,
    responses(
        (status = 201, description = "Prescription created", body = PrescriptionDto),
        (status = 400, description = "Invalid prescription", body = ErrorDto),
        (status = 403, description = "Not the appointment's doctor", body = ErrorDto),
        (status = 404, description = "Appointment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_prescription(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreatePrescriptionDto>,
) -> Result<impl IntoResponse, AppError> {
    let doctor = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Doctor])
        .await?;

    let prescription = PrescriptionService::new(&state.db)
        .create(WritePrescriptionParam::from_dto(doctor.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(prescription.into_dto())))
}

/// Prescriptions issued to the calling patient.
#[utoipa::path(
    get,
    path = "/prescription/patient",
    tag = PRESCRIPTION_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Prescriptions", body = Vec<PrescriptionDto>),
        (status = 403, description = "User is not a patient", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_patient_prescriptions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let patient = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Patient])
        .await?;

    let prescriptions = PrescriptionService::new(&state.db)
        .get_for_patient(patient.id)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(prescriptions))))
}

/// Prescriptions written by the calling doctor.
#[utoipa::path(
    get,
    path = "/prescription/doctor",
    tag = PRESCRIPTION_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Prescriptions", body = Vec<PrescriptionDto>),
        (status = 403, description = "User is not a doctor", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_doctor_prescriptions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let doctor = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Doctor])
        .await?;

    let prescriptions = PrescriptionService::new(&state.db)
        .get_for_doctor(doctor.id)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(prescriptions))))
}

#[utoipa::path(
    get,
    path = "/prescription/{id}",
    tag = PRESCRIPTION_TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Prescription ID")
    ),
    responses(
        (status = 200, description = "Prescription", body = PrescriptionDto),
        (status = 403, description = "Neither author, patient nor admin", body = ErrorDto),
        (status = 404, description = "Prescription not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_prescription(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let prescription = PrescriptionService::new(&state.db).get(&user, id).await?;

    Ok((StatusCode::OK, Json(prescription.into_dto())))
}

/// Edit a prescription. A `medicines` list replaces every stored medicine.
#[utoipa::path(
    put,
    path = "/prescription/{id}",
    tag = PRESCRIPTION_TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Prescription ID")
    ),
    request_body = UpdatePrescriptionDto,
    responses(
        (status = 200, description = "Prescription updated", body = PrescriptionDto),
        (status = 400, description = "Invalid prescription", body = ErrorDto),
        (status = 403, description = "Not the authoring doctor", body = ErrorDto),
        (status = 404, description = "Prescription not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_prescription(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePrescriptionDto>,
) -> Result<impl IntoResponse, AppError> {
    let doctor = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Doctor])
        .await?;

    let prescription = PrescriptionService::new(&state.db)
        .update(&doctor, id, UpdatePrescriptionParam::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(prescription.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/prescription/{id}",
    tag = PRESCRIPTION_TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Prescription ID")
    ),
    responses(
        (status = 204, description = "Prescription deleted"),
        (status = 403, description = "Neither author nor admin", body = ErrorDto),
        (status = 404, description = "Prescription not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_prescription(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Doctor, Role::Admin])
        .await?;

    PrescriptionService::new(&state.db).delete(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
