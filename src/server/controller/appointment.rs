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
        appointment::{
            AppointmentDto, CheckoutSessionDto, ConfirmPaymentDto, CreateAppointmentDto,
            PaginatedAppointmentsDto, RescheduleAppointmentDto, UpdateAppointmentStatusDto,
        },
    },
    server::{
        controller::param::{default_per_page, paginate, StatusQuery},
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            appointment::{
                AppointmentDetails, AppointmentStatus, BookAppointmentParam,
                GetAllAppointmentsParam,
            },
            user::Role,
        },
        service::{appointment::AppointmentService, payment::PaymentService},
        state::AppState,
        util::{
            parse::{parse_optional_value, parse_request_value},
            time::parse_request_datetime,
        },
    },
};

/// Tag for grouping appointment endpoints in OpenAPI documentation
pub static APPOINTMENT_TAG: &str = "appointment";

#[derive(Deserialize)]
pub struct AppointmentListQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    pub status: Option<String>,
}

fn into_dtos(appointments: Vec<AppointmentDetails>) -> Vec<AppointmentDto> {
    appointments.into_iter().map(|a| a.into_dto()).collect()
}

/// Book an appointment with an approved doctor.
///
/// The slot must lie in the future, fit inside one of the doctor's availability
/// windows and must not overlap another pending or confirmed appointment of that
/// doctor. Fee and slot length are taken from the doctor's profile.
///
/// # Access Control
/// - `Patient`
///
/// # Returns
/// - `201 Created` - Pending appointment
/// - `400 Bad Request` - Malformed date/time/mode, past time or outside availability
/// - `404 Not Found` - Doctor unknown or not approved
/// - `409 Conflict` - Slot already taken
#[utoipa::path(
    post,
    path = "/appointment/add",
    tag = APPOINTMENT_TAG,
    security(("bearer_auth" = [])),
    request_body = CreateAppointmentDto,
    responses(
        (status = 201, description = "Appointment booked", body = AppointmentDto),
        (status = 400, description = "Invalid booking", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a patient", body = ErrorDto),
        (status = 404, description = "Doctor not found", body = ErrorDto),
        (status = 409, description = "Slot already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn book_appointment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateAppointmentDto>,
) -> Result<impl IntoResponse, AppError> {
    let patient = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Patient])
        .await?;

    let param = BookAppointmentParam::from_dto(patient.id, payload)?;
    let appointment = AppointmentService::new(&state.db, &state.notifier)
        .book(param, Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(appointment.into_dto())))
}

/// List the calling patient's appointments by scheduled time.
#[utoipa::path(
    get,
    path = "/appointment/patient",
    tag = APPOINTMENT_TAG,
    security(("bearer_auth" = [])),
    params(
        ("status" = Option<String>, Query, description = "Filter by status")
    ),
    responses(
        (status = 200, description = "Appointments", body = Vec<AppointmentDto>),
        (status = 400, description = "Invalid status", body = ErrorDto),
        (status = 403, description = "User is not a patient", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_patient_appointments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse, AppError> {
    let patient = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Patient])
        .await?;

    let status = parse_optional_value(query.status.as_deref(), "appointment status")?;
    let appointments = AppointmentService::new(&state.db, &state.notifier)
        .get_for_patient(patient.id, status)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(appointments))))
}

/// List the calling doctor's appointments by scheduled time.
#[utoipa::path(
    get,
    path = "/appointment/doctor",
    tag = APPOINTMENT_TAG,
    security(("bearer_auth" = [])),
    params(
        ("status" = Option<String>, Query, description = "Filter by status")
    ),
    responses(
        (status = 200, description = "Appointments", body = Vec<AppointmentDto>),
        (status = 400, description = "Invalid status", body = ErrorDto),
        (status = 403, description = "User is not a doctor", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_doctor_appointments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse, AppError> {
    let doctor = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Doctor])
        .await?;

    let status = parse_optional_value(query.status.as_deref(), "appointment status")?;
    let appointments = AppointmentService::new(&state.db, &state.notifier)
        .get_for_doctor(doctor.id, status)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(appointments))))
}

/// List every appointment on the platform.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/appointment/all",
    tag = APPOINTMENT_TAG,
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("per_page" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("status" = Option<String>, Query, description = "Filter by status")
    ),
    responses(
        (status = 200, description = "Page of appointments", body = PaginatedAppointmentsDto),
        (status = 400, description = "Invalid status", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_appointments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AppointmentListQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Admin])
        .await?;

    let (page, per_page) = paginate(query.page, query.per_page)?;
    let param = GetAllAppointmentsParam {
        page,
        per_page,
        status: parse_optional_value(query.status.as_deref(), "appointment status")?,
    };
    let appointments = AppointmentService::new(&state.db, &state.notifier)
        .get_all(param)
        .await?;

    Ok((StatusCode::OK, Json(appointments.into_dto())))
}

/// Get a single appointment.
///
/// # Access Control
/// - The appointment's patient or doctor, or an `Admin`
#[utoipa::path(
    get,
    path = "/appointment/{id}",
    tag = APPOINTMENT_TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Appointment ID")
    ),
    responses(
        (status = 200, description = "Appointment", body = AppointmentDto),
        (status = 403, description = "Not a participant", body = ErrorDto),
        (status = 404, description = "Appointment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_appointment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let appointment = AppointmentService::new(&state.db, &state.notifier)
        .get(&user, id)
        .await?;

    Ok((StatusCode::OK, Json(appointment.into_dto())))
}

/// Move an appointment through its lifecycle.
///
/// Allowed transitions are `pending -> confirmed | cancelled` and
/// `confirmed -> completed | cancelled`. Doctors may perform any allowed
/// transition on their own appointments; patients may only cancel theirs.
///
/// # Access Control
/// - The appointment's `Doctor` or `Patient`
///
/// # Returns
/// - `200 OK` - Updated appointment
/// - `400 Bad Request` - Unknown status or transition not allowed
/// - `403 Forbidden` - Not a participant, or patient attempting more than a cancel
/// - `404 Not Found` - Appointment not found
#[utoipa::path(
    put,
    path = "/appointment/{id}/status",
    tag = APPOINTMENT_TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Appointment ID")
    ),
    request_body = UpdateAppointmentStatusDto,
    responses(
        (status = 200, description = "Status updated", body = AppointmentDto),
        (status = 400, description = "Invalid transition", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 404, description = "Appointment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_appointment_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAppointmentStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Doctor, Role::Patient])
        .await?;

    let status: AppointmentStatus = parse_request_value(&payload.status, "appointment status")?;
    let appointment = AppointmentService::new(&state.db, &state.notifier)
        .update_status(&user, id, status)
        .await?;

    Ok((StatusCode::OK, Json(appointment.into_dto())))
}

/// Move one of the caller's active appointments to a new time.
///
/// The new slot is checked the same way as a fresh booking, ignoring the
/// appointment being moved.
#[utoipa::path(
    put,
    path = "/appointment/{id}/reschedule",
    tag = APPOINTMENT_TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Appointment ID")
    ),
    request_body = RescheduleAppointmentDto,
    responses(
        (status = 200, description = "Appointment rescheduled", body = AppointmentDto),
        (status = 400, description = "Invalid time or appointment not active", body = ErrorDto),
        (status = 403, description = "Not the appointment's patient", body = ErrorDto),
        (status = 404, description = "Appointment not found", body = ErrorDto),
        (status = 409, description = "Slot already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reschedule_appointment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<RescheduleAppointmentDto>,
) -> Result<impl IntoResponse, AppError> {
    let patient = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Patient])
        .await?;

    let scheduled_at = parse_request_datetime(&payload.date, &payload.time)?;
    let appointment = AppointmentService::new(&state.db, &state.notifier)
        .reschedule(&patient, id, scheduled_at, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(appointment.into_dto())))
}

/// Delete an appointment along with its prescription and feedback.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    delete,
    path = "/appointment/{id}",
    tag = APPOINTMENT_TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Appointment ID")
    ),
    responses(
        (status = 204, description = "Appointment deleted"),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Appointment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_appointment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Admin])
        .await?;

    AppointmentService::new(&state.db, &state.notifier)
        .delete(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Open a checkout session for an unpaid appointment.
///
/// Calling this again replaces the previous session ID.
///
/// # Access Control
/// - The appointment's `Patient`
///
/// # Returns
/// - `200 OK` - Session ID, amount and checkout URL
/// - `400 Bad Request` - Appointment cancelled or already paid
/// - `403 Forbidden` - Not the appointment's patient
/// - `404 Not Found` - Appointment not found
#[utoipa::path(
    post,
    path = "/appointment/{id}/checkout",
    tag = APPOINTMENT_TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Appointment ID")
    ),
    responses(
        (status = 200, description = "Checkout session", body = CheckoutSessionDto),
        (status = 400, description = "Appointment cannot be paid", body = ErrorDto),
        (status = 403, description = "Not the appointment's patient", body = ErrorDto),
        (status = 404, description = "Appointment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn start_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let patient = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Patient])
        .await?;

    let session = PaymentService::new(&state.db)
        .start_checkout(&patient, id, &state.checkout_base_url)
        .await?;

    Ok((StatusCode::OK, Json(session.into_dto())))
}

/// Confirm payment of an appointment using its checkout session ID.
#[utoipa::path(
    post,
    path = "/appointment/{id}/payment/confirm",
    tag = APPOINTMENT_TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Appointment ID")
    ),
    request_body = ConfirmPaymentDto,
    responses(
        (status = 200, description = "Appointment paid", body = AppointmentDto),
        (status = 400, description = "Already paid or session mismatch", body = ErrorDto),
        (status = 403, description = "Not the appointment's patient", body = ErrorDto),
        (status = 404, description = "Appointment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn confirm_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<ConfirmPaymentDto>,
) -> Result<impl IntoResponse, AppError> {
    let patient = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Patient])
        .await?;

    PaymentService::new(&state.db)
        .confirm_payment(&patient, id, &payload.session_id)
        .await?;

    let appointment = AppointmentService::new(&state.db, &state.notifier)
        .get(&patient, id)
        .await?;

    Ok((StatusCode::OK, Json(appointment.into_dto())))
}
