use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        reminder::{CreateReminderDto, ReminderDto, UpdateReminderDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{reminder::CreateReminderParam, user::Role},
        service::reminder::ReminderService,
        state::AppState,
    },
};

/// Tag for grouping medicine reminder endpoints in OpenAPI documentation
pub static REMINDER_TAG: &str = "reminder";

/// Create a medicine reminder.
///
/// Emails are sent at each dose time (UTC) on every day between `start_date` and
/// `end_date` while the reminder is active.
///
/// # Access Control
/// - `Patient`
///
/// # Returns
/// - `201 Created` - Stored reminder
/// - `400 Bad Request` - Empty name, no or duplicate times, malformed time or end before start
#[utoipa::path(
    post,
    path = "/reminder/add",
    tag = REMINDER_TAG,
    security(("bearer_auth" = [])),
    request_body = CreateReminderDto,
    responses(
        (status = 201, description = "Reminder created", body = ReminderDto),
        (status = 400, description = "Invalid reminder", body = ErrorDto),
        (status = 403, description = "User is not a patient", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_reminder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateReminderDto>,
) -> Result<impl IntoResponse, AppError> {
    let patient = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Patient])
        .await?;

    let param = CreateReminderParam::from_dto(patient.id, payload)?;
    let reminder = ReminderService::new(&state.db, &state.notifier)
        .create(param)
        .await?;

    Ok((StatusCode::CREATED, Json(reminder.into_dto())))
}

#[utoipa::path(
    get,
    path = "/reminder",
    tag = REMINDER_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own reminders", body = Vec<ReminderDto>),
        (status = 403, description = "User is not a patient", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_reminders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let patient = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Patient])
        .await?;

    let reminders = ReminderService::new(&state.db, &state.notifier)
        .get_own(patient.id)
        .await?;

    let reminder_dtos: Vec<ReminderDto> = reminders.into_iter().map(|r| r.into_dto()).collect();

    Ok((StatusCode::OK, Json(reminder_dtos)))
}

/// Pause or resume a reminder.
#[utoipa::path(
    put,
    path = "/reminder/{id}",
    tag = REMINDER_TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Reminder ID")
    ),
    request_body = UpdateReminderDto,
    responses(
        (status = 200, description = "Reminder updated", body = ReminderDto),
        (status = 403, description = "Reminder belongs to another patient", body = ErrorDto),
        (status = 404, description = "Reminder not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_reminder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReminderDto>,
) -> Result<impl IntoResponse, AppError> {
    let patient = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Patient])
        .await?;

    let reminder = ReminderService::new(&state.db, &state.notifier)
        .set_active(&patient, id, payload.active)
        .await?;

    Ok((StatusCode::OK, Json(reminder.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/reminder/{id}",
    tag = REMINDER_TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Reminder ID")
    ),
    responses(
        (status = 204, description = "Reminder deleted"),
        (status = 403, description = "Reminder belongs to another patient", body = ErrorDto),
        (status = 404, description = "Reminder not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_reminder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let patient = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Patient])
        .await?;

    ReminderService::new(&state.db, &state.notifier)
        .delete(&patient, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
