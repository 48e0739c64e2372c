use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        feedback::{
            CreateFeedbackDto, DoctorFeedbackDto, FeedbackDto, PaginatedFeedbackDto,
            UpdateFeedbackVisibilityDto,
        },
    },
    server::{
        controller::param::{paginate, PaginationParam}, error::AppError, middleware::auth::AuthGuard,
        model::user::Role, service::feedback::FeedbackService, state::AppState,
    },
};

/// Tag for grouping feedback endpoints in OpenAPI documentation
pub static FEEDBACK_TAG: &str = "feedback";

/// Rate a completed appointment.
///
/// # Access Control
/// - `Patient` owning the appointment
///
/// # Returns
/// - `201 Created` - Stored feedback
/// - `400 Bad Request` - Rating outside 1..=5, appointment not completed or already rated
/// - `403 Forbidden` - Appointment belongs to another patient
/// - `404 Not Found` - Appointment not found
#[utoipa::path(
    post,
    path = "/feedback/create",
    tag = FEEDBACK_TAG,
    security(("bearer_auth" = [])),
    request_body = CreateFeedbackDto,
    responses(
        (status = 201, description = "Feedback created", body = FeedbackDto),
        (status = 400, description = "Invalid feedback", body = ErrorDto),
        (status = 403, description = "Not the appointment's patient", body = ErrorDto),
        (status = 404, description = "Appointment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateFeedbackDto>,
) -> Result<impl IntoResponse, AppError> {
    let patient = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Patient])
        .await?;

    let feedback = FeedbackService::new(&state.db)
        .create(
            patient.id,
            payload.appointment_id,
            payload.rating,
            payload.comment,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(feedback.into_dto())))
}

/// Visible feedback for a doctor with the average rating.
///
/// # Access Control
/// - Public
#[utoipa::path(
    get,
    path = "/feedback/doctor/{doctor_id}",
    tag = FEEDBACK_TAG,
    params(
        ("doctor_id" = i32, Path, description = "Doctor user ID")
    ),
    responses(
        (status = 200, description = "Doctor feedback", body = DoctorFeedbackDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_doctor_feedback(
    State(state): State<AppState>,
    Path(doctor_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let feedback = FeedbackService::new(&state.db)
        .get_for_doctor(doctor_id)
        .await?;

    Ok((StatusCode::OK, Json(feedback.into_dto())))
}

/// Every feedback entry including hidden ones.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/feedback/all",
    tag = FEEDBACK_TAG,
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("per_page" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of feedback", body = PaginatedFeedbackDto),
        (status = 400, description = "Page out of range", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Admin])
        .await?;

    let (page, per_page) = paginate(params.page, params.per_page)?;
    let feedback = FeedbackService::new(&state.db)
        .get_all(page, per_page)
        .await?;

    Ok((StatusCode::OK, Json(feedback.into_dto())))
}

/// Hide or unhide a feedback entry.
#[utoipa::path(
    put,
    path = "/feedback/{id}/visibility",
    tag = FEEDBACK_TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Feedback ID")
    ),
    request_body = UpdateFeedbackVisibilityDto,
    responses(
        (status = 200, description = "Visibility updated", body = FeedbackDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Feedback not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_feedback_visibility(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateFeedbackVisibilityDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Admin])
        .await?;

    let feedback = FeedbackService::new(&state.db)
        .set_hidden(id, payload.hidden)
        .await?;

    Ok((StatusCode::OK, Json(feedback.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/feedback/{id}",
    tag = FEEDBACK_TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Feedback ID")
    ),
    responses(
        (status = 204, description = "Feedback deleted"),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Feedback not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Role::Admin])
        .await?;

    FeedbackService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
