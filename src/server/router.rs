use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        admin, appointment, auth, doctor, feedback, health, medical_history, prescription,
        reminder, user,
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DocXpress API",
        description = "Doctor appointment booking, prescriptions and reminders"
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

fn api_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(health::health))
        .routes(routes!(auth::register))
        .routes(routes!(auth::login))
        .routes(routes!(user::get_me, user::update_me))
        .routes(routes!(user::change_password))
        .routes(routes!(user::get_all_users))
        .routes(routes!(user::delete_user))
        .routes(routes!(doctor::upsert_profile, doctor::get_own_profile))
        .routes(routes!(doctor::list_doctors))
        .routes(routes!(doctor::get_doctor))
        .routes(routes!(doctor::get_free_slots))
        .routes(routes!(admin::get_doctors))
        .routes(routes!(admin::set_doctor_status))
        .routes(routes!(admin::get_stats))
        .routes(routes!(appointment::book_appointment))
        .routes(routes!(appointment::get_patient_appointments))
        .routes(routes!(appointment::get_doctor_appointments))
        .routes(routes!(appointment::get_all_appointments))
        .routes(routes!(
            appointment::get_appointment,
            appointment::delete_appointment
        ))
        .routes(routes!(appointment::update_appointment_status))
        .routes(routes!(appointment::reschedule_appointment))
        .routes(routes!(appointment::start_checkout))
        .routes(routes!(appointment::confirm_payment))
        .routes(routes!(prescription::create_prescription))
        .routes(routes!(prescription::get_patient_prescriptions))
        .routes(routes!(prescription::get_doctor_prescriptions))
        .routes(routes!(
            prescription::get_prescription,
            prescription::update_prescription,
            prescription::delete_prescription
        ))
        .routes(routes!(medical_history::create_record))
        .routes(routes!(medical_history::get_own_records))
        .routes(routes!(medical_history::get_patient_records))
        .routes(routes!(
            medical_history::update_record,
            medical_history::delete_record
        ))
        .routes(routes!(feedback::create_feedback))
        .routes(routes!(feedback::get_doctor_feedback))
        .routes(routes!(feedback::get_all_feedback))
        .routes(routes!(feedback::set_feedback_visibility))
        .routes(routes!(feedback::delete_feedback))
        .routes(routes!(reminder::create_reminder))
        .routes(routes!(reminder::get_reminders))
        .routes(routes!(reminder::update_reminder, reminder::delete_reminder))
}

/// Builds the application router with Swagger UI mounted at `/swagger-ui`.
pub fn router(state: AppState) -> Router {
    let (api, openapi) = api_router().split_for_parts();

    api.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expected: endpoints from every module and the bearer scheme appear in the document
    #[test]
    fn openapi_lists_endpoints() {
        let (_, openapi) = api_router().split_for_parts();

        for path in [
            "/health",
            "/user/register",
            "/doc/{id}/slots",
            "/admin/stats",
            "/appointment/{id}/payment/confirm",
            "/prescription/{id}",
            "/history/patient/{patient_id}",
            "/feedback/{id}/visibility",
            "/reminder/{id}",
        ] {
            assert!(openapi.paths.paths.contains_key(path), "missing {path}");
        }

        let components = openapi.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
