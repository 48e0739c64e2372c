mod model;
mod server;

use tokio::net::TcpListener;

use crate::server::{
    config::Config, error::AppError, router, scheduler::reminders,
    service::{admin::code::AdminCodeService, auth::jwt::JwtService},
    startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let notifier = startup::setup_notifier(&config)?;
    let jwt = JwtService::new(&config.jwt_secret, config.jwt_ttl_hours);
    let admin_code_service = AdminCodeService::new();

    startup::check_for_admin(&db, &admin_code_service).await?;

    reminders::start_scheduler(db.clone(), notifier.clone()).await?;

    let app = router::router(AppState::new(
        db,
        jwt,
        notifier,
        admin_code_service,
        config.checkout_base_url.clone(),
    ));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
