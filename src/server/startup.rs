use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, data::user::UserRepository, error::AppError,
    service::{admin::code::AdminCodeService, notification::Notifier},
};

const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the global tracing subscriber.
///
/// Honors `RUST_LOG` when set and falls back to `info` otherwise.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the email notifier, or a log-only one when SMTP is not configured.
pub fn setup_notifier(config: &Config) -> Result<Notifier, AppError> {
    match &config.smtp {
        Some(smtp) => {
            tracing::info!("Sending email through {}:{}", smtp.host, smtp.port);
            Notifier::from_config(smtp)
        }
        None => {
            tracing::warn!("SMTP_HOST not set, emails will only be logged");
            Ok(Notifier::disabled())
        }
    }
}

/// Issues a one-time admin registration code when no admin account exists yet.
///
/// The code is written to the log; passing it as `admin_code` when registering with the
/// `admin` role creates the first administrator.
pub async fn check_for_admin(
    db: &DatabaseConnection,
    admin_code_service: &AdminCodeService,
) -> Result<(), AppError> {
    if UserRepository::new(db).admin_exists().await? {
        return Ok(());
    }

    let code = admin_code_service.generate().await;

    tracing::info!("No admin account found. Register with role \"admin\" and admin code: {}", code);

    Ok(())
}
