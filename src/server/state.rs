//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into each handler through Axum's
//! state extraction. Every field is cheap to clone: the database connection is a pool,
//! and the services share their internals through `Arc`.

use sea_orm::DatabaseConnection;

use super::service::{
    admin::code::AdminCodeService, auth::jwt::JwtService, notification::Notifier,
};

/// Shared resources available to every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// Signs and verifies bearer tokens.
    pub jwt: JwtService,

    /// Sends appointment emails, or logs them when SMTP is not configured.
    pub notifier: Notifier,

    /// Holds the one-time code that allows registering the first admin.
    pub admin_code_service: AdminCodeService,

    /// Base URL that checkout session IDs are appended to.
    pub checkout_base_url: String,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        jwt: JwtService,
        notifier: Notifier,
        admin_code_service: AdminCodeService,
        checkout_base_url: String,
    ) -> Self {
        Self {
            db,
            jwt,
            notifier,
            admin_code_service,
            checkout_base_url,
        }
    }
}
