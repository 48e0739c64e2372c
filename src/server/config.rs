//! Environment-based application configuration.

use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_JWT_TTL_HOURS: i64 = 24;
const DEFAULT_CHECKOUT_BASE_URL: &str = "http://localhost:8080/checkout";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_SMTP_FROM: &str = "DocXpress <no-reply@docxpress.local>";

/// Outbound SMTP relay settings. Absent when `SMTP_HOST` is unset.
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
}

pub struct Config {
    pub database_url: String,
    pub bind_addr: String,

    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,

    pub checkout_base_url: String,

    pub smtp: Option<SmtpConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let smtp = match optional_var("SMTP_HOST") {
            Some(host) => Some(SmtpConfig {
                host,
                port: parsed_var("SMTP_PORT", DEFAULT_SMTP_PORT)?,
                username: optional_var("SMTP_USERNAME"),
                password: optional_var("SMTP_PASSWORD"),
                from: optional_var("SMTP_FROM").unwrap_or_else(|| DEFAULT_SMTP_FROM.to_string()),
            }),
            None => None,
        };

        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            bind_addr: optional_var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            jwt_secret: required_var("JWT_SECRET")?,
            jwt_ttl_hours: parsed_var("JWT_TTL_HOURS", DEFAULT_JWT_TTL_HOURS)?,
            checkout_base_url: optional_var("CHECKOUT_BASE_URL")
                .unwrap_or_else(|| DEFAULT_CHECKOUT_BASE_URL.to_string()),
            smtp,
        })
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parsed_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match optional_var(name) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
