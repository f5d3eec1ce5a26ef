//! Process-wide configuration loaded from the environment.
//!
//! `AppConfig` is read once (optionally from a `.env` file) and cached in a
//! `OnceCell`. Library crates never read it directly; the API binary builds an
//! `AbsencePolicy` and a database URL from it and hands those down.

use once_cell::sync::OnceCell;
use serde::Serialize;
use std::env;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("WARNING_THRESHOLD_MINUTES ({warning}) must not exceed DANGER_THRESHOLD_MINUTES ({danger})")]
    ThresholdOrder { warning: i64, danger: i64 },
}

#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    pub project_name: String,
    pub env: String,
    pub log_level: String,
    pub log_file: String,
    pub log_dir: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    /// Minutes of lateness plus checkout a student may accrue per session.
    pub absence_budget_minutes: i64,
    pub warning_threshold_minutes: i64,
    pub danger_threshold_minutes: i64,
}

static CONFIG: OnceCell<AppConfig> = OnceCell::new();

impl AppConfig {
    /// Reads every setting from the process environment, applying defaults
    /// for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let warning_threshold_minutes = parse_var("WARNING_THRESHOLD_MINUTES", 30)?;
        let danger_threshold_minutes = parse_var("DANGER_THRESHOLD_MINUTES", 45)?;
        if warning_threshold_minutes > danger_threshold_minutes {
            return Err(ConfigError::ThresholdOrder {
                warning: warning_threshold_minutes,
                danger: danger_threshold_minutes,
            });
        }

        Ok(Self {
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "rollcall".into()),
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "rollcall.log".into()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".into()),
            log_to_stdout: parse_var("LOG_TO_STDOUT", false)?,
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/rollcall.db".into()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: parse_var("PORT", 3000)?,
            absence_budget_minutes: parse_var("ABSENCE_BUDGET_MINUTES", 45)?,
            warning_threshold_minutes,
            danger_threshold_minutes,
        })
    }

    /// Loads `.env` (if present) and initializes the global configuration.
    ///
    /// Calling this more than once returns the configuration from the first
    /// successful call.
    pub fn init() -> Result<&'static Self, ConfigError> {
        dotenvy::dotenv().ok();
        CONFIG.get_or_try_init(Self::from_env)
    }

    /// One-line startup banner naming the deployment environment.
    pub fn banner(&self) -> String {
        format!(
            "Starting {} ({}) on http://{}:{}",
            self.project_name, self.env, self.host, self.port
        )
    }

    /// Database URL understood by sea-orm. Bare paths are treated as SQLite
    /// files and opened in read-write-create mode.
    pub fn database_url(&self) -> String {
        let path = &self.database_path;
        if path.starts_with("sqlite:") || path.starts_with("postgres://") || path.starts_with("mysql://") {
            path.clone()
        } else {
            format!("sqlite://{path}?mode=rwc")
        }
    }
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        Err(_) => Ok(default),
    }
}
