use std::env;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::loans::{LoanPolicy, DEFAULT_MINIMUM_SCORE, DEFAULT_SALARY_THRESHOLD};

/// Distinguishes runtime behavior for different stages of deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the loan desk.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub policy: LoanPolicy,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let salary_threshold = match env::var("LOANS_SALARY_THRESHOLD") {
            Ok(raw) => Decimal::from_str(raw.trim())
                .map_err(|_| ConfigError::InvalidSalaryThreshold { value: raw })?,
            Err(_) => Decimal::from(DEFAULT_SALARY_THRESHOLD),
        };
        if salary_threshold.is_sign_negative() {
            return Err(ConfigError::InvalidSalaryThreshold {
                value: salary_threshold.to_string(),
            });
        }

        let minimum_score = match env::var("LOANS_MINIMUM_SCORE") {
            Ok(raw) => raw
                .trim()
                .parse::<i32>()
                .map_err(|_| ConfigError::InvalidMinimumScore { value: raw })?,
            Err(_) => DEFAULT_MINIMUM_SCORE,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            policy: LoanPolicy::new(salary_threshold, minimum_score),
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSalaryThreshold { value: String },
    InvalidMinimumScore { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSalaryThreshold { value } => write!(
                f,
                "LOANS_SALARY_THRESHOLD must be a non-negative decimal (found '{}')",
                value
            ),
            ConfigError::InvalidMinimumScore { value } => write!(
                f,
                "LOANS_MINIMUM_SCORE must be a whole number (found '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
