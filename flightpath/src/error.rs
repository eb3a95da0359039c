use std::io;

use config::ConfigError;
use thiserror::Error;
use wind_forecast::error::ForecastError;

pub(crate) type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub(crate) enum ApplicationError {
    #[error("Error regarding config: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("System input/output error: {0}")]
    IoError(#[from] io::Error),
    #[error("Error with reqwest: {0}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("Request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },
    #[error("Failed to read forecast: {0}")]
    ForecastError(#[from] ForecastError),
    #[error("Time error: {0}")]
    TimeError(#[from] jiff::Error),
    #[error("Schedule week {week:?} is not a date: {source}")]
    ScheduleWeek { week: String, source: jiff::Error },
    #[error("Failed to serialize result: {0}")]
    SerializeError(#[from] serde_json::Error),
}
