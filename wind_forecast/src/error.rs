use jiff::civil::DateTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Failed to decode forecast response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(
        "Hourly arrays differ in length: {times} times, {speeds} speeds, {directions} directions"
    )]
    MismatchedLengths {
        times: usize,
        speeds: usize,
        directions: usize,
    },
    #[error("Unexpected wind speed unit {0:?}, expected knots (kn)")]
    UnexpectedUnit(String),
    #[error("Failed to parse forecast time {time:?}: {source}")]
    Time { time: String, source: jiff::Error },
    #[error("No wind value reported for {0}")]
    MissingValue(DateTime),
    #[error("Wind out of range at {time}: {speed} kt from {direction}°")]
    OutOfRange {
        time: DateTime,
        speed: f64,
        direction: f64,
    },
}
