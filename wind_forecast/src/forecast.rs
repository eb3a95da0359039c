use std::str::FromStr;

use itertools::izip;
use jiff::civil::DateTime;
use serde::Deserialize;
use tracing::debug;

use crate::{error::ForecastError, sample::ForecastSample};

pub const KNOTS_UNIT: &str = "kn";

/// Body of an Open-Meteo `/v1/forecast` response requested with
/// `hourly=wind_speed_10m,wind_direction_10m`.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenMeteoForecast {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Option<String>,
    pub hourly: HourlyWind,
    pub hourly_units: Option<HourlyUnits>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyWind {
    pub time: Vec<String>,
    pub wind_speed_10m: Vec<Option<f64>>,
    pub wind_direction_10m: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyUnits {
    pub wind_speed_10m: Option<String>,
}

impl FromStr for OpenMeteoForecast {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let forecast: Self = serde_json::from_str(s)?;
        forecast.check_units()?;
        forecast.hourly.check_lengths()?;
        debug!(
            hours = forecast.hourly.time.len(),
            timezone = forecast.timezone.as_deref().unwrap_or("GMT"),
            "Decoded hourly wind forecast"
        );
        Ok(forecast)
    }
}

impl OpenMeteoForecast {
    fn check_units(&self) -> Result<(), ForecastError> {
        match self
            .hourly_units
            .as_ref()
            .and_then(|units| units.wind_speed_10m.as_deref())
        {
            Some(unit) if unit != KNOTS_UNIT => Err(ForecastError::UnexpectedUnit(unit.to_owned())),
            _ => Ok(()),
        }
    }

    /// One entry per forecast hour, aligned by index across the hourly arrays.
    pub fn samples(&self) -> impl Iterator<Item = Result<ForecastSample, ForecastError>> + '_ {
        izip!(
            &self.hourly.time,
            &self.hourly.wind_speed_10m,
            &self.hourly.wind_direction_10m
        )
        .map(|(time, speed, direction)| {
            let time = DateTime::from_str(time).map_err(|source| ForecastError::Time {
                time: time.clone(),
                source,
            })?;
            match (speed, direction) {
                (Some(speed), Some(direction)) => ForecastSample::new(time, *speed, *direction),
                _ => Err(ForecastError::MissingValue(time)),
            }
        })
    }
}

impl HourlyWind {
    fn check_lengths(&self) -> Result<(), ForecastError> {
        let times = self.time.len();
        let speeds = self.wind_speed_10m.len();
        let directions = self.wind_direction_10m.len();
        if times == speeds && times == directions {
            Ok(())
        } else {
            Err(ForecastError::MismatchedLengths {
                times,
                speeds,
                directions,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::datetime;

    use super::*;

    const RESPONSE: &str = r#"{
        "latitude": 51.48,
        "longitude": -0.46,
        "generationtime_ms": 0.05,
        "utc_offset_seconds": 3600,
        "timezone": "Europe/London",
        "timezone_abbreviation": "BST",
        "hourly_units": {"time": "iso8601", "wind_speed_10m": "kn", "wind_direction_10m": "°"},
        "hourly": {
            "time": ["2025-08-12T05:00", "2025-08-12T06:00", "2025-08-12T07:00"],
            "wind_speed_10m": [4.2, 7.5, null],
            "wind_direction_10m": [240, 255, 260]
        }
    }"#;

    #[test]
    fn test_decode_open_meteo_response() {
        let forecast = OpenMeteoForecast::from_str(RESPONSE).unwrap();
        assert_eq!(forecast.timezone.as_deref(), Some("Europe/London"));

        let samples = forecast.samples().collect::<Vec<_>>();
        assert_eq!(samples.len(), 3);

        let six = samples[1].as_ref().unwrap();
        assert_eq!(six.time, datetime(2025, 8, 12, 6, 0, 0, 0));
        assert_eq!(six.wind_speed_knots, 7.5);
        assert_eq!(six.wind_direction_degrees, 255.0);

        assert!(matches!(
            samples[2],
            Err(ForecastError::MissingValue(time)) if time == datetime(2025, 8, 12, 7, 0, 0, 0)
        ));
    }

    #[test]
    fn test_rejects_mismatched_arrays() {
        let body = r#"{"latitude": 51.48, "longitude": -0.46, "hourly": {
            "time": ["2025-08-12T05:00", "2025-08-12T06:00"],
            "wind_speed_10m": [4.2],
            "wind_direction_10m": [240, 255]
        }}"#;
        assert!(matches!(
            OpenMeteoForecast::from_str(body),
            Err(ForecastError::MismatchedLengths {
                times: 2,
                speeds: 1,
                directions: 2
            })
        ));
    }

    #[test]
    fn test_rejects_wrong_speed_unit() {
        let body = RESPONSE.replace(r#""wind_speed_10m": "kn""#, r#""wind_speed_10m": "km/h""#);
        assert!(matches!(
            OpenMeteoForecast::from_str(&body),
            Err(ForecastError::UnexpectedUnit(unit)) if unit == "km/h"
        ));
    }

    #[test]
    fn test_bad_time_is_reported_per_sample() {
        let body = RESPONSE.replace("2025-08-12T05:00", "yesterday");
        let forecast = OpenMeteoForecast::from_str(&body).unwrap();
        let samples = forecast.samples().collect::<Vec<_>>();
        assert!(matches!(samples[0], Err(ForecastError::Time { .. })));
        assert!(samples[1].is_ok());
    }

    #[test]
    fn test_garbage_body_is_a_decode_error() {
        assert!(matches!(
            OpenMeteoForecast::from_str("<html>rate limited</html>"),
            Err(ForecastError::Decode(_))
        ));
    }
}
