use jiff::civil::DateTime;

use crate::error::ForecastError;

/// One hour of forecast wind, in the local time of the requested zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastSample {
    pub time: DateTime,
    pub wind_speed_knots: f64,
    pub wind_direction_degrees: f64,
}

impl ForecastSample {
    pub fn new(
        time: DateTime,
        wind_speed_knots: f64,
        wind_direction_degrees: f64,
    ) -> Result<Self, ForecastError> {
        let speed_ok = wind_speed_knots.is_finite() && wind_speed_knots >= 0.0;
        let direction_ok = (0.0..=360.0).contains(&wind_direction_degrees);
        if !speed_ok || !direction_ok {
            return Err(ForecastError::OutOfRange {
                time,
                speed: wind_speed_knots,
                direction: wind_direction_degrees,
            });
        }
        Ok(Self {
            time,
            wind_speed_knots,
            wind_direction_degrees,
        })
    }

    /// Hour precision match, minutes and seconds are ignored.
    pub fn is_at_hour(&self, target: DateTime) -> bool {
        self.time.date() == target.date() && self.time.hour() == target.hour()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    samples: Vec<ForecastSample>,
}

impl Forecast {
    pub fn sample_at(&self, target: DateTime) -> Option<&ForecastSample> {
        self.samples.iter().find(|sample| sample.is_at_hour(target))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl FromIterator<ForecastSample> for Forecast {
    fn from_iter<I: IntoIterator<Item = ForecastSample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}
