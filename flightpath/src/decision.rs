use serde::Serialize;
use tracing::debug;
use wind_forecast::sample::ForecastSample;

use crate::{
    clock::ResolvedTime,
    runway::{RunwayDesignator, RunwaySide, RunwaySides},
    schedule::RunwaySchedules,
};

/// Below this speed the wind is treated as calm and westerly operations apply.
pub const CALM_WIND_KNOTS: f64 = 5.0;
/// Westerly sector, inclusive on both ends.
pub const WESTERLY_FROM_DEGREES: f64 = 200.0;
pub const WESTERLY_TO_DEGREES: f64 = 360.0;

pub const EASTERLY_MESSAGE: &str = "😴 No planes overhead — easterly ops expected.";
pub const HEAVY_ARRIVALS_ADDENDUM: &str = " 🚨 Heavy arrivals on both runways between 06:00–07:00.";

pub fn is_westerly(speed_knots: f64, direction_degrees: f64) -> bool {
    speed_knots < CALM_WIND_KNOTS
        || (WESTERLY_FROM_DEGREES..=WESTERLY_TO_DEGREES).contains(&direction_degrees)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub message: String,
    #[serde(rename = "runway")]
    pub runway_in_use: RunwayDesignator,
    pub wind_speed_knots: f64,
    pub wind_direction_degrees: f64,
    pub is_westerly: bool,
}

pub struct DecisionEngine<'a> {
    schedules: &'a RunwaySchedules,
    sides: &'a RunwaySides,
}

impl<'a> DecisionEngine<'a> {
    pub fn new(schedules: &'a RunwaySchedules, sides: &'a RunwaySides) -> Self {
        Self { schedules, sides }
    }

    pub fn decide(&self, time: &ResolvedTime, sample: &ForecastSample) -> Decision {
        let speed = sample.wind_speed_knots;
        let direction = sample.wind_direction_degrees;
        let westerly = is_westerly(speed, direction);

        let runway = if time.is_night() {
            if !self.schedules.night.is_listed(time.target_date) {
                debug!(target_date = %time.target_date, "Week missing from night schedule, using default pair");
            }
            self.schedules.night_runway(time.target_date, westerly)
        } else {
            if !self.schedules.day.is_listed(time.target_date) {
                debug!(target_date = %time.target_date, "Week missing from day schedule, using default runway");
            }
            self.schedules.day_runway(time.target_date)
        };

        let mut message = if westerly {
            match self.sides.side_of(runway) {
                RunwaySide::South => format!(
                    "🔊 Planes likely overhead on {} runway ({runway}) — {speed:.1} kt from {direction:.0}°.",
                    RunwaySide::South.label()
                ),
                RunwaySide::North => format!(
                    "✅ Planes on {} runway ({runway}) — {speed:.1} kt from {direction:.0}°.",
                    RunwaySide::North.label()
                ),
            }
        } else {
            EASTERLY_MESSAGE.to_string()
        };

        if time.is_changeover_hour() {
            message.push_str(HEAVY_ARRIVALS_ADDENDUM);
        }

        Decision {
            message,
            runway_in_use: runway,
            wind_speed_knots: speed,
            wind_direction_degrees: direction,
            is_westerly: westerly,
        }
    }
}
