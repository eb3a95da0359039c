use indexmap::IndexMap;
use jiff::{
    ToSpan,
    civil::{Date, Weekday},
};
use serde::Deserialize;
use tracing::warn;

use crate::{
    error::{ApplicationError, ApplicationResult},
    runway::RunwayDesignator,
};

/// The Monday on or before `date`. Its `Display` form is the ISO date used as
/// schedule key.
pub fn week_start_of(date: Date) -> Date {
    let offset = i64::from(date.weekday().to_monday_zero_offset());
    date.saturating_sub(offset.days())
}

pub fn lookup_or<'a, V>(weeks: &'a IndexMap<Date, V>, date: Date, default: &'a V) -> &'a V {
    weeks.get(&week_start_of(date)).unwrap_or(default)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NightPair {
    pub primary: RunwayDesignator,
    pub secondary: RunwayDesignator,
}

impl NightPair {
    pub fn for_wind(&self, westerly: bool) -> RunwayDesignator {
        if westerly {
            self.primary
        } else {
            self.secondary
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyTable<V> {
    weeks: IndexMap<Date, V>,
    default: V,
}

impl<V> WeeklyTable<V> {
    pub fn new(weeks: IndexMap<Date, V>, default: V) -> Self {
        Self { weeks, default }
    }

    pub fn get(&self, date: Date) -> &V {
        lookup_or(&self.weeks, date, &self.default)
    }

    pub fn is_listed(&self, date: Date) -> bool {
        self.weeks.contains_key(&week_start_of(date))
    }
}

pub type RunwaySchedule = WeeklyTable<RunwayDesignator>;
pub type NightRunwaySchedule = WeeklyTable<NightPair>;

/// `[schedule]` as written in the config file.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ScheduleConfig {
    default_day: RunwayDesignator,
    default_night: NightPair,
    #[serde(default)]
    day: IndexMap<String, RunwayDesignator>,
    #[serde(default)]
    night: IndexMap<String, NightPair>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunwaySchedules {
    pub day: RunwaySchedule,
    pub night: NightRunwaySchedule,
}

impl RunwaySchedules {
    pub fn day_runway(&self, date: Date) -> RunwayDesignator {
        *self.day.get(date)
    }

    pub fn night_runway(&self, date: Date, westerly: bool) -> RunwayDesignator {
        self.night.get(date).for_wind(westerly)
    }
}

impl TryFrom<ScheduleConfig> for RunwaySchedules {
    type Error = ApplicationError;

    fn try_from(value: ScheduleConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            day: WeeklyTable::new(parse_weeks("day", value.day)?, value.default_day),
            night: WeeklyTable::new(parse_weeks("night", value.night)?, value.default_night),
        })
    }
}

fn parse_weeks<V>(
    table: &str,
    raw: IndexMap<String, V>,
) -> ApplicationResult<IndexMap<Date, V>> {
    raw.into_iter()
        .map(|(week, value)| {
            let date = week
                .parse::<Date>()
                .map_err(|source| ApplicationError::ScheduleWeek {
                    week: week.clone(),
                    source,
                })?;
            if date.weekday() != Weekday::Monday {
                warn!(table, week = %date, weekday = ?date.weekday(), "Schedule week does not start on a Monday and will never match");
            }
            Ok((date, value))
        })
        .collect()
}
