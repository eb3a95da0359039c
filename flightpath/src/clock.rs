use jiff::{
    Zoned,
    civil::{Date, DateTime},
    tz::TimeZone,
};

use crate::error::ApplicationResult;

/// Local hour at which the daily runway alternation changes over.
pub const CHANGEOVER_HOUR: i8 = 6;
/// Local hour from which the night schedule applies, until the changeover.
pub const NIGHT_START_HOUR: i8 = 22;

/// "Now" in airport local time, and the date whose changeover is forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTime {
    pub now: Zoned,
    pub target_date: Date,
}

impl ResolvedTime {
    /// Before the changeover the next one is today's, after it tomorrow's.
    pub fn resolve(now: &Zoned, airport_tz: &TimeZone) -> ApplicationResult<Self> {
        let now = now.with_time_zone(airport_tz.clone());
        let target_date = if now.hour() < CHANGEOVER_HOUR {
            now.date()
        } else {
            now.date().tomorrow()?
        };
        Ok(Self { now, target_date })
    }

    pub fn target_hour(&self) -> DateTime {
        self.target_date.at(CHANGEOVER_HOUR, 0, 0, 0)
    }

    pub fn local_hour(&self) -> i8 {
        self.now.hour()
    }

    pub fn is_night(&self) -> bool {
        let hour = self.local_hour();
        hour >= NIGHT_START_HOUR || hour < CHANGEOVER_HOUR
    }

    pub fn is_changeover_hour(&self) -> bool {
        self.local_hour() == CHANGEOVER_HOUR
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, datetime};

    use super::*;

    fn london() -> TimeZone {
        TimeZone::get("Europe/London").unwrap()
    }

    fn resolve_local(local: DateTime) -> ResolvedTime {
        let now = local.to_zoned(london()).unwrap();
        ResolvedTime::resolve(&now, &london()).unwrap()
    }

    #[test]
    fn test_target_is_today_before_changeover() {
        let time = resolve_local(datetime(2025, 8, 12, 5, 30, 0, 0));
        assert_eq!(time.target_date, date(2025, 8, 12));
        assert_eq!(time.target_hour(), datetime(2025, 8, 12, 6, 0, 0, 0));
        assert!(time.is_night());
        assert!(!time.is_changeover_hour());
    }

    #[test]
    fn test_target_is_tomorrow_from_changeover() {
        let time = resolve_local(datetime(2025, 8, 12, 6, 0, 0, 0));
        assert_eq!(time.target_date, date(2025, 8, 13));
        assert!(time.is_changeover_hour());
        assert!(!time.is_night());

        let late = resolve_local(datetime(2025, 8, 31, 23, 15, 0, 0));
        assert_eq!(late.target_date, date(2025, 9, 1));
        assert!(late.is_night());
    }

    #[test]
    fn test_night_window_edges() {
        assert!(!resolve_local(datetime(2025, 8, 12, 21, 59, 0, 0)).is_night());
        assert!(resolve_local(datetime(2025, 8, 12, 22, 0, 0, 0)).is_night());
        assert!(resolve_local(datetime(2025, 8, 12, 0, 0, 0, 0)).is_night());
        assert!(!resolve_local(datetime(2025, 8, 12, 14, 0, 0, 0)).is_night());
    }

    #[test]
    fn test_converts_instant_to_airport_time_across_dst() {
        // London runs on BST (UTC+1) in summer and on GMT in winter.
        let summer = "2025-08-12T04:30:00+00:00[UTC]".parse::<Zoned>().unwrap();
        let time = ResolvedTime::resolve(&summer, &london()).unwrap();
        assert_eq!(time.local_hour(), 5);

        let winter = "2025-12-12T05:30:00+00:00[UTC]".parse::<Zoned>().unwrap();
        let time = ResolvedTime::resolve(&winter, &london()).unwrap();
        assert_eq!(time.local_hour(), 5);
        assert_eq!(time.target_date, date(2025, 12, 12));

        // In summer 05:30 UTC is already past the 06:00 local changeover.
        let summer_late = "2025-08-12T05:30:00+00:00[UTC]".parse::<Zoned>().unwrap();
        let time = ResolvedTime::resolve(&summer_late, &london()).unwrap();
        assert_eq!(time.local_hour(), 6);
        assert_eq!(time.target_date, date(2025, 8, 13));
    }
}
