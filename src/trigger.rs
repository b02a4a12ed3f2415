use crate::config::Config;
use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use entity::seasons;

/// Turns a frequently invoked process into a once-a-day action.
///
/// The gate opens only during the configured minute of the configured zone;
/// a season is then still skipped if it was already advanced that day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gate {
    timezone: Tz,
    hour: u32,
    minute: u32,
}

impl Gate {
    pub fn new(timezone: Tz, hour: u32, minute: u32) -> Self {
        Self {
            timezone,
            hour,
            minute,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.timezone, config.sim_hour, config.sim_minute)
    }

    /// The current civil time in the gate's zone.
    pub fn now(&self) -> DateTime<Tz> {
        self.localize(Utc::now())
    }

    pub fn localize<Z: TimeZone>(&self, instant: DateTime<Z>) -> DateTime<Tz> {
        instant.with_timezone(&self.timezone)
    }

    pub fn is_open(&self, now: &DateTime<Tz>) -> bool {
        let now = self.localize(*now);
        now.hour() == self.hour && now.minute() == self.minute
    }

    /// The civil date the gate counts days by.
    pub fn today(&self, now: &DateTime<Tz>) -> NaiveDate {
        self.localize(*now).date_naive()
    }
}

pub fn already_advanced(season: &seasons::Model, today: NaiveDate) -> bool {
    season.last_sim_local_date == Some(today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Chicago;
    use entity::seasons::Status;
    use uuid::Uuid;

    fn chicago(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
        Chicago.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn opens_only_on_the_exact_minute() {
        let gate = Gate::new(Chicago, 19, 0);

        assert!(gate.is_open(&chicago(2024, 9, 12, 19, 0)));
        assert!(!gate.is_open(&chicago(2024, 9, 12, 19, 1)));
        assert!(!gate.is_open(&chicago(2024, 9, 12, 18, 59)));
        assert!(!gate.is_open(&chicago(2024, 9, 12, 7, 0)));
    }

    #[test]
    fn compares_in_the_gate_zone() {
        let gate = Gate::new(Chicago, 19, 0);

        // 19:00 CDT is 00:00 UTC the next day
        let utc = Utc.with_ymd_and_hms(2024, 9, 13, 0, 0, 0).unwrap();
        let now = gate.localize(utc);

        assert!(gate.is_open(&now));
        assert_eq!(gate.today(&now), NaiveDate::from_ymd_opt(2024, 9, 12).unwrap());
    }

    #[test]
    fn follows_daylight_saving() {
        let gate = Gate::new(Chicago, 19, 0);

        // in January Chicago is UTC-6
        let utc = Utc.with_ymd_and_hms(2025, 1, 16, 1, 0, 0).unwrap();
        assert!(gate.is_open(&gate.localize(utc)));

        let utc = Utc.with_ymd_and_hms(2025, 1, 16, 0, 0, 0).unwrap();
        assert!(!gate.is_open(&gate.localize(utc)));
    }

    #[test]
    fn date_guard() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 12).unwrap();
        let mut season = seasons::Model {
            id: Uuid::nil(),
            league_id: Uuid::nil(),
            season_no: 1,
            status: Status::Regular,
            week: Some(2),
            last_sim_local_date: None,
            sim_hour: None,
            sim_min: None,
            tz: None,
        };

        assert!(!already_advanced(&season, today));

        season.last_sim_local_date = today.pred_opt();
        assert!(!already_advanced(&season, today));

        season.last_sim_local_date = Some(today);
        assert!(already_advanced(&season, today));
    }
}
