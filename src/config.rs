use crate::error::{self, Result};
use chrono_tz::Tz;
use reqwest::Url;
use std::{env, fmt};
use validator::Validate;

pub const STORE_URL: &str = "SUPABASE_URL";
pub const SERVICE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const SIM_TZ: &str = "HBFL_SIM_TZ";
pub const SIM_HOUR: &str = "HBFL_SIM_HOUR";
pub const SIM_MINUTE: &str = "HBFL_SIM_MINUTE";

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Chicago;
pub const DEFAULT_SIM_HOUR: u32 = 19;
pub const DEFAULT_SIM_MINUTE: u32 = 0;

/// Everything the simulator needs from its environment.
///
/// Built once in `main` and handed to the store and the controller; nothing
/// reads the environment after that.
#[derive(Clone, Validate)]
pub struct Config {
    pub store_url: Url,
    pub service_key: String,
    pub timezone: Tz,
    #[validate(range(max = 23))]
    pub sim_hour: u32,
    #[validate(range(max = 59))]
    pub sim_minute: u32,
}

impl Config {
    pub fn new(store_url: Url, service_key: impl Into<String>) -> Self {
        Self {
            store_url,
            service_key: service_key.into(),
            timezone: DEFAULT_TIMEZONE,
            sim_hour: DEFAULT_SIM_HOUR,
            sim_minute: DEFAULT_SIM_MINUTE,
        }
    }

    pub fn with_sim_time(mut self, hour: u32, minute: u32) -> Result<Self> {
        self.sim_hour = hour;
        self.sim_minute = minute;

        self.validate().map_err(|error| {
            warn!("invalid sim time {hour}:{minute}: {error}");
            error::INVALID_SIM_TIME
        })?;

        Ok(self)
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let store_url = lookup(STORE_URL).ok_or(error::MISSING_STORE_URL)?;
        let service_key = lookup(SERVICE_KEY).ok_or(error::MISSING_SERVICE_KEY)?;

        let store_url = Url::parse(store_url.trim()).map_err(|error| {
            warn!("{STORE_URL} is invalid: {error}");
            error::INVALID_STORE_URL
        })?;

        let mut config = Self::new(store_url, service_key);

        if let Some(timezone) = lookup(SIM_TZ) {
            config.timezone = timezone.trim().parse().map_err(|error| {
                warn!("{SIM_TZ} is invalid: {error}");
                error::INVALID_TIMEZONE
            })?;
        }

        let hour = parse_time_part(lookup(SIM_HOUR), DEFAULT_SIM_HOUR)?;
        let minute = parse_time_part(lookup(SIM_MINUTE), DEFAULT_SIM_MINUTE)?;

        config.with_sim_time(hour, minute)
    }

    /// The `/rest/v1/{table}` endpoint of a collection.
    pub fn endpoint(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.store_url.as_str().trim_end_matches('/'),
            table
        )
    }
}

fn parse_time_part(value: Option<String>, default: u32) -> Result<u32> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| error::INVALID_SIM_TIME),
        None => Ok(default),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("store_url", &self.store_url.as_str())
            .field("service_key", &"<redacted>")
            .field("timezone", &self.timezone)
            .field("sim_hour", &self.sim_hour)
            .field("sim_minute", &self.sim_minute)
            .finish()
    }
}
