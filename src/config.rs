use std::env;
use chrono_tz::Tz;

/// Knobs that change how the scheduling engine validates and expands bookings.
#[derive(Clone, Debug)]
pub struct SchedulingPolicy {
    /// Timezone used to decide what "today" is for past-date checks and cascades.
    pub timezone: Tz,
    /// Occurrence window for series without an end date.
    pub series_horizon_weeks: u32,
    /// Upper bound for series with an explicit end date.
    pub max_series_weeks: u32,
    pub enforce_availability: bool,
    pub reject_midnight_rollover: bool,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::UTC,
            series_horizon_weeks: 26,
            max_series_weeks: 104,
            enforce_availability: true,
            reject_midnight_rollover: false,
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub policy: SchedulingPolicy,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = SchedulingPolicy::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://scheduling.db?mode=rwc".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            policy: SchedulingPolicy {
                timezone: env::var("SCHEDULER_TIMEZONE")
                    .map(|tz| tz.parse().expect("SCHEDULER_TIMEZONE must be an IANA timezone name"))
                    .unwrap_or(defaults.timezone),
                series_horizon_weeks: env::var("SERIES_HORIZON_WEEKS")
                    .map(|v| v.parse().expect("SERIES_HORIZON_WEEKS must be a number"))
                    .unwrap_or(defaults.series_horizon_weeks),
                max_series_weeks: env::var("MAX_SERIES_WEEKS")
                    .map(|v| v.parse().expect("MAX_SERIES_WEEKS must be a number"))
                    .unwrap_or(defaults.max_series_weeks),
                enforce_availability: env_flag("ENFORCE_AVAILABILITY", defaults.enforce_availability),
                reject_midnight_rollover: env_flag("REJECT_MIDNIGHT_ROLLOVER", defaults.reject_midnight_rollover),
            },
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(v) => matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}
