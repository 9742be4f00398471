use chrono::Duration;
use chrono_tz::Tz;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Address reminders are sent from
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Number of records fetched per round trip when scanning the event store
    pub scan_page_size: i64,
    /// How often the reminder job looks for due reminders
    pub reminder_check_interval: std::time::Duration,
    /// How far ahead of an occurrence its reminder is sent
    pub reminder_lookahead: Duration,
    /// Timezone used for timestamps stored without an offset and for the
    /// times shown in reminder mails
    pub reminder_timezone: Tz,
    /// Mail relay used for reminders. Reminders are only logged when this is `None`.
    pub smtp: Option<SmtpConfig>,
    /// Upper bound for delivering a single reminder mail
    pub email_timeout: std::time::Duration,
}

fn parse_env_or<T: FromStr + std::fmt::Display + Copy>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

/// One year
const MAX_REMINDER_LOOKAHEAD_MINUTES: i64 = 366 * 24 * 60;

fn reminder_lookahead(minutes: i64) -> Duration {
    let clamped = minutes.clamp(0, MAX_REMINDER_LOOKAHEAD_MINUTES);
    if clamped != minutes {
        warn!(
            "The given REMINDER_LOOKAHEAD_MINUTES: {} is out of range, using {} instead.",
            minutes, clamped
        );
    }
    Duration::minutes(clamped)
}

impl Config {
    pub fn new() -> Self {
        let port = parse_env_or("PORT", 5000_usize);
        let scan_page_size = parse_env_or("EVENT_SCAN_PAGE_SIZE", 100_i64).max(1);
        let reminder_check_interval_secs = parse_env_or("REMINDER_CHECK_INTERVAL_SECS", 60_u64);
        let reminder_lookahead_minutes = parse_env_or("REMINDER_LOOKAHEAD_MINUTES", 60_i64);
        let email_timeout_secs = parse_env_or("EMAIL_TIMEOUT_SECS", 10_u64);

        let reminder_timezone = match std::env::var("REMINDER_TIMEZONE") {
            Ok(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given REMINDER_TIMEZONE: {} is not a valid IANA timezone, falling back to UTC.",
                        tz
                    );
                    Tz::UTC
                }
            },
            Err(_) => Tz::UTC,
        };

        Self {
            port,
            scan_page_size,
            reminder_check_interval: std::time::Duration::from_secs(
                reminder_check_interval_secs.max(1),
            ),
            reminder_lookahead: reminder_lookahead(reminder_lookahead_minutes),
            reminder_timezone,
            smtp: Self::smtp_from_env(),
            email_timeout: std::time::Duration::from_secs(email_timeout_secs),
        }
    }

    fn smtp_from_env() -> Option<SmtpConfig> {
        let host = std::env::var("EMAIL_HOST").ok();
        let from = std::env::var("EMAIL_FROM").ok();
        match (host, from) {
            (Some(host), Some(from)) => Some(SmtpConfig {
                host,
                port: parse_env_or("EMAIL_PORT", 587_u16),
                username: std::env::var("EMAIL_USER").ok(),
                password: std::env::var("EMAIL_PASS").ok(),
                from,
            }),
            _ => {
                info!("EMAIL_HOST and EMAIL_FROM env vars were not both provided. Reminder emails will only be logged.");
                None
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
