use crate::error::{Error, Result};
use chrono::Duration;
use chrono_tz::Tz;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://local.db?mode=rwc";
pub const DEFAULT_FRESHNESS_DAYS: i64 = 7;
pub const DEFAULT_DISPLAY_TIMEZONE: Tz = chrono_tz::Europe::Berlin;
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub inbound_password: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub dev_mode: bool,
    pub allowed_hosts: Vec<String>,
    pub freshness: Duration,
    pub display_timezone: Tz,
    pub static_dir: PathBuf,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let freshness_days: i64 = get_parse(&get, "STATUS_FRESHNESS_DAYS")?
            .unwrap_or(DEFAULT_FRESHNESS_DAYS);
        let freshness = Duration::try_days(freshness_days)
            .filter(|d| *d >= Duration::zero())
            .ok_or_else(|| {
                Error::Config(format!(
                    "Invalid value for STATUS_FRESHNESS_DAYS: {}",
                    freshness_days
                ))
            })?;

        let display_timezone = match get("DISPLAY_TIMEZONE") {
            Some(raw) => raw.trim().parse::<Tz>().map_err(|e| {
                Error::Config(format!("Invalid value for DISPLAY_TIMEZONE: {}", e))
            })?,
            None => DEFAULT_DISPLAY_TIMEZONE,
        };

        let log_format = match get("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(Error::Config(format!(
                    "Invalid value for LOG_FORMAT: {}",
                    other
                )))
            }
        };

        Ok(Self {
            port: get_parse(&get, "PORT")?
                .ok_or_else(|| missing("PORT"))?,
            inbound_password: get("TWILIO_INBOUND_PASSWORD")
                .ok_or_else(|| missing("TWILIO_INBOUND_PASSWORD"))?,
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            db_max_connections: get_parse(&get, "DB_MAX_CONNECTIONS")?
                .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
                .max(1),
            dev_mode: get("DEV_MODE").as_deref() == Some("1"),
            allowed_hosts: get("ALLOWED_HOSTS")
                .map(|raw| {
                    raw.split(',')
                        .map(|h| h.trim().to_ascii_lowercase())
                        .filter(|h| !h.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            freshness,
            display_timezone,
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            log_format,
        })
    }
}

fn missing(name: &str) -> Error {
    Error::Config(format!("${} must be set", name))
}

fn get_parse<T, G>(get: &G, name: &str) -> Result<Option<T>>
where
    G: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get(name)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn required_variables_only() {
        let config = config_from(&[("PORT", "8080"), ("TWILIO_INBOUND_PASSWORD", "pw")]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.inbound_password, "pw");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert!(!config.dev_mode);
        assert!(config.allowed_hosts.is_empty());
        assert_eq!(config.freshness, Duration::days(7));
        assert_eq!(config.display_timezone, chrono_tz::Europe::Berlin);
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn missing_port_is_fatal() {
        let err = config_from(&[("TWILIO_INBOUND_PASSWORD", "pw")]).unwrap_err();
        assert!(err.to_string().contains("$PORT must be set"));
    }

    #[test]
    fn empty_password_counts_as_missing() {
        let err = config_from(&[("PORT", "8080"), ("TWILIO_INBOUND_PASSWORD", "")]).unwrap_err();
        assert!(err.to_string().contains("$TWILIO_INBOUND_PASSWORD must be set"));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = config_from(&[("PORT", "http"), ("TWILIO_INBOUND_PASSWORD", "pw")]).unwrap_err();
        assert!(err.to_string().contains("Invalid value for PORT"));
    }

    #[test]
    fn optional_overrides() {
        let config = config_from(&[
            ("PORT", "5000"),
            ("TWILIO_INBOUND_PASSWORD", "pw"),
            ("DATABASE_URL", "postgres://localhost/status"),
            ("DEV_MODE", "1"),
            ("ALLOWED_HOSTS", "Status.Example.com, www.example.com,"),
            ("STATUS_FRESHNESS_DAYS", "3"),
            ("DISPLAY_TIMEZONE", "America/New_York"),
            ("STATIC_DIR", "/srv/static"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "postgres://localhost/status");
        assert!(config.dev_mode);
        assert_eq!(
            config.allowed_hosts,
            vec!["status.example.com".to_string(), "www.example.com".to_string()]
        );
        assert_eq!(config.freshness, Duration::days(3));
        assert_eq!(config.display_timezone, chrono_tz::America::New_York);
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn dev_mode_requires_exact_flag() {
        let config = config_from(&[
            ("PORT", "5000"),
            ("TWILIO_INBOUND_PASSWORD", "pw"),
            ("DEV_MODE", "true"),
        ])
        .unwrap();
        assert!(!config.dev_mode);
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let err = config_from(&[
            ("PORT", "5000"),
            ("TWILIO_INBOUND_PASSWORD", "pw"),
            ("DISPLAY_TIMEZONE", "Mars/Olympus_Mons"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("DISPLAY_TIMEZONE"));
    }
}
