use crate::booked::MalformedPolicy;
use crate::clock::Zone;
use std::{env, path::PathBuf};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BOOKED_DATES_PATH: &str = "data/booked_dates.json";

#[derive(Debug, Error)]
#[error("invalid {name}: {reason}")]
pub struct ConfigError {
    pub name: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Url(String),
    Path(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub source: SourceConfig,
    pub zone: Zone,
    pub policy: MalformedPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// `BOOKED_DATES_URL` wins over `BOOKED_DATES_PATH` when both are set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|err| ConfigError {
                name: "PORT",
                reason: err.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let source = match (lookup("BOOKED_DATES_URL"), lookup("BOOKED_DATES_PATH")) {
            (Some(url), _) if !url.trim().is_empty() => SourceConfig::Url(url.trim().to_string()),
            (_, Some(path)) if !path.trim().is_empty() => SourceConfig::Path(PathBuf::from(path)),
            _ => SourceConfig::Path(PathBuf::from(DEFAULT_BOOKED_DATES_PATH)),
        };

        let zone = parse_var(&lookup, "CALENDAR_TZ_OFFSET")?.unwrap_or_default();
        let policy = parse_var(&lookup, "MALFORMED_DATES")?.unwrap_or_default();

        Ok(Self {
            port,
            source,
            zone,
            policy,
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr<Err = String>,
{
    lookup(name)
        .map(|value| value.parse::<T>().map_err(|reason| ConfigError { name, reason }))
        .transpose()
}
