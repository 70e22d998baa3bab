use chrono::{FixedOffset, Local, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

/// Time zone the calendar reads "today" and offset timestamps in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl Zone {
    pub fn today(&self) -> NaiveDate {
        match self {
            Zone::Local => Local::now().date_naive(),
            Zone::Fixed(offset) => Utc::now().with_timezone(offset).date_naive(),
        }
    }
}

impl FromStr for Zone {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("local") {
            return Ok(Zone::Local);
        }
        value
            .parse::<FixedOffset>()
            .map(Zone::Fixed)
            .map_err(|err| format!("{value:?} is not \"local\" or an offset like +10:00 ({err})"))
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Local => f.write_str("local"),
            Zone::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    zone: Zone,
}

impl SystemClock {
    pub fn new(zone: Zone) -> Self {
        Self { zone }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        self.zone.today()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
