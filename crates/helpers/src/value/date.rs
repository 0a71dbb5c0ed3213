use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{Error, Result};

/// A point in time with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JsDate {
    instant: DateTime<Utc>,
}

impl JsDate {
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    pub fn from_millis(millis: i64) -> Result<Self> {
        DateTime::from_timestamp_millis(millis)
            .map(|instant| Self { instant })
            .ok_or(Error::TimeOutOfRange(millis))
    }

    /// Milliseconds since the Unix epoch.
    pub fn get_time(&self) -> i64 {
        self.instant.timestamp_millis()
    }

    pub fn set_time(&mut self, millis: i64) -> Result<()> {
        *self = Self::from_millis(millis)?;
        Ok(())
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn to_iso_string(&self) -> String {
        self.instant.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl From<DateTime<Utc>> for JsDate {
    /// Truncates sub-millisecond precision.
    fn from(instant: DateTime<Utc>) -> Self {
        let millis = instant.timestamp_millis();
        Self::from_millis(millis).unwrap_or(Self { instant })
    }
}
