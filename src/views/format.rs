use chrono::{DateTime, FixedOffset, Local};
use serde_json::Value;

use crate::config::DisplayConfig;

const MEDIUM: &str = "%b %-d, %Y, %-I:%M:%S %p";

/// Time zone date-time cells are rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl DisplayZone {
    pub fn from_config(display: &DisplayConfig) -> Self {
        match display.utc_offset_minutes {
            None => DisplayZone::Local,
            Some(minutes) => match FixedOffset::east_opt(minutes.saturating_mul(60)) {
                Some(offset) => DisplayZone::Fixed(offset),
                None => {
                    tracing::warn!("UTC offset of {} minutes is out of range, using local time", minutes);
                    DisplayZone::Local
                }
            },
        }
    }

    /// Medium date-time, e.g. `Oct 19, 2026, 3:04:05 PM`.
    /// Anything that is not an RFC 3339 timestamp is returned as is.
    pub fn format_medium(&self, raw: &str) -> String {
        let Ok(parsed) = DateTime::parse_from_rfc3339(raw) else {
            return raw.to_string();
        };

        match self {
            DisplayZone::Local => parsed.with_timezone(&Local).format(MEDIUM).to_string(),
            DisplayZone::Fixed(offset) => parsed.with_timezone(offset).format(MEDIUM).to_string(),
        }
    }
}

/// Plain text for a cell value; null renders empty
pub fn text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
