use chrono::{DateTime, Local, NaiveDateTime, Utc};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimeError {
    #[error("unrecognised timestamp: {0:?}")]
    Unparseable(String),
}

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an API timestamp as UTC. Offsets are honoured when present;
/// timestamps without one are taken to be UTC.
pub fn parse_utc(text: &str) -> Result<DateTime<Utc>, TimeError> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimeError::Unparseable(text.to_string()))
}

/// API timestamp converted to the machine's local zone.
pub fn local_time(text: &str) -> Result<DateTime<Local>, TimeError> {
    parse_utc(text).map(|dt| dt.with_timezone(&Local))
}
