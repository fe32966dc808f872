use std::fmt;
use chrono::DateTime;

const HEADER_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";
const DISPLAY_FORMAT: &str = "%a, %d %b %Y %I:%M %p";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    InvalidTimestamp(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "timestamp format error: {}",
            match self {
                FormatError::InvalidTimestamp(s) => s,
            }
        )
    }
}

impl std::error::Error for FormatError {}

/// Convert a message header timestamp, e.g. "Tue, 01 Oct 2024 14:05:00 +0530",
/// into the 12-hour display form "Tue, 01 Oct 2024 02:05 PM".
pub(crate) fn format_datetime(datetime_str: &str) -> Result<String, FormatError> {
    let parsed = DateTime::parse_from_str(datetime_str, HEADER_FORMAT)
        .map_err(|e| FormatError::InvalidTimestamp(format!("'{}': {}", datetime_str, e)))?;
    Ok(parsed.format(DISPLAY_FORMAT).to_string())
}
