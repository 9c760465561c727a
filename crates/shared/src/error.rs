use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level `error` payload returned by the scorer with a success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ErrorPayload {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            error_code: None,
            timestamp: None,
        }
    }

    /// Parses `timestamp` as RFC 3339, HTTP-date, or a naive ISO datetime (assumed UTC).
    pub fn reported_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.as_deref()?.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        if let Ok(ts) = DateTime::parse_from_rfc2822(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SemanticError {
    pub message: String,
    pub code: Option<String>,
}

impl From<ErrorPayload> for SemanticError {
    fn from(value: ErrorPayload) -> Self {
        Self {
            message: value.error,
            code: value.error_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_timestamp_formats() {
        let mut payload = ErrorPayload::new("boom");

        payload.timestamp = Some("2024-03-01T12:30:00Z".into());
        assert_eq!(payload.reported_at().map(|t| t.hour()), Some(12));

        payload.timestamp = Some("Fri, 01 Mar 2024 12:30:00 GMT".into());
        assert_eq!(payload.reported_at().map(|t| t.day()), Some(1));

        payload.timestamp = Some("2024-03-01T12:30:00.123456".into());
        assert_eq!(payload.reported_at().map(|t| t.minute()), Some(30));

        payload.timestamp = Some("yesterday".into());
        assert_eq!(payload.reported_at(), None);
    }

    #[test]
    fn semantic_error_displays_message_verbatim() {
        let err = SemanticError::from(ErrorPayload::new("サーバー内部エラー"));
        assert_eq!(err.to_string(), "サーバー内部エラー");
    }
}
