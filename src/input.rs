use crate::alert::AlertRecord;
use crate::normalize::{self, MockAlert, MonitoringTrigger, NormalizeError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("json parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("expected a JSON array or one JSON object per line")]
    UnsupportedShape,
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error("unknown source kind {0:?} (expected record, trigger or mock)")]
    UnknownSource(String),
}

/// Shape of the incoming alert documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Already-normalized [`AlertRecord`]s.
    #[default]
    Record,
    /// Monitoring API triggers.
    Trigger,
    /// Inventory backend mock alerts.
    Mock,
}

impl FromStr for SourceKind {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "record" | "records" => Ok(SourceKind::Record),
            "trigger" | "triggers" | "zabbix" => Ok(SourceKind::Trigger),
            "mock" | "mocks" => Ok(SourceKind::Mock),
            other => Err(InputError::UnknownSource(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorSample {
    pub line_number: usize,
    pub kind: String,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedInput {
    pub alerts: Vec<AlertRecord>,
    pub errors: Vec<ErrorSample>,
}

impl ParsedInput {
    pub fn extend(&mut self, other: ParsedInput) {
        self.alerts.extend(other.alerts);
        self.errors.extend(other.errors);
    }
}

pub fn to_record(value: Value, source: SourceKind) -> Result<AlertRecord, InputError> {
    match source {
        SourceKind::Record => Ok(decode::<AlertRecord>(value)?),
        SourceKind::Trigger => Ok(normalize::from_trigger(decode::<MonitoringTrigger>(value)?)?),
        SourceKind::Mock => Ok(normalize::from_mock(decode::<MockAlert>(value)?)?),
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(value)
}

/// Parses a JSON array of alert objects, or JSON lines.
///
/// An array is all-or-nothing: any bad element fails the whole document.
/// In line mode bad lines are skipped and reported in `errors`.
pub fn parse_alerts(text: &str, source: SourceKind) -> Result<ParsedInput, InputError> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Ok(ParsedInput::default());
    }
    if trimmed.starts_with('[') {
        let values: Vec<Value> = serde_json::from_str(trimmed)?;
        let alerts = values
            .into_iter()
            .map(|v| to_record(v, source))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(ParsedInput { alerts, errors: Vec::new() });
    }
    if !trimmed.starts_with('{') {
        return Err(InputError::UnsupportedShape);
    }

    let mut out = ParsedInput::default();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parsed = serde_json::from_str::<Value>(line)
            .map_err(InputError::from)
            .and_then(|v| to_record(v, source));
        match parsed {
            Ok(rec) => out.alerts.push(rec),
            Err(e) => {
                warn!(line = i + 1, error = %e, "skipping alert line");
                out.errors.push(ErrorSample { line_number: i + 1, kind: error_kind(&e).to_string() });
            }
        }
    }
    Ok(out)
}

fn error_kind(e: &InputError) -> &'static str {
    match e {
        InputError::Parse(e) if e.is_data() => "invalid_record",
        InputError::Parse(_) => "malformed_json",
        InputError::Normalize(_) => "normalize",
        InputError::UnsupportedShape => "unsupported_shape",
        InputError::UnknownSource(_) => "unknown_source",
    }
}
