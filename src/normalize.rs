//! Mapping from upstream alert shapes to [`AlertRecord`].
//!
//! Two sources feed the console: active triggers from the monitoring API and
//! seeded mock alerts from the inventory backend. Both are flattened into the
//! same record layout before clustering.

use crate::alert::{AlertHost, AlertRecord, AlertTags};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("trigger {trigger_id}: priority {value} is not a number")]
    InvalidPriority { trigger_id: String, value: String },
    #[error("trigger {trigger_id}: lastchange {value} is not a unix timestamp")]
    InvalidLastChange { trigger_id: String, value: String },
    #[error("alert {id}: unparseable last_change {value:?}")]
    InvalidTimestamp { id: String, value: String },
}

/// Active trigger as returned by the monitoring API's `trigger.get`.
/// Numeric fields arrive either as JSON numbers or as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringTrigger {
    pub triggerid: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Value,
    #[serde(default)]
    pub lastchange: Value,
    #[serde(default)]
    pub hosts: Vec<AlertHost>,
}

/// Seeded alert row from the inventory backend.
#[derive(Debug, Clone, Deserialize)]
pub struct MockAlert {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub host_name: String,
    #[serde(default)]
    pub alert_type: Option<String>,
    pub last_change: String,
    #[serde(default)]
    pub tags: Option<AlertTags>,
    #[serde(default)]
    pub dependencies: Option<Vec<String>>,
    #[serde(default)]
    pub occurrence_count: Option<u64>,
    #[serde(default)]
    pub severity: Option<String>,
}

pub fn severity_label(priority: i64) -> &'static str {
    if priority >= 4 {
        "High"
    } else if priority >= 3 {
        "Average"
    } else {
        "Warning"
    }
}

pub fn impact_for_priority(priority: i64) -> &'static str {
    if priority >= 4 {
        "critical"
    } else if priority >= 3 {
        "high"
    } else {
        "medium"
    }
}

pub fn from_trigger(trigger: MonitoringTrigger) -> Result<AlertRecord, NormalizeError> {
    let priority = as_integer(&trigger.priority).ok_or_else(|| NormalizeError::InvalidPriority {
        trigger_id: trigger.triggerid.clone(),
        value: trigger.priority.to_string(),
    })?;
    let lastchange = match &trigger.lastchange {
        Value::Null => None,
        v => Some(as_integer(v).ok_or_else(|| NormalizeError::InvalidLastChange {
            trigger_id: trigger.triggerid.clone(),
            value: v.to_string(),
        })?),
    };

    let tags = AlertTags {
        category: Some("system".to_string()),
        impact: Some(impact_for_priority(priority).to_string()),
        service: Some("Infrastructure".to_string()),
        resolution_hint: Some("Check system logs".to_string()),
    };

    Ok(AlertRecord {
        trigger_id: trigger.triggerid,
        problem: Some(trigger.description.clone()),
        description: trigger.description,
        hosts: trigger.hosts,
        tags: Some(tags),
        dependencies: None,
        lastchange,
        severity: Some(severity_label(priority).to_string()),
        occurrence_count: None,
        alert_type: None,
    })
}

pub fn from_mock(alert: MockAlert) -> Result<AlertRecord, NormalizeError> {
    let ts = parse_timestamp(&alert.last_change).ok_or_else(|| NormalizeError::InvalidTimestamp {
        id: alert.id.clone(),
        value: alert.last_change.clone(),
    })?;
    let hosts = if alert.host_name.is_empty() {
        Vec::new()
    } else {
        vec![AlertHost { name: alert.host_name }]
    };

    Ok(AlertRecord {
        trigger_id: alert.id,
        problem: Some(alert.description.clone()),
        description: alert.description,
        hosts,
        // Rows without tags still get an (empty) tags object.
        tags: Some(alert.tags.unwrap_or_default()),
        dependencies: alert.dependencies,
        lastchange: Some(ts.timestamp()),
        severity: alert.severity,
        occurrence_count: alert.occurrence_count,
        alert_type: alert.alert_type,
    })
}

fn as_integer(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Postgres-style offsets such as "+00" are not RFC 3339.
    for fmt in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.and_utc());
        }
    }
    None
}
