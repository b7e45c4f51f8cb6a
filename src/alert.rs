use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertHost {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertTags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_hint: Option<String>,
}

impl AlertTags {
    pub fn new(category: &str, service: &str, impact: &str) -> Self {
        Self {
            category: Some(category.to_string()),
            impact: Some(impact.to_string()),
            service: Some(service.to_string()),
            resolution_hint: None,
        }
    }

    /// Tag keys in display order, paired with their value when present.
    pub fn entries(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("category", self.category.as_deref()),
            ("impact", self.impact.as_deref()),
            ("service", self.service.as_deref()),
            ("resolution_hint", self.resolution_hint.as_deref()),
        ]
    }
}

/// A normalized alert as handed to the clustering engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    #[serde(rename = "triggerid")]
    pub trigger_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    #[serde(default)]
    pub hosts: Vec<AlertHost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<AlertTags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastchange: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrence_count: Option<u64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<String>,
}

impl AlertRecord {
    pub fn new(trigger_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            trigger_id: trigger_id.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Text used for similarity: `problem` when non-empty, else `description`.
    pub fn text(&self) -> &str {
        match self.problem.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => &self.description,
        }
    }

    pub fn primary_host(&self) -> Option<&str> {
        self.hosts.first().map(|h| h.name.as_str())
    }

    pub fn impact(&self) -> Option<&str> {
        self.tags.as_ref().and_then(|t| t.impact.as_deref())
    }

    pub fn with_problem(mut self, problem: impl Into<String>) -> Self {
        self.problem = Some(problem.into());
        self
    }

    pub fn with_host(mut self, name: impl Into<String>) -> Self {
        self.hosts.push(AlertHost { name: name.into() });
        self
    }

    pub fn with_tags(mut self, tags: AlertTags) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = Some(deps.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }
}
