use crate::alert::AlertRecord;

/// Console-side narrowing applied before clustering.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub search: Option<String>,
    pub severities: Vec<String>,
}

impl AlertFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn severity(mut self, severity: impl Into<String>) -> Self {
        self.severities.push(severity.into());
        self
    }

    pub fn matches(&self, alert: &AlertRecord) -> bool {
        self.matches_search(alert) && self.matches_severity(alert)
    }

    fn matches_search(&self, alert: &AlertRecord) -> bool {
        let needle = match self.search.as_deref() {
            Some(s) if !s.is_empty() => s.to_lowercase(),
            _ => return true,
        };
        let hit = |s: &str| s.to_lowercase().contains(&needle);

        if hit(alert.text()) || alert.hosts.iter().any(|h| hit(&h.name)) {
            return true;
        }
        match alert.tags.as_ref() {
            // Absent tags are not searchable, not even by key.
            Some(tags) => tags.entries().iter().any(|&(key, value)| match value {
                Some(v) => hit(key) || hit(v),
                None => false,
            }),
            None => false,
        }
    }

    fn matches_severity(&self, alert: &AlertRecord) -> bool {
        if self.severities.is_empty() {
            return true;
        }
        match alert.severity.as_deref() {
            Some(sev) => self.severities.iter().any(|s| s.eq_ignore_ascii_case(sev)),
            None => false,
        }
    }

    /// Keeps matching alerts, preserving input order.
    pub fn apply(&self, alerts: &[AlertRecord]) -> Vec<AlertRecord> {
        alerts.iter().filter(|a| self.matches(a)).cloned().collect()
    }
}
