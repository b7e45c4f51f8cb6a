use crate::alert::AlertRecord;
use crate::engine::Cluster;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy)]
pub struct ReportOpts {
    /// Maximum clusters to include; `None` keeps all.
    pub top: Option<usize>,
    /// Preview alerts per cluster.
    pub examples: usize,
}

impl Default for ReportOpts {
    fn default() -> Self {
        Self { top: None, examples: 3 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub total_alerts: usize,
    pub total_clusters: usize,
    pub hidden_clusters: usize,
    pub clusters: Vec<ClusterOut>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterOut {
    pub rank: usize,
    pub size: usize,
    pub similarity: f64,
    pub category: Option<String>,
    pub service: Option<String>,
    pub impact: Option<String>,
    pub examples: Vec<AlertPreview>,
    pub remaining: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertPreview {
    pub trigger_id: String,
    pub host: Option<String>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

impl From<&AlertRecord> for AlertPreview {
    fn from(a: &AlertRecord) -> Self {
        Self {
            trigger_id: a.trigger_id.clone(),
            host: a.primary_host().map(str::to_string),
            text: a.text().to_string(),
            severity: a.severity.clone(),
        }
    }
}

pub fn build_report(total_alerts: usize, clusters: &[Cluster], opts: &ReportOpts) -> Report {
    let shown = opts.top.unwrap_or(clusters.len()).min(clusters.len());
    let out = clusters
        .iter()
        .take(shown)
        .enumerate()
        .map(|(i, c)| {
            let examples: Vec<AlertPreview> = c.alerts.iter().take(opts.examples).map(AlertPreview::from).collect();
            ClusterOut {
                rank: i + 1,
                size: c.alerts.len(),
                similarity: c.similarity,
                category: c.category.clone(),
                service: c.service.clone(),
                impact: c.impact.clone(),
                remaining: c.alerts.len() - examples.len(),
                examples,
            }
        })
        .collect();

    Report {
        total_alerts,
        total_clusters: clusters.len(),
        hidden_clusters: clusters.len() - shown,
        clusters: out,
    }
}
