use crate::alert::AlertRecord;
use crate::{similarity, tfidf};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Combined score an alert must exceed to join a seed's cluster.
pub const MERGE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub alerts: Vec<AlertRecord>,
    /// Score of the last alert merged into the cluster; 1 for singletons.
    pub similarity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

impl Cluster {
    fn seeded(seed: &AlertRecord) -> Self {
        let tags = seed.tags.as_ref();
        Self {
            alerts: vec![seed.clone()],
            similarity: 1.0,
            category: tags.and_then(|t| t.category.clone()),
            service: tags.and_then(|t| t.service.clone()),
            impact: tags.and_then(|t| t.impact.clone()),
        }
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn seed(&self) -> Option<&AlertRecord> {
        self.alerts.first()
    }
}

/// Sort rank of an impact tag: critical > high > medium > low/unknown.
pub fn impact_rank(impact: Option<&str>) -> u8 {
    match impact {
        Some("critical") => 3,
        Some("high") => 2,
        Some("medium") => 1,
        _ => 0,
    }
}

/// Pairwise scorer over a fixed alert slice.
pub struct SimilarityMatrix<'a> {
    alerts: &'a [AlertRecord],
    tfidf: tfidf::TfIdf,
}

impl<'a> SimilarityMatrix<'a> {
    pub fn new(alerts: &'a [AlertRecord]) -> Self {
        let documents: Vec<&str> = alerts.iter().map(AlertRecord::text).collect();
        let tfidf = tfidf::vectorize(&documents);
        Self { alerts, tfidf }
    }

    pub fn text_similarity(&self, i: usize, j: usize) -> f64 {
        similarity::cosine_similarity(self.tfidf.vector(i), self.tfidf.vector(j))
    }

    pub fn tag_similarity(&self, i: usize, j: usize) -> f64 {
        similarity::tag_similarity(&self.alerts[i], &self.alerts[j])
    }

    pub fn score(&self, i: usize, j: usize) -> f64 {
        similarity::combined_similarity(self.text_similarity(i, j), self.tag_similarity(i, j))
    }

    pub fn vocabulary_len(&self) -> usize {
        self.tfidf.vocabulary.len()
    }
}

/// Groups similar alerts. Every input alert lands in exactly one cluster;
/// clusters come out ordered by impact rank, then similarity, both descending.
pub fn cluster_alerts(alerts: &[AlertRecord]) -> Vec<Cluster> {
    if alerts.is_empty() {
        return Vec::new();
    }

    let matrix = SimilarityMatrix::new(alerts);
    let mut used: HashSet<&str> = HashSet::new();
    let mut placed: HashSet<&str> = HashSet::new();
    let mut clusters: Vec<Cluster> = Vec::new();

    for (i, seed) in alerts.iter().enumerate() {
        if used.contains(seed.trigger_id.as_str()) {
            continue;
        }
        let mut cluster = Cluster::seeded(seed);
        let mut members: Vec<&str> = vec![seed.trigger_id.as_str()];
        used.insert(seed.trigger_id.as_str());

        // Candidates are always scored against the seed, across the whole list.
        for (j, other) in alerts.iter().enumerate() {
            if i == j || used.contains(other.trigger_id.as_str()) {
                continue;
            }
            let score = matrix.score(i, j);
            if score > MERGE_THRESHOLD {
                cluster.alerts.push(other.clone());
                cluster.similarity = score;
                members.push(other.trigger_id.as_str());
                used.insert(other.trigger_id.as_str());
            }
        }

        if cluster.alerts.len() > 1 {
            placed.extend(members);
            clusters.push(cluster);
        }
    }

    // A seed that matched nothing stays marked used (later seeds cannot claim
    // it) but still needs its own singleton cluster.
    let grouped = clusters.len();
    for alert in alerts {
        if !placed.contains(alert.trigger_id.as_str()) {
            clusters.push(Cluster::seeded(alert));
        }
    }

    sort_clusters(&mut clusters);
    debug!(
        alerts = alerts.len(),
        vocabulary = matrix.vocabulary_len(),
        grouped,
        clusters = clusters.len(),
        "clustered alerts"
    );
    clusters
}

/// Stable sort by impact rank desc, then similarity desc.
pub fn sort_clusters(clusters: &mut [Cluster]) {
    clusters.sort_by(|a, b| {
        impact_rank(b.impact.as_deref())
            .cmp(&impact_rank(a.impact.as_deref()))
            .then_with(|| b.similarity.partial_cmp(&a.similarity).unwrap_or(Ordering::Equal))
    });
}
