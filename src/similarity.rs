use crate::alert::AlertRecord;

pub const TEXT_WEIGHT: f64 = 0.6;
pub const TAG_WEIGHT: f64 = 0.4;

const CATEGORY_WEIGHT: f64 = 0.3;
const SERVICE_WEIGHT: f64 = 0.3;
const IMPACT_WEIGHT: f64 = 0.2;
const DEPENDENCY_WEIGHT: f64 = 0.2;

/// Cosine of the angle between two vectors; 0 for empty or zero-norm input.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Tag-based score in [0,1]. Zero unless both alerts carry a tags object;
/// a field absent on both sides counts as equal.
pub fn tag_similarity(a: &AlertRecord, b: &AlertRecord) -> f64 {
    let (ta, tb) = match (a.tags.as_ref(), b.tags.as_ref()) {
        (Some(ta), Some(tb)) => (ta, tb),
        _ => return 0.0,
    };

    let mut score = 0.0;
    if ta.category == tb.category {
        score += CATEGORY_WEIGHT;
    }
    if ta.service == tb.service {
        score += SERVICE_WEIGHT;
    }
    if ta.impact == tb.impact {
        score += IMPACT_WEIGHT;
    }
    score += dependency_overlap(a.dependencies.as_deref(), b.dependencies.as_deref()) * DEPENDENCY_WEIGHT;
    score
}

/// Share of dependencies in common, relative to the longer list.
pub fn dependency_overlap(a: Option<&[String]>, b: Option<&[String]>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => {
            let common = a.iter().filter(|dep| b.contains(dep)).count();
            common as f64 / a.len().max(b.len()) as f64
        }
        _ => 0.0,
    }
}

pub fn combined_similarity(text: f64, tag: f64) -> f64 {
    text * TEXT_WEIGHT + tag * TAG_WEIGHT
}
