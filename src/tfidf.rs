use ahash::AHashMap;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;

// ASCII word characters only; anything else separates tokens.
static RE_NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());

/// Lower-cases `text` and splits it on runs of non-word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    RE_NON_WORD
        .split(&lowered)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// TF-IDF vectors for a fixed corpus. Every vector is laid out over the same
/// `vocabulary`, in the order terms were first seen.
#[derive(Debug, Clone, Default)]
pub struct TfIdf {
    pub vocabulary: Vec<String>,
    pub idf: Vec<f64>,
    pub vectors: Vec<Vec<f64>>,
}

impl TfIdf {
    pub fn vector(&self, doc: usize) -> &[f64] {
        self.vectors.get(doc).map(Vec::as_slice).unwrap_or(&[])
    }
}

pub fn vectorize(documents: &[&str]) -> TfIdf {
    let tokenized: Vec<Vec<String>> = documents.par_iter().map(|d| tokenize(d)).collect();

    let mut vocabulary: Vec<String> = Vec::new();
    let mut seen: AHashMap<&str, usize> = AHashMap::new();
    for tokens in &tokenized {
        for t in tokens {
            if !seen.contains_key(t.as_str()) {
                seen.insert(t.as_str(), vocabulary.len());
                vocabulary.push(t.clone());
            }
        }
    }

    // Document frequency is a substring test against the whole lower-cased
    // document, so "disk" also counts documents that only mention "disks".
    let lowered: Vec<String> = documents.iter().map(|d| d.to_lowercase()).collect();
    let total = documents.len() as f64;
    let idf: Vec<f64> = vocabulary
        .par_iter()
        .map(|term| {
            let df = lowered.iter().filter(|d| d.contains(term.as_str())).count();
            (total / df as f64).ln()
        })
        .collect();

    let vectors: Vec<Vec<f64>> = tokenized
        .par_iter()
        .map(|tokens| {
            let mut tf: AHashMap<&str, usize> = AHashMap::new();
            for t in tokens {
                *tf.entry(t.as_str()).or_insert(0) += 1;
            }
            vocabulary
                .iter()
                .zip(idf.iter())
                .map(|(term, w)| tf.get(term.as_str()).copied().unwrap_or(0) as f64 * w)
                .collect()
        })
        .collect();

    TfIdf { vocabulary, idf, vectors }
}
