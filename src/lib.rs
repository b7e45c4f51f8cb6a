pub mod alert;
pub mod tfidf;
pub mod similarity;
pub mod engine;
pub mod normalize;
pub mod input;
pub mod filter;
pub mod report;

pub use alert::{AlertHost, AlertRecord, AlertTags};
pub use engine::{cluster_alerts, Cluster};
