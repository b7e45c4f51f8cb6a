use alertscope::filter::AlertFilter;
use alertscope::{AlertRecord, AlertTags};

fn sample() -> Vec<AlertRecord> {
    vec![
        AlertRecord::new("1", "High CPU usage")
            .with_host("WEB-01")
            .with_severity("High")
            .with_tags(AlertTags::new("system", "Infrastructure", "critical")),
        AlertRecord::new("2", "Replication lag")
            .with_host("db-02")
            .with_severity("Average")
            .with_tags(AlertTags::new("database", "Storage", "high")),
        AlertRecord::new("3", "Ping loss").with_host("sw-03").with_severity("Warning"),
    ]
}

fn ids(alerts: &[AlertRecord]) -> Vec<&str> {
    alerts.iter().map(|a| a.trigger_id.as_str()).collect()
}

#[test]
fn empty_filter_keeps_everything_in_order() {
    let alerts = sample();
    assert_eq!(ids(&AlertFilter::new().apply(&alerts)), vec!["1", "2", "3"]);
    assert_eq!(ids(&AlertFilter::new().search("").apply(&alerts)), vec!["1", "2", "3"]);
}

#[test]
fn search_matches_text_and_hosts_case_insensitively() {
    let alerts = sample();
    assert_eq!(ids(&AlertFilter::new().search("cpu").apply(&alerts)), vec!["1"]);
    assert_eq!(ids(&AlertFilter::new().search("web-01").apply(&alerts)), vec!["1"]);
    assert_eq!(ids(&AlertFilter::new().search("LOSS").apply(&alerts)), vec!["3"]);
}

#[test]
fn search_matches_tag_values_and_keys() {
    let alerts = sample();
    assert_eq!(ids(&AlertFilter::new().search("storage").apply(&alerts)), vec!["2"]);
    // Only tagged alerts expose tag keys.
    assert_eq!(ids(&AlertFilter::new().search("categ").apply(&alerts)), vec!["1", "2"]);
    // resolution_hint is unset everywhere, so its key does not match.
    assert!(AlertFilter::new().search("resolution").apply(&alerts).is_empty());
}

#[test]
fn severity_filter_is_case_insensitive() {
    let alerts = sample();
    let f = AlertFilter::new().severity("high").severity("warning");
    assert_eq!(ids(&f.apply(&alerts)), vec!["1", "3"]);
    assert!(!f.matches(&AlertRecord::new("4", "no severity")));
}

#[test]
fn search_and_severity_combine() {
    let alerts = sample();
    let f = AlertFilter::new().search("o").severity("average");
    assert_eq!(ids(&f.apply(&alerts)), vec!["2"]);
}
