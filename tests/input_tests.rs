use alertscope::input::{parse_alerts, InputError, SourceKind};

#[test]
fn parses_json_array_of_records() {
    let text = r#"[
        {"triggerid":"1","description":"Disk full","hosts":[{"name":"db01"}],"tags":{"impact":"high"}},
        {"triggerid":"2","problem":"Ping loss","dependencies":["sw-01"]}
    ]"#;
    let out = parse_alerts(text, SourceKind::Record).unwrap();
    assert_eq!(out.alerts.len(), 2);
    assert!(out.errors.is_empty());
    assert_eq!(out.alerts[0].impact(), Some("high"));
    assert_eq!(out.alerts[1].text(), "Ping loss");
    assert_eq!(out.alerts[1].description, "");
    assert!(out.alerts[1].tags.is_none());
}

#[test]
fn json_lines_skip_bad_lines_and_report_them() {
    let text = concat!(
        "{\"triggerid\":\"1\",\"description\":\"Disk full\"}\n",
        "{ not json\n",
        "\n",
        "{\"description\":\"no id\"}\n",
        "{\"triggerid\":\"2\",\"description\":\"CPU high\"}\n",
    );
    let out = parse_alerts(text, SourceKind::Record).unwrap();
    let ids: Vec<&str> = out.alerts.iter().map(|a| a.trigger_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(out.errors.len(), 2);
    assert_eq!(out.errors[0].line_number, 2);
    assert_eq!(out.errors[0].kind, "malformed_json");
    assert_eq!(out.errors[1].line_number, 4);
    assert_eq!(out.errors[1].kind, "invalid_record");
}

#[test]
fn malformed_array_is_fatal() {
    let err = parse_alerts(r#"[{"triggerid":"1"}, {"triggerid": ]"#, SourceKind::Record).unwrap_err();
    assert!(matches!(err, InputError::Parse(_)));
}

#[test]
fn normalization_failure_inside_array_is_fatal() {
    let text = r#"[{"triggerid":"1","description":"x","priority":"p1"}]"#;
    let err = parse_alerts(text, SourceKind::Trigger).unwrap_err();
    assert!(matches!(err, InputError::Normalize(_)));
}

#[test]
fn normalization_failure_in_lines_is_skipped() {
    let text = concat!(
        "{\"id\":\"1\",\"description\":\"x\",\"last_change\":\"2024-01-01T00:00:00Z\"}\n",
        "{\"id\":\"2\",\"description\":\"y\",\"last_change\":\"soon\"}\n",
    );
    let out = parse_alerts(text, SourceKind::Mock).unwrap();
    assert_eq!(out.alerts.len(), 1);
    assert_eq!(out.errors[0].kind, "normalize");
}

#[test]
fn triggers_are_normalized_on_the_way_in() {
    let text = r#"[{"triggerid":"100","description":"Agent unavailable","priority":"5","lastchange":"1700000000","hosts":[{"hostid":"1","name":"app01"}]}]"#;
    let out = parse_alerts(text, SourceKind::Trigger).unwrap();
    assert_eq!(out.alerts[0].severity.as_deref(), Some("High"));
    assert_eq!(out.alerts[0].impact(), Some("critical"));
    assert_eq!(out.alerts[0].primary_host(), Some("app01"));
}

#[test]
fn empty_and_plain_text_inputs() {
    assert!(parse_alerts("  \n", SourceKind::Record).unwrap().alerts.is_empty());
    assert!(matches!(parse_alerts("hello", SourceKind::Record), Err(InputError::UnsupportedShape)));
}

#[test]
fn source_kind_parses_aliases() {
    assert_eq!("zabbix".parse::<SourceKind>().unwrap(), SourceKind::Trigger);
    assert_eq!("Mock".parse::<SourceKind>().unwrap(), SourceKind::Mock);
    assert_eq!("records".parse::<SourceKind>().unwrap(), SourceKind::Record);
    assert!(matches!("xml".parse::<SourceKind>(), Err(InputError::UnknownSource(_))));
}
