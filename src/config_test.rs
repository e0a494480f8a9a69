use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |name| map.get(name).cloned()
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn no_attributes_yields_defaults() {
    let config = WidgetConfig::from_attributes(lookup(&[]));
    assert_eq!(config, WidgetConfig::default());
    assert_eq!(config.endpoint.query_url(), format!("{DEFAULT_BASE_URL}/query/"));
    assert!(config.show_clear);
}

// =============================================================
// Attribute overrides
// =============================================================

#[test]
fn base_url_attribute_sets_endpoint() {
    let config = WidgetConfig::from_attributes(lookup(&[(ATTR_BASE_URL, "http://localhost:8000/")]));
    assert_eq!(config.endpoint.query_url(), "http://localhost:8000/query/");
}

#[test]
fn blank_base_url_is_ignored() {
    let config = WidgetConfig::from_attributes(lookup(&[(ATTR_BASE_URL, "   ")]));
    assert_eq!(config.endpoint, Endpoint::new(DEFAULT_BASE_URL));
}

#[test]
fn greeting_attribute_overrides_copy_greeting() {
    let config = WidgetConfig::from_attributes(lookup(&[
        (ATTR_COPY, r#"{"greeting": "from copy", "failure": "Something went wrong."}"#),
        (ATTR_GREETING, "  Ask me about chapter one.  "),
    ]));
    assert_eq!(config.copy.greeting, "Ask me about chapter one.");
    assert_eq!(config.copy.failure, "Something went wrong.");
}

#[test]
fn partial_copy_keeps_remaining_defaults() {
    let config = WidgetConfig::from_attributes(lookup(&[(ATTR_COPY, r#"{"offline": "No network."}"#)]));
    assert_eq!(config.copy.offline, "No network.");
    assert_eq!(config.copy.failure, ChatCopy::default().failure);
}

#[test]
fn invalid_copy_json_is_ignored() {
    let config = WidgetConfig::from_attributes(lookup(&[(ATTR_COPY, "{nope")]));
    assert_eq!(config.copy, ChatCopy::default());
}

#[test]
fn show_clear_flag_parsing() {
    for (raw, expected) in [("false", false), ("0", false), ("OFF", false), ("", true), ("yes", true)] {
        let config = WidgetConfig::from_attributes(lookup(&[(ATTR_SHOW_CLEAR, raw)]));
        assert_eq!(config.show_clear, expected, "raw = {raw:?}");
    }
}

#[test]
fn unknown_show_clear_value_keeps_default() {
    let config = WidgetConfig::from_attributes(lookup(&[(ATTR_SHOW_CLEAR, "sometimes")]));
    assert!(config.show_clear);
}
