// src/types/summary.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder shown for any missing summary field
pub const PLACEHOLDER: &str = "N/A";

/// Structured mapping extracted from a model response. No schema is enforced;
/// every accessor tolerates missing keys and unexpected value types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Summary(Map<String, Value>);

impl Summary {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Text value of `key`, or [`PLACEHOLDER`] when absent
    pub fn text_or_placeholder(&self, key: &str) -> String {
        self.text(key).unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).map(render_value)
    }

    /// Items of a list field. A scalar value becomes a single item;
    /// `fallback` is used only when the key is missing.
    pub fn list_or(&self, key: &str, fallback: &str) -> Vec<String> {
        match self.0.get(key) {
            Some(Value::Array(items)) => items.iter().map(render_value).collect(),
            Some(other) => vec![render_value(other)],
            None => vec![fallback.to_string()],
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(value: Value) -> Summary {
        match value {
            Value::Object(map) => Summary::new(map),
            _ => panic!("test summary must be an object"),
        }
    }

    #[test]
    fn test_text_defaults_to_placeholder() {
        let s = summary(json!({ "size": "500" }));
        assert_eq!(s.text_or_placeholder("size"), "500");
        assert_eq!(s.text_or_placeholder("domain"), "N/A");
    }

    #[test]
    fn test_non_string_scalars_render_as_json_text() {
        let s = summary(json!({ "size": 500, "public": true, "salary": null }));
        assert_eq!(s.text_or_placeholder("size"), "500");
        assert_eq!(s.text_or_placeholder("public"), "true");
        assert_eq!(s.text_or_placeholder("salary"), "null");
    }

    #[test]
    fn test_list_field_variants() {
        let s = summary(json!({ "news": ["a", "b"], "skills": "Rust" }));
        assert_eq!(s.list_or("news", "No news found."), vec!["a", "b"]);
        assert_eq!(s.list_or("skills", "No skills listed."), vec!["Rust"]);
        assert_eq!(
            s.list_or("missing", "No skills listed."),
            vec!["No skills listed."]
        );
    }

    #[test]
    fn test_empty_list_stays_empty() {
        let s = summary(json!({ "news": [] }));
        assert!(s.list_or("news", "No news found.").is_empty());
    }

    #[test]
    fn test_serializes_transparently_in_key_order() {
        let s = summary(json!({ "size": "500", "domain": "Tech", "news": ["x"] }));
        let text = serde_json::to_string(&s).unwrap();
        assert_eq!(text, r#"{"size":"500","domain":"Tech","news":["x"]}"#);
    }
}
