//! Search results

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// A full-text search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Article title
    pub title: String,
    /// Matching excerpt with the highlight markup removed
    pub snippet: String,
    /// Public article URL
    pub url: String,
}

/// Raw hit from `list=search`
#[derive(Debug, Deserialize)]
pub(crate) struct RawHit {
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

/// Pull `query.search` out of a decoded response; hits that do not parse are skipped
pub(crate) fn raw_hits(body: &Value) -> Vec<RawHit> {
    body.get("query")
        .and_then(|q| q.get("search"))
        .and_then(Value::as_array)
        .map(|hits| {
            hits.iter()
                .filter_map(|hit| serde_json::from_value(hit.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Remove HTML tags from a snippet
pub fn strip_tags(html: &str) -> String {
    HTML_TAG_RE.replace_all(html, "").to_string()
}

/// Suggestions are the second element of the opensearch `[query, titles, descriptions, urls]` array
pub(crate) fn suggestions(body: &Value) -> Vec<String> {
    body.get(1)
        .and_then(Value::as_array)
        .map(|titles| {
            titles
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            strip_tags(r#"<span class="searchmatch">Tehran</span> is the capital"#),
            "Tehran is the capital"
        );
        assert_eq!(strip_tags("no markup"), "no markup");
    }

    #[test]
    fn test_raw_hits_tolerates_missing_snippet() {
        let body = json!({"query": {"search": [
            {"ns": 0, "title": "Tehran"},
            {"ns": 0, "snippet": "no title"}
        ]}});
        let hits = raw_hits(&body);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Tehran");
        assert_eq!(hits[0].snippet, "");
    }

    #[test]
    fn test_suggestions_reads_second_element() {
        let body = json!(["Tehrn", ["Tehran", "Tehrani"], ["", ""], ["u1", "u2"]]);
        assert_eq!(suggestions(&body), vec!["Tehran", "Tehrani"]);
        assert!(suggestions(&json!(["Tehrn"])).is_empty());
        assert!(suggestions(&json!({"error": {}})).is_empty());
    }
}
