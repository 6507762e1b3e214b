//! Page payloads from `action=query` responses

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Page property requested through `prop=`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageProp {
    Extracts,
    Revisions,
    Categories,
    PageImages,
    Info,
    Description,
    Other(String),
}

impl PageProp {
    /// Parse a single property name
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "extracts" => PageProp::Extracts,
            "revisions" => PageProp::Revisions,
            "categories" => PageProp::Categories,
            "pageimages" => PageProp::PageImages,
            "info" => PageProp::Info,
            "description" => PageProp::Description,
            other => PageProp::Other(other.to_string()),
        }
    }

    /// Split a pipe-delimited `prop` value
    pub fn split(prop: &str) -> Vec<PageProp> {
        prop.split('|')
            .filter(|p| !p.trim().is_empty())
            .map(PageProp::from_name)
            .collect()
    }

    /// Page field that carries this property's payload, if known
    pub fn field(&self) -> Option<&'static str> {
        match self {
            PageProp::Extracts => Some("extract"),
            PageProp::Revisions => Some("revisions"),
            PageProp::Categories => Some("categories"),
            PageProp::PageImages => Some("thumbnail"),
            PageProp::Info => Some("length"),
            PageProp::Description => Some("description"),
            PageProp::Other(_) => None,
        }
    }

    /// Field read by single-field lookups; unknown properties read `extract`
    pub fn lookup_field(prop: &str) -> &'static str {
        PageProp::from_name(prop).field().unwrap_or("extract")
    }
}

/// Pull `query.pages` out of a decoded response
pub fn pages(body: &Value) -> Map<String, Value> {
    body.get("query")
        .and_then(|q| q.get("pages"))
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// First (and normally only) page of a `query.pages` map
pub fn first_page(pages: &Map<String, Value>) -> Option<&Map<String, Value>> {
    pages.values().next().and_then(Value::as_object)
}

/// Whether the page map points at a page that does not exist
pub fn is_missing(pages: &Map<String, Value>) -> bool {
    match pages.iter().next() {
        None => true,
        Some((key, page)) => key == "-1" || page.get("missing").is_some(),
    }
}

/// Whether a field value carries anything: non-blank text, a non-empty list or map, a positive number
pub fn is_usable(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n > 0.0),
        Value::Bool(b) => *b,
        Value::Null => false,
    }
}

/// Whether a `query.pages` map lacks every requested property.
///
/// A property with no known field counts as present: the page exists and
/// there is nothing to judge it by.
pub fn is_empty_result(pages: &Map<String, Value>, prop: &str) -> bool {
    if is_missing(pages) {
        return true;
    }
    let Some(page) = first_page(pages) else {
        return true;
    };

    PageProp::split(prop).iter().all(|p| match p.field() {
        Some(field) => !page.get(field).is_some_and(is_usable),
        None => false,
    })
}

/// A category entry from `prop=categories`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub ns: i64,
    pub title: String,
}

impl Category {
    /// Maintenance category MediaWiki attaches to redirect pages
    pub fn is_redirect_marker(&self) -> bool {
        self.title.starts_with("Category:Redirects")
    }
}

/// Lead image from `prop=pageimages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub source: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// A revision from `prop=revisions`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revid: Option<u64>,
    /// Content slots (`rvslots=main`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<Slots>,
    /// Legacy content location when no slots were requested
    #[serde(rename = "*", default, skip_serializing_if = "Option::is_none")]
    pub legacy_content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slots {
    pub main: Slot,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contentmodel: Option<String>,
    #[serde(rename = "*", alias = "content", default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Revision {
    /// Wikitext of this revision, wherever the API put it
    pub fn content(&self) -> Option<&str> {
        self.slots
            .as_ref()
            .and_then(|s| s.main.content.as_deref())
            .or(self.legacy_content.as_deref())
    }
}
