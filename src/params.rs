//! Query parameter assembly
//!
//! Every request is built from a fixed base (`action`, `format`, `titles`/`page`, `prop`)
//! merged with an [`ExtraParams`] value. Overrides are limited to a known set of
//! MediaWiki parameters; anything else is rejected up front.

use crate::error::{Result, WikiError};

/// Top-level MediaWiki action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    Query,
    Parse,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Query => "query",
            Action::Parse => "parse",
        }
    }
}

/// Keys accepted by [`ExtraParams::set`]
pub const ALLOWED_KEYS: &[&str] = &[
    "action",
    "exintro",
    "explaintext",
    "exsentences",
    "exchars",
    "pithumbsize",
    "rvprop",
    "rvslots",
    "cllimit",
    "redirects",
];

/// Named optional overrides for a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraParams {
    pub action: Option<Action>,
    /// Only the content before the first section
    pub exintro: Option<bool>,
    /// Plain text instead of limited HTML
    pub explaintext: Option<bool>,
    pub exsentences: Option<u32>,
    pub exchars: Option<u32>,
    /// Thumbnail width in pixels
    pub pithumbsize: Option<u32>,
    pub rvprop: Option<String>,
    pub rvslots: Option<String>,
    pub cllimit: Option<String>,
    /// Let the API resolve redirects itself
    pub redirects: Option<bool>,
}

impl ExtraParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_exintro(mut self, value: bool) -> Self {
        self.exintro = Some(value);
        self
    }

    pub fn with_explaintext(mut self, value: bool) -> Self {
        self.explaintext = Some(value);
        self
    }

    pub fn with_pithumbsize(mut self, px: u32) -> Self {
        self.pithumbsize = Some(px);
        self
    }

    pub fn with_rvprop(mut self, value: impl Into<String>) -> Self {
        self.rvprop = Some(value.into());
        self
    }

    pub fn with_rvslots(mut self, value: impl Into<String>) -> Self {
        self.rvslots = Some(value.into());
        self
    }

    /// Set a parameter from its wire name, rejecting keys outside [`ALLOWED_KEYS`]
    pub fn set(mut self, key: &str, value: &str) -> Result<Self> {
        match key {
            "action" => {
                self.action = Some(match value {
                    "query" => Action::Query,
                    "parse" => Action::Parse,
                    other => {
                        return Err(WikiError::InvalidInput(format!("Unsupported action: {}", other)))
                    }
                })
            }
            "exintro" => self.exintro = Some(parse_flag(key, value)?),
            "explaintext" => self.explaintext = Some(parse_flag(key, value)?),
            "redirects" => self.redirects = Some(parse_flag(key, value)?),
            "exsentences" => self.exsentences = Some(parse_number(key, value)?),
            "exchars" => self.exchars = Some(parse_number(key, value)?),
            "pithumbsize" => self.pithumbsize = Some(parse_number(key, value)?),
            "rvprop" => self.rvprop = Some(value.to_string()),
            "rvslots" => self.rvslots = Some(value.to_string()),
            "cllimit" => self.cllimit = Some(value.to_string()),
            other => {
                return Err(WikiError::InvalidInput(format!(
                    "Unknown parameter: {}. Allowed: {}",
                    other,
                    ALLOWED_KEYS.join(", ")
                )))
            }
        }
        Ok(self)
    }

    /// Parse a `key=value` pair
    pub fn set_pair(self, pair: &str) -> Result<Self> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| WikiError::InvalidInput(format!("Expected key=value, got: {}", pair)))?;
        self.set(key.trim(), value.trim())
    }

    /// Merge over `defaults`: fields set on `self` win, the rest come from `defaults`
    pub fn or(self, defaults: ExtraParams) -> ExtraParams {
        ExtraParams {
            action: self.action.or(defaults.action),
            exintro: self.exintro.or(defaults.exintro),
            explaintext: self.explaintext.or(defaults.explaintext),
            exsentences: self.exsentences.or(defaults.exsentences),
            exchars: self.exchars.or(defaults.exchars),
            pithumbsize: self.pithumbsize.or(defaults.pithumbsize),
            rvprop: self.rvprop.or(defaults.rvprop),
            rvslots: self.rvslots.or(defaults.rvslots),
            cllimit: self.cllimit.or(defaults.cllimit),
            redirects: self.redirects.or(defaults.redirects),
        }
    }

    pub fn is_parse(&self) -> bool {
        self.action == Some(Action::Parse)
    }

    /// Wire pairs for everything except `action`, in a fixed order.
    /// A `None` value is a flag explicitly set to false.
    fn pairs(&self) -> Vec<(&'static str, Option<String>)> {
        let flag = |v: Option<bool>| v.map(|b| if b { Some("1".to_string()) } else { None });
        let num = |v: Option<u32>| v.map(|n| Some(n.to_string()));
        let text = |v: &Option<String>| v.clone().map(Some);

        [
            ("exintro", flag(self.exintro)),
            ("explaintext", flag(self.explaintext)),
            ("exsentences", num(self.exsentences)),
            ("exchars", num(self.exchars)),
            ("pithumbsize", num(self.pithumbsize)),
            ("rvprop", text(&self.rvprop)),
            ("rvslots", text(&self.rvslots)),
            ("cllimit", text(&self.cllimit)),
            ("redirects", flag(self.redirects)),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(WikiError::InvalidInput(format!("{} expects a boolean, got: {}", key, value))),
    }
}

fn parse_number(key: &str, value: &str) -> Result<u32> {
    value
        .parse()
        .map_err(|_| WikiError::InvalidInput(format!("{} expects a number, got: {}", key, value)))
}

/// Ordered request parameters, ready for the query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Base set for `action=query`
    pub fn query(title: &str, prop: &str) -> Self {
        Self::from_pairs(&[
            ("action", "query"),
            ("format", "json"),
            ("titles", title),
            ("prop", prop),
        ])
    }

    /// Base set for `action=parse`; the title travels as `page` and there is no `prop`
    pub fn parse(title: &str) -> Self {
        Self::from_pairs(&[("action", "parse"), ("format", "json"), ("page", title)])
    }

    /// Arbitrary pairs, used for endpoints that are not page lookups
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            pairs: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Build the parameters for a page lookup with overrides applied
    pub fn for_page(title: &str, prop: &str, extra: &ExtraParams) -> Self {
        let base = if extra.is_parse() {
            Self::parse(title)
        } else {
            Self::query(title, prop)
        };
        base.merge(extra)
    }

    /// Apply overrides; a key already present keeps its position and takes the new value.
    /// `false` flags are dropped since MediaWiki reads any present flag as true.
    pub fn merge(mut self, extra: &ExtraParams) -> Self {
        for (key, value) in extra.pairs() {
            match value {
                Some(value) => self.set(key, value),
                None => self.remove(key),
            }
        }
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Title this request is about (`titles` or `page`)
    pub fn title(&self) -> Option<&str> {
        self.get("titles").or_else(|| self.get("page"))
    }

    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}
