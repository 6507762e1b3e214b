//! Wikipedia API client
//!
//! [`WikiClient`] is a blocking facade over the MediaWiki Action API. Every page
//! lookup goes through [`WikiClient::extract`] (one field from the first page) or
//! [`WikiClient::get_info`] (the whole `query.pages` map).
//!
//! Two follow-up behaviors may issue extra requests, each bounded by a [`HopBudget`]:
//! - smart mode: an empty successful lookup is retried once with the first spelling suggestion
//! - redirects: `raw`, `categories` and `html` follow `#REDIRECT` targets
//!
//! Transport and HTTP errors are returned immediately and never trigger either behavior.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::error::{Result, WikiError};
use crate::infobox::{parse_infobox, Infobox};
use crate::page::{self, Category, PageProp, Revision, Thumbnail};
use crate::params::{Action, ExtraParams, QueryParams};
use crate::redirect::{redirect_target, HopBudget};
use crate::search::{self, SearchHit};
use crate::transport::{HttpTransport, Transport};
use crate::LanguageCode;

/// Thumbnail width requested by [`WikiClient::image_url`]
pub const THUMBNAIL_SIZE: u32 = 500;

/// Blocking Wikipedia client.
///
/// Configuration calls ([`lang`](Self::lang), [`smart`](Self::smart)) return a new
/// client and leave the original untouched; clones share the transport.
pub struct WikiClient<T: Transport = HttpTransport> {
    config: ClientConfig,
    transport: Arc<T>,
}

impl<T: Transport> Clone for WikiClient<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl WikiClient<HttpTransport> {
    /// Create a client for English Wikipedia with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom config
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> WikiClient<T> {
    /// Create a client over any transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// Get the config
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn language(&self) -> &LanguageCode {
        &self.config.language
    }

    pub fn is_smart(&self) -> bool {
        self.config.smart
    }

    /// A client for another language edition; `code` must be two letters
    pub fn lang(&self, code: &str) -> Result<Self> {
        let language = LanguageCode::parse(code)?;
        Ok(Self {
            config: self.config.clone().with_language(language),
            transport: Arc::clone(&self.transport),
        })
    }

    /// A client that retries empty lookups with the first spelling suggestion
    pub fn smart(&self) -> Self {
        Self {
            config: self.config.clone().with_smart(true),
            transport: Arc::clone(&self.transport),
        }
    }

    /// Hops available to suggestion fallback for one lookup
    fn fallback_budget(&self) -> HopBudget {
        if self.config.smart {
            HopBudget::single()
        } else {
            HopBudget::exhausted()
        }
    }

    fn request(&self, url: &str, params: &QueryParams) -> Result<Value> {
        let body = self.transport.get(url, params)?;
        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(source) => Err(WikiError::Decode { body, source }),
        }
    }

    /// First suggestion for `title`. Later suggestions are never used; a blank first
    /// suggestion or one equal to `title` yields none.
    fn first_suggestion(&self, title: &str) -> Result<Option<String>> {
        Ok(self
            .suggest(title)?
            .into_iter()
            .next()
            .filter(|s| !s.trim().is_empty() && !s.eq_ignore_ascii_case(title)))
    }

    /// Fetch the full `query.pages` map for `title`.
    ///
    /// `prop` may name several properties separated by `|`. In smart mode a lookup
    /// where none of them carries data is retried once with the first suggestion,
    /// and that retry's pages are returned as they are. `format` must be `json`.
    pub fn get_info(
        &self,
        title: &str,
        prop: &str,
        format: &str,
        extra: &ExtraParams,
    ) -> Result<Map<String, Value>> {
        if !format.eq_ignore_ascii_case("json") {
            return Err(WikiError::InvalidInput(format!("Unsupported response format: {}", format)));
        }

        let mut params = QueryParams::query(title, prop).merge(extra);
        let data = page::pages(&self.request(&self.config.api_url(), &params)?);

        if page::is_empty_result(&data, prop) && self.fallback_budget().spend().is_some() {
            if let Some(suggestion) = self.first_suggestion(title)? {
                tracing::info!("No {} for {:?}, retrying with suggestion {:?}", prop, title, suggestion);
                params.set("titles", suggestion);
                return Ok(page::pages(&self.request(&self.config.api_url(), &params)?));
            }
        }

        Ok(data)
    }

    /// Short description of a page (`prop=description`)
    pub fn description(&self, title: &str) -> Result<Option<String>> {
        let info = self.get_info(title, "description", "json", &ExtraParams::new())?;
        Ok(page::first_page(&info)
            .and_then(|p| p.get("description"))
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    /// Description of the Wikidata entity linked to a page, in the client's language or English
    pub fn entity_description(&self, title: &str) -> Result<Option<String>> {
        let lang = self.config.language.code().to_lowercase();
        let site = format!("{}wiki", lang);
        let languages = format!("{}|en", lang);
        let params = QueryParams::from_pairs(&[
            ("action", "wbgetentities"),
            ("format", "json"),
            ("sites", site.as_str()),
            ("titles", title),
            ("props", "descriptions"),
            ("languages", languages.as_str()),
        ]);
        let body = self.request(&self.config.wikidata_api_url(), &params)?;

        let entities = body
            .get("entities")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let Some(descriptions) = entities
            .values()
            .find(|e| e.get("missing").is_none())
            .and_then(|e| e.get("descriptions"))
        else {
            return Ok(None);
        };

        Ok([lang.as_str(), "en"]
            .iter()
            .find_map(|l| descriptions.get(*l)?.get("value")?.as_str())
            .map(str::to_string))
    }

    /// Fetch one property of a page.
    ///
    /// Reads the field named by the property table (`extracts` → `extract`, `pageimages`
    /// → `thumbnail`, ...) from the first page. With `action=parse` in `extra` the title is
    /// sent as `page`, `prop` is dropped and the whole decoded body is returned.
    /// An absent field comes back as `Value::Null`.
    pub fn extract(&self, title: &str, prop: &str, extra: &ExtraParams) -> Result<Value> {
        let params = QueryParams::for_page(title, prop, extra);
        if extra.is_parse() {
            return self.request(&self.config.api_url(), &params);
        }
        self.extract_page_field(params, PageProp::lookup_field(prop), self.fallback_budget())
    }

    fn extract_page_field(&self, mut params: QueryParams, field: &str, budget: HopBudget) -> Result<Value> {
        let body = self.request(&self.config.api_url(), &params)?;
        let pages = page::pages(&body);
        let result = page::first_page(&pages)
            .and_then(|p| p.get(field))
            .cloned()
            .unwrap_or(Value::Null);

        if page::is_usable(&result) {
            return Ok(result);
        }
        let Some(next) = budget.spend() else {
            if self.config.smart {
                tracing::debug!("Suggestion budget spent, returning empty {}", field);
            }
            return Ok(result);
        };
        let Some(title) = params.title().map(str::to_string) else {
            return Ok(result);
        };

        match self.first_suggestion(&title)? {
            Some(suggestion) => {
                tracing::info!("No {} for {:?}, retrying with suggestion {:?}", field, title, suggestion);
                params.set("titles", suggestion);
                self.extract_page_field(params, field, next)
            }
            None => Ok(result),
        }
    }

    /// Defaults applied by [`summary`](Self::summary) under the caller's overrides
    pub fn summary_params(extra: &ExtraParams) -> ExtraParams {
        extra
            .clone()
            .or(ExtraParams::new().with_exintro(true).with_explaintext(false))
    }

    /// Lead section of an article (limited HTML unless `explaintext` is set)
    pub fn summary(&self, title: &str, extra: &ExtraParams) -> Result<Option<String>> {
        let value = self.extract(title, "extracts", &Self::summary_params(extra))?;
        Ok(as_text(value))
    }

    /// Whole article as plain text
    pub fn text(&self, title: &str) -> Result<Option<String>> {
        let value = self.extract(title, "extracts", &ExtraParams::new().with_explaintext(true))?;
        Ok(as_text(value))
    }

    /// Categories of a page, following one redirect
    pub fn categories(&self, title: &str) -> Result<Vec<Category>> {
        self.categories_within(title, HopBudget::default())
    }

    /// Categories of a page; a redirect page (first category `Category:Redirects...`) is
    /// resolved through its wikitext while `budget` allows
    pub fn categories_within(&self, title: &str, budget: HopBudget) -> Result<Vec<Category>> {
        let value = self.extract(title, "categories", &ExtraParams::new())?;
        let categories: Vec<Category> = serde_json::from_value(value).unwrap_or_default();

        if categories.first().is_some_and(Category::is_redirect_marker) {
            match budget.spend() {
                Some(next) => {
                    if let Some(target) = self.redirect_target_of(title)? {
                        tracing::info!("{:?} redirects to {:?}", title, target);
                        return self.categories_within(&target, next);
                    }
                }
                None => tracing::warn!("Redirect budget spent at {:?}", title),
            }
        }

        Ok(categories)
    }

    /// Lead image thumbnail URL
    pub fn image_url(&self, title: &str) -> Result<Option<String>> {
        let value = self.extract(title, "pageimages", &ExtraParams::new().with_pithumbsize(THUMBNAIL_SIZE))?;
        Ok(serde_json::from_value::<Thumbnail>(value).ok().map(|t| t.source))
    }

    /// Public URL of an article
    pub fn url(&self, title: &str) -> String {
        self.config.article_url(title)
    }

    /// Latest revision wikitext, following one redirect
    pub fn raw(&self, title: &str) -> Result<Vec<Revision>> {
        self.raw_within(title, HopBudget::default())
    }

    /// Latest revision wikitext; `#REDIRECT [[Target]]` is followed while `budget` allows,
    /// after which the redirect revision itself is returned
    pub fn raw_within(&self, title: &str, budget: HopBudget) -> Result<Vec<Revision>> {
        let revisions = self.fetch_revisions(title)?;

        if let Some(target) = revisions.first().and_then(Revision::content).and_then(redirect_target) {
            match budget.spend() {
                Some(next) => {
                    tracing::info!("{:?} redirects to {:?}", title, target);
                    return self.raw_within(&target, next);
                }
                None => tracing::warn!("Redirect budget spent at {:?}", title),
            }
        }

        Ok(revisions)
    }

    fn fetch_revisions(&self, title: &str) -> Result<Vec<Revision>> {
        let extra = ExtraParams::new().with_rvprop("content").with_rvslots("main");
        let value = self.extract(title, "revisions", &extra)?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    fn redirect_target_of(&self, title: &str) -> Result<Option<String>> {
        Ok(self
            .fetch_revisions(title)?
            .first()
            .and_then(Revision::content)
            .and_then(redirect_target))
    }

    /// Rendered article HTML, following up to two redirects
    pub fn html(&self, title: &str) -> Result<String> {
        self.html_within(title, HopBudget::max())
    }

    /// Rendered article HTML; a `redirectMsg` page is resolved through its wikitext while
    /// `budget` allows
    pub fn html_within(&self, title: &str, budget: HopBudget) -> Result<String> {
        let body = self.extract(title, "text", &ExtraParams::new().with_action(Action::Parse))?;
        let html = body
            .pointer("/parse/text/*")
            .or_else(|| body.pointer("/parse/text"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        if html.to_lowercase().contains("redirectmsg") {
            match budget.spend() {
                Some(next) => {
                    if let Some(target) = self.redirect_target_of(title)? {
                        tracing::info!("{:?} redirects to {:?}", title, target);
                        return self.html_within(&target, next);
                    }
                }
                None => tracing::warn!("Redirect budget spent at {:?}", title),
            }
        }

        Ok(html)
    }

    /// Full-text search. In smart mode an empty result set is retried once with the
    /// first suggestion for `query`.
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.search_within(query, self.fallback_budget())
    }

    fn search_within(&self, query: &str, budget: HopBudget) -> Result<Vec<SearchHit>> {
        let params = QueryParams::from_pairs(&[
            ("action", "query"),
            ("list", "search"),
            ("format", "json"),
            ("srsearch", query),
        ]);
        let hits = search::raw_hits(&self.request(&self.config.api_url(), &params)?);

        if hits.is_empty() {
            if let Some(next) = budget.spend() {
                if let Some(suggestion) = self.first_suggestion(query)? {
                    tracing::info!("No results for {:?}, searching {:?}", query, suggestion);
                    return self.search_within(&suggestion, next);
                }
            }
        }

        Ok(hits
            .into_iter()
            .map(|hit| SearchHit {
                url: self.url(&hit.title),
                snippet: search::strip_tags(&hit.snippet),
                title: hit.title,
            })
            .collect())
    }

    /// Title suggestions from the opensearch endpoint
    pub fn suggest(&self, query: &str) -> Result<Vec<String>> {
        let params = QueryParams::from_pairs(&[
            ("action", "opensearch"),
            ("format", "json"),
            ("search", query),
        ]);
        let body = self.request(&self.config.api_url(), &params)?;
        Ok(search::suggestions(&body))
    }

    /// Key/value rows of the article's infobox; empty when there is none
    pub fn infobox(&self, title: &str) -> Result<Infobox> {
        let html = self.html(title)?;
        if html.is_empty() {
            return Ok(Infobox::new());
        }
        Ok(parse_infobox(&html))
    }
}

fn as_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}
