//! Wikiquery client configuration

use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::LanguageCode;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Wikipedia edition to query
    pub language: LanguageCode,
    /// Retry empty lookups with the first spelling suggestion
    pub smart: bool,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent sent with every request (Wikimedia rejects anonymous clients)
    pub user_agent: String,
    /// Wikipedia host, prefixed with the language code
    pub wikipedia_host: String,
    /// Wikidata host, prefixed with `www`
    pub wikidata_host: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            language: LanguageCode::default(),
            smart: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!(
                "wikiquery/{} (https://github.com/ChiefBoyardee/wikiquery)",
                env!("CARGO_PKG_VERSION")
            ),
            wikipedia_host: "wikipedia.org".to_string(),
            wikidata_host: "wikidata.org".to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the language
    pub fn with_language(mut self, language: LanguageCode) -> Self {
        self.language = language;
        self
    }

    /// Enable or disable suggestion fallback
    pub fn with_smart(mut self, smart: bool) -> Self {
        self.smart = smart;
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Point the client at other MediaWiki hosts (mirrors, test servers)
    pub fn with_hosts(mut self, wikipedia: impl Into<String>, wikidata: impl Into<String>) -> Self {
        self.wikipedia_host = wikipedia.into();
        self.wikidata_host = wikidata.into();
        self
    }

    /// Get the Action API endpoint for the configured language
    pub fn api_url(&self) -> String {
        format!("https://{}.{}/w/api.php", self.language, self.wikipedia_host)
    }

    /// Get the Wikidata Action API endpoint
    pub fn wikidata_api_url(&self) -> String {
        format!("https://www.{}/w/api.php", self.wikidata_host)
    }

    /// Get the public article URL for a title
    pub fn article_url(&self, title: &str) -> String {
        format!(
            "https://{}.{}/wiki/{}",
            self.language,
            self.wikipedia_host,
            urlencoding::encode(title)
        )
    }

    /// Save config to file
    pub fn save(&self, path: impl Into<PathBuf>) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.into(), content)?;
        Ok(())
    }

    /// Load config from file
    pub fn load(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url(), "https://en.wikipedia.org/w/api.php");
        assert_eq!(config.wikidata_api_url(), "https://www.wikidata.org/w/api.php");
        assert_eq!(config.timeout_secs, 5);
        assert!(!config.smart);
    }

    #[test]
    fn test_article_url_encodes_title() {
        let config = ClientConfig::new().with_language(LanguageCode::parse("fa").unwrap());
        assert_eq!(config.article_url("Tehran"), "https://fa.wikipedia.org/wiki/Tehran");
        assert_eq!(
            config.article_url("Tehran Province"),
            "https://fa.wikipedia.org/wiki/Tehran%20Province"
        );
        assert_eq!(config.article_url("AT&T"), "https://fa.wikipedia.org/wiki/AT%26T");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wikiquery.json");
        let config = ClientConfig::new()
            .with_language(LanguageCode::parse("de").unwrap())
            .with_smart(true)
            .with_timeout_secs(12);
        config.save(&path).unwrap();
        assert_eq!(ClientConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_rejects_bad_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wikiquery.json");
        std::fs::write(&path, r#"{"language": "german"}"#).unwrap();
        assert!(ClientConfig::load(&path).is_err());
    }

    #[test]
    fn test_load_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wikiquery.json");
        std::fs::write(&path, r#"{"smart": true}"#).unwrap();
        let config = ClientConfig::load(&path).unwrap();
        assert!(config.smart);
        assert_eq!(config.language.code(), "en");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
