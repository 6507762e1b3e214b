//! # Wikiquery
//!
//! Query the live Wikipedia and Wikidata APIs from Rust.
//!
//! This crate provides:
//! - Article summaries, plain text, rendered HTML and raw wikitext
//! - Categories, lead images, short descriptions and canonical URLs
//! - Full-text search and spelling suggestions
//! - Infobox scraping into a key/value map
//! - Optional "smart" mode that retries empty lookups with the first spelling suggestion
//!
//! ## Quick Start
//!
//! ```no_run
//! use wikiquery::WikiClient;
//!
//! # fn main() -> wikiquery::Result<()> {
//! let client = WikiClient::new()?.lang("fa")?.smart();
//! if let Some(summary) = client.summary("Tehran", &Default::default())? {
//!     println!("{}", summary);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ```bash
//! wikiquery --lang en summary "Tehran"
//! wikiquery --smart infobox "Elon Musk"
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod infobox;
pub mod page;
pub mod params;
pub mod redirect;
pub mod search;
pub mod transport;

pub use client::WikiClient;
pub use config::ClientConfig;
pub use error::{Result, WikiError};
pub use infobox::Infobox;
pub use page::{Category, PageProp, Revision, Thumbnail};
pub use params::{Action, ExtraParams, QueryParams};
pub use redirect::HopBudget;
pub use search::SearchHit;
pub use transport::{HttpTransport, Transport};

use serde::{Deserialize, Serialize};

/// Two-letter ISO 639-1 language code selecting the Wikipedia edition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Validate a language code: exactly two ASCII letters
    pub fn parse(code: &str) -> Result<Self> {
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(code.to_string()))
        } else {
            Err(WikiError::InvalidInput(format!("Invalid language code: {}", code)))
        }
    }

    /// Get the code as given
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LanguageCode {
    type Err = WikiError;

    fn from_str(s: &str) -> Result<Self> {
        LanguageCode::parse(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = WikiError;

    fn try_from(code: String) -> Result<Self> {
        LanguageCode::parse(&code)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code_accepts_two_letters() {
        for code in ["en", "fa", "DE", "pT"] {
            assert_eq!(LanguageCode::parse(code).unwrap().code(), code);
        }
    }

    #[test]
    fn test_language_code_rejects_everything_else() {
        for code in ["", "e", "eng", "simple", "e1", "1e", "é", "ñu", "en "] {
            let err = LanguageCode::parse(code).unwrap_err();
            assert!(matches!(err, WikiError::InvalidInput(_)), "{} should be rejected", code);
        }
    }

    #[test]
    fn test_language_code_serde() {
        let code: LanguageCode = serde_json::from_str("\"fa\"").unwrap();
        assert_eq!(code.code(), "fa");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"fa\"");
        assert!(serde_json::from_str::<LanguageCode>("\"farsi\"").is_err());
    }
}
