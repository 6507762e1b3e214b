//! Redirect detection and hop accounting

use once_cell::sync::Lazy;
use regex::Regex;

static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[(.*?)\]\]").unwrap());

/// Check if wikitext is a redirect page
pub fn is_redirect(text: &str) -> bool {
    let lower = text.trim_start().to_lowercase();
    lower.starts_with("#redirect") || lower.starts_with("# redirect")
}

/// Extract the target title from redirect wikitext
pub fn redirect_target(text: &str) -> Option<String> {
    if !is_redirect(text) {
        return None;
    }
    let caps = LINK_RE.captures(text)?;
    let full = caps.get(1)?.as_str();
    // [[Target|Display]] and [[Target#Section]] both point at Target
    let target = full.split(['|', '#']).next().unwrap_or(full).trim();
    if target.is_empty() {
        None
    } else {
        Some(target.to_string())
    }
}

/// Number of follow-up requests (redirect or suggestion hops) an operation may still make.
///
/// Never exceeds [`HopBudget::MAX_HOPS`]. When the budget runs out the operation
/// returns the last result it obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HopBudget {
    remaining: u8,
}

impl HopBudget {
    pub const MAX_HOPS: u8 = 2;

    /// A budget of `hops`, clamped to [`HopBudget::MAX_HOPS`]
    pub fn new(hops: u8) -> Self {
        Self {
            remaining: hops.min(Self::MAX_HOPS),
        }
    }

    pub fn max() -> Self {
        Self::new(Self::MAX_HOPS)
    }

    /// A single follow-up
    pub fn single() -> Self {
        Self::new(1)
    }

    pub fn exhausted() -> Self {
        Self::new(0)
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Take one hop, returning what is left afterwards, or `None` if nothing was left
    pub fn spend(self) -> Option<Self> {
        self.remaining.checked_sub(1).map(|remaining| Self { remaining })
    }
}

/// One hop: the redirect budget of `raw` and `categories`
impl Default for HopBudget {
    fn default() -> Self {
        Self::single()
    }
}
