/*!
 * Protected-term casing.
 *
 * Translation providers happily rewrite `EnBW` as `Enbw` or `FE` as `Fe`.
 * `TermPreserver` puts every whole-word, case-insensitive occurrence of a
 * protected term back into its canonical casing.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

use crate::app_config::DEFAULT_PROTECTED_TERMS;

static DEFAULT_PRESERVER: Lazy<TermPreserver> = Lazy::new(|| {
    TermPreserver::new(DEFAULT_PROTECTED_TERMS).unwrap()
});

/// Restores canonical casing of a fixed vocabulary
#[derive(Debug, Clone)]
pub struct TermPreserver {
    /// Terms in configuration order
    terms: Vec<String>,
    /// Lowercased term to canonical form; later duplicates win
    canonical: HashMap<String, String>,
    /// `None` for an empty vocabulary
    pattern: Option<Regex>,
}

impl TermPreserver {
    /// Build a preserver for `terms`; blank entries are ignored
    pub fn new<I, S>(terms: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms: Vec<String> = terms.into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let canonical = terms.iter()
            .map(|t| (t.to_lowercase(), t.clone()))
            .collect();

        let pattern = if terms.is_empty() {
            None
        } else {
            let alternation = terms.iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))?)
        };

        Ok(Self { terms, canonical, pattern })
    }

    /// The protected vocabulary
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Restore canonical casing of protected terms inside `translated`.
    ///
    /// `original` is the untranslated source text. Matching runs on
    /// `translated` only.
    pub fn preserve_case(&self, _original: &str, translated: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return translated.to_string();
        };

        pattern.replace_all(translated, |caps: &Captures| {
            let matched = &caps[0];
            self.canonical
                .get(&matched.to_lowercase())
                .cloned()
                .unwrap_or_else(|| matched.to_string())
        }).into_owned()
    }
}

impl Default for TermPreserver {
    fn default() -> Self {
        DEFAULT_PRESERVER.clone()
    }
}

/// `TermPreserver::preserve_case` over the built-in vocabulary
pub fn preserve_case(original: &str, translated: &str) -> String {
    DEFAULT_PRESERVER.preserve_case(original, translated)
}
