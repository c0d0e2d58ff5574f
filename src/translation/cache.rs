/*!
 * Translation caching functionality.
 *
 * Localization documents repeat the same labels under many keys; the cache
 * keeps raw provider output so each distinct value is sent once per language
 * pair. The pipeline clears the cache whenever a new run starts.
 */

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::RwLock;
use log::debug;

/// Source and target language of a cached translation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LanguagePair {
    source: String,
    target: String,
}

/// Entries grouped by language pair, then by source text
type Entries = HashMap<LanguagePair, HashMap<String, String>>;

/// Counters reported by `TranslationCache::stats`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CacheStats {
    /// Cached translations across all language pairs
    pub entries: usize,
    pub hits: usize,
    pub misses: usize,
}

impl CacheStats {
    /// Share of lookups answered from the cache
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

/// Shared cache of provider results; clones see the same entries
#[derive(Clone, Default)]
pub struct TranslationCache {
    entries: Arc<RwLock<Entries>>,
    hits: Arc<AtomicUsize>,
    misses: Arc<AtomicUsize>,
    disabled: bool,
}

impl TranslationCache {
    /// Create a cache; a disabled cache stores nothing and never hits
    pub fn new(enabled: bool) -> Self {
        Self {
            disabled: !enabled,
            ..Self::default()
        }
    }

    /// Cached translation of `text` for the language pair
    pub fn get(&self, text: &str, source_language: &str, target_language: &str) -> Option<String> {
        if self.disabled {
            return None;
        }

        let pair = LanguagePair {
            source: source_language.to_string(),
            target: target_language.to_string(),
        };
        let found = self.entries.read()
            .get(&pair)
            .and_then(|texts| texts.get(text))
            .cloned();

        match &found {
            Some(_) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for '{}' ({} -> {})", truncate_text(text, 30), source_language, target_language);
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
            }
        }

        found
    }

    /// Remember `translation` as the provider result for `text`
    pub fn store(&self, text: &str, source_language: &str, target_language: &str, translation: &str) {
        if self.disabled {
            return;
        }

        let pair = LanguagePair {
            source: source_language.to_string(),
            target: target_language.to_string(),
        };
        self.entries.write()
            .entry(pair)
            .or_default()
            .insert(text.to_string(), translation.to_string());
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Drop every entry and reset the counters
    pub fn clear(&self) {
        self.entries.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.entries.read().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }
}

/// First `max_chars` characters of `text`, with an ellipsis when cut
fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    }
}
