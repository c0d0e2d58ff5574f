/*!
 * Translation engine.
 *
 * Walks the `localizedText` map of a merged document in order and sends each
 * string value through the injected `TextTranslator`, then through the term
 * preserver and the text normalizer. A provider failure keeps the original
 * value for that key and the run continues.
 */

use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::{DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_LANGUAGE, LOCALIZATION_EXTENSION};
use crate::errors::{LocalizationError, ProviderError};
use crate::file_utils::FileManager;
use crate::localization::{LocalizationDocument, ProgressReport};
use super::cache::{CacheStats, TranslationCache};
use super::core::TextTranslator;
use super::formatting::capitalize_words;
use super::terms::TermPreserver;

/// Counters for one translation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationStats {
    /// Keys in `localizedText`
    pub total_keys: usize,
    /// String values replaced by a translation
    pub translated: usize,
    /// String values kept because the provider failed
    pub failed: usize,
    /// Non-string values copied through
    pub passed_through: usize,
    /// Translations served from the cache
    pub cache_hits: usize,
    /// Keys whose provider call failed, in processing order
    pub failed_keys: Vec<String>,
}

impl TranslationStats {
    pub fn summary(&self) -> String {
        format!(
            "{} keys: {} translated, {} kept after provider errors, {} non-text ({} from cache)",
            self.total_keys, self.translated, self.failed, self.passed_through, self.cache_hits
        )
    }
}

/// Result of translating a merged file
#[derive(Debug, Clone)]
pub struct TranslationOutcome {
    /// Where the translated document was written
    pub output_path: PathBuf,
    pub stats: TranslationStats,
}

/// Translates localization documents through a `TextTranslator`
pub struct TranslationEngine {
    translator: Arc<dyn TextTranslator>,
    preserver: TermPreserver,
    cache: TranslationCache,
    source_language: String,
    target_language: String,
    extension: String,
}

impl TranslationEngine {
    /// Engine with the built-in vocabulary and the default language pair
    pub fn new(translator: Arc<dyn TextTranslator>) -> Self {
        Self {
            translator,
            preserver: TermPreserver::default(),
            cache: TranslationCache::new(true),
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            extension: LOCALIZATION_EXTENSION.to_string(),
        }
    }

    pub fn with_languages(mut self, source_language: impl Into<String>, target_language: impl Into<String>) -> Self {
        self.source_language = source_language.into();
        self.target_language = target_language.into();
        self
    }

    pub fn with_preserver(mut self, preserver: TermPreserver) -> Self {
        self.preserver = preserver;
        self
    }

    pub fn with_cache(mut self, cache: TranslationCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn translator_name(&self) -> String {
        self.translator.name()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Forget cached provider results, e.g. when a new run starts
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Translate one string and post-process it.
    ///
    /// Returns whether the provider result came from the cache.
    async fn translate_value(&self, text: &str) -> Result<(String, bool), ProviderError> {
        let (raw, cached) = match self.cache.get(text, &self.source_language, &self.target_language) {
            Some(hit) => (hit, true),
            None => {
                let raw = self.translator
                    .translate(text, &self.source_language, &self.target_language)
                    .await?;
                self.cache.store(text, &self.source_language, &self.target_language, &raw);
                (raw, false)
            }
        };

        let preserved = self.preserver.preserve_case(text, &raw);
        Ok((capitalize_words(&preserved), cached))
    }

    /// Translate every string value of `entries`, reporting after each key
    pub async fn translate_entries<F>(&self, entries: &Map<String, Value>, on_progress: F) -> (Map<String, Value>, TranslationStats)
    where
        F: Fn(ProgressReport),
    {
        let total = entries.len();
        let mut stats = TranslationStats {
            total_keys: total,
            ..TranslationStats::default()
        };
        let mut translated = Map::new();

        if total == 0 {
            on_progress(ProgressReport::new(0, 0));
            return (translated, stats);
        }

        for (index, (key, value)) in entries.iter().enumerate() {
            let output = match value {
                Value::String(text) => match self.translate_value(text).await {
                    Ok((result, cached)) => {
                        stats.translated += 1;
                        if cached {
                            stats.cache_hits += 1;
                        }
                        debug!("{}: '{}' -> '{}'", key, text, result);
                        Value::String(result)
                    },
                    Err(e) => {
                        warn!("Translation failed for key '{}': {} (keeping original)", key, e);
                        stats.failed += 1;
                        stats.failed_keys.push(key.clone());
                        value.clone()
                    }
                },
                other => {
                    stats.passed_through += 1;
                    other.clone()
                }
            };

            translated.insert(key.clone(), output);
            on_progress(ProgressReport::new(index + 1, total));
        }

        (translated, stats)
    }

    /// Translate a document; every top-level field other than `localizedText` is kept
    pub async fn translate_document<F>(&self, document: &LocalizationDocument, on_progress: F) -> (LocalizationDocument, TranslationStats)
    where
        F: Fn(ProgressReport),
    {
        let (localized_text, stats) = self.translate_entries(&document.localized_text, on_progress).await;
        (document.with_localized_text(localized_text), stats)
    }

    /// Path the translated version of `merged_path` is written to
    pub fn output_path(&self, merged_path: &Path, destination_dir: &Path) -> PathBuf {
        FileManager::translated_output_path(merged_path, destination_dir, &self.extension)
    }

    /// Load `merged_path`, translate it and write the result into `destination_dir`.
    ///
    /// Nothing is written when the document is invalid or the write fails.
    pub async fn translate_file<F>(&self, merged_path: &Path, destination_dir: &Path, on_progress: F) -> Result<TranslationOutcome, LocalizationError>
    where
        F: Fn(ProgressReport),
    {
        let document = LocalizationDocument::load(merged_path)?;
        info!(
            "Translating {} keys from {} ({} -> {}) with {}",
            document.len(),
            merged_path.display(),
            self.source_language,
            self.target_language,
            self.translator.name()
        );

        let (translated, stats) = self.translate_document(&document, on_progress).await;

        let output_path = self.output_path(merged_path, destination_dir);
        translated.save(&output_path)?;

        info!("Translated localization data has been saved to {}", output_path.display());
        info!("{}", stats.summary());
        let cache = self.cache.stats();
        debug!("Cache: {} entries, {:.0}% hit rate", cache.entries, cache.hit_rate() * 100.0);

        Ok(TranslationOutcome { output_path, stats })
    }
}
