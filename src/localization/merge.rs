/*!
 * Merge engine.
 *
 * Unions the `localizedText` maps of several localization documents into one
 * document. Files are processed in the order given and a later file's value
 * replaces an earlier one for the same key. The first invalid file aborts the
 * merge and nothing is written.
 */

use log::{debug, info};
use serde_json::Value;
use std::path::Path;

use crate::app_config::DEFAULT_MERGED_LOCALE;
use crate::errors::LocalizationError;
use super::document::LocalizationDocument;
use super::progress::ProgressReport;

/// Builds merged localization documents
#[derive(Debug, Clone)]
pub struct MergeEngine {
    /// Locale stamped on every merged document
    locale: String,
}

impl Default for MergeEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MERGED_LOCALE)
    }
}

impl MergeEngine {
    pub fn new(locale: impl Into<String>) -> Self {
        Self { locale: locale.into() }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Merge `paths` in memory, reporting progress after each file.
    ///
    /// The merged `$schema` is copied as-is from the last processed file,
    /// whatever its JSON type, or is an empty string when that file has none.
    pub fn combine<P, F>(&self, paths: &[P], on_progress: F) -> Result<LocalizationDocument, LocalizationError>
    where
        P: AsRef<Path>,
        F: Fn(ProgressReport),
    {
        let total = paths.len();
        let mut merged = LocalizationDocument::new("", self.locale.clone());
        let mut last_schema = None;

        for (index, path) in paths.iter().enumerate() {
            let path = path.as_ref();
            debug!("Processing file: {}", path.display());

            let document = LocalizationDocument::load(path)?;
            let entry_count = document.len();

            last_schema = document.schema().cloned();
            for (key, value) in document.localized_text {
                merged.localized_text.insert(key, value);
            }

            debug!("Merged {} entries from {}", entry_count, path.display());
            on_progress(ProgressReport::new(index + 1, total));
        }

        merged.set_schema(last_schema.unwrap_or_else(|| Value::String(String::new())));
        Ok(merged)
    }

    /// Merge `paths` and write the result to `output_path`
    pub fn merge<P, F>(&self, paths: &[P], output_path: &Path, on_progress: F) -> Result<LocalizationDocument, LocalizationError>
    where
        P: AsRef<Path>,
        F: Fn(ProgressReport),
    {
        let merged = self.combine(paths, on_progress)?;
        merged.save(output_path)?;

        info!(
            "Merged {} file(s) into {} ({} keys)",
            paths.len(),
            output_path.display(),
            merged.len()
        );

        Ok(merged)
    }
}
