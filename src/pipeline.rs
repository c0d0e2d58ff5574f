/*!
 * Pipeline orchestrator.
 *
 * Sequences the merge engine into the translation engine and holds the
 * state the shell builds up: selected sources, destination folder, and the
 * paths of the merged and translated documents.
 *
 * Operations take `&mut self`, so a pipeline runs at most one merge or
 * translation at a time.
 */

use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::PipelineError;
use crate::file_utils::FileManager;
use crate::localization::{MergeEngine, ProgressReport};
use crate::translation::{CacheStats, TextTranslator, TermPreserver, TranslationCache, TranslationEngine, TranslationOutcome};

/// State accumulated by shell actions during one pipeline run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineState {
    /// Source documents, in merge order
    pub sources: Vec<PathBuf>,
    /// Folder receiving both output files
    pub destination: Option<PathBuf>,
    /// Set by a successful merge
    pub merged_path: Option<PathBuf>,
    /// Set by a successful translation
    pub translated_path: Option<PathBuf>,
}

impl PipelineState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Merge-then-translate orchestrator
pub struct Pipeline {
    state: PipelineState,
    merge_engine: MergeEngine,
    translation_engine: TranslationEngine,
    extension: String,
}

impl Pipeline {
    pub fn new(merge_engine: MergeEngine, translation_engine: TranslationEngine, extension: impl Into<String>) -> Self {
        Self {
            state: PipelineState::default(),
            merge_engine,
            translation_engine,
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }

    /// Build a pipeline from the configuration around `translator`
    pub fn from_config(config: &Config, translator: Arc<dyn TextTranslator>) -> Result<Self> {
        let preserver = TermPreserver::new(&config.protected_terms)?;
        let translation_engine = TranslationEngine::new(translator)
            .with_languages(&config.source_language, &config.target_language)
            .with_preserver(preserver)
            .with_cache(TranslationCache::new(config.translation.common.cache_enabled))
            .with_extension(config.extension());

        Ok(Self::new(
            MergeEngine::new(&config.merged_locale),
            translation_engine,
            config.extension(),
        ))
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn translator_name(&self) -> String {
        self.translation_engine.translator_name()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.translation_engine.cache_stats()
    }

    /// Choose the source documents; directories contribute every matching
    /// file beneath them. Starts a new run.
    pub fn select_sources<P: AsRef<Path>>(&mut self, inputs: &[P]) -> Result<&[PathBuf], PipelineError> {
        let sources = FileManager::collect_sources(inputs, &self.extension)
            .map_err(|e| PipelineError::InvalidSelection(e.to_string()))?;

        if sources.is_empty() {
            return Err(PipelineError::NoSourcesSelected);
        }

        let destination = self.state.destination.take();
        self.state.reset();
        self.translation_engine.clear_cache();
        self.state.destination = destination;
        self.state.sources = sources;

        info!("Selected {} file(s)", self.state.sources.len());
        Ok(&self.state.sources)
    }

    /// Choose the folder that receives the output files
    pub fn select_destination<P: AsRef<Path>>(&mut self, destination: P) -> Result<(), PipelineError> {
        let destination = destination.as_ref();
        if destination.as_os_str().is_empty() {
            return Err(PipelineError::NoDestination);
        }

        self.state.destination = Some(destination.to_path_buf());
        info!("Selected folder: {}", destination.display());
        Ok(())
    }

    /// Use an existing merged document as the input of `translate_merged_file`
    pub fn adopt_merged_file<P: AsRef<Path>>(&mut self, merged_path: P) -> Result<(), PipelineError> {
        let merged_path = merged_path.as_ref();
        if !FileManager::file_exists(merged_path) {
            return Err(PipelineError::MergedFileMissing { path: merged_path.to_path_buf() });
        }

        self.state.merged_path = Some(merged_path.to_path_buf());
        self.state.translated_path = None;
        self.translation_engine.clear_cache();
        Ok(())
    }

    /// Merge the selected sources into `destination/output_name` on a worker thread.
    ///
    /// `.localization` is appended to `output_name` when missing. On success
    /// the merged path is retained for `translate_merged_file`.
    pub async fn merge_files<F>(&mut self, output_name: &str, on_progress: F) -> Result<PathBuf, PipelineError>
    where
        F: Fn(ProgressReport) + Send + Sync + 'static,
    {
        if self.state.sources.is_empty() {
            return Err(PipelineError::NoSourcesSelected);
        }
        let destination = self.state.destination.clone().ok_or(PipelineError::NoDestination)?;

        let output_name = output_name.trim();
        if output_name.is_empty() {
            return Err(PipelineError::EmptyOutputName);
        }
        let output_path = destination.join(FileManager::ensure_extension(output_name, &self.extension));

        let engine = self.merge_engine.clone();
        let sources = self.state.sources.clone();
        let target = output_path.clone();

        tokio::task::spawn_blocking(move || engine.merge(&sources, &target, on_progress))
            .await
            .map_err(|e| PipelineError::Worker(e.to_string()))??;

        info!("Merged localization data has been saved to {}", output_path.display());
        self.state.merged_path = Some(output_path.clone());
        self.state.translated_path = None;
        Ok(output_path)
    }

    /// Translate the merged document retained by the last merge.
    ///
    /// The output lands in the selected destination, or next to the merged
    /// document when no destination was chosen.
    pub async fn translate_merged_file<F>(&mut self, on_progress: F) -> Result<TranslationOutcome, PipelineError>
    where
        F: Fn(ProgressReport) + Send + Sync + 'static,
    {
        let merged_path = self.state.merged_path.clone().ok_or(PipelineError::NoMergedFile)?;
        if !FileManager::file_exists(&merged_path) {
            return Err(PipelineError::MergedFileMissing { path: merged_path });
        }

        let destination = match &self.state.destination {
            Some(destination) => destination.clone(),
            None => merged_path.parent().map(Path::to_path_buf).unwrap_or_default(),
        };

        let outcome = self.translation_engine
            .translate_file(&merged_path, &destination, on_progress)
            .await?;

        self.state.translated_path = Some(outcome.output_path.clone());
        Ok(outcome)
    }

    /// Shell entry point: select, merge, and retain the merged path
    pub async fn run_merge<P, F>(&mut self, sources: &[P], destination: &Path, output_name: &str, on_progress: F) -> Result<PathBuf, PipelineError>
    where
        P: AsRef<Path>,
        F: Fn(ProgressReport) + Send + Sync + 'static,
    {
        self.select_destination(destination)?;
        self.select_sources(sources)?;
        self.merge_files(output_name, on_progress).await
    }

    /// Shell entry point: translate the retained merged document
    pub async fn run_translate<F>(&mut self, on_progress: F) -> Result<TranslationOutcome, PipelineError>
    where
        F: Fn(ProgressReport) + Send + Sync + 'static,
    {
        self.translate_merged_file(on_progress).await
    }
}
