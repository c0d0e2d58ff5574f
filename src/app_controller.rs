use anyhow::{Result, anyhow, Context};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::localization::ProgressReport;
use crate::pipeline::Pipeline;
use crate::translation::{TextTranslator, TranslationOutcome, TranslationService};

// @module: Application controller driving the merge and translate pipeline

/// Main application controller for localization files
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Translator shared with the pipeline
    translator: Arc<dyn TextTranslator>,
    // @field: Merge-then-translate state machine
    pipeline: Pipeline,
}

impl Controller {
    /// Create a controller with the provider selected in `config`
    pub fn with_config(config: Config) -> Result<Self> {
        let service = TranslationService::new(config.translation.clone())
            .context("Failed to create translation service")?;
        Self::with_translator(config, Arc::new(service))
    }

    /// Create a controller around an explicit translator
    pub fn with_translator(config: Config, translator: Arc<dyn TextTranslator>) -> Result<Self> {
        let pipeline = Pipeline::from_config(&config, Arc::clone(&translator))?;
        Ok(Self { config, translator, pipeline })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Merge `inputs` into `output_dir/output_name`
    pub async fn run_merge<P: AsRef<Path>>(&mut self, inputs: &[P], output_dir: &Path, output_name: &str) -> Result<PathBuf> {
        let start_time = Instant::now();

        // The output folder is created by the merge write, not here
        self.pipeline.select_destination(output_dir)?;
        let file_count = self.pipeline.select_sources(inputs)?.len();

        let progress_bar = Self::progress_bar(file_count, "files");
        progress_bar.set_message("Merging");
        let pb = progress_bar.clone();

        let result = self.pipeline
            .merge_files(output_name, move |report| Self::update_progress(&pb, report))
            .await;
        progress_bar.finish_and_clear();

        let merged_path = result?;
        info!("Success: {}", merged_path.display());
        info!("Merge completed in {}.", Self::format_duration(start_time.elapsed()));
        Ok(merged_path)
    }

    /// Translate a merged file. Without `merged`, the file produced by the
    /// last merge of this controller is used.
    pub async fn run_translate(&mut self, merged: Option<&Path>, output_dir: Option<&Path>) -> Result<TranslationOutcome> {
        let start_time = Instant::now();

        if let Some(merged) = merged {
            self.pipeline.adopt_merged_file(merged)?;
        }
        if let Some(output_dir) = output_dir {
            FileManager::ensure_dir(output_dir)?;
            self.pipeline.select_destination(output_dir)?;
        }

        info!("🚀 locpipe: {} ({} -> {})",
            self.translator.name(),
            self.config.source_language,
            self.config.target_language);
        info!("Translating, please wait…");

        let progress_bar = Self::progress_bar(0, "keys");
        progress_bar.set_message("Translating");
        let pb = progress_bar.clone();

        let result = self.pipeline
            .translate_merged_file(move |report| Self::update_progress(&pb, report))
            .await;
        progress_bar.finish_and_clear();

        let outcome = result?;
        if outcome.stats.failed > 0 {
            warn!("{} key(s) kept their original text: {}",
                outcome.stats.failed,
                outcome.stats.failed_keys.join(", "));
        }

        info!("{}", outcome.stats.summary());
        info!("Success: {}", outcome.output_path.display());
        info!("Translation completed in {}.", Self::format_duration(start_time.elapsed()));
        Ok(outcome)
    }

    /// Merge `inputs`, then translate the merged file into the same folder
    pub async fn run<P: AsRef<Path>>(&mut self, inputs: &[P], output_dir: &Path, output_name: &str) -> Result<(PathBuf, TranslationOutcome)> {
        let merged_path = self.run_merge(inputs, output_dir, output_name).await?;
        let outcome = self.run_translate(None, None).await?;
        Ok((merged_path, outcome))
    }

    /// Probe the configured translation provider
    pub async fn check_connection(&self) -> Result<()> {
        info!("Checking connection to {}", self.translator.name());
        self.translator
            .test_connection()
            .await
            .map_err(|e| anyhow!("{} is not reachable: {}", self.translator.name(), e))?;
        info!("{} is reachable", self.translator.name());
        Ok(())
    }

    fn progress_bar(len: usize, unit: &str) -> ProgressBar {
        let progress_bar = ProgressBar::new(len as u64);
        let template = format!("{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}} {{eta}}", unit);
        let style = ProgressStyle::default_bar()
            .template(&template)
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar
    }

    fn update_progress(progress_bar: &ProgressBar, report: ProgressReport) {
        progress_bar.set_length(report.total as u64);
        progress_bar.set_position(report.completed as u64);
    }

    // Format duration in a human-readable format (HH:MM:SS)
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
