/*!
 * Core translation service implementation.
 *
 * This module defines the `TextTranslator` seam the translation engine talks
 * to, and `TranslationService`, which dispatches to the provider selected in
 * the configuration.
 */

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::debug;

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::Provider;
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::mymemory::{MyMemory, MyMemoryRequest};
use crate::providers::ollama::{GenerationRequest, Ollama};

/// Word used to probe a provider
const PROBE_TEXT: &str = "Hallo";

/// Translates a single string between two languages.
///
/// Implementations are shared with the worker that runs the translation
/// engine, hence `Send + Sync`.
#[async_trait]
pub trait TextTranslator: Send + Sync {
    /// Human readable provider name for logs
    fn name(&self) -> String;

    /// Translate `text` from `source_language` to `target_language`
    async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> Result<String, ProviderError>;

    /// Check that the provider is reachable
    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.translate(PROBE_TEXT, "de", "en").await.map(|_| ())
    }
}

/// Translation provider implementation variants
enum TranslationProviderImpl {
    /// MyMemory public API
    MyMemory {
        client: MyMemory,
    },

    /// Ollama LLM service
    Ollama {
        client: Ollama,
        model: String,
    },

    /// Anthropic API service
    Anthropic {
        client: Anthropic,
        model: String,
    },
}

/// Config-driven translation service
pub struct TranslationService {
    /// Provider implementation
    provider: TranslationProviderImpl,

    /// Configuration for the translation service
    pub config: TranslationConfig,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: TranslationConfig) -> Result<Self> {
        let timeout_secs = config.get_timeout_secs();

        let provider = match config.provider {
            ConfigTranslationProvider::MyMemory => {
                let email = Some(config.get_email());
                TranslationProviderImpl::MyMemory {
                    client: MyMemory::new(config.get_endpoint(), email, timeout_secs),
                }
            },
            ConfigTranslationProvider::Ollama => TranslationProviderImpl::Ollama {
                client: Ollama::new(config.get_endpoint(), timeout_secs),
                model: config.get_model(),
            },
            ConfigTranslationProvider::Anthropic => {
                let api_key = config.get_api_key();
                if api_key.is_empty() {
                    return Err(anyhow!("Translation API key is required for Anthropic provider"));
                }
                let model = config.get_model();
                TranslationProviderImpl::Anthropic {
                    client: Anthropic::new(api_key, config.get_endpoint(), model.clone(), timeout_secs),
                    model,
                }
            },
        };

        Ok(Self { provider, config })
    }

    /// System prompt for LLM providers with language names filled in
    pub fn system_prompt(&self, source_language: &str, target_language: &str) -> String {
        let source_name = language_utils::get_language_name(source_language)
            .unwrap_or_else(|_| source_language.to_string());
        let target_name = language_utils::get_language_name(target_language)
            .unwrap_or_else(|_| target_language.to_string());

        self.config.common.system_prompt
            .replace("{source_language}", &source_name)
            .replace("{target_language}", &target_name)
    }
}

/// Output budget for a single label; labels are short
fn max_tokens_for(text: &str) -> u32 {
    let chars = text.chars().count() as u32;
    (chars * 2).clamp(64, 4096)
}

fn non_empty(text: String) -> Result<String, ProviderError> {
    if text.trim().is_empty() {
        Err(ProviderError::EmptyTranslation)
    } else {
        Ok(text)
    }
}

#[async_trait]
impl TextTranslator for TranslationService {
    fn name(&self) -> String {
        let model = self.config.get_model();
        if model.is_empty() {
            self.config.provider.display_name().to_string()
        } else {
            format!("{} - {}", self.config.provider.display_name(), model)
        }
    }

    async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> Result<String, ProviderError> {
        debug!("Translating with {}: '{}'", self.config.provider, text);

        match &self.provider {
            TranslationProviderImpl::MyMemory { client } => {
                let request = MyMemoryRequest::new(text, source_language, target_language);
                let response = client.complete(request).await?;
                non_empty(MyMemory::extract_text(&response))
            },
            TranslationProviderImpl::Ollama { client, model } => {
                let request = GenerationRequest::new(model.clone(), text)
                    .system(self.system_prompt(source_language, target_language))
                    .temperature(self.config.common.temperature)
                    .num_predict(max_tokens_for(text));
                let response = client.complete(request).await?;
                non_empty(Ollama::extract_text(&response))
            },
            TranslationProviderImpl::Anthropic { client, model } => {
                let request = AnthropicRequest::new(model.clone(), max_tokens_for(text))
                    .system(self.system_prompt(source_language, target_language))
                    .temperature(self.config.common.temperature)
                    .add_message("user", text);
                let response = client.complete(request).await?;
                non_empty(Anthropic::extract_text(&response))
            },
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.provider {
            TranslationProviderImpl::MyMemory { client } => client.test_connection().await,
            TranslationProviderImpl::Ollama { client, .. } => client.test_connection().await,
            TranslationProviderImpl::Anthropic { client, .. } => client.test_connection().await,
        }
    }
}
