/*!
 * Tests for application configuration functionality
 */

use std::str::FromStr;
use locpipe::app_config::{Config, LogLevel, TranslationProvider, DEFAULT_PROTECTED_TERMS};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "de");
    assert_eq!(config.target_language, "en");
    assert_eq!(config.merged_locale, "en-US");
    assert_eq!(config.extension(), "localization");
    assert_eq!(config.translation.provider, TranslationProvider::MyMemory);
    assert_eq!(config.protected_terms, DEFAULT_PROTECTED_TERMS.iter().map(|t| t.to_string()).collect::<Vec<_>>());
    assert!(config.translation.common.cache_enabled);
    assert_eq!(config.log_level, LogLevel::Info);

    // Every provider ships with an entry
    for provider in [TranslationProvider::MyMemory, TranslationProvider::Ollama, TranslationProvider::Anthropic] {
        assert!(config.translation.get_provider_config(&provider).is_some(), "missing {}", provider);
    }
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Invalid source language
    config.source_language = "qqq".to_string();
    assert!(config.validate().is_err());
    config.source_language = "de".to_string();

    // Empty target language
    config.target_language = "".to_string();
    assert!(config.validate().is_err());
    config.target_language = "en-GB".to_string();
    assert!(config.validate().is_ok());

    // Blank merged locale
    config.merged_locale = "  ".to_string();
    assert!(config.validate().is_err());
    config.merged_locale = "en-US".to_string();

    // Anthropic requires an API key
    config.translation.provider = TranslationProvider::Anthropic;
    assert!(config.validate().is_err());
}

/// Test that a sparse config file is completed with defaults
#[test]
fn test_deserialize_withPartialJson_shouldFillDefaults() {
    let json = r#"{
        "target_language": "fr",
        "translation": { "provider": "ollama" }
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.source_language, "de");
    assert_eq!(config.target_language, "fr");
    assert_eq!(config.translation.provider, TranslationProvider::Ollama);
    assert_eq!(config.translation.get_model(), "llama3.2");
    assert_eq!(config.translation.get_endpoint(), "http://localhost:11434");
    assert_eq!(config.extension(), "localization");
}

/// Test provider parsing and naming
#[test]
fn test_translation_provider_fromStr_shouldAcceptLowercaseNames() {
    assert_eq!(TranslationProvider::from_str("MyMemory").unwrap(), TranslationProvider::MyMemory);
    assert_eq!(TranslationProvider::from_str("ollama").unwrap(), TranslationProvider::Ollama);
    assert!(TranslationProvider::from_str("openai").is_err());
    assert_eq!(TranslationProvider::Anthropic.display_name(), "Anthropic");
    assert_eq!(TranslationProvider::MyMemory.to_string(), "mymemory");
}

/// Test model override when the active provider has no entry
#[test]
fn test_set_model_withMissingProviderEntry_shouldAddIt() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Ollama;
    config.translation.available_providers.clear();

    config.translation.set_model("mistral");

    assert_eq!(config.translation.get_model(), "mistral");
    assert_eq!(config.translation.available_providers.len(), 1);
    assert_eq!(config.translation.get_timeout_secs(), 30);
}

/// Test that a leading dot in the configured extension is ignored
#[test]
fn test_extension_withLeadingDot_shouldStripIt() {
    let mut config = Config::default();
    config.output_extension = ".loc".to_string();
    assert_eq!(config.extension(), "loc");
}
