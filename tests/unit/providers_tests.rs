/*!
 * Tests for provider implementations
 *
 * Network tests only talk to a closed local port, never to a real service.
 */

use locpipe::app_config::{Config, TranslationProvider};
use locpipe::errors::ProviderError;
use locpipe::providers::Provider;
use locpipe::providers::anthropic::{Anthropic, AnthropicResponse};
use locpipe::providers::mymemory::{MyMemory, MyMemoryRequest, MyMemoryResponse};
use locpipe::providers::ollama::Ollama;
use locpipe::translation::{TextTranslator, TranslationService};

/// Nothing listens here, so requests fail fast with a connection error
const CLOSED_ENDPOINT: &str = "http://127.0.0.1:1";

/// Test that a blank email is not sent to MyMemory
#[test]
fn test_mymemory_request_url_withBlankEmail_shouldOmitContactParameter() {
    let client = MyMemory::new("https://api.mymemory.translated.net", Some("  ".to_string()), 5);
    let url = client.request_url(&MyMemoryRequest::new("Hallo", "de", "en")).unwrap();

    assert!(url.query_pairs().all(|(key, _)| key != "de"));
    assert_eq!(url.host_str(), Some("api.mymemory.translated.net"));
}

/// Test that an invalid endpoint is reported before any request
#[test]
fn test_mymemory_request_url_withInvalidEndpoint_shouldFail() {
    let client = MyMemory::new("not a url", None, 5);
    let result = client.request_url(&MyMemoryRequest::new("Hallo", "de", "en"));
    assert!(matches!(result, Err(ProviderError::RequestFailed(_))));
}

/// Test that a missing status counts as success
#[test]
fn test_mymemory_response_withoutStatus_shouldDefaultToOk() {
    let response: MyMemoryResponse = serde_json::from_str(r#"{"responseData":{"translatedText":"Hello"}}"#).unwrap();
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.response_data.match_score, None);
}

/// Test that an unreachable MyMemory endpoint maps to a connection error
#[tokio::test]
async fn test_mymemory_complete_withClosedPort_shouldReportConnectionError() {
    let client = MyMemory::new(CLOSED_ENDPOINT, None, 2);
    let result = client.complete(MyMemoryRequest::new("Hallo", "de", "en")).await;
    assert!(matches!(result, Err(ProviderError::ConnectionError(_))), "{:?}", result);
}

/// Test that a single JSON object body is accepted as-is
#[test]
fn test_ollama_parse_generation_withSingleObject_shouldParse() {
    let body = r#"{"model":"llama3.2","response":"  Hello  ","done":true}"#;
    let response = Ollama::parse_generation(body).unwrap();

    assert_eq!(Ollama::extract_text(&response), "Hello");
    assert!(response.done);
}

/// Test that garbage bodies surface as parse errors
#[test]
fn test_ollama_parse_generation_withGarbage_shouldReportParseError() {
    assert!(matches!(Ollama::parse_generation("<html>"), Err(ProviderError::ParseError(_))));
    assert!(matches!(Ollama::parse_generation(""), Err(ProviderError::ParseError(_))));
}

/// Test that an unreachable Ollama server fails the connection test
#[tokio::test]
async fn test_ollama_test_connection_withClosedPort_shouldFail() {
    let client = Ollama::new(CLOSED_ENDPOINT, 2);
    assert!(client.test_connection().await.is_err());
}

/// Test text extraction from an Anthropic response
#[test]
fn test_anthropic_extract_text_withSingleBlock_shouldTrim() {
    let response: AnthropicResponse = serde_json::from_str(
        r#"{"content":[{"type":"text","text":" Start the plant\n"}],"usage":{"input_tokens":12,"output_tokens":4}}"#
    ).unwrap();

    assert_eq!(Anthropic::extract_text(&response), "Start the plant");
    assert_eq!(response.usage.output_tokens, 4);
}

/// Test the service name for each provider
#[test]
fn test_translation_service_name_withEachProvider_shouldIncludeModel() {
    let mut config = Config::default().translation;
    assert_eq!(TranslationService::new(config.clone()).unwrap().name(), "MyMemory");

    config.provider = TranslationProvider::Ollama;
    config.set_model("mistral");
    assert_eq!(TranslationService::new(config).unwrap().name(), "Ollama - mistral");
}

/// Test that a service pointed at a closed port reports a provider error
#[tokio::test]
async fn test_translation_service_translate_withUnreachableEndpoint_shouldFail() {
    let mut config = Config::default().translation;
    for provider in config.available_providers.iter_mut() {
        provider.endpoint = CLOSED_ENDPOINT.to_string();
        provider.timeout_secs = 2;
    }

    let service = TranslationService::new(config).unwrap();
    let result = service.translate("Hallo", "de", "en").await;
    assert!(matches!(result, Err(ProviderError::ConnectionError(_))), "{:?}", result);
}
