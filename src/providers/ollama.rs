use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use super::{request_error, Provider};

/// Ollama client for interacting with Ollama API
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// System message to guide the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// Generation options for the Ollama API
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature for generation (default: 0.8)
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model name
    pub model: String,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: String,
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    #[serde(default)]
    pub done: bool,
    /// Number of prompt tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    /// Number of generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
}

/// `/api/version` response
#[derive(Debug, Deserialize)]
struct VersionResponse {
    version: String,
}

impl GenerationRequest {
    /// Create a new non-streaming generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            options: None,
            stream: Some(false),
        }
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).temperature = Some(temperature);
        self
    }

    /// Cap the number of generated tokens
    pub fn num_predict(mut self, num_predict: u32) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).num_predict = Some(num_predict);
        self
    }
}

impl Ollama {
    /// Create a new Ollama client from a complete URL
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        let base_url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint
        } else {
            format!("http://{}", endpoint)
        };

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate text from the Ollama API; a single attempt
    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);

        let response = self.client.post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| request_error("Ollama", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Ollama API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let response_text = response.text().await
            .map_err(|e| request_error("Ollama", e))?;

        Self::parse_generation(&response_text)
    }

    /// Parse a generation body; tolerates servers that stream JSON lines
    /// even when `stream: false` was requested.
    pub fn parse_generation(body: &str) -> Result<GenerationResponse, ProviderError> {
        if let Ok(parsed) = serde_json::from_str::<GenerationResponse>(body) {
            return Ok(parsed);
        }

        let chunks: Vec<GenerationResponse> = body.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str::<GenerationResponse>(line))
            .collect::<Result<_, _>>()
            .map_err(|e| ProviderError::ParseError(format!("Ollama: {}", e)))?;

        let Some(last) = chunks.last() else {
            return Err(ProviderError::ParseError("Ollama: empty response body".to_string()));
        };

        Ok(GenerationResponse {
            model: last.model.clone(),
            created_at: last.created_at.clone(),
            response: chunks.iter().map(|c| c.response.as_str()).collect(),
            done: last.done,
            prompt_eval_count: last.prompt_eval_count,
            eval_count: last.eval_count,
        })
    }

    /// Get the Ollama server version
    pub async fn version(&self) -> Result<String, ProviderError> {
        let url = format!("{}/api/version", self.base_url);

        let response = self.client.get(&url)
            .send()
            .await
            .map_err(|e| request_error("Ollama", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: "Failed to get Ollama version".to_string(),
            });
        }

        let version = response.json::<VersionResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Ollama: {}", e)))?;

        Ok(version.version)
    }
}

#[async_trait]
impl Provider for Ollama {
    type Request = GenerationRequest;
    type Response = GenerationResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.generate(request).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.version().await.map(|_| ())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.response.trim().to_string()
    }
}
