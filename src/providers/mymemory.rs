use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use super::{request_error, Provider};

/// Client for the MyMemory translation API
#[derive(Debug)]
pub struct MyMemory {
    /// HTTP client for API requests
    client: Client,
    /// Base URL, e.g. `https://api.mymemory.translated.net`
    endpoint: String,
    /// Contact email sent as `de`, raises the anonymous daily quota
    email: Option<String>,
}

/// One text to translate
#[derive(Debug, Clone)]
pub struct MyMemoryRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

impl MyMemoryRequest {
    pub fn new(text: impl Into<String>, source_language: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// Translation payload of a MyMemory response
#[derive(Debug, Deserialize)]
pub struct MyMemoryData {
    #[serde(rename = "translatedText")]
    pub translated_text: String,

    #[serde(rename = "match", default)]
    pub match_score: Option<f64>,
}

/// MyMemory `/get` response
#[derive(Debug, Deserialize)]
pub struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    pub response_data: MyMemoryData,

    /// 200 on success; sent as a number or a string depending on the path
    #[serde(rename = "responseStatus", default)]
    pub response_status: Value,

    #[serde(rename = "responseDetails", default)]
    pub response_details: Value,
}

impl MyMemoryResponse {
    /// Numeric status, 200 when the field is missing
    pub fn status_code(&self) -> u16 {
        match &self.response_status {
            Value::Number(n) => n.as_u64().map(|n| n as u16).unwrap_or(0),
            Value::String(s) => s.trim().parse().unwrap_or(0),
            Value::Null => 200,
            _ => 0,
        }
    }
}

impl MyMemory {
    /// Create a new client
    pub fn new(endpoint: impl Into<String>, email: Option<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            email: email.filter(|e| !e.trim().is_empty()),
        }
    }

    /// Build the `/get` URL for a request
    pub fn request_url(&self, request: &MyMemoryRequest) -> Result<Url, ProviderError> {
        let base = format!("{}/get", self.endpoint.trim_end_matches('/'));
        let mut url = Url::parse(&base)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid MyMemory endpoint {}: {}", base, e)))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("q", &request.text);
            query.append_pair("langpair", &format!("{}|{}", request.source_language, request.target_language));
            if let Some(email) = &self.email {
                query.append_pair("de", email);
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl Provider for MyMemory {
    type Request = MyMemoryRequest;
    type Response = MyMemoryResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let url = self.request_url(&request)?;
        debug!("MyMemory request: {} chars ({}|{})", request.text.chars().count(), request.source_language, request.target_language);

        let response = self.client.get(url)
            .send()
            .await
            .map_err(|e| request_error("MyMemory", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("MyMemory API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let parsed = response.json::<MyMemoryResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("MyMemory: {}", e)))?;

        let status_code = parsed.status_code();
        if status_code != 200 {
            let message = match &parsed.response_details {
                Value::String(s) if !s.is_empty() => s.clone(),
                _ => parsed.response_data.translated_text.clone(),
            };
            return Err(ProviderError::ApiError { status_code, message });
        }

        if parsed.response_data.translated_text.trim().is_empty() {
            return Err(ProviderError::EmptyTranslation);
        }

        Ok(parsed)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.complete(MyMemoryRequest::new("Hallo", "de", "en")).await.map(|_| ())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.response_data.translated_text.clone()
    }
}
