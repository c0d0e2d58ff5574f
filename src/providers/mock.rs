/*!
 * Scripted provider for tests, benchmarks and offline runs.
 *
 * `MockProvider` answers without any network access. Its behavior decides
 * which texts fail:
 * - `MockProvider::working()` answers `[<target>] <text>` for every text
 * - `MockProvider::failing_on(marker)` fails texts containing `marker`
 * - `MockProvider::intermittent(n)` fails every n-th request
 * - `MockProvider::failing()` fails every request
 * - `MockProvider::empty()` answers with empty text
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::translation::core::TextTranslator;

/// One text handed to the mock
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

/// Scripted answer
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub text: String,
}

/// Which requests the mock fails
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    Working,
    /// Texts containing the marker fail with a connection error
    FailMatching { marker: &'static str },
    /// Every `fail_every`-th request fails with a 503
    Intermittent { fail_every: usize },
    Failing,
    /// Answers with empty text
    Empty,
}

/// Provider double; clones share the request counter
#[derive(Debug, Clone)]
pub struct MockProvider {
    behavior: MockBehavior,
    requests: Arc<AtomicUsize>,
    answer: Option<fn(&MockRequest) -> String>,
}

impl MockProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            requests: Arc::new(AtomicUsize::new(0)),
            answer: None,
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing_on(marker: &'static str) -> Self {
        Self::new(MockBehavior::FailMatching { marker })
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every: fail_every.max(1) })
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Replace the default `[<target>] <text>` answer for successful requests
    pub fn with_custom_response(mut self, answer: fn(&MockRequest) -> String) -> Self {
        self.answer = Some(answer);
        self
    }

    /// Requests received so far, across all clones
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn answer(&self, request: &MockRequest) -> MockResponse {
        let text = match self.answer {
            Some(answer) => answer(request),
            None => format!("[{}] {}", request.target_language, request.text),
        };
        MockResponse { text }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let index = self.requests.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(self.answer(&request)),
            MockBehavior::FailMatching { marker } if request.text.contains(marker) => {
                Err(ProviderError::ConnectionError(format!("Simulated failure for '{}'", request.text)))
            }
            MockBehavior::FailMatching { .. } => Ok(self.answer(&request)),
            MockBehavior::Intermittent { fail_every } if (index + 1) % fail_every == 0 => {
                Err(ProviderError::ApiError {
                    status_code: 503,
                    message: format!("Simulated intermittent failure (request #{})", index + 1),
                })
            }
            MockBehavior::Intermittent { .. } => Ok(self.answer(&request)),
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),
            MockBehavior::Empty => Ok(MockResponse { text: String::new() }),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError("Simulated outage".to_string())),
            _ => Ok(()),
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response.text.clone()
    }
}

#[async_trait]
impl TextTranslator for MockProvider {
    fn name(&self) -> String {
        "Mock".to_string()
    }

    async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> Result<String, ProviderError> {
        let response = self.complete(MockRequest {
            text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }).await?;

        let translated = Self::extract_text(&response);
        if translated.is_empty() && !text.is_empty() {
            return Err(ProviderError::EmptyTranslation);
        }
        Ok(translated)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        Provider::test_connection(self).await
    }
}
