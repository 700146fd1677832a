use async_trait::async_trait;
use reqwest::Client;

use super::{GenerateRequest, GenerateResponse, GenerativeBackend};
use crate::config::AppConfig;
use crate::error::EngineError;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Long-lived Gemini API client. Build one at startup and pass it by
/// reference to each operation; every call is independent, so concurrent use
/// needs no coordination.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            base_url: API_BASE.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.gemini_api_key.clone())
    }

    /// Point the client at a different host (proxies, local test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) fn endpoint(&self, model: &str, verb: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, verb)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, EngineError> {
        let url = self.endpoint(&request.model, "generateContent");
        log::debug!("generateContent call to {}", request.model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Gemini API error ({}) for {}", status, request.model);
            return Err(EngineError::Api { status, body });
        }

        let body: GenerateResponse = response.json().await?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_includes_model_and_verb() {
        let client = GeminiClient::new("key").with_base_url("http://localhost:9999/v1beta");
        assert_eq!(
            client.endpoint("gemini-3-flash-preview", "generateContent"),
            "http://localhost:9999/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn from_config_picks_up_the_credential() {
        let mut config = AppConfig::default();
        config.gemini_api_key = "secret".to_string();
        let client = GeminiClient::from_config(&config);
        assert_eq!(client.api_key(), "secret");
        assert_eq!(client.endpoint("m", "v"), format!("{}/models/m:v", API_BASE));
    }
}
