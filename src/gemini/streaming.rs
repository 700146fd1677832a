use futures_util::StreamExt;

use super::client::GeminiClient;
use super::{GenerateRequest, GenerateResponse};
use crate::error::EngineError;

impl GeminiClient {
    /// Streaming variant of generateContent. `on_token` fires for each text
    /// delta as it arrives; the accumulated text is returned at the end.
    pub async fn stream_generate(
        &self,
        request: GenerateRequest,
        mut on_token: impl FnMut(&str),
    ) -> Result<String, EngineError> {
        let url = format!(
            "{}?alt=sse",
            self.endpoint(&request.model, "streamGenerateContent")
        );
        log::debug!("streamGenerateContent call to {}", request.model);

        let response = self
            .http()
            .post(&url)
            .header("x-goog-api-key", self.api_key())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Api { status, body });
        }

        let mut stream = response.bytes_stream();
        let mut full_response = String::new();
        let mut buffer = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            buffer.push_str(&String::from_utf8_lossy(&chunk));

            // Drain complete SSE lines; a partial line stays buffered.
            while let Some(pos) = buffer.find('\n') {
                let line = buffer[..pos].trim().to_string();
                buffer = buffer[pos + 1..].to_string();

                if line.is_empty() || !line.starts_with("data: ") {
                    continue;
                }

                let data = &line[6..];
                if let Ok(piece) = serde_json::from_str::<GenerateResponse>(data) {
                    if let Some(text) = piece.text() {
                        full_response.push_str(&text);
                        on_token(&text);
                    }
                }
            }
        }

        Ok(full_response)
    }
}
