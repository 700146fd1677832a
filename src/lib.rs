pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod gemini;
pub mod session;

pub use crate::audio::PcmBuffer;
pub use crate::config::AppConfig;
pub use crate::engine::report::{ProductReport, ReportBundle};
pub use crate::engine::{AspectRatio, SearchParams};
pub use crate::error::EngineError;
pub use crate::gemini::client::GeminiClient;
pub use crate::session::{ChatMessage, ChatSession, Role};

/// Facade owning the long-lived backend client and configuration: one method
/// per feature. Every operation is stateless and independent, so a single
/// instance can serve concurrent callers without coordination.
pub struct MarketIntel {
    config: AppConfig,
    client: GeminiClient,
}

impl MarketIntel {
    pub fn new(config: AppConfig) -> Self {
        let client = GeminiClient::from_config(&config);
        Self { config, client }
    }

    pub fn with_client(config: AppConfig, client: GeminiClient) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Search-grounded market report for a product query.
    pub async fn generate_report(
        &self,
        params: &SearchParams,
    ) -> Result<ReportBundle, EngineError> {
        engine::report::generate_report(&self.client, &self.config, params).await
    }

    /// One-shot strategist advice; degrades to a fixed fallback string on
    /// failure instead of returning an error.
    pub async fn chat(&self, message: &str) -> String {
        engine::chat::chat(&self.client, &self.config, message).await
    }

    /// Streaming strategist advice; `on_token` fires per text delta.
    pub async fn chat_stream(
        &self,
        message: &str,
        on_token: impl FnMut(&str),
    ) -> Result<String, EngineError> {
        engine::chat::chat_stream(&self.client, &self.config, message, on_token).await
    }

    /// Rewrite a creative brief into an ad-ready image prompt.
    pub async fn enhance_prompt(&self, input: &str) -> Result<String, EngineError> {
        engine::studio::enhance_prompt(&self.client, &self.config, input).await
    }

    /// Generate an ad image; `None` when the model declines.
    pub async fn generate_image(
        &self,
        prompt: &str,
        ratio: AspectRatio,
    ) -> Result<Option<String>, EngineError> {
        engine::studio::generate_image(&self.client, &self.config, prompt, ratio).await
    }

    /// Composite an advertisement around a reference product photo.
    pub async fn generate_product_ad(
        &self,
        product_b64: &str,
        instruction: &str,
    ) -> Result<Option<String>, EngineError> {
        engine::studio::generate_product_ad(&self.client, &self.config, product_b64, instruction)
            .await
    }

    /// Ask a question about one uploaded media file.
    pub async fn analyze_media(
        &self,
        media_b64: &str,
        mime_type: &str,
        prompt: &str,
    ) -> Result<String, EngineError> {
        engine::media::analyze_media(&self.client, &self.config, media_b64, mime_type, prompt)
            .await
    }

    /// Synthesize speech into a playable buffer; `None` when no audio came back.
    pub async fn synthesize(&self, text: &str) -> Result<Option<PcmBuffer>, EngineError> {
        engine::speech::synthesize(&self.client, &self.config, text).await
    }

    /// Synthesize and play to completion; `false` when no audio was produced.
    pub async fn speak(&self, text: &str) -> Result<bool, EngineError> {
        engine::speech::speak(&self.client, &self.config, text).await
    }
}
