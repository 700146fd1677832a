use crate::config::AppConfig;
use crate::error::EngineError;
use crate::gemini::{Content, GenerateRequest, GenerativeBackend, Part};

/// Ask a free-form question about one uploaded media file (image or audio).
pub async fn analyze_media(
    backend: &dyn GenerativeBackend,
    config: &AppConfig,
    media_b64: &str,
    mime_type: &str,
    prompt: &str,
) -> Result<String, EngineError> {
    let request = GenerateRequest::new(
        config.analysis_model.clone(),
        vec![Content::user(vec![
            Part::inline(mime_type, media_b64),
            Part::text(prompt),
        ])],
    );

    let response = backend.generate(request).await?;
    response
        .text()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(EngineError::EmptyResponse)
}
