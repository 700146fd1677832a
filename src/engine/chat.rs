use crate::config::AppConfig;
use crate::error::EngineError;
use crate::gemini::client::GeminiClient;
use crate::gemini::{Content, GenerateRequest, GenerativeBackend, Part};

/// Shown to the user when the strategist backend is unavailable.
pub const CHAT_FALLBACK: &str = "Service busy. Try again.";

const STRATEGIST_PERSONA: &str =
    "You are a senior Meta Ads strategist. Provide simple, actionable advertising advice.";

pub(crate) fn build_chat_request(config: &AppConfig, message: &str) -> GenerateRequest {
    let mut request = GenerateRequest::new(
        config.chat_model.clone(),
        vec![Content::user(vec![Part::text(message)])],
    );
    request.system_instruction = Some(Content::system(STRATEGIST_PERSONA));
    request
}

/// One-shot advertising-advice exchange. Only the latest message goes to the
/// model; the caller-held transcript is display state. Unlike every other
/// operation, failures degrade to a fixed fallback string instead of
/// propagating.
pub async fn chat(backend: &dyn GenerativeBackend, config: &AppConfig, message: &str) -> String {
    match chat_inner(backend, config, message).await {
        Ok(text) => text,
        Err(err) => {
            log::error!("chat request failed: {}", err);
            CHAT_FALLBACK.to_string()
        }
    }
}

async fn chat_inner(
    backend: &dyn GenerativeBackend,
    config: &AppConfig,
    message: &str,
) -> Result<String, EngineError> {
    let response = backend.generate(build_chat_request(config, message)).await?;
    response
        .text()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(EngineError::EmptyResponse)
}

/// Streaming variant of `chat`: `on_token` fires per text delta. Errors
/// propagate here; the degrade-gracefully policy is specific to `chat`.
pub async fn chat_stream(
    client: &GeminiClient,
    config: &AppConfig,
    message: &str,
    on_token: impl FnMut(&str),
) -> Result<String, EngineError> {
    client
        .stream_generate(build_chat_request(config, message), on_token)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_is_single_turn_with_persona() {
        let config = AppConfig::default();
        let request = build_chat_request(&config, "How do I scale a winning ad?");

        assert_eq!(request.model, config.chat_model);
        assert_eq!(request.contents.len(), 1);
        assert_eq!(
            request.contents[0].parts[0].text.as_deref(),
            Some("How do I scale a winning ad?")
        );
        let persona = request.system_instruction.as_ref().unwrap();
        assert!(persona.parts[0]
            .text
            .as_deref()
            .unwrap()
            .contains("Meta Ads strategist"));
    }
}
