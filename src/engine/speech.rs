use crate::audio::{self, PcmBuffer};
use crate::config::AppConfig;
use crate::error::EngineError;
use crate::gemini::{
    Content, GenerateRequest, GenerationConfig, GenerativeBackend, Part, SpeechConfig,
};

/// Gemini TTS output format: signed 16-bit PCM, single channel, 24 kHz.
pub const TTS_SAMPLE_RATE: u32 = 24_000;
pub const TTS_CHANNELS: usize = 1;

pub(crate) fn build_speech_request(config: &AppConfig, text: &str) -> GenerateRequest {
    let mut request = GenerateRequest::new(
        config.tts_model.clone(),
        vec![Content::user(vec![Part::text(text)])],
    );
    request.generation_config = Some(GenerationConfig {
        response_modalities: Some(vec!["AUDIO".to_string()]),
        speech_config: Some(SpeechConfig::prebuilt_voice(config.tts_voice.clone())),
        ..Default::default()
    });
    request
}

/// Synthesize speech for `text` and decode it into a playable buffer.
/// `Ok(None)` when the backend produced no audio part.
pub async fn synthesize(
    backend: &dyn GenerativeBackend,
    config: &AppConfig,
    text: &str,
) -> Result<Option<PcmBuffer>, EngineError> {
    let response = backend.generate(build_speech_request(config, text)).await?;

    let Some(inline) = response.first_inline_data() else {
        log::info!("speech synthesis returned no audio part");
        return Ok(None);
    };

    let bytes = audio::decode_base64(&inline.data)?;
    Ok(Some(audio::decode_pcm16(
        &bytes,
        TTS_SAMPLE_RATE,
        TTS_CHANNELS,
    )))
}

/// Synthesize and play to completion on the default output device.
/// `Ok(false)` when no audio was produced.
pub async fn speak(
    backend: &dyn GenerativeBackend,
    config: &AppConfig,
    text: &str,
) -> Result<bool, EngineError> {
    let Some(clip) = synthesize(backend, config, text).await? else {
        return Ok(false);
    };

    tokio::task::spawn_blocking(move || clip.play())
        .await
        .map_err(|e| EngineError::Audio(format!("playback task failed: {}", e)))??;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speech_request_asks_for_audio_with_the_configured_voice() {
        let config = AppConfig::default();
        let request = build_speech_request(&config, "Your report is ready.");

        assert_eq!(request.model, config.tts_model);
        let generation = request.generation_config.as_ref().unwrap();
        assert_eq!(
            generation.response_modalities.as_deref(),
            Some(&["AUDIO".to_string()][..])
        );
        let voice = &generation
            .speech_config
            .as_ref()
            .unwrap()
            .voice_config
            .prebuilt_voice_config
            .voice_name;
        assert_eq!(voice, "Kore");
    }
}
