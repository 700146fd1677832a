use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::{normalize, AspectRatio};
use crate::config::AppConfig;
use crate::error::EngineError;
use crate::gemini::{
    Content, GenerateRequest, GenerationConfig, GenerativeBackend, ImageConfig, InlineData, Part,
};

/// Widest reference photo we put on the wire; larger uploads are downscaled.
const MAX_REFERENCE_WIDTH: u32 = 1536;

// ─── Prompt enhancement ─────────────────────────────────────────────────────

pub(crate) fn build_enhance_request(config: &AppConfig, user_input: &str) -> GenerateRequest {
    let prompt = format!(
        "Rewrite this image prompt to be professional for a Meta Ad: \"{}\". Only return the enhanced prompt.",
        user_input
    );
    GenerateRequest::new(
        config.enhance_model.clone(),
        vec![Content::user(vec![Part::text(prompt)])],
    )
}

/// Rewrite a free-form creative brief into an ad-ready image prompt.
pub async fn enhance_prompt(
    backend: &dyn GenerativeBackend,
    config: &AppConfig,
    user_input: &str,
) -> Result<String, EngineError> {
    let response = backend
        .generate(build_enhance_request(config, user_input))
        .await?;
    response
        .text()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(EngineError::EmptyResponse)
}

// ─── Image generation ───────────────────────────────────────────────────────

/// Generate a standalone ad image. The prompt is always enhanced first, then
/// handed to the image model with the aspect-ratio constraint. `Ok(None)`
/// means the model declined to produce an image, which is a valid outcome.
pub async fn generate_image(
    backend: &dyn GenerativeBackend,
    config: &AppConfig,
    prompt: &str,
    ratio: AspectRatio,
) -> Result<Option<String>, EngineError> {
    let enhanced = enhance_prompt(backend, config, prompt).await?;
    log::debug!("image prompt enhanced ({} chars)", enhanced.len());

    let mut request = GenerateRequest::new(
        config.image_model.clone(),
        vec![Content::user(vec![Part::text(enhanced)])],
    );
    request.generation_config = Some(GenerationConfig {
        image_config: Some(ImageConfig {
            aspect_ratio: ratio.as_str().to_string(),
        }),
        ..Default::default()
    });

    let response = backend.generate(request).await?;
    Ok(response.first_inline_data().map(normalize::to_data_uri))
}

// ─── Product-ad compositing ─────────────────────────────────────────────────

/// Decode and sanity-check the caller's product photo; oversized uploads are
/// downscaled and re-encoded as PNG before they go on the wire.
pub(crate) fn prepare_reference_image(product_b64: &str) -> Result<InlineData, EngineError> {
    let bytes = STANDARD
        .decode(product_b64.trim())
        .map_err(|e| EngineError::InvalidInput(format!("product photo is not valid base64: {}", e)))?;

    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| EngineError::InvalidInput(format!("product photo is not a decodable image: {}", e)))?
        .to_rgba8();

    let (width, height) = decoded.dimensions();
    if width <= MAX_REFERENCE_WIDTH {
        return Ok(InlineData {
            mime_type: "image/png".to_string(),
            data: product_b64.trim().to_string(),
        });
    }

    let scale = MAX_REFERENCE_WIDTH as f64 / width as f64;
    let new_height = (height as f64 * scale) as u32;
    let resized = image::imageops::resize(
        &decoded,
        MAX_REFERENCE_WIDTH,
        new_height.max(1),
        image::imageops::FilterType::Triangle,
    );

    let mut buffer = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(resized)
        .write_to(&mut buffer, image::ImageFormat::Png)
        .map_err(|e| EngineError::InvalidInput(format!("failed to re-encode product photo: {}", e)))?;

    Ok(InlineData {
        mime_type: "image/png".to_string(),
        data: STANDARD.encode(buffer.into_inner()),
    })
}

/// Composite an advertisement around a reference product photo. The free-form
/// instruction is always enhanced before the image call.
pub async fn generate_product_ad(
    backend: &dyn GenerativeBackend,
    config: &AppConfig,
    product_b64: &str,
    instruction: &str,
) -> Result<Option<String>, EngineError> {
    let reference = prepare_reference_image(product_b64)?;
    let enhanced = enhance_prompt(backend, config, instruction).await?;

    let parts = vec![
        Part {
            text: None,
            inline_data: Some(reference),
        },
        Part::text(format!(
            "Based on this product image, generate a high-quality Meta advertisement image: {}",
            enhanced
        )),
    ];

    let request = GenerateRequest::new(config.image_model.clone(), vec![Content::user(parts)]);
    let response = backend.generate(request).await?;
    Ok(response.first_inline_data().map(normalize::to_data_uri))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_base64(width: u32, height: u32) -> String {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut buffer = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut buffer, image::ImageFormat::Png)
            .unwrap();
        STANDARD.encode(buffer.into_inner())
    }

    #[test]
    fn enhance_request_quotes_the_user_input() {
        let config = AppConfig::default();
        let request = build_enhance_request(&config, "planter on a beach");
        assert_eq!(request.model, config.enhance_model);
        let prompt = request.contents[0].parts[0].text.as_deref().unwrap();
        assert!(prompt.contains("\"planter on a beach\""));
        assert!(prompt.contains("Only return the enhanced prompt."));
    }

    #[test]
    fn small_reference_photos_pass_through_unchanged() {
        let b64 = png_base64(8, 8);
        let inline = prepare_reference_image(&b64).unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, b64);
    }

    #[test]
    fn oversized_reference_photos_are_downscaled() {
        let b64 = png_base64(2048, 64);
        let inline = prepare_reference_image(&b64).unwrap();
        assert_ne!(inline.data, b64);

        let bytes = STANDARD.decode(inline.data).unwrap();
        let resized = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(resized.dimensions(), (MAX_REFERENCE_WIDTH, 48));
    }

    #[test]
    fn non_base64_reference_photo_is_invalid_input() {
        let err = prepare_reference_image("not base64!!!").unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn undecodable_reference_photo_is_invalid_input() {
        let garbage = STANDARD.encode(b"definitely not an image");
        let err = prepare_reference_image(&garbage).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }
}
