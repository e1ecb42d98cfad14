// Tests for the Gemini client.
//
// Error and construction tests run offline. Tests that hit the real API are
// ignored unless the `api` feature is enabled and GEMINI_API_KEY is set.

use storyboard_config::StoryboardConfig;
use storyboard_core::{GenerateRequest, Part, ResponseFormat};
use storyboard_error::{GeminiError, GeminiErrorKind, StoryboardErrorKind};
use storyboard_interface::GenerationDriver;
use storyboard_models::GeminiClient;

//
// ─── ERROR HANDLING TESTS ───────────────────────────────────────────────────────
//

#[test]
fn test_gemini_error_display() {
    let error = GeminiError::new(GeminiErrorKind::MissingApiKey);
    let display = format!("{}", error);
    assert!(display.contains("GEMINI_API_KEY"));
    assert!(display.contains("Gemini Error:"));
    assert!(display.contains("at line"));
}

#[test]
fn test_gemini_error_kind_display() {
    let cases = vec![
        (
            GeminiErrorKind::HttpError {
                status_code: 429,
                message: "quota".to_string(),
            },
            "HTTP 429 error: quota",
        ),
        (
            GeminiErrorKind::EmptyResponse {
                expected: "image".to_string(),
                finish_reason: "SAFETY".to_string(),
            },
            "no image content (finish reason: SAFETY)",
        ),
        (
            GeminiErrorKind::MalformedResponse("eof".to_string()),
            "Malformed Gemini response: eof",
        ),
    ];

    for (kind, expected) in cases {
        assert!(format!("{}", kind).contains(expected), "{}", kind);
    }
}

//
// ─── CLIENT TESTS ───────────────────────────────────────────────────────────────
//

#[test]
fn test_client_metadata() -> anyhow::Result<()> {
    let config = StoryboardConfig::bundled()?;
    let client = GeminiClient::with_api_key("test-key", &config.gemini)?;

    assert_eq!(client.provider_name(), "gemini");
    assert_eq!(client.model_name(), config.gemini.text_model);
    Ok(())
}

#[tokio::test]
async fn test_unreachable_endpoint_is_request_error() -> anyhow::Result<()> {
    let mut config = StoryboardConfig::bundled()?.gemini;
    config.api_base = "http://127.0.0.1:9".to_string();
    config.timeout_secs = 2;
    let client = GeminiClient::with_api_key("test-key", &config)?;

    let request = GenerateRequest::builder()
        .parts(vec![Part::Text("Hello".to_string())])
        .build()?;

    let err = client.generate(&request).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        StoryboardErrorKind::Gemini(GeminiError {
            kind: GeminiErrorKind::ApiRequest(_),
            ..
        })
    ));
    Ok(())
}

//
// ─── LIVE API TESTS ─────────────────────────────────────────────────────────────
//

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_live_text_generation() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let client = GeminiClient::new()?;

    let request = GenerateRequest::builder()
        .parts(vec![Part::Text(
            "Describe a lighthouse in one sentence.".to_string(),
        )])
        .build()?;

    let response = client.generate(&request).await?;
    assert!(response.first_text().is_some());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_live_scene_list() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let client = GeminiClient::new()?;

    let request = GenerateRequest::builder()
        .parts(vec![Part::Text(
            "Return a JSON array of two short scene descriptions for: a fox finds a lantern."
                .to_string(),
        )])
        .response_format(ResponseFormat::StringList)
        .build()?;

    let response = client.generate(&request).await?;
    let text = response.first_text().unwrap_or_default();
    let scenes: Vec<String> = serde_json::from_str(text)?;
    assert!(!scenes.is_empty());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_live_image_generation() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let client = GeminiClient::new()?;

    let request = GenerateRequest::builder()
        .parts(vec![Part::Text("A red kite over green hills".to_string())])
        .response_format(ResponseFormat::Image)
        .aspect_ratio(storyboard_core::AspectRatio::Square1x1)
        .build()?;

    let response = client.generate(&request).await?;
    assert!(response.first_image().is_some_and(|image| !image.is_empty()));
    Ok(())
}
