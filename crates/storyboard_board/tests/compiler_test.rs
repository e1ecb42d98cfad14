//! Tests for story decomposition and reference synthesis.

mod test_utils;

use storyboard_board::{
    compile_scenes, composition_suffix, describe_subject, synthesize_reference,
};
use storyboard_core::{ImageData, ReferenceKind, ResponseFormat};
use storyboard_error::GeminiErrorKind;
use test_utils::{MockDriver, MockResponse, image, request_text};

//
// ─── DECOMPOSITION ──────────────────────────────────────────────────────────────
//

#[tokio::test]
async fn test_decomposition_returns_prompts_in_order() {
    let driver = MockDriver::sequence(vec![MockResponse::Text(
        r#"["[CHARACTER: Fox] The fox wakes.", "The fox finds a lantern."]"#.to_string(),
    )]);

    let prompts =
        compile_scenes(&driver, "A fox finds a lantern.", &["Fox".to_string()], &[]).await;

    assert_eq!(
        prompts,
        vec!["[CHARACTER: Fox] The fox wakes.", "The fox finds a lantern."]
    );

    let requests = driver.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(*requests[0].response_format(), ResponseFormat::StringList);
    let prompt = request_text(&requests[0]);
    assert!(prompt.contains("Available Character Labels: Fox"));
    assert!(prompt.contains("Available Background Labels: None"));
    assert!(prompt.contains("A fox finds a lantern."));
}

#[tokio::test]
async fn test_decomposition_skips_brackets_in_leading_prose() {
    let driver = MockDriver::sequence(vec![MockResponse::Text(
        "Here are the [2] scenes:\n[\"The fox wakes.\", \"The fox finds a lantern.\"]"
            .to_string(),
    )]);

    let prompts = compile_scenes(&driver, "A fox finds a lantern.", &[], &[]).await;

    assert_eq!(prompts, vec!["The fox wakes.", "The fox finds a lantern."]);
}

#[tokio::test]
async fn test_decomposition_tolerates_fenced_json() {
    let driver = MockDriver::sequence(vec![MockResponse::Text(
        "```json\n[\"One\", \"  \", \"Two\"]\n```".to_string(),
    )]);

    let prompts = compile_scenes(&driver, "story", &[], &[]).await;
    assert_eq!(prompts, vec!["One", "Two"]);
}

#[tokio::test]
async fn test_decomposition_failure_is_empty() {
    let driver = MockDriver::failing();
    assert!(compile_scenes(&driver, "story", &[], &[]).await.is_empty());
    assert_eq!(driver.call_count(), 1);
}

#[tokio::test]
async fn test_malformed_decomposition_is_empty() {
    let driver = MockDriver::sequence(vec![MockResponse::Text("{\"scene\": 1}".to_string())]);
    assert!(compile_scenes(&driver, "story", &[], &[]).await.is_empty());
}

#[tokio::test]
async fn test_textless_decomposition_is_empty() {
    let driver = MockDriver::sequence(vec![MockResponse::Image(image(1))]);
    assert!(compile_scenes(&driver, "story", &[], &[]).await.is_empty());
}

//
// ─── REFERENCE SYNTHESIS ────────────────────────────────────────────────────────
//

#[tokio::test]
async fn test_character_synthesis_describes_then_renders() {
    let driver = MockDriver::sequence(vec![
        MockResponse::Text("A red fox with a blue scarf".to_string()),
        MockResponse::Image(image(7)),
    ]);

    let reference =
        synthesize_reference(&driver, "story", ReferenceKind::Character, "Main Character").await;

    let reference = reference.expect("reference synthesized");
    assert_eq!(reference.label(), "Main Character");
    assert_eq!(reference.image(), &image(7));

    let requests = driver.requests();
    assert_eq!(*requests[0].response_format(), ResponseFormat::Text);
    assert!(request_text(&requests[0]).contains("main character"));
    assert_eq!(*requests[1].response_format(), ResponseFormat::Image);
    assert_eq!(
        request_text(&requests[1]),
        format!(
            "A red fox with a blue scarf{}",
            composition_suffix(ReferenceKind::Character)
        )
    );
}

#[tokio::test]
async fn test_synthesized_reference_keeps_returned_mime() {
    let driver = MockDriver::sequence(vec![
        MockResponse::Text("A foggy harbour at dawn".to_string()),
        MockResponse::Image(ImageData::new(vec![0xff, 0xd8], "image/jpeg")),
    ]);

    let reference =
        synthesize_reference(&driver, "story", ReferenceKind::Background, "Main Background")
            .await
            .expect("reference synthesized");

    assert_eq!(reference.image().mime(), "image/jpeg");
}

#[tokio::test]
async fn test_background_description_excludes_characters() {
    let driver = MockDriver::sequence(vec![MockResponse::Text("  A frozen lake  ".to_string())]);

    let description = describe_subject(&driver, "story", ReferenceKind::Background).await;

    assert_eq!(description.as_deref(), Some("A frozen lake"));
    assert!(request_text(&driver.requests()[0]).contains("without any characters"));
}

#[tokio::test]
async fn test_failed_description_skips_render() {
    let driver = MockDriver::sequence(vec![MockResponse::Error(GeminiErrorKind::HttpError {
        status_code: 500,
        message: "boom".to_string(),
    })]);

    let reference = synthesize_reference(&driver, "story", ReferenceKind::Background, "bg").await;

    assert!(reference.is_none());
    assert_eq!(driver.call_count(), 1);
}

#[tokio::test]
async fn test_blank_description_skips_render() {
    let driver = MockDriver::sequence(vec![MockResponse::Text("   ".to_string())]);

    assert!(
        synthesize_reference(&driver, "story", ReferenceKind::Character, "c")
            .await
            .is_none()
    );
    assert_eq!(driver.call_count(), 1);
}

#[tokio::test]
async fn test_failed_render_yields_nothing() {
    let driver = MockDriver::sequence(vec![
        MockResponse::Text("A lighthouse".to_string()),
        MockResponse::Empty,
    ]);

    assert!(
        synthesize_reference(&driver, "story", ReferenceKind::Background, "bg")
            .await
            .is_none()
    );
    assert_eq!(driver.call_count(), 2);
}
