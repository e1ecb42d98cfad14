//! Conversions between storyboard request types and Gemini wire types.

use serde_json::json;
use storyboard_core::{GenerateRequest, GenerateResponse, ImageData, Output, ResponseFormat};
use storyboard_error::{GeminiError, GeminiErrorKind};

use super::GeminiResult;
use super::dto::{
    Content, GeminiRequest, GeminiResponse, GenerationConfig, ImageConfig, InlineData,
    InlineDataPart, Part, TextPart,
};

/// Converts a storyboard request into a single-turn Gemini request.
pub fn to_gemini_request(request: &GenerateRequest) -> GeminiRequest {
    let parts = request
        .parts()
        .iter()
        .map(|part| match part {
            storyboard_core::Part::Text(text) => Part::Text(TextPart { text: text.clone() }),
            storyboard_core::Part::Image(image) => Part::InlineData(InlineDataPart {
                inline_data: InlineData {
                    mime_type: image.mime().to_string(),
                    data: image.to_base64(),
                },
            }),
        })
        .collect();

    let generation_config = match request.response_format() {
        ResponseFormat::Text => None,
        ResponseFormat::StringList => Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(json!({
                "type": "ARRAY",
                "items": {
                    "type": "STRING",
                    "description": "A highly detailed prompt for a storyboard scene, including [CHARACTER: label] or [BACKGROUND: label] tags where appropriate."
                }
            })),
            ..Default::default()
        }),
        ResponseFormat::Image => Some(GenerationConfig {
            response_modalities: Some(vec!["IMAGE".to_string()]),
            image_config: request.aspect_ratio().map(|ratio| ImageConfig {
                aspect_ratio: Some(ratio.as_str().to_string()),
            }),
            ..Default::default()
        }),
    };

    GeminiRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        generation_config,
    }
}

/// Converts a Gemini response into storyboard outputs.
///
/// Only the first candidate is read. A response without the kind of content
/// the request asked for is an error, so callers never mistake a blocked or
/// text-only reply for a render.
pub fn from_gemini_response(
    response: GeminiResponse,
    format: ResponseFormat,
) -> GeminiResult<GenerateResponse> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(GeminiError::new(GeminiErrorKind::EmptyResponse {
            expected: expected_label(format).to_string(),
            finish_reason: "no candidates".to_string(),
        }));
    };

    let finish_reason = candidate
        .finish_reason
        .unwrap_or_else(|| "unknown".to_string());

    let mut outputs = Vec::new();
    for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
        match part {
            Part::Text(TextPart { text }) => outputs.push(Output::Text(text)),
            Part::InlineData(InlineDataPart { inline_data }) => {
                let image = ImageData::from_base64(&inline_data.data, inline_data.mime_type)
                    .map_err(|e| GeminiError::new(GeminiErrorKind::Base64Decode(e.to_string())))?;
                outputs.push(Output::Image(image));
            }
            Part::Other(_) => {}
        }
    }

    let response = GenerateResponse::new(outputs);
    let satisfied = match format {
        ResponseFormat::Image => response.first_image().is_some(),
        ResponseFormat::Text | ResponseFormat::StringList => response
            .first_text()
            .is_some_and(|text| !text.trim().is_empty()),
    };

    if satisfied {
        Ok(response)
    } else {
        Err(GeminiError::new(GeminiErrorKind::EmptyResponse {
            expected: expected_label(format).to_string(),
            finish_reason,
        }))
    }
}

fn expected_label(format: ResponseFormat) -> &'static str {
    match format {
        ResponseFormat::Image => "image",
        ResponseFormat::Text | ResponseFormat::StringList => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyboard_core::AspectRatio;

    #[test]
    fn image_request_carries_modality_and_aspect_ratio() {
        let request = GenerateRequest::builder()
            .parts(vec![
                storyboard_core::Part::Text("A fox".to_string()),
                storyboard_core::Part::Image(ImageData::png(vec![1, 2, 3])),
            ])
            .response_format(ResponseFormat::Image)
            .aspect_ratio(AspectRatio::Portrait9x16)
            .build()
            .unwrap();

        let body = serde_json::to_value(to_gemini_request(&request)).unwrap();

        assert_eq!(body["contents"][0]["parts"][0]["text"], "A fox");
        assert_eq!(body["contents"][0]["parts"][1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(body["contents"][0]["parts"][1]["inlineData"]["data"], "AQID");
        assert_eq!(body["generationConfig"]["responseModalities"][0], "IMAGE");
        assert_eq!(body["generationConfig"]["imageConfig"]["aspectRatio"], "9:16");
    }

    #[test]
    fn text_request_has_no_generation_config() {
        let request = GenerateRequest::builder()
            .parts(vec![storyboard_core::Part::Text("Describe".to_string())])
            .build()
            .unwrap();

        let body = serde_json::to_value(to_gemini_request(&request)).unwrap();
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn string_list_request_asks_for_json_array() {
        let request = GenerateRequest::builder()
            .parts(vec![storyboard_core::Part::Text("Split".to_string())])
            .response_format(ResponseFormat::StringList)
            .build()
            .unwrap();

        let body = serde_json::to_value(to_gemini_request(&request)).unwrap();
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
    }

    #[test]
    fn image_response_is_decoded() {
        let raw = json!({
            "candidates": [{
                "content": { "role": "model", "parts": [
                    { "text": "Here you go" },
                    { "inlineData": { "mimeType": "image/png", "data": "AQID" } }
                ]},
                "finishReason": "STOP"
            }]
        });
        let response: GeminiResponse = serde_json::from_value(raw).unwrap();

        let converted = from_gemini_response(response, ResponseFormat::Image).unwrap();
        assert_eq!(converted.first_image().unwrap().bytes(), &[1, 2, 3]);
        assert_eq!(converted.first_text(), Some("Here you go"));
    }

    #[test]
    fn text_only_reply_to_image_request_is_empty_response() {
        let raw = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "I cannot draw that" }] },
                "finishReason": "SAFETY"
            }]
        });
        let response: GeminiResponse = serde_json::from_value(raw).unwrap();

        let err = from_gemini_response(response, ResponseFormat::Image).unwrap_err();
        assert!(matches!(
            err.kind,
            GeminiErrorKind::EmptyResponse { ref finish_reason, .. } if finish_reason == "SAFETY"
        ));
    }

    #[test]
    fn unknown_parts_are_ignored() {
        let raw = json!({
            "candidates": [{
                "content": { "parts": [
                    { "functionCall": { "name": "noop" } },
                    { "text": "A calm sea" }
                ]}
            }]
        });
        let response: GeminiResponse = serde_json::from_value(raw).unwrap();

        let converted = from_gemini_response(response, ResponseFormat::Text).unwrap();
        assert_eq!(converted.first_text(), Some("A calm sea"));
    }

    #[test]
    fn no_candidates_is_empty_response() {
        let err =
            from_gemini_response(GeminiResponse::default(), ResponseFormat::Text).unwrap_err();
        assert!(matches!(err.kind, GeminiErrorKind::EmptyResponse { .. }));
    }
}
