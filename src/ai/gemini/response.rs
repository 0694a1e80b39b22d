//! Turns raw Gemini/Imagen responses into display-ready results.
//!
//! Only the first candidate / first part / first generated image is ever looked at.

use super::request::TEXT_TO_IMAGE_MIME_TYPE;
use super::types::{GenerateContentResponse, GenerateImagesResponse, Part};
use crate::image::DataUrl;
use crate::models::{OperationKind, OperationResult};
use crate::{Error, Result};

pub const NO_ANALYSIS_TEXT: &str = "No text was returned for the image analysis.";
pub const NO_EDITED_IMAGE: &str = "No image was generated.";
pub const NO_IMAGE_FROM_REFERENCE: &str = "No image was generated from the reference image.";
pub const NO_IMAGE_FROM_PROMPT: &str = "No image was generated from the prompt.";

/// Response of either transport shape.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportResponse {
    Content(GenerateContentResponse),
    Images(GenerateImagesResponse),
}

pub fn normalize(kind: OperationKind, response: &TransportResponse) -> Result<OperationResult> {
    match (kind, response) {
        (OperationKind::Analyze, TransportResponse::Content(response)) => {
            analysis_text(response).map(OperationResult::Text)
        }
        (OperationKind::Edit, TransportResponse::Content(response)) => {
            inline_image(response, NO_EDITED_IMAGE).map(OperationResult::Image)
        }
        (OperationKind::GenerateFromReference, TransportResponse::Content(response)) => {
            inline_image(response, NO_IMAGE_FROM_REFERENCE).map(OperationResult::Image)
        }
        (OperationKind::GenerateFromPrompt, TransportResponse::Images(response)) => {
            generated_image(response).map(OperationResult::Image)
        }
        (kind, _) => Err(Error::AiProvider(format!(
            "Unexpected response shape for {} operation",
            kind
        ))),
    }
}

/// All text parts of the first candidate, concatenated in order.
fn analysis_text(response: &GenerateContentResponse) -> Result<String> {
    let texts: Vec<&str> = response
        .first_candidate_parts()
        .iter()
        .filter_map(|p| match p {
            Part::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect();

    if texts.is_empty() {
        log_empty(response);
        return Err(Error::EmptyResult(NO_ANALYSIS_TEXT.to_string()));
    }

    Ok(texts.concat())
}

fn inline_image(response: &GenerateContentResponse, empty_message: &str) -> Result<DataUrl> {
    match response.first_candidate_parts().first() {
        Some(Part::InlineData { inline_data }) => {
            tracing::debug!(
                "Gemini returned image with mime_type: {}",
                inline_data.mime_type
            );
            Ok(DataUrl::new(
                inline_data.mime_type.clone(),
                inline_data.data.clone(),
            ))
        }
        _ => {
            log_empty(response);
            Err(Error::EmptyResult(empty_message.to_string()))
        }
    }
}

fn generated_image(response: &GenerateImagesResponse) -> Result<DataUrl> {
    let first = response.generated_images.first();

    match first
        .and_then(|image| image.image_bytes.as_deref())
        .filter(|bytes| !bytes.is_empty())
    {
        Some(bytes) => Ok(DataUrl::new(TEXT_TO_IMAGE_MIME_TYPE, bytes)),
        None => {
            if let Some(reason) = first.and_then(|image| image.rai_filtered_reason.as_deref()) {
                tracing::warn!("Imagen filtered the generated image: {}", reason);
            } else {
                tracing::warn!(
                    "Imagen returned {} images without image bytes",
                    response.generated_images.len()
                );
            }
            Err(Error::EmptyResult(NO_IMAGE_FROM_PROMPT.to_string()))
        }
    }
}

fn log_empty(response: &GenerateContentResponse) {
    tracing::warn!(
        "Gemini response had {} candidates, finish_reason: {}",
        response.candidates.len(),
        response.first_finish_reason().unwrap_or("none")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::types::{Candidate, GeneratedImage};

    fn content(response: GenerateContentResponse) -> TransportResponse {
        TransportResponse::Content(response)
    }

    #[test]
    fn test_analyze_returns_text_unmodified() {
        let result = normalize(
            OperationKind::Analyze,
            &content(GenerateContentResponse::from_text("  A red square.\n")),
        )
        .unwrap();
        assert_eq!(result, OperationResult::Text("  A red square.\n".to_string()));
    }

    #[test]
    fn test_analyze_concatenates_text_parts_of_first_candidate() {
        let response = GenerateContentResponse::from_parts(vec![
            Part::Text {
                text: "A red ".to_string(),
            },
            Part::Text {
                text: "square.".to_string(),
            },
        ]);
        let result = normalize(OperationKind::Analyze, &content(response)).unwrap();
        assert_eq!(result.into_text().as_deref(), Some("A red square."));
    }

    #[test]
    fn test_analyze_without_text_is_empty_result() {
        let err = normalize(
            OperationKind::Analyze,
            &content(GenerateContentResponse::default()),
        )
        .unwrap_err();
        assert!(matches!(err, Error::EmptyResult(ref m) if m == NO_ANALYSIS_TEXT));
    }

    #[test]
    fn test_edit_formats_inline_data_as_data_url() {
        let result = normalize(
            OperationKind::Edit,
            &content(GenerateContentResponse::from_inline_image("image/png", "abc123")),
        )
        .unwrap();
        assert_eq!(
            result.into_image().unwrap().to_string(),
            "data:image/png;base64,abc123"
        );
    }

    #[test]
    fn test_edit_keeps_returned_mime_type() {
        let result = normalize(
            OperationKind::GenerateFromReference,
            &content(GenerateContentResponse::from_inline_image("image/jpeg", "zzz")),
        )
        .unwrap();
        assert_eq!(
            result.into_image().unwrap().to_string(),
            "data:image/jpeg;base64,zzz"
        );
    }

    #[test]
    fn test_edit_only_inspects_first_part() {
        let response = GenerateContentResponse::from_parts(vec![
            Part::Text {
                text: "Here is your image".to_string(),
            },
            Part::InlineData {
                inline_data: crate::ai::gemini::types::InlineData {
                    mime_type: "image/png".to_string(),
                    data: "abc123".to_string(),
                },
            },
        ]);
        let err = normalize(OperationKind::Edit, &content(response)).unwrap_err();
        assert!(matches!(err, Error::EmptyResult(ref m) if m == NO_EDITED_IMAGE));
    }

    #[test]
    fn test_generate_from_reference_without_image_uses_reference_message() {
        let err = normalize(
            OperationKind::GenerateFromReference,
            &content(GenerateContentResponse::from_text("sorry")),
        )
        .unwrap_err();
        assert!(matches!(err, Error::EmptyResult(ref m) if m == NO_IMAGE_FROM_REFERENCE));
    }

    #[test]
    fn test_blocked_candidate_is_empty_result() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate {
                content: None,
                finish_reason: Some("SAFETY".to_string()),
            }],
        };
        let err = normalize(OperationKind::Edit, &content(response)).unwrap_err();
        assert!(matches!(err, Error::EmptyResult(_)));
    }

    #[test]
    fn test_generate_from_prompt_formats_png_data_url() {
        let result = normalize(
            OperationKind::GenerateFromPrompt,
            &TransportResponse::Images(GenerateImagesResponse::from_bytes("xyz")),
        )
        .unwrap();
        assert_eq!(
            result.into_image().unwrap().to_string(),
            "data:image/png;base64,xyz"
        );
    }

    #[test]
    fn test_generate_from_prompt_empty_list_is_empty_result() {
        let err = normalize(
            OperationKind::GenerateFromPrompt,
            &TransportResponse::Images(GenerateImagesResponse::default()),
        )
        .unwrap_err();
        assert!(matches!(err, Error::EmptyResult(ref m) if m == NO_IMAGE_FROM_PROMPT));
    }

    #[test]
    fn test_generate_from_prompt_missing_bytes_is_empty_result() {
        let response = GenerateImagesResponse {
            generated_images: vec![GeneratedImage {
                image_bytes: None,
                mime_type: None,
                rai_filtered_reason: Some("filtered".to_string()),
            }],
        };
        let err = normalize(
            OperationKind::GenerateFromPrompt,
            &TransportResponse::Images(response),
        )
        .unwrap_err();
        assert!(matches!(err, Error::EmptyResult(ref m) if m == NO_IMAGE_FROM_PROMPT));
    }

    #[test]
    fn test_mismatched_shape_is_provider_error() {
        let err = normalize(
            OperationKind::GenerateFromPrompt,
            &content(GenerateContentResponse::from_text("hi")),
        )
        .unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }
}
