//! Builds the wire payload for each operation kind.
//!
//! Gemini exposes image-conditioned output through `generateContent` on the
//! multimodal model and text-to-image through Imagen `predict`; both are
//! reached through a single `generate` operation here.

use super::types::{
    Content, GenerateContentRequest, GenerateImagesRequest, GenerationConfig,
    ImageGenerationParameters, ImagePromptInstance, InlineData, Modality, OutputOptions, Part,
};
use crate::image::{self, ImageInput};
use crate::models::{ModelSet, OperationRequest, Prompt};

pub const TEXT_TO_IMAGE_MIME_TYPE: &str = "image/png";
const TEXT_TO_IMAGE_ASPECT_RATIO: &str = "1:1";

/// A fully-shaped outbound call: target model plus one of the two request bodies.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportRequest {
    Content {
        model: String,
        request: GenerateContentRequest,
    },
    Images {
        model: String,
        request: GenerateImagesRequest,
    },
}

impl TransportRequest {
    pub fn model(&self) -> &str {
        match self {
            TransportRequest::Content { model, .. } | TransportRequest::Images { model, .. } => {
                model
            }
        }
    }
}

pub fn build_request(operation: &OperationRequest, models: &ModelSet) -> TransportRequest {
    let model = models.model_for(operation.kind()).to_string();

    match operation {
        OperationRequest::Analyze { prompt, image } => TransportRequest::Content {
            model,
            request: image_with_prompt(image, prompt, None),
        },
        OperationRequest::Edit { prompt, image }
        | OperationRequest::Generate {
            prompt,
            image: Some(image),
        } => TransportRequest::Content {
            model,
            request: image_with_prompt(
                image,
                prompt,
                Some(GenerationConfig {
                    response_modalities: vec![Modality::Image],
                }),
            ),
        },
        OperationRequest::Generate {
            prompt,
            image: None,
        } => TransportRequest::Images {
            model,
            request: text_to_image(prompt),
        },
    }
}

fn image_with_prompt(
    image: &ImageInput,
    prompt: &Prompt,
    generation_config: Option<GenerationConfig>,
) -> GenerateContentRequest {
    let encoded = image::encode(image);

    GenerateContentRequest {
        contents: vec![Content {
            role: None,
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: encoded.mime_type,
                        data: encoded.data,
                    },
                },
                Part::Text {
                    text: prompt.as_str().to_string(),
                },
            ],
        }],
        generation_config,
    }
}

fn text_to_image(prompt: &Prompt) -> GenerateImagesRequest {
    GenerateImagesRequest {
        instances: vec![ImagePromptInstance {
            prompt: prompt.as_str().to_string(),
        }],
        parameters: ImageGenerationParameters {
            sample_count: 1,
            aspect_ratio: TEXT_TO_IMAGE_ASPECT_RATIO.to_string(),
            output_options: OutputOptions {
                mime_type: TEXT_TO_IMAGE_MIME_TYPE.to_string(),
            },
        },
    }
}
