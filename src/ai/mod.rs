//! Generative AI service integration
//!
//! Wraps Gemini's multimodal `generateContent` endpoint and Imagen's `predict`
//! endpoint behind one transport capability, so the studio can be driven by a
//! real client or a canned mock.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiClient;
pub use mock::{MockGenerativeClient, RecordedCall};

use crate::Result;
use async_trait::async_trait;
use gemini::types::{
    GenerateContentRequest, GenerateContentResponse, GenerateImagesRequest,
    GenerateImagesResponse,
};

/// One outbound call per method; implementations must not retry.
#[async_trait]
pub trait GenerativeService: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;

    async fn generate_images(
        &self,
        model: &str,
        request: &GenerateImagesRequest,
    ) -> Result<GenerateImagesResponse>;
}
