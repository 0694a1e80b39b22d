//! Operation dispatch for analyzing, editing and generating images.

use crate::ai::gemini::{build_request, normalize, TransportRequest, TransportResponse};
use crate::ai::GenerativeService;
use crate::image::{DataUrl, ImageInput};
use crate::models::{ModelSet, OperationRequest, OperationResult, Prompt};
use crate::{Error, Result};
use async_trait::async_trait;
use tracing::{debug, info};

const MISSING_IMAGE: &str = "Please upload an image.";

/// The three user-facing operations.
#[async_trait]
pub trait ImageService: Send + Sync {
    /// Answer a question about `image`. Returns the model's text unchanged.
    async fn analyze(&self, prompt: &str, image: Option<&ImageInput>) -> Result<String>;

    /// Apply `prompt` to `image` and return the edited image.
    async fn edit(&self, prompt: &str, image: Option<&ImageInput>) -> Result<DataUrl>;

    /// Create an image from `prompt`, guided by `image` when one is given.
    async fn generate(&self, prompt: &str, image: Option<&ImageInput>) -> Result<DataUrl>;
}

/// Routes each operation through the request builder, exactly one outbound
/// call, and the response normalizer.
pub struct Studio {
    service: Box<dyn GenerativeService>,
    models: ModelSet,
}

impl Studio {
    pub fn new(service: Box<dyn GenerativeService>) -> Self {
        Self::with_models(service, ModelSet::default())
    }

    pub fn with_models(service: Box<dyn GenerativeService>, models: ModelSet) -> Self {
        Self { service, models }
    }

    pub fn models(&self) -> &ModelSet {
        &self.models
    }

    /// Execute a validated operation.
    pub async fn run(&self, operation: OperationRequest) -> Result<OperationResult> {
        let kind = operation.kind();
        let request = build_request(&operation, &self.models);
        debug!(
            "Dispatching {} operation to {} (prompt: {} chars)",
            kind,
            request.model(),
            operation.prompt().as_str().chars().count()
        );

        let response = match request {
            TransportRequest::Content { model, request } => TransportResponse::Content(
                self.service.generate_content(&model, &request).await?,
            ),
            TransportRequest::Images { model, request } => TransportResponse::Images(
                self.service.generate_images(&model, &request).await?,
            ),
        };

        let result = normalize(kind, &response)?;
        info!("{} operation completed", kind);
        Ok(result)
    }
}

fn required_image(image: Option<&ImageInput>) -> Result<ImageInput> {
    image
        .cloned()
        .ok_or_else(|| Error::Input(MISSING_IMAGE.to_string()))
}

fn unexpected(result: OperationResult) -> Error {
    Error::AiProvider(format!("Unexpected operation result: {:?}", result))
}

#[async_trait]
impl ImageService for Studio {
    async fn analyze(&self, prompt: &str, image: Option<&ImageInput>) -> Result<String> {
        let operation = OperationRequest::Analyze {
            prompt: Prompt::new(prompt)?,
            image: required_image(image)?,
        };

        match self.run(operation).await? {
            OperationResult::Text(text) => Ok(text),
            other => Err(unexpected(other)),
        }
    }

    async fn edit(&self, prompt: &str, image: Option<&ImageInput>) -> Result<DataUrl> {
        let operation = OperationRequest::Edit {
            prompt: Prompt::new(prompt)?,
            image: required_image(image)?,
        };

        match self.run(operation).await? {
            OperationResult::Image(url) => Ok(url),
            other => Err(unexpected(other)),
        }
    }

    async fn generate(&self, prompt: &str, image: Option<&ImageInput>) -> Result<DataUrl> {
        let operation = OperationRequest::Generate {
            prompt: Prompt::new(prompt)?,
            image: image.cloned(),
        };

        match self.run(operation).await? {
            OperationResult::Image(url) => Ok(url),
            other => Err(unexpected(other)),
        }
    }
}
