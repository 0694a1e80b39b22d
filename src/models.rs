//! Data models and configuration
//!
//! Defines the request-scoped values that flow through one studio operation,
//! plus the process-wide configuration loaded once at startup.

use crate::image::{DataUrl, ImageInput};
use crate::{Error, Result};
use std::fmt;

/// User-supplied prompt text. Guaranteed non-empty; the text itself is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(Error::Input("Please provide a prompt.".to_string()));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One studio operation and its inputs.
#[derive(Debug, Clone)]
pub enum OperationRequest {
    Analyze { prompt: Prompt, image: ImageInput },
    Edit { prompt: Prompt, image: ImageInput },
    Generate { prompt: Prompt, image: Option<ImageInput> },
}

/// Which request/response shape an [`OperationRequest`] travels as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Analyze,
    Edit,
    /// `Generate` with a reference image.
    GenerateFromReference,
    /// `Generate` without a reference image (text-to-image).
    GenerateFromPrompt,
}

impl OperationRequest {
    pub fn kind(&self) -> OperationKind {
        match self {
            OperationRequest::Analyze { .. } => OperationKind::Analyze,
            OperationRequest::Edit { .. } => OperationKind::Edit,
            OperationRequest::Generate { image: Some(_), .. } => {
                OperationKind::GenerateFromReference
            }
            OperationRequest::Generate { image: None, .. } => OperationKind::GenerateFromPrompt,
        }
    }

    pub fn prompt(&self) -> &Prompt {
        match self {
            OperationRequest::Analyze { prompt, .. }
            | OperationRequest::Edit { prompt, .. }
            | OperationRequest::Generate { prompt, .. } => prompt,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Analyze => "analyze",
            OperationKind::Edit => "edit",
            OperationKind::GenerateFromReference => "generate (reference image)",
            OperationKind::GenerateFromPrompt => "generate (text-to-image)",
        };
        f.write_str(name)
    }
}

/// Display-ready outcome of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    Text(String),
    Image(DataUrl),
}

impl OperationResult {
    pub fn into_text(self) -> Option<String> {
        match self {
            OperationResult::Text(text) => Some(text),
            OperationResult::Image(_) => None,
        }
    }

    pub fn into_image(self) -> Option<DataUrl> {
        match self {
            OperationResult::Image(url) => Some(url),
            OperationResult::Text(_) => None,
        }
    }
}

pub const DEFAULT_ANALYZE_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_IMAGEN_MODEL: &str = "imagen-4.0-generate-001";

/// Model IDs used for each transport shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSet {
    /// Text answers about an image.
    pub analyze: String,
    /// Image-output requests: edits and reference-image generation.
    pub image: String,
    /// Dedicated text-to-image model.
    pub imagen: String,
}

impl ModelSet {
    pub fn model_for(&self, kind: OperationKind) -> &str {
        match kind {
            OperationKind::Analyze => &self.analyze,
            OperationKind::Edit | OperationKind::GenerateFromReference => &self.image,
            OperationKind::GenerateFromPrompt => &self.imagen,
        }
    }
}

impl Default for ModelSet {
    fn default() -> Self {
        Self {
            analyze: DEFAULT_ANALYZE_MODEL.to_string(),
            image: DEFAULT_IMAGE_MODEL.to_string(),
            imagen: DEFAULT_IMAGEN_MODEL.to_string(),
        }
    }
}

// Configuration
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load the API credential from the environment (and `.env`, when present).
    pub fn from_env() -> Result<Self> {
        ignore_missing_env_file(dotenvy::dotenv())?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = ["GEMINI_API_KEY", "API_KEY"]
            .into_iter()
            .filter_map(|key| lookup(key))
            .find(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                Error::Config("GEMINI_API_KEY (or API_KEY) not set".to_string())
            })?;

        Ok(Self { api_key })
    }
}

/// A missing `.env` is fine; a malformed one is not.
fn ignore_missing_env_file<T>(result: dotenvy::Result<T>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => {
            tracing::error!("Failed to load .env file: {}", e);
            Err(e.into())
        }
    }
}
