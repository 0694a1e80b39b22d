use super::gemini::types::{
    GenerateContentRequest, GenerateContentResponse, GenerateImagesRequest,
    GenerateImagesResponse, InlineData, Part,
};
use super::GenerativeService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A 1x1 PNG, base64-encoded.
pub const MOCK_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

/// A request the mock received, kept for payload assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Content {
        model: String,
        request: GenerateContentRequest,
    },
    Images {
        model: String,
        request: GenerateImagesRequest,
    },
}

/// Clones share canned responses and the call log.
#[derive(Clone)]
pub struct MockGenerativeClient {
    content_responses: Arc<Mutex<Vec<GenerateContentResponse>>>,
    images_responses: Arc<Mutex<Vec<GenerateImagesResponse>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockGenerativeClient {
    pub fn new() -> Self {
        Self {
            content_responses: Arc::new(Mutex::new(Vec::new())),
            images_responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_content_response(self, response: GenerateContentResponse) -> Self {
        self.content_responses.lock().unwrap().push(response);
        self
    }

    pub fn with_images_response(self, response: GenerateImagesResponse) -> Self {
        self.images_responses.lock().unwrap().push(response);
        self
    }

    /// Make every call fail as if the service rejected it.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        *self.failure.lock().unwrap() = Some(message.into());
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }

    fn record(&self, call: RecordedCall) -> Result<()> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(call);

        if let Some(message) = self.failure.lock().unwrap().as_ref() {
            return Err(Error::AiProvider(message.clone()));
        }

        Ok(())
    }

    fn count_of(&self, is_kind: fn(&RecordedCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| is_kind(c)).count()
    }
}

impl Default for MockGenerativeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerativeService for MockGenerativeClient {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.record(RecordedCall::Content {
            model: model.to_string(),
            request: request.clone(),
        })?;
        let count = self.count_of(|c| matches!(c, RecordedCall::Content { .. }));

        let responses = self.content_responses.lock().unwrap();
        if responses.is_empty() {
            // Default: an image followed by a caption, usable by every content operation
            Ok(GenerateContentResponse::from_parts(vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: "image/png".to_string(),
                        data: MOCK_PNG_BASE64.to_string(),
                    },
                },
                Part::Text {
                    text: "A mock description.".to_string(),
                },
            ]))
        } else {
            let index = (count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }

    async fn generate_images(
        &self,
        model: &str,
        request: &GenerateImagesRequest,
    ) -> Result<GenerateImagesResponse> {
        self.record(RecordedCall::Images {
            model: model.to_string(),
            request: request.clone(),
        })?;
        let count = self.count_of(|c| matches!(c, RecordedCall::Images { .. }));

        let responses = self.images_responses.lock().unwrap();
        if responses.is_empty() {
            Ok(GenerateImagesResponse::from_bytes(MOCK_PNG_BASE64))
        } else {
            let index = (count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}
