//! Trait definitions for generation backends.

use async_trait::async_trait;
use std::sync::Arc;
use storyboard_core::{GenerateRequest, GenerateResponse};
use storyboard_error::StoryboardResult;

/// Core trait that every generation backend implements.
///
/// One call is one request/response exchange with no retry; callers decide
/// how to degrade when it fails.
#[async_trait]
pub trait GenerationDriver: Send + Sync {
    /// Generate output for a multimodal request.
    async fn generate(&self, req: &GenerateRequest) -> StoryboardResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier used when a request does not name one.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<D: GenerationDriver + ?Sized> GenerationDriver for Arc<D> {
    async fn generate(&self, req: &GenerateRequest) -> StoryboardResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
