use crate::error::RemoteError;
use crate::models::ImagePayload;

/// Trait for multimodal model backends (Gemini in production, stubs in tests).
#[async_trait::async_trait]
pub trait VisionService: Send + Sync {
    /// Send one prompt plus one image to the hosted model and return its
    /// text reply verbatim.
    async fn describe_image(&self, prompt: &str, image: &ImagePayload)
        -> Result<String, RemoteError>;
}
