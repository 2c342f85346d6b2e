use thiserror::Error;

/// Everything that can go wrong between submit and the rendered reply.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no image uploaded")]
    NoImage,

    #[error("uploaded image is empty")]
    EmptyImage,

    #[error("unsupported image format: {0} (use jpeg, jpg or png)")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Failure kinds reported by the hosted model API.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("model API rejected the credentials")]
    Auth,

    #[error("model API quota exceeded")]
    Quota,

    #[error("model API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("request to model API failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("model API returned no text")]
    EmptyResponse,
}
