use thiserror::Error;

use crate::models::UploadedImage;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("image host API key is not configured")]
    MissingApiKey,
    #[error("image host request failed: {0}")]
    Transport(reqwest::Error),
    #[error("image host returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    /// The host answered but did not hand back a URL.
    #[error("image host rejected the upload: {0}")]
    Rejected(String),
}

impl HostError {
    /// True when the upload never got a verdict from the host.
    pub fn is_transport(&self) -> bool {
        !matches!(self, HostError::Rejected(_))
    }
}

impl From<reqwest::Error> for HostError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key as a query parameter.
        HostError::Transport(err.without_url())
    }
}

/// Trait for image hosting services (ImgBB, etc.)
#[async_trait::async_trait]
pub trait ImageHost: Send + Sync {
    /// Stores the image and returns its public URL.
    async fn host_image(&self, image: UploadedImage) -> Result<String, HostError>;
}
