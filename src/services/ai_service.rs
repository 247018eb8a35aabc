use thiserror::Error;

use crate::models::NutritionItem;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no image URL provided")]
    MissingUrl,
    #[error("model API key is not configured")]
    MissingApiKey,
    #[error("model request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("unexpected model response: {0}")]
    MalformedResponse(String),
    #[error("model answer is not nutrition JSON: {0}")]
    OutputParse(#[from] serde_json::Error),
    #[error("model answer has no items array")]
    MissingItems,
}

/// Trait for vision-capable AI services (Groq, OpenRouter, etc.)
#[async_trait::async_trait]
pub trait VisionAnalyzer: Send + Sync {
    /// Estimates nutrition for every food item visible at `image_url`, in the
    /// order the model lists them.
    async fn analyze_image(&self, image_url: &str) -> Result<Vec<NutritionItem>, AnalysisError>;
}
