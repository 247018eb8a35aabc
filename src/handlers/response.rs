use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Serialize, Serializer};

use super::ingest::IngestError;
use crate::models::NutritionItem;
use crate::services::{AnalysisError, HostError};

pub const NO_IMAGE_PROVIDED: &str = "No image provided";
pub const UPLOAD_SERVER_ERROR: &str = "Server error during image upload";
pub const UPLOAD_FAILED: &str = "Image upload failed";
pub const NO_IMAGE_URL_PROVIDED: &str = "No image URL provided";
pub const ANALYSIS_FAILED: &str = "Analysis failed";

/// What every route answers with. The `success` flag is derived from the
/// variant when serializing.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Uploaded { url: String },
    Analyzed { items: Vec<NutritionItem> },
    Failed { status: StatusCode, error: &'static str },
}

#[derive(Serialize)]
struct EnvelopeBody<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<&'a [NutritionItem]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl Envelope {
    pub fn status(&self) -> StatusCode {
        match self {
            Envelope::Uploaded { .. } | Envelope::Analyzed { .. } => StatusCode::OK,
            Envelope::Failed { status, .. } => *status,
        }
    }

    fn body(&self) -> EnvelopeBody<'_> {
        match self {
            Envelope::Uploaded { url } => EnvelopeBody {
                success: true,
                url: Some(url.as_str()),
                items: None,
                error: None,
            },
            Envelope::Analyzed { items } => EnvelopeBody {
                success: true,
                url: None,
                items: Some(items.as_slice()),
                error: None,
            },
            Envelope::Failed { error, .. } => EnvelopeBody {
                success: false,
                url: None,
                items: None,
                error: Some(*error),
            },
        }
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.body().serialize(serializer)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<IngestError> for Envelope {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::MissingImage => Envelope::Failed {
                status: StatusCode::BAD_REQUEST,
                error: NO_IMAGE_PROVIDED,
            },
        }
    }
}

impl From<HostError> for Envelope {
    fn from(err: HostError) -> Self {
        let error = if err.is_transport() {
            UPLOAD_SERVER_ERROR
        } else {
            UPLOAD_FAILED
        };
        Envelope::Failed {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
        }
    }
}

impl From<AnalysisError> for Envelope {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::MissingUrl => Envelope::Failed {
                status: StatusCode::BAD_REQUEST,
                error: NO_IMAGE_URL_PROVIDED,
            },
            _ => Envelope::Failed {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ANALYSIS_FAILED,
            },
        }
    }
}

/// Envelope for the outcome of the image host stage.
pub fn upload_outcome(result: Result<String, HostError>) -> Envelope {
    match result {
        Ok(url) => Envelope::Uploaded { url },
        Err(err) => err.into(),
    }
}

/// Envelope for the outcome of the vision analysis stage.
pub fn analyze_outcome(result: Result<Vec<NutritionItem>, AnalysisError>) -> Envelope {
    match result {
        Ok(items) => Envelope::Analyzed { items },
        Err(err) => err.into(),
    }
}
