//! User facing errors of the relay.
//!
//! Internal causes (engine status codes, io errors) are logged where they
//! happen and never reach the caller; callers only ever see these messages.
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::Display;
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

/// Every error the relay can answer with.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum HTTPError {
    /// No upload with the requested name.
    #[display(fmt = "Document not found")]
    NotFound,
    /// `POST /api/upload` without a `document` file field.
    #[display(fmt = "No file uploaded.")]
    NoFileUploaded,
    /// The multipart body could not be parsed.
    #[display(fmt = "Invalid form data.")]
    InvalidForm,
    /// The upload is larger than the configured limit.
    #[display(fmt = "Uploaded file is too large.")]
    PayloadTooLarge,
    /// The upload could not be written to the uploads directory.
    #[display(fmt = "Failed to save uploaded file.")]
    SaveFailed,
    /// The engine failed to process an upload.
    #[display(fmt = "Failed to process document with AI engine.")]
    ProcessingFailed,
    /// `POST /api/chat` without a question or document id.
    #[display(fmt = "Question and documentId are required.")]
    MissingChatFields,
    /// The engine failed to answer a question.
    #[display(fmt = "Failed to get response from AI engine.")]
    ChatFailed,
    /// Stand-in `detail` when the engine gave none.
    #[display(fmt = "AI service is unavailable.")]
    EngineUnavailable,
    /// Anything else.
    #[display(fmt = "Internal server error")]
    InternalServerError,
}

impl std::error::Error for HTTPError {}

/// JSON body of every error response except the plain text 404 of the
/// document endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Flat, user facing message.
    pub error: String,
    /// Extra information passed through from the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Body carrying `error` and an engine supplied `detail`.
    #[must_use]
    pub fn with_detail(error: HTTPError, detail: Value) -> Self {
        Self {
            error: error.to_string(),
            detail: Some(detail),
        }
    }
}

impl From<HTTPError> for ErrorBody {
    fn from(error: HTTPError) -> Self {
        Self {
            error: error.to_string(),
            detail: None,
        }
    }
}

impl ResponseError for HTTPError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::NoFileUploaded | Self::InvalidForm | Self::MissingChatFields => {
                StatusCode::BAD_REQUEST
            }
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::SaveFailed
            | Self::ProcessingFailed
            | Self::ChatFailed
            | Self::EngineUnavailable
            | Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::from(*self))
    }
}
