use serde_derive::{Deserialize, Serialize};

use crate::engine::{ProcessedDocument, Section};

/// Message sent with every successful upload.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "File processed successfully!";

/// Successful `POST /api/upload` response.
///
/// The engine's fields are passed through untouched; only `message` and
/// `file_path` are the relay's own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Human readable confirmation.
    pub message: String,
    /// Relative URL the stored file is served at.
    pub file_path: String,
    /// Engine identifier used for chat.
    #[serde(default)]
    pub document_id: Option<String>,
    /// Markdown summary of the document.
    #[serde(default)]
    pub summary: Option<String>,
    /// Section breakdown.
    #[serde(default)]
    pub sections: Option<Vec<Section>>,
}

impl UploadResponse {
    /// Compose the response for the upload stored as `stored_name`.
    #[must_use]
    pub fn new(stored_name: &str, processed: ProcessedDocument) -> Self {
        Self {
            message: UPLOAD_SUCCESS_MESSAGE.to_owned(),
            file_path: format!("/api/documents/{stored_name}"),
            document_id: processed.document_id,
            summary: processed.summary,
            sections: processed.sections,
        }
    }
}
