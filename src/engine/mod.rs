//! The Clarity engine: the external AI service that does the actual document
//! work. The relay only ever talks to it through the [`Engine`] trait.
use async_trait::async_trait;
use derive_more::Display;
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP implementation of [`Engine`].
pub mod http;

pub use http::HttpEngine;

/// A file handed to the engine for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Filename as the user uploaded it.
    pub file_name: String,
    /// MIME type as the user's browser or client reported it.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// A titled part of a processed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section heading.
    pub title: String,
    /// Markdown summary of the section.
    pub summary: String,
}

/// What the engine knows about a document once it has processed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    /// Identifier to ask questions against. The engine leaves it out when it
    /// could not prepare the document for questions.
    #[serde(default)]
    pub document_id: Option<String>,
    /// Markdown summary of the whole document.
    #[serde(default)]
    pub summary: Option<String>,
    /// Section breakdown, in document order.
    #[serde(default)]
    pub sections: Option<Vec<Section>>,
}

/// Body of an `ask` call.
#[derive(Debug, Serialize)]
pub struct AskRequest<'req> {
    /// The user's question.
    pub question: &'req str,
    /// Engine identifier of the document.
    pub document_id: &'req str,
}

/// Everything that can go wrong between the relay and the engine.
#[derive(Debug, Display)]
pub enum EngineError {
    /// The engine could not be reached or did not answer in time.
    #[display(fmt = "could not reach the engine: {}", _0)]
    Transport(reqwest::Error),
    /// The engine answered with a non-success status.
    #[display(fmt = "engine answered with status {}", status)]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, when it was JSON.
        body: Option<Value>,
    },
    /// The engine answered successfully but with an unexpected body.
    #[display(fmt = "unexpected response from the engine: {}", _0)]
    Decode(reqwest::Error),
}

impl std::error::Error for EngineError {}

impl EngineError {
    /// The `detail` field of the engine's error body, if it sent one.
    #[must_use]
    pub fn detail(&self) -> Option<Value> {
        match *self {
            Self::Status {
                body: Some(ref body),
                ..
            } => body.get("detail").filter(|detail| !detail.is_null()).cloned(),
            Self::Status { body: None, .. } | Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Response body if the engine answered with one, for logging.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        match *self {
            Self::Status { ref body, .. } => body.as_ref(),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

/// The operations the relay needs from the engine.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Extract, summarize and index `upload`.
    async fn process_document(&self, upload: Upload) -> Result<ProcessedDocument, EngineError>;

    /// Answer `question` about the document the engine knows as
    /// `document_id`. The answer is returned exactly as the engine sent it.
    async fn ask(&self, question: &str, document_id: &str) -> Result<Value, EngineError>;
}
