//! The client's view of the relay.
use std::fmt;
use std::io;
use std::path::Path;

use async_trait::async_trait;
use derive_more::Display;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::server::api::upload::response::UploadResponse;
use crate::server::api::upload::DOCUMENT_FIELD;
use crate::server::errors::ErrorBody;
use crate::utils::http::join_url;

/// Shown when a failed upload carries no message of its own.
const UPLOAD_FAILED: &str = "Upload and processing failed";
/// Shown when a failed chat call carries no detail of its own.
const CHAT_FAILED: &str = "Failed to get a response from the AI.";

/// Why a relay call failed. Displays as the message the user should see.
#[derive(Debug, Display)]
pub enum RelayError {
    /// The file to upload could not be read.
    #[display(fmt = "Could not read file: {}", _0)]
    File(io::Error),
    /// The relay could not be reached.
    #[display(fmt = "{}", _0)]
    Transport(reqwest::Error),
    /// The relay answered with an error.
    #[display(fmt = "{}", _0)]
    Rejected(String),
    /// The relay answered successfully with an unexpected body.
    #[display(fmt = "Unexpected response from the server: {}", _0)]
    Decode(reqwest::Error),
}

impl std::error::Error for RelayError {}

/// The engine's answer as relayed by `POST /api/chat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAnswer {
    /// Answer text, markdown.
    #[serde(default)]
    pub answer: String,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatBody<'req> {
    /// The user's question.
    question: &'req str,
    /// Engine identifier of the document.
    document_id: &'req str,
}

/// Relay operations the client uses.
#[async_trait]
pub trait Relay: Send + Sync {
    /// Upload the file at `file` for processing.
    async fn upload(&self, file: &Path) -> Result<UploadResponse, RelayError>;

    /// Ask `question` about the document the engine knows as `document_id`.
    async fn chat(&self, question: &str, document_id: &str) -> Result<ChatAnswer, RelayError>;
}

/// [`Relay`] over HTTP.
#[derive(Clone)]
pub struct HttpRelay {
    /// Shared connection pool.
    client: Client,
    /// Where the relay listens, e.g. `http://localhost:5000`.
    backend_url: Url,
}

impl fmt::Debug for HttpRelay {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "Relay at {}", self.backend_url)
    }
}

impl HttpRelay {
    /// Relay client for the relay at `backend_url`.
    #[must_use]
    pub fn new(backend_url: Url) -> Self {
        Self {
            client: Client::new(),
            backend_url,
        }
    }
}

/// The user facing message of an error response, as picked from its body by
/// `pick`, or `fallback` when the body has none.
async fn rejection(
    response: reqwest::Response,
    pick: fn(ErrorBody) -> Option<String>,
    fallback: &str,
) -> RelayError {
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(pick)
        .filter(|message| !message.is_empty());
    RelayError::Rejected(message.unwrap_or_else(|| fallback.to_owned()))
}

/// Uploads report their failure in `error`.
#[allow(clippy::unnecessary_wraps, reason = "Must match the `pick` signature")]
fn upload_message(body: ErrorBody) -> Option<String> {
    Some(body.error)
}

/// Chat reports the engine's explanation in `detail`.
fn chat_message(body: ErrorBody) -> Option<String> {
    match body.detail? {
        Value::String(detail) => Some(detail),
        Value::Null => None,
        detail => Some(detail.to_string()),
    }
}

#[async_trait]
impl Relay for HttpRelay {
    #[tracing::instrument(name = "Uploading to the relay", skip(self))]
    async fn upload(&self, file: &Path) -> Result<UploadResponse, RelayError> {
        let bytes = std::fs::read(file).map_err(RelayError::File)?;
        let file_name = file
            .file_name()
            .map_or_else(|| "document".to_owned(), |name| name.to_string_lossy().into_owned());
        let mime_type = mime_guess::from_path(file).first_or_octet_stream();
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_type.as_ref())
            .map_err(RelayError::Transport)?;
        let response = self
            .client
            .post(join_url(&self.backend_url, "/api/upload"))
            .multipart(Form::new().part(DOCUMENT_FIELD, part))
            .send()
            .await
            .map_err(RelayError::Transport)?;
        if !response.status().is_success() {
            return Err(rejection(response, upload_message, UPLOAD_FAILED).await);
        }
        response
            .json::<UploadResponse>()
            .await
            .map_err(RelayError::Decode)
    }

    #[tracing::instrument(name = "Asking the relay", skip(self, question))]
    async fn chat(&self, question: &str, document_id: &str) -> Result<ChatAnswer, RelayError> {
        let response = self
            .client
            .post(join_url(&self.backend_url, "/api/chat"))
            .json(&ChatBody {
                question,
                document_id,
            })
            .send()
            .await
            .map_err(RelayError::Transport)?;
        if !response.status().is_success() {
            return Err(rejection(response, chat_message, CHAT_FAILED).await);
        }
        response.json::<ChatAnswer>().await.map_err(RelayError::Decode)
    }
}
