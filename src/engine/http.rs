use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;

use super::{AskRequest, Engine, EngineError, ProcessedDocument, Upload};
use crate::utils::http::join_url;

/// Engine endpoint that processes an uploaded document.
const PROCESS_DOCUMENT: &str = "process-document";
/// Engine endpoint that answers questions.
const ASK: &str = "ask";

/// Talks to the engine over HTTP.
#[derive(Clone)]
pub struct HttpEngine {
    /// Shared connection pool.
    client: Client,
    /// Engine API root, e.g. `http://localhost:8000/api`.
    base_url: Url,
}

impl fmt::Debug for HttpEngine {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "Clarity engine at {}", self.base_url)
    }
}

impl HttpEngine {
    /// Create an engine client rooted at `base_url`. Every call gives up
    /// after `timeout`.
    ///
    /// # Errors
    /// Errors if the underlying HTTP client cannot be built (e.g. no TLS
    /// backend available).
    pub fn new(base_url: Url, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }
}

/// Turn a non-success response into [`EngineError::Status`], keeping the
/// body when it is JSON.
async fn check_status(response: Response) -> Result<Response, EngineError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.json::<Value>().await.ok();
    Err(EngineError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl Engine for HttpEngine {
    #[tracing::instrument(name = "Engine process-document", skip(self, upload), fields(file_name = %upload.file_name))]
    async fn process_document(&self, upload: Upload) -> Result<ProcessedDocument, EngineError> {
        let content_type = upload
            .content_type
            .parse::<mime::Mime>()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM);
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(content_type.as_ref())
            .map_err(EngineError::Transport)?;
        let form = Form::new().part("file", part);
        let response = self
            .client
            .post(join_url(&self.base_url, PROCESS_DOCUMENT))
            .multipart(form)
            .send()
            .await
            .map_err(EngineError::Transport)?;
        check_status(response)
            .await?
            .json::<ProcessedDocument>()
            .await
            .map_err(EngineError::Decode)
    }

    #[tracing::instrument(name = "Engine ask", skip(self, question))]
    async fn ask(&self, question: &str, document_id: &str) -> Result<Value, EngineError> {
        let response = self
            .client
            .post(join_url(&self.base_url, ASK))
            .json(&AskRequest {
                question,
                document_id,
            })
            .send()
            .await
            .map_err(EngineError::Transport)?;
        check_status(response)
            .await?
            .json::<Value>()
            .await
            .map_err(EngineError::Decode)
    }
}
