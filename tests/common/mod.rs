use std::path::Path;
use std::sync::{Arc, Mutex};

use actix_http::body::MessageBody;
use actix_http::Request;
use actix_service::Service;
use actix_web::{dev::ServiceResponse, test, Error};
use async_trait::async_trait;
use serde_json::{json, Value};
use tempfile::TempDir;

use clarity::client::relay::{ChatAnswer, Relay, RelayError};
use clarity::client::storage::LocalStorage;
use clarity::client::store::DocumentStore;
use clarity::engine::{Engine, EngineError, ProcessedDocument, Section, Upload};
use clarity::server::api::state::App as AppState;
use clarity::server::api::upload::response::UploadResponse;
use clarity::server::app::init_app;

pub const BOUNDARY: &str = "clarity-test-boundary";
pub const TODAY: &str = "Oct 19' 26";

/// Engine double that records what it was sent.
#[derive(Clone, Default)]
pub struct StubEngine {
    /// Status and body to fail every call with.
    pub fail_with: Option<(u16, Option<Value>)>,
    /// Uploads received, in order.
    pub uploads: Arc<Mutex<Vec<Upload>>>,
    /// `(question, document_id)` pairs received, in order.
    pub questions: Arc<Mutex<Vec<(String, String)>>>,
}

impl StubEngine {
    pub fn failing(status: u16, body: Option<Value>) -> Self {
        Self {
            fail_with: Some((status, body)),
            ..Self::default()
        }
    }

    fn failure(&self) -> Option<EngineError> {
        self.fail_with.clone().map(|(status, body)| EngineError::Status { status, body })
    }
}

pub fn processed_lease() -> ProcessedDocument {
    ProcessedDocument {
        document_id: Some("doc-1".into()),
        summary: Some("A **short** lease.".into()),
        sections: Some(vec![
            Section {
                title: "Parties".into(),
                summary: "Landlord and tenant.".into(),
            },
            Section {
                title: "Rent".into(),
                summary: "Due monthly.".into(),
            },
        ]),
    }
}

#[async_trait]
impl Engine for StubEngine {
    async fn process_document(&self, upload: Upload) -> Result<ProcessedDocument, EngineError> {
        self.uploads.lock().unwrap().push(upload);
        match self.failure() {
            Some(error) => Err(error),
            None => Ok(processed_lease()),
        }
    }

    async fn ask(&self, question: &str, document_id: &str) -> Result<Value, EngineError> {
        self.questions
            .lock()
            .unwrap()
            .push((question.to_owned(), document_id.to_owned()));
        match self.failure() {
            Some(error) => Err(error),
            None => Ok(json!({"answer": format!("You asked: {question}")})),
        }
    }
}

pub async fn initialize_app(
    uploads_dir: &Path,
    engine: StubEngine,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    let state = AppState {
        uploads_dir: uploads_dir.to_path_buf(),
        engine: Arc::new(engine),
        max_upload_bytes: 1024,
    };
    test::init_service(init_app(&state)).await
}

/// A `multipart/form-data` body holding one file field.
pub fn multipart_body(field: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> (&'static str, String) {
    ("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
}

/// Relay double answering from memory.
#[derive(Default)]
pub struct StubRelay {
    /// Message to reject every call with.
    pub fail_with: Option<String>,
    /// Engine id handed out for uploads.
    pub document_id: Option<String>,
    /// `(question, document_id)` pairs received, in order.
    pub questions: Mutex<Vec<(String, String)>>,
}

impl StubRelay {
    pub fn processing() -> Self {
        Self {
            document_id: Some("doc-1".into()),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_owned()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl Relay for StubRelay {
    async fn upload(&self, file: &Path) -> Result<UploadResponse, RelayError> {
        if let Some(message) = &self.fail_with {
            return Err(RelayError::Rejected(message.clone()));
        }
        let name = file.file_name().unwrap().to_string_lossy();
        let mut processed = processed_lease();
        processed.document_id = self.document_id.clone();
        Ok(UploadResponse::new(&format!("1760000000000-{name}"), processed))
    }

    async fn chat(&self, question: &str, document_id: &str) -> Result<ChatAnswer, RelayError> {
        self.questions
            .lock()
            .unwrap()
            .push((question.to_owned(), document_id.to_owned()));
        match &self.fail_with {
            Some(message) => Err(RelayError::Rejected(message.clone())),
            None => Ok(ChatAnswer {
                answer: format!("You asked: {question}"),
            }),
        }
    }
}

/// A store persisted in a fresh temporary directory.
pub fn empty_store() -> (TempDir, DocumentStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::load(storage_in(&dir));
    (dir, store)
}

pub fn storage_in(dir: &TempDir) -> LocalStorage {
    LocalStorage::open(dir.path().join("local_storage.json"))
}

/// A store holding `count` uploads, newest (highest id) first.
pub async fn store_with_uploads(relay: &StubRelay, count: usize) -> (TempDir, DocumentStore) {
    let (dir, mut store) = empty_store();
    for index in 0..count {
        let file = dir.path().join(format!("file-{index}.pdf"));
        store.add_document(relay, &file, TODAY).await.unwrap();
    }
    (dir, store)
}
