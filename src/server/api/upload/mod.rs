//! API endpoint that stores an upload and has the engine process it.
use std::{path::PathBuf, sync::Arc};

use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpMessage as _, HttpRequest, HttpResponse};
use chrono::Utc;
use futures_util::TryStreamExt as _;

use crate::engine::{EngineError, Upload};
use crate::server::errors::HTTPError;
use crate::utils::paths::stored_filename;

use super::state::Global;

/// Module that maps the HTTP web response to structs.
pub mod response;

use response::UploadResponse;

/// Multipart field the file is expected in.
pub const DOCUMENT_FIELD: &str = "document";

/// Store the `document` file of a multipart form, forward it to the engine
/// and answer with the engine's result plus the URL the file is served at.
///
/// The stored file is kept even when the engine fails.
///
/// # Errors
/// * 400 when there is no `document` file or the form is malformed
/// * 413 when the file is larger than the configured limit
/// * 500 when the file cannot be saved or the engine fails
#[tracing::instrument(name = "Uploading a document", skip(req, payload, data))]
pub async fn upload(
    req: HttpRequest,
    payload: Multipart,
    data: web::Data<Arc<dyn Global>>,
) -> Result<HttpResponse, HTTPError> {
    if !is_form_data(&req) {
        tracing::warn!("Upload without a multipart form body");
        return Err(HTTPError::NoFileUploaded);
    }
    let Some(received) = read_document_field(payload, data.max_upload_bytes()).await? else {
        tracing::warn!("Upload without a '{DOCUMENT_FIELD}' file field");
        return Err(HTTPError::NoFileUploaded);
    };

    let stored_name = stored_filename(&received.file_name, Utc::now().timestamp_millis());
    let received = save_upload(data.uploads_dir().join(&stored_name), received).await?;
    tracing::info!("File '{stored_name}' saved. Forwarding to the engine for processing...");

    match data.engine().process_document(received).await {
        Ok(processed) => {
            tracing::info!(
                "Engine processing successful. Document ID: {}",
                processed.document_id.as_deref().unwrap_or("<none>")
            );
            Ok(HttpResponse::Ok().json(UploadResponse::new(&stored_name, processed)))
        }
        Err(error) => {
            log_engine_error(&error);
            Err(HTTPError::ProcessingFailed)
        }
    }
}

/// Whether the request claims to carry `multipart/form-data`.
fn is_form_data(req: &HttpRequest) -> bool {
    req.mime_type().ok().flatten().is_some_and(|mime_type| {
        mime_type.type_() == mime::MULTIPART && mime_type.subtype() == mime::FORM_DATA
    })
}

/// Find the `document` file field and read it fully, draining every other
/// field on the way.
async fn read_document_field(
    mut payload: Multipart,
    max_bytes: usize,
) -> Result<Option<Upload>, HTTPError> {
    let mut document = None;
    while let Some(field) = payload.try_next().await.map_err(|error| {
        tracing::warn!("Failed to read multipart field: {error}");
        HTTPError::InvalidForm
    })? {
        let disposition = field.content_disposition();
        let file_name = disposition
            .get_filename()
            .filter(|_| document.is_none() && disposition.get_name() == Some(DOCUMENT_FIELD))
            .map(ToOwned::to_owned);
        let content_type = field.content_type().map(ToString::to_string);
        let bytes = read_field(field, max_bytes).await?;
        if let Some(file_name) = file_name {
            document = Some(Upload {
                file_name,
                content_type: content_type
                    .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string()),
                bytes,
            });
        }
    }
    Ok(document)
}

/// Collect a field's chunks, refusing to hold more than `max_bytes`.
async fn read_field(mut field: Field, max_bytes: usize) -> Result<Vec<u8>, HTTPError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(|error| {
        tracing::warn!("Failed to read multipart data: {error}");
        HTTPError::InvalidForm
    })? {
        if bytes.len() + chunk.len() > max_bytes {
            tracing::warn!("Upload exceeds the {max_bytes} byte limit");
            return Err(HTTPError::PayloadTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Write the upload to `path` and hand it back for forwarding.
async fn save_upload(path: PathBuf, received: Upload) -> Result<Upload, HTTPError> {
    let result = web::block(move || {
        std::fs::write(&path, &received.bytes)
            .map(|()| received)
            .map_err(|error| (path, error))
    })
    .await;
    match result {
        Ok(Ok(saved)) => Ok(saved),
        Ok(Err((path, error))) => {
            tracing::error!("Failed to write upload to {}: {error}", path.display());
            Err(HTTPError::SaveFailed)
        }
        Err(error) => {
            tracing::error!("Blocking write of upload failed: {error}");
            Err(HTTPError::SaveFailed)
        }
    }
}

/// Log the engine's side of a failed processing call.
fn log_engine_error(error: &EngineError) {
    match error.body() {
        Some(body) => tracing::error!("Error calling the engine for processing: {error}: {body}"),
        None => tracing::error!("Error calling the engine for processing: {error}"),
    }
}
