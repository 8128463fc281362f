//! API endpoint serving stored uploads back to the document viewer.
//!
//! There is no authorization: anyone who knows a stored name can fetch the
//! file. The timestamp prefix makes names hard to guess, nothing more.
use std::{io, sync::Arc};

use actix_web::{web, HttpResponse, Responder};

use crate::server::errors::HTTPError;
use crate::utils::{http::get_contenttype, paths::resolve_upload_path};

use super::state::Global;

/// Return the bytes of the upload stored as `{filename}`.
/// Return 404 if there is no such upload.
#[tracing::instrument(name = "Serving an uploaded document", skip(data))]
pub async fn get_document(
    path: web::Path<String>,
    data: web::Data<Arc<dyn Global>>,
) -> impl Responder {
    let filename = path.into_inner();
    let Some(file_path) = resolve_upload_path(data.uploads_dir(), &filename) else {
        tracing::debug!("Refusing to resolve '{filename}' outside the uploads directory");
        return HttpResponse::NotFound().body(HTTPError::NotFound.to_string());
    };
    let contenttype = get_contenttype(&filename);
    match web::block(move || std::fs::read(file_path)).await {
        Ok(Ok(content)) => HttpResponse::Ok().insert_header(contenttype).body(content),
        Ok(Err(error)) if error.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("{filename}: {error}");
            HttpResponse::NotFound().body(HTTPError::NotFound.to_string())
        }
        Ok(Err(error)) => {
            tracing::error!("Could not read upload '{filename}': {error}");
            HttpResponse::InternalServerError().body(HTTPError::InternalServerError.to_string())
        }
        Err(error) => {
            tracing::error!("Blocking read of '{filename}' failed: {error}");
            HttpResponse::InternalServerError().body(HTTPError::InternalServerError.to_string())
        }
    }
}
