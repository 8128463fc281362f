//! API endpoint forwarding questions about a document to the engine.
use std::sync::Arc;

use actix_web::{web, HttpResponse, ResponseError as _};
use serde_json::Value;

use crate::server::errors::{ErrorBody, HTTPError};

use super::state::Global;

/// Module that maps the HTTP web request body to structs.
pub mod request;

use request::ChatRequest;

/// Forward `{question, documentId}` to the engine and return its answer
/// unmodified.
///
/// On failure the response carries the engine's `detail` when it sent one,
/// so the user learns e.g. that the engine no longer knows the document.
#[tracing::instrument(name = "Asking about a document", skip(body, data))]
pub async fn chat(body: web::Json<ChatRequest>, data: web::Data<Arc<dyn Global>>) -> HttpResponse {
    let request = body.into_inner();
    let Some((question, document_id)) = request.fields() else {
        tracing::warn!("Chat request without a question or document id");
        return HTTPError::MissingChatFields.error_response();
    };

    tracing::info!("Forwarding question to the engine for doc ID {document_id}");
    match data.engine().ask(question, document_id).await {
        Ok(answer) => HttpResponse::Ok().json(answer),
        Err(error) => {
            match error.body() {
                Some(body) => tracing::error!("Error calling the engine for chat: {error}: {body}"),
                None => tracing::error!("Error calling the engine for chat: {error}"),
            }
            let detail = error
                .detail()
                .unwrap_or_else(|| Value::String(HTTPError::EngineUnavailable.to_string()));
            HttpResponse::InternalServerError()
                .json(ErrorBody::with_detail(HTTPError::ChatFailed, detail))
        }
    }
}
