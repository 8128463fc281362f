//! A central place to register App routes.
use std::sync::Arc;

use actix_service::ServiceFactory;
use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    error::{InternalError, JsonPayloadError},
    web, App, Error, HttpRequest, ResponseError as _,
};

use super::{chat::chat, documents::get_document, state::Global, upload::upload};
use crate::server::errors::HTTPError;

#[expect(
    clippy::literal_string_with_formatting_args,
    reason = "Actix Web resource path uses `{param}` syntax which is not formatting but route pattern matching"
)]
/// Central place to register all the App routing.
///
/// Every endpoint lives under `/api`:
/// * `GET /api/documents/{filename}` serves a stored upload
/// * `POST /api/upload` stores an upload and has the engine process it
/// * `POST /api/chat` asks the engine a question about a processed document
#[tracing::instrument(skip(app, state))]
pub fn register_app<
    T: Global + Clone + 'static,
    U: MessageBody,
    V: ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<U>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
>(
    app: App<V>,
    state: &T,
) -> App<V> {
    let data_state: Arc<dyn Global> = Arc::new(state.clone());
    app.app_data(web::Data::new(data_state))
        .app_data(web::JsonConfig::default().error_handler(reject_chat_body))
        .service(
            web::scope("/api")
                .service(
                    web::resource("/documents/{filename}")
                        .route(web::get().to(get_document))
                        .route(web::head().to(get_document)),
                )
                .service(web::resource("/upload").route(web::post().to(upload)))
                .service(web::resource("/chat").route(web::post().to(chat))),
        )
}

/// A chat body that is not JSON, or not the expected JSON, is treated the
/// same as one with missing fields.
fn reject_chat_body(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    tracing::debug!("Rejected chat body: {err}");
    let response = HTTPError::MissingChatFields.error_response();
    InternalError::from_response(err, response).into()
}
