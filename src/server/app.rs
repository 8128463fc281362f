//! Run the relay.
#![allow(clippy::exit, clippy::module_name_repetitions)]
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{App, Error, HttpServer};

use std::{fs::create_dir_all, io, process, sync::Arc};

use actix_http::body::MessageBody;
use actix_service::ServiceFactory;
use tracing_actix_web::TracingLogger;

use super::api::state::{App as AppState, Global};
use crate::config;
use crate::engine::HttpEngine;
use crate::server::api::routes;
use crate::server::tracing::RelayRootSpanBuilder;

/// Run the relay until it is shut down.
#[actix_web::main]
pub async fn serve_relay(conf: config::Server) -> io::Result<()> {
    let engine_url = conf.engine_url().unwrap_or_else(|err| {
        tracing::error!("Error: {err:#}");
        process::exit(1);
    });
    let engine = HttpEngine::new(engine_url.clone(), conf.engine_timeout()).unwrap_or_else(|err| {
        tracing::error!("Unable to build the engine client.");
        tracing::error!("Error: {err:?}");
        process::exit(1);
    });
    create_dir_all(&conf.uploads_dir)?;

    let bind = conf.bind.clone();
    let port = conf.port;
    tracing::info!(
        "Relay running on http://{bind}:{port}, storing uploads in '{}' and forwarding to {engine_url}.",
        conf.uploads_dir.display()
    );

    let state = AppState {
        uploads_dir: conf.uploads_dir,
        engine: Arc::new(engine),
        max_upload_bytes: conf.max_upload_bytes,
    };
    HttpServer::new(move || init_app(&state))
        .bind((bind, port))?
        .run()
        .await
}

/// Initialize the application and all routing at start-up time.
///
/// # Arguments
/// * `state` - The application state
pub fn init_app<T: Global + Clone + 'static>(
    state: &T,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
> {
    routes::register_app(
        App::new().wrap(TracingLogger::<RelayRootSpanBuilder>::new()),
        state,
    )
}
