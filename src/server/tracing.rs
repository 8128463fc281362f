//! Tracing/logging for the relay

use std::time::Instant;

use actix_web::{
    dev::{ServiceRequest, ServiceResponse},
    http::header::CONTENT_LENGTH,
    HttpMessage,
};
use tracing_actix_web::{DefaultRootSpanBuilder, RootSpanBuilder};

/// Requests slower than this, in milliseconds, are logged as slow. Engine
/// calls dominate: uploads wait for the whole document to be processed.
const SLOW_REQUEST_MS: u128 = 5 * 1000;

/// `DefaultRootSpanBuilder` plus request size and timings.
pub struct RelayRootSpanBuilder;

/// When the request reached the relay.
struct RequestStart(Instant);

/// Declared size of the request body, `0` when unknown.
fn content_length(request: &ServiceRequest) -> u64 {
    request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

impl RootSpanBuilder for RelayRootSpanBuilder {
    fn on_request_start(request: &ServiceRequest) -> tracing::Span {
        // The extensions borrow must end before `root_span!` borrows `request`.
        {
            let mut request_extensions = request.extensions_mut();
            request_extensions.insert(RequestStart(Instant::now()));
        }
        tracing_actix_web::root_span!(
            request,
            body_bytes = content_length(request),
            duration_ms = tracing::field::Empty,
            duration_ns = tracing::field::Empty,
        )
    }

    fn on_request_end<B: actix_web::body::MessageBody>(
        span: tracing::Span,
        outcome: &Result<ServiceResponse<B>, actix_web::Error>,
    ) {
        if let Ok(response) = outcome.as_ref() {
            if let Some(req_start) = response.request().extensions().get::<RequestStart>() {
                let elapsed = req_start.0.elapsed();
                let millis = elapsed.as_millis();
                span.record("duration_ms", millis);
                span.record("duration_ns", elapsed.as_nanos());
                if millis > SLOW_REQUEST_MS {
                    tracing::warn!(
                        duration_ms = millis,
                        path = response.request().path(),
                        "Slow relay request"
                    );
                } else {
                    tracing::trace!("Relay request");
                }
            }
        }
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}
