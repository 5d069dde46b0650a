use std::time::Duration;

use axum::{extract::Request, response::Response, Router};
use tower_http::trace::TraceLayer;
use tracing::{debug, debug_span, Span};

use super::{client_ip::ClientIp, request_id::RequestId};

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(request_span)
            .on_request(|_: &Request, _: &Span| debug!("request received"))
            .on_response(|response: &Response, latency: Duration, _: &Span| {
                debug!(status = %response.status(), ?latency, "request completed")
            })
            .on_body_chunk(())
            .on_eos(())
            .on_failure(()),
    )
}

// Relies on the client ip and request id middlewares running first.
fn request_span(request: &Request) -> Span {
    let ClientIp(client_ip) = request.extensions().get::<ClientIp>().unwrap();
    let request_id = request.extensions().get::<RequestId>().unwrap();

    debug_span!(
        "http-request",
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
        %client_ip,
        %request_id,
    )
}
