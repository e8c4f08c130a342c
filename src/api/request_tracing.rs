use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::Instrument;

/// Wrap each request in a span and log its outcome
pub async fn request_tracing_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request.uri().path().to_string();
    let span = tracing::info_span!("http.request", method = %method, route = %route);

    let started = Instant::now();
    let response = next.run(request).instrument(span).await;
    let status = response.status();
    if status.is_server_error() {
        tracing::warn!("{} {} -> {} in {:?}", method, route, status, started.elapsed());
    } else {
        tracing::info!("{} {} -> {} in {:?}", method, route, status, started.elapsed());
    }
    response
}
