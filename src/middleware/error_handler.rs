use axum::{
    body::{Body, to_bytes},
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::error;

/// Error bodies above this size are dropped instead of logged.
const LOGGED_BODY_LIMIT: usize = 64 * 1024;

/// Logs every 5xx answer together with the request line and its body.
pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;

    if !response.status().is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, LOGGED_BODY_LIMIT).await {
        Ok(b) => b,
        Err(e) => {
            error!(%method, %uri, status = %parts.status, "failed to read error response body: {}", e);
            return Response::from_parts(parts, Body::empty());
        }
    };

    error!(
        %method,
        %uri,
        status = %parts.status,
        "server error: {}",
        String::from_utf8_lossy(&bytes)
    );

    // the body was consumed; rebuild it
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}
