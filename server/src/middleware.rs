use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use log::{debug, warn};
use std::time::Instant;

// Logs every request with its outcome and latency
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed = started.elapsed();
    if status.is_server_error() {
        warn!("{} {} -> {} in {:?}", method, path, status, elapsed);
    } else {
        debug!("{} {} -> {} in {:?}", method, path, status, elapsed);
    }

    response
}
