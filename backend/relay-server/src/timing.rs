use std::future::Future;
use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use log::{debug, info};

/// Logs method, path, status and latency of every request
pub async fn log_request_timing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        "{method} {path} -> {} ({})",
        response.status().as_u16(),
        humantime::format_duration(started.elapsed())
    );

    response
}

/// Await `future`, logging how long it took under `label`
pub async fn timed<F>(label: &str, future: F) -> F::Output
where
    F: Future,
{
    debug!("{label}: started");
    let started = Instant::now();

    let output = future.await;

    info!(
        "{label}: finished in {}",
        humantime::format_duration(started.elapsed())
    );
    output
}
