//! Per-request id, span and HTTP metrics.

use std::time::{Duration, Instant};

use axum::{
    extract::Request,
    http::{HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Runs the request inside an `http_request` span keyed by `x-request-id`
/// (reused when the client sends one) and echoes the id on the response.
pub async fn request_tracing(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    async move {
        let start = Instant::now();
        let mut response = next.run(request).await;
        let duration = start.elapsed();
        let status = response.status().as_u16();

        tracing::info!(
            status,
            duration_ms = duration.as_millis() as u64,
            "Request completed"
        );

        record_request_metrics(&method, &path, status, duration);

        let header = HeaderValue::from_str(&request_id)
            .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
        response.headers_mut().insert(REQUEST_ID_HEADER, header);

        response
    }
    .instrument(span)
    .await
}

fn record_request_metrics(method: &Method, path: &str, status: u16, duration: Duration) {
    let path = normalize_path(path);
    let status = status.to_string();

    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path,
        "status" => status
    )
    .record(duration.as_secs_f64());
}

/// Keep only the first two segments to bound label cardinality.
fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() <= 2 {
        path.to_string()
    } else {
        format!("/{}/{}", segments[0], segments[1])
    }
}
