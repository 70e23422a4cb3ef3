//! HTTP request/response tracing middleware.

use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

/// Span factory recording method, path and the report query string.
pub type MakeReportSpan = fn(&Request<axum::body::Body>) -> Span;

/// Creates the request tracing layer.
///
/// Each request gets an `INFO` span with `method`, `path` and `query`
/// (report range and limit arrive as query parameters). Responses are logged
/// with status and latency in milliseconds; 5xx responses are logged at `ERROR`.
///
/// ```text
/// INFO request{method=GET path=/api/report query=start=2021-01-01}: finished processing request latency=4 ms status=200
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, MakeReportSpan> {
    TraceLayer::new_for_http()
        .make_span_with(make_span as MakeReportSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}

fn make_span(request: &Request<axum::body::Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        query = request.uri().query().unwrap_or(""),
    )
}
