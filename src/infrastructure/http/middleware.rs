//! HTTP Middleware
//!
//! HTTP 状态码错误日志中间件

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

/// HTTP 状态码错误日志中间件
///
/// 4xx 记 warn，5xx 记 error；业务错误（errno != 0）在 ApiError::into_response() 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            latency_ms,
            "HTTP server error"
        );
    } else if status == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            "Request body exceeds upload limit"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            latency_ms,
            "HTTP client error"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request as HttpRequest, routing::get, Router};
    use tower::util::ServiceExt;

    fn create_test_router() -> Router {
        Router::new()
            .route("/api/ping", get(|| async { "ok" }))
            .route("/uploads/too-large", get(|| async { StatusCode::PAYLOAD_TOO_LARGE }))
            .route("/uploads/broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    async fn status_of(uri: &str) -> StatusCode {
        let request = HttpRequest::builder().uri(uri).body(Body::empty()).unwrap();
        create_test_router().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_statuses_pass_through() {
        assert_eq!(status_of("/api/ping").await, StatusCode::OK);
        assert_eq!(status_of("/uploads/missing.mp3").await, StatusCode::NOT_FOUND);
        assert_eq!(status_of("/uploads/too-large").await, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            status_of("/uploads/broken").await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
