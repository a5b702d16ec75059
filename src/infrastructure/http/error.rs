//! HTTP Error Handling

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const NOT_FOUND: i32 = 404;
    pub const UNSUPPORTED_MEDIA_TYPE: i32 = 415;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
}

/// API 错误
///
/// 携带的文本直接返回给客户端，不能包含上游诊断信息
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    UnsupportedMediaType(String),
    Internal(String),
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn errno(&self) -> i32 {
        match self {
            ApiError::NotFound(_) => errno::NOT_FOUND,
            ApiError::BadRequest(_) => errno::BAD_REQUEST,
            ApiError::UnsupportedMediaType(_) => errno::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Internal(_) => errno::INTERNAL_ERROR,
            ApiError::ServiceUnavailable(_) => errno::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.errno();
        let msg = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!(errno = code, error = %msg, "Resource not found");
                msg
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(errno = code, error = %msg, "Bad request");
                msg
            }
            ApiError::UnsupportedMediaType(msg) => {
                tracing::warn!(errno = code, error = %msg, "Unsupported media type");
                msg
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno = code, error = %msg, "Internal server error");
                msg
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!(errno = code, error = %msg, "Service unavailable");
                msg
            }
        };

        (StatusCode::OK, Json(ErrorResponse::new(code, msg))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        // 完整诊断只进日志
        tracing::debug!(diagnostic = %e, "Mapping application error");

        let msg = e.user_message();
        match e {
            ApplicationError::MissingInput(_) => ApiError::BadRequest(msg),
            ApplicationError::InvalidMediaType(_) => ApiError::UnsupportedMediaType(msg),
            ApplicationError::NotFound { .. } => ApiError::NotFound(msg),
            ApplicationError::ProviderError(_) => ApiError::ServiceUnavailable(msg),
            ApplicationError::StorageFailure(_) | ApplicationError::EncodingFailure(_) => {
                ApiError::Internal(msg)
            }
        }
    }
}

/// 请求体不是合法 JSON、缺少 Content-Type 或字段类型不符
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}
