//! Message HTTP Handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Host, Path, State,
    },
    http::HeaderMap,
    Json,
};
use std::sync::Arc;

use crate::application::{GenerateMessage, GetMessage, ListMessages};
use crate::infrastructure::http::dto::{ApiResponse, GenerateMessageRequest, MessageResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// 生成语音消息
///
/// 音频地址的 Base URL 优先取配置，否则取请求的 Host 和 X-Forwarded-Proto 头
pub async fn generate_message(
    State(state): State<Arc<AppState>>,
    host: Option<Host>,
    headers: HeaderMap,
    payload: Result<Json<GenerateMessageRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let Json(req) = payload?;
    let host = host.map(|Host(h)| h);
    let forwarded_proto = headers
        .get(FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok());
    let command = GenerateMessage {
        voice_id: req.voice_id,
        message_text: req.message_text,
        patient_name: req.patient_name,
        stability: req.stability,
        similarity_boost: req.similarity_boost,
        public_base_url: state.base_url_for(host.as_deref(), forwarded_proto),
    };

    let message = state.generate_message_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(message.into())))
}

/// 获取消息列表
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<MessageResponse>>> {
    let messages = state.list_messages_handler.handle(ListMessages);
    Json(ApiResponse::success(
        messages.into_iter().map(MessageResponse::from).collect(),
    ))
}

/// 获取消息详情
pub async fn get_message(
    State(state): State<Arc<AppState>>,
    message_id: Result<Path<u64>, PathRejection>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let Path(message_id) = message_id?;
    let message = state.get_message_handler.handle(GetMessage { message_id })?;
    Ok(Json(ApiResponse::success(message.into())))
}
