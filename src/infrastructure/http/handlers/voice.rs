//! Voice HTTP Handlers

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{AudioAttachment, CloneVoice, DeleteVoice, GetVoice, ListVoices};
use crate::infrastructure::http::dto::{ApiResponse, Empty, VoiceResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 表单字段名
const FIELD_NAME: &str = "doctorName";
const FIELD_DESCRIPTION: &str = "description";
const FIELD_AUDIO: &str = "audioFile";

/// 克隆音色（multipart: doctorName, description, audioFile）
pub async fn clone_voice(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<VoiceResponse>>, ApiError> {
    let mut display_name = String::new();
    let mut description: Option<String> = None;
    let mut audio: Option<AudioAttachment> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            FIELD_NAME => {
                display_name = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read doctorName: {}", e)))?;
            }
            FIELD_DESCRIPTION => {
                description = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read description: {}", e))
                })?);
            }
            FIELD_AUDIO => {
                let file_name = field.file_name().unwrap_or("sample").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read audio file: {}", e)))?;

                // 浏览器未选择文件时会提交一个空的文件字段
                if !data.is_empty() {
                    audio = Some(AudioAttachment {
                        file_name,
                        mime_type,
                        data: data.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let voice = state
        .clone_voice_handler
        .handle(CloneVoice {
            display_name,
            description,
            audio,
        })
        .await?;

    Ok(Json(ApiResponse::success(voice.into())))
}

/// 获取音色列表
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<VoiceResponse>>> {
    let voices = state.list_voices_handler.handle(ListVoices);
    Json(ApiResponse::success(
        voices.into_iter().map(VoiceResponse::from).collect(),
    ))
}

/// 获取音色详情
pub async fn get_voice(
    State(state): State<Arc<AppState>>,
    Path(voice_id): Path<String>,
) -> Result<Json<ApiResponse<VoiceResponse>>, ApiError> {
    let voice = state.get_voice_handler.handle(GetVoice { voice_id })?;
    Ok(Json(ApiResponse::success(voice.into())))
}

/// 删除音色
///
/// 只返回成功或失败
pub async fn delete_voice(
    State(state): State<Arc<AppState>>,
    Path(voice_id): Path<String>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .delete_voice_handler
        .handle(DeleteVoice { voice_id })
        .await?;
    Ok(Json(ApiResponse::ok()))
}
