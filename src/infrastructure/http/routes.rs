//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                  GET     健康检查
//! - /api/voices                POST    克隆音色（multipart）
//! - /api/voices                GET     列出所有音色
//! - /api/voices/:id            GET     获取音色详情
//! - /api/voices/:id            DELETE  删除音色
//! - /api/voices/:id/delete     POST    删除音色（表单友好）
//! - /api/messages              POST    生成语音消息
//! - /api/messages              GET     列出所有消息
//! - /api/messages/:id          GET     获取消息详情
//!
//! 生成的音频由 server 挂载在 `storage.public_path` 下

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/voices", voice_routes())
        .nest("/messages", message_routes())
}

/// Voice 路由
fn voice_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::list_voices).post(handlers::clone_voice))
        .route("/:voice_id", get(handlers::get_voice).delete(handlers::delete_voice))
        .route("/:voice_id/delete", post(handlers::delete_voice))
}

/// Message 路由
fn message_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::list_messages).post(handlers::generate_message))
        .route("/:message_id", get(handlers::get_message))
}
