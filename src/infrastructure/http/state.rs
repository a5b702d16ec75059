//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CloneVoiceHandler, DeleteVoiceHandler, GenerateMessageHandler,
    // Query handlers
    GetMessageHandler, GetVoiceHandler, ListMessagesHandler, ListVoicesHandler,
    // Ports
    AssetStorePort, LocatorEncoderPort, RegistryPort, VoiceProviderPort,
};
use crate::domain::voice::VoiceSettings;

/// 构建 AppState 所需的非端口参数
#[derive(Debug, Clone)]
pub struct StateOptions {
    /// 请求未覆盖时的默认合成参数
    pub default_settings: VoiceSettings,
    /// 生成音频对外的 URL 路径前缀
    pub public_path: String,
    /// 配置的公开 Base URL；None 时按请求 Host 头拼接
    pub public_base_url: Option<String>,
}

impl Default for StateOptions {
    fn default() -> Self {
        Self {
            default_settings: VoiceSettings::default(),
            public_path: "/uploads".to_string(),
            public_base_url: None,
        }
    }
}

/// 应用状态
pub struct AppState {
    pub public_base_url: Option<String>,

    // ========== Command Handlers ==========
    pub clone_voice_handler: CloneVoiceHandler,
    pub delete_voice_handler: DeleteVoiceHandler,
    pub generate_message_handler: GenerateMessageHandler,

    // ========== Query Handlers ==========
    pub get_voice_handler: GetVoiceHandler,
    pub list_voices_handler: ListVoicesHandler,
    pub get_message_handler: GetMessageHandler,
    pub list_messages_handler: ListMessagesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        asset_store: Arc<dyn AssetStorePort>,
        provider: Arc<dyn VoiceProviderPort>,
        encoder: Arc<dyn LocatorEncoderPort>,
        registry: Arc<dyn RegistryPort>,
        options: StateOptions,
    ) -> Self {
        Self {
            public_base_url: options.public_base_url,

            // Command handlers
            clone_voice_handler: CloneVoiceHandler::new(
                asset_store.clone(),
                provider.clone(),
                registry.clone(),
            ),
            delete_voice_handler: DeleteVoiceHandler::new(provider.clone(), registry.clone()),
            generate_message_handler: GenerateMessageHandler::new(
                asset_store,
                provider,
                encoder,
                registry.clone(),
                options.default_settings,
                options.public_path,
            ),

            // Query handlers
            get_voice_handler: GetVoiceHandler::new(registry.clone()),
            list_voices_handler: ListVoicesHandler::new(registry.clone()),
            get_message_handler: GetMessageHandler::new(registry.clone()),
            list_messages_handler: ListMessagesHandler::new(registry),
        }
    }

    /// 拼接音频地址使用的 Base URL
    ///
    /// 配置优先；否则由请求头推断，见 [`infer_base_url`]
    pub fn base_url_for(&self, host: Option<&str>, forwarded_proto: Option<&str>) -> String {
        match &self.public_base_url {
            Some(url) => url.clone(),
            None => infer_base_url(host, forwarded_proto),
        }
    }
}

const FALLBACK_HOST: &str = "localhost";

/// 由请求推断 Base URL
///
/// 协议取 `X-Forwarded-Proto` 的第一个值，只接受 http / https，其余按 http 处理。
/// Host 只允许主机名、IP 字面量和端口使用的字符，否则退回 `localhost`
pub fn infer_base_url(host: Option<&str>, forwarded_proto: Option<&str>) -> String {
    let scheme = forwarded_proto
        .and_then(|proto| proto.split(',').next())
        .map(|proto| proto.trim().to_ascii_lowercase())
        .filter(|proto| proto == "http" || proto == "https")
        .unwrap_or_else(|| "http".to_string());

    let host = host
        .map(str::trim)
        .filter(|h| is_plain_host(h))
        .unwrap_or(FALLBACK_HOST);

    format!("{}://{}", scheme, host)
}

fn is_plain_host(host: &str) -> bool {
    !host.is_empty()
        && host.len() <= 255
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | ':' | '[' | ']'))
}
