//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::voice::VoiceSettings;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 语音服务配置
    #[serde(default)]
    pub provider: ProviderConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL，用于拼接音频地址
    /// 未设置时按请求的 Host 头拼接
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

impl ServerConfig {
    /// 配置的公开 Base URL（去掉末尾的 `/`，空串视为未设置）
    pub fn public_base_url(&self) -> Option<String> {
        self.base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    }
}

/// 语音服务实现
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// ElevenLabs HTTP API
    #[default]
    ElevenLabs,
    /// 本地假实现，不访问网络
    Fake,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ElevenLabs => write!(f, "elevenlabs"),
            Self::Fake => write!(f, "fake"),
        }
    }
}

/// 语音服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,

    /// API 基础 URL
    #[serde(default = "default_provider_url")]
    pub base_url: String,

    /// API 密钥，未设置时读取 `ELEVENLABS_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,

    /// 合成模型
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,

    /// 默认稳定度
    #[serde(default = "default_voice_setting")]
    pub stability: f32,

    /// 默认相似度增强
    #[serde(default = "default_voice_setting")]
    pub similarity_boost: f32,

    /// fake 模式下返回的音频文件，未设置时返回静音
    #[serde(default)]
    pub fake_audio_path: Option<PathBuf>,
}

fn default_provider_url() -> String {
    "https://api.elevenlabs.io/v1".to_string()
}

fn default_model_id() -> String {
    "eleven_monolingual_v1".to_string()
}

fn default_provider_timeout() -> u64 {
    120
}

fn default_voice_setting() -> f32 {
    0.5
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            base_url: default_provider_url(),
            api_key: None,
            model_id: default_model_id(),
            timeout_secs: default_provider_timeout(),
            stability: default_voice_setting(),
            similarity_boost: default_voice_setting(),
            fake_audio_path: None,
        }
    }
}

impl ProviderConfig {
    /// 默认合成参数
    pub fn voice_settings(&self) -> VoiceSettings {
        VoiceSettings {
            stability: self.stability,
            similarity_boost: self.similarity_boost,
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 上传样本的暂存目录
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,

    /// 生成音频的存放目录
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// 生成音频对外的 URL 路径前缀
    #[serde(default = "default_public_path")]
    pub public_path: String,

    /// 上传文件最大大小（字节），默认 25MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
}

fn default_staging_dir() -> PathBuf {
    PathBuf::from("data/staging")
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("data/uploads")
}

fn default_public_path() -> String {
    "/uploads".to_string()
}

fn default_max_upload_size() -> u64 {
    25 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            staging_dir: default_staging_dir(),
            content_dir: default_content_dir(),
            public_path: default_public_path(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LogConfig {
    /// RUST_LOG 未设置时使用的过滤规则
    pub fn default_filter(&self) -> String {
        format!("{},voicegram={},tower_http=debug", self.level, self.level)
    }
}
