//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, ProviderKind};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 语音服务密钥的约定环境变量
pub const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VOICEGRAM_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VOICEGRAM_SERVER__PORT=8080`
/// - `VOICEGRAM_SERVER__BASE_URL=https://clinic.example.com`
/// - `VOICEGRAM_PROVIDER__KIND=fake`
/// - `VOICEGRAM_STORAGE__CONTENT_DIR=/data/uploads`
///
/// `provider.api_key` 未设置时回退到 `ELEVENLABS_API_KEY`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("provider.kind", "elevenlabs")?
        .set_default("provider.base_url", "https://api.elevenlabs.io/v1")?
        .set_default("provider.model_id", "eleven_monolingual_v1")?
        .set_default("provider.timeout_secs", 120)?
        .set_default("provider.stability", 0.5)?
        .set_default("provider.similarity_boost", 0.5)?
        .set_default("storage.staging_dir", "data/staging")?
        .set_default("storage.content_dir", "data/uploads")?
        .set_default("storage.public_path", "/uploads")?
        .set_default("storage.max_upload_size", 25 * 1024 * 1024)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: VOICEGRAM_PROVIDER__TIMEOUT_SECS=30
    builder = builder.add_source(
        Environment::with_prefix("VOICEGRAM")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    app_config.provider.api_key =
        resolve_api_key(app_config.provider.api_key.take(), std::env::var(API_KEY_ENV).ok());

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 配置中的密钥优先，空白值视为未设置
fn resolve_api_key(configured: Option<String>, from_env: Option<String>) -> Option<String> {
    configured
        .filter(|key| !key.trim().is_empty())
        .or_else(|| from_env.filter(|key| !key.trim().is_empty()))
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.provider.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Provider base URL cannot be empty".to_string(),
        ));
    }

    if config.provider.kind == ProviderKind::ElevenLabs && config.provider.api_key.is_none() {
        return Err(ConfigError::ValidationError(format!(
            "Provider API key is required (set provider.api_key or {})",
            API_KEY_ENV
        )));
    }

    config
        .provider
        .voice_settings()
        .validate()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    if !config.storage.public_path.starts_with('/') {
        return Err(ConfigError::ValidationError(
            "Storage public path must start with '/'".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
///
/// 密钥只打印是否已设置
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    match config.server.public_base_url() {
        Some(url) => tracing::info!("Public Base URL: {}", url),
        None => tracing::info!("Public Base URL: <from Host header>"),
    }
    tracing::info!("Provider: {}", config.provider.kind);
    tracing::info!("Provider URL: {}", config.provider.base_url);
    tracing::info!("Provider Model: {}", config.provider.model_id);
    tracing::info!("Provider Timeout: {}s", config.provider.timeout_secs);
    tracing::info!("Provider API Key: {}", if config.provider.api_key.is_some() { "set" } else { "unset" });
    tracing::info!(
        "Voice Settings: stability={} similarity_boost={}",
        config.provider.stability,
        config.provider.similarity_boost
    );
    tracing::info!("Staging Directory: {:?}", config.storage.staging_dir);
    tracing::info!("Content Directory: {:?}", config.storage.content_dir);
    tracing::info!("Public Path: {}", config.storage.public_path);
    tracing::info!("Max Upload Size: {} bytes", config.storage.max_upload_size);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.provider.api_key = Some("test-key".to_string());
        config
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validation_requires_api_key_for_elevenlabs() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.provider.kind = ProviderKind::Fake;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_provider_url() {
        let mut config = valid_config();
        config.provider.base_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_out_of_range_settings() {
        let mut config = valid_config();
        config.provider.stability = 1.5;
        assert!(validate_config(&config).is_err());

        let mut config = valid_config();
        config.provider.similarity_boost = -0.1;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_relative_public_path() {
        let mut config = valid_config();
        config.storage.public_path = "uploads".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_resolve_api_key() {
        assert_eq!(
            resolve_api_key(Some("file-key".into()), Some("env-key".into())).as_deref(),
            Some("file-key")
        );
        assert_eq!(
            resolve_api_key(None, Some("env-key".into())).as_deref(),
            Some("env-key")
        );
        assert_eq!(
            resolve_api_key(Some("  ".into()), Some("env-key".into())).as_deref(),
            Some("env-key")
        );
        assert_eq!(resolve_api_key(None, Some(String::new())), None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8080
base_url = "https://clinic.example.com"

[provider]
kind = "fake"
stability = 0.8

[storage]
public_path = "/audio"
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.server.public_base_url().as_deref(),
            Some("https://clinic.example.com")
        );
        assert_eq!(config.provider.kind, ProviderKind::Fake);
        assert_eq!(config.provider.stability, 0.8);
        assert_eq!(config.provider.similarity_boost, 0.5);
        assert_eq!(config.provider.model_id, "eleven_monolingual_v1");
        assert_eq!(config.storage.public_path, "/audio");
        assert_eq!(config.storage.content_dir, std::path::PathBuf::from("data/uploads"));
    }
}
