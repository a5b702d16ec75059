//! Voicegram - 医生音色克隆与语音消息服务

use std::sync::Arc;

use voicegram::application::VoiceProviderPort;
use voicegram::config::{load_config, print_config, AppConfig, ProviderKind};
use voicegram::infrastructure::adapters::{
    ElevenLabsClient, ElevenLabsClientConfig, FakeVoiceProvider, FakeVoiceProviderConfig,
    FileAssetStore, QrLocatorEncoder,
};
use voicegram::infrastructure::http::{AppState, HttpServer, ServerConfig, StateOptions};
use voicegram::infrastructure::memory::InMemoryRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Voicegram - voice clone messaging service");
    print_config(&config);

    // 暂存区与内容区
    let asset_store = Arc::new(
        FileAssetStore::new(&config.storage.staging_dir, &config.storage.content_dir).await?,
    );

    let provider = build_provider(&config)?;
    let encoder = Arc::new(QrLocatorEncoder::new());
    let registry = Arc::new(InMemoryRegistry::new());

    let state = AppState::new(
        asset_store,
        provider,
        encoder,
        registry,
        StateOptions {
            default_settings: config.provider.voice_settings(),
            public_path: config.storage.public_path.clone(),
            public_base_url: config.server.public_base_url(),
        },
    );

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_content(&config.storage.content_dir, &config.storage.public_path)
        .with_max_upload_size(config.storage.max_upload_size);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志，RUST_LOG 优先于配置
fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log.default_filter()));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_provider(config: &AppConfig) -> anyhow::Result<Arc<dyn VoiceProviderPort>> {
    let provider: Arc<dyn VoiceProviderPort> = match config.provider.kind {
        ProviderKind::ElevenLabs => {
            let api_key = config.provider.api_key.clone().unwrap_or_default();
            let client_config = ElevenLabsClientConfig::new(&config.provider.base_url, api_key)
                .with_timeout(config.provider.timeout_secs)
                .with_model(&config.provider.model_id);
            Arc::new(ElevenLabsClient::new(client_config)?)
        }
        ProviderKind::Fake => Arc::new(FakeVoiceProvider::new(FakeVoiceProviderConfig {
            audio_file_path: config.provider.fake_audio_path.clone(),
        })?),
    };
    Ok(provider)
}
