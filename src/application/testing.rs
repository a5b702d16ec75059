//! 测试夹具：脚本化的语音服务 + 临时目录中的真实存储/注册表/编码器

use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use crate::application::commands::handlers::{
    CloneVoiceHandler, DeleteVoiceHandler, GenerateMessageHandler,
};
use crate::application::ports::{
    AssetStorePort, EncodingError, LocatorEncoderPort, ProviderError, RegisterVoiceRequest,
    RegistryPort, SynthesizeRequest, SynthesizedAudio, VoiceProviderPort,
};
use crate::domain::message::ScannableCode;
use crate::domain::voice::{VoiceId, VoiceSettings};
use crate::infrastructure::adapters::{FileAssetStore, QrLocatorEncoder};
use crate::infrastructure::memory::InMemoryRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderBehavior {
    Succeed,
    RejectAll,
}

#[derive(Default)]
struct ProviderLog {
    register_calls: usize,
    synthesize_calls: usize,
    delete_calls: usize,
    last_registration: Option<RegisterVoiceRequest>,
    last_synthesis: Option<SynthesizeRequest>,
}

/// 记录调用并按脚本返回结果的语音服务
pub struct MockProvider {
    behavior: Mutex<ProviderBehavior>,
    log: Mutex<ProviderLog>,
}

impl MockProvider {
    pub fn new(behavior: ProviderBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            log: Mutex::new(ProviderLog::default()),
        }
    }

    pub fn set_behavior(&self, behavior: ProviderBehavior) {
        *self.behavior.lock() = behavior;
    }

    pub fn register_calls(&self) -> usize {
        self.log.lock().register_calls
    }

    pub fn synthesize_calls(&self) -> usize {
        self.log.lock().synthesize_calls
    }

    pub fn delete_calls(&self) -> usize {
        self.log.lock().delete_calls
    }

    pub fn last_registration(&self) -> Option<RegisterVoiceRequest> {
        self.log.lock().last_registration.clone()
    }

    pub fn last_synthesis(&self) -> Option<SynthesizeRequest> {
        self.log.lock().last_synthesis.clone()
    }

    pub fn audio_bytes(&self) -> Vec<u8> {
        b"ID3\x03\x00fake-mp3-frames".to_vec()
    }

    fn rejection(&self) -> Option<ProviderError> {
        match *self.behavior.lock() {
            ProviderBehavior::Succeed => None,
            ProviderBehavior::RejectAll => Some(ProviderError::Api {
                status: 401,
                body: r#"{"detail":{"status":"quota_exceeded"}}"#.to_string(),
            }),
        }
    }
}

#[async_trait]
impl VoiceProviderPort for MockProvider {
    async fn register_voice(&self, request: RegisterVoiceRequest) -> Result<VoiceId, ProviderError> {
        let count = {
            let mut log = self.log.lock();
            log.register_calls += 1;
            log.last_registration = Some(request);
            log.register_calls
        };
        match self.rejection() {
            Some(e) => Err(e),
            None => Ok(VoiceId::new(format!("voice-{}", count)).expect("non-empty id")),
        }
    }

    async fn synthesize(&self, request: SynthesizeRequest) -> Result<SynthesizedAudio, ProviderError> {
        {
            let mut log = self.log.lock();
            log.synthesize_calls += 1;
            log.last_synthesis = Some(request);
        }
        match self.rejection() {
            Some(e) => Err(e),
            None => Ok(SynthesizedAudio {
                data: self.audio_bytes(),
                content_type: Some("audio/mpeg".to_string()),
            }),
        }
    }

    async fn delete_voice(&self, _voice_id: &VoiceId) -> Result<(), ProviderError> {
        self.log.lock().delete_calls += 1;
        match self.rejection() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// 始终失败的编码器
pub struct FailingEncoder;

impl LocatorEncoderPort for FailingEncoder {
    fn encode(&self, _address: &str) -> Result<ScannableCode, EncodingError> {
        Err(EncodingError::Failed("data too long".to_string()))
    }
}

pub struct Fixture {
    temp: TempDir,
    pub asset_store: Arc<dyn AssetStorePort>,
    pub provider: Arc<MockProvider>,
    pub registry: Arc<dyn RegistryPort>,
    pub encoder: Arc<dyn LocatorEncoderPort>,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::with_behavior(ProviderBehavior::Succeed).await
    }

    pub async fn with_behavior(behavior: ProviderBehavior) -> Self {
        let temp = tempfile::tempdir().expect("tempdir");
        let asset_store = FileAssetStore::new(temp.path().join("staging"), temp.path().join("uploads"))
            .await
            .expect("asset store");

        Self {
            temp,
            asset_store: Arc::new(asset_store),
            provider: Arc::new(MockProvider::new(behavior)),
            registry: Arc::new(InMemoryRegistry::new()),
            encoder: Arc::new(QrLocatorEncoder::new()),
        }
    }

    pub fn content_dir(&self) -> PathBuf {
        self.temp.path().join("uploads")
    }

    pub fn clone_voice_handler(&self) -> CloneVoiceHandler {
        CloneVoiceHandler::new(
            self.asset_store.clone(),
            self.provider.clone(),
            self.registry.clone(),
        )
    }

    pub fn delete_voice_handler(&self) -> DeleteVoiceHandler {
        DeleteVoiceHandler::new(self.provider.clone(), self.registry.clone())
    }

    pub fn generate_message_handler(&self) -> GenerateMessageHandler {
        self.generate_message_handler_with(self.encoder.clone())
    }

    pub fn generate_message_handler_with_failing_encoder(&self) -> GenerateMessageHandler {
        self.generate_message_handler_with(Arc::new(FailingEncoder))
    }

    fn generate_message_handler_with(
        &self,
        encoder: Arc<dyn LocatorEncoderPort>,
    ) -> GenerateMessageHandler {
        GenerateMessageHandler::new(
            self.asset_store.clone(),
            self.provider.clone(),
            encoder,
            self.registry.clone(),
            VoiceSettings::default(),
            "/uploads",
        )
    }
}
