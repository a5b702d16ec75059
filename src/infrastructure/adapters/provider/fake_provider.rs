//! Fake Voice Provider - 本地开发用的语音服务
//!
//! 不访问外部服务：注册返回随机 ID，合成始终返回固定音频

use async_trait::async_trait;
use std::path::PathBuf;

use crate::application::ports::{
    ProviderError, RegisterVoiceRequest, SynthesizeRequest, SynthesizedAudio, VoiceProviderPort,
};
use crate::domain::voice::VoiceId;

/// 一帧静音 MP3（MPEG-1 Layer III, 128kbps, 44.1kHz）
fn silent_mp3_frame() -> Vec<u8> {
    let mut frame = vec![0u8; 417];
    frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x64]);
    frame
}

/// Fake Provider 配置
#[derive(Debug, Clone, Default)]
pub struct FakeVoiceProviderConfig {
    /// 固定返回的音频文件路径，未设置时返回一帧静音 MP3
    pub audio_file_path: Option<PathBuf>,
}

/// Fake Voice Provider
pub struct FakeVoiceProvider {
    /// 缓存的音频数据
    audio_data: Vec<u8>,
}

impl FakeVoiceProvider {
    pub fn new(config: FakeVoiceProviderConfig) -> Result<Self, std::io::Error> {
        let audio_data = match &config.audio_file_path {
            Some(path) => std::fs::read(path)?,
            None => silent_mp3_frame(),
        };
        tracing::info!(
            path = ?config.audio_file_path,
            audio_size = audio_data.len(),
            "FakeVoiceProvider initialized"
        );
        Ok(Self { audio_data })
    }
}

#[async_trait]
impl VoiceProviderPort for FakeVoiceProvider {
    async fn register_voice(&self, request: RegisterVoiceRequest) -> Result<VoiceId, ProviderError> {
        if request.audio.is_empty() {
            return Err(ProviderError::Api {
                status: 400,
                body: "empty sample".to_string(),
            });
        }

        let voice_id = VoiceId::new(format!("fake-{}", uuid::Uuid::new_v4().simple()))
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        tracing::debug!(voice_id = %voice_id, name = %request.display_name, "FakeVoiceProvider: voice registered");
        Ok(voice_id)
    }

    async fn synthesize(&self, request: SynthesizeRequest) -> Result<SynthesizedAudio, ProviderError> {
        tracing::debug!(
            voice_id = %request.voice_id,
            text_len = request.text.len(),
            "FakeVoiceProvider: returning fixed audio"
        );
        Ok(SynthesizedAudio {
            data: self.audio_data.clone(),
            content_type: Some("audio/mpeg".to_string()),
        })
    }

    async fn delete_voice(&self, voice_id: &VoiceId) -> Result<(), ProviderError> {
        tracing::debug!(voice_id = %voice_id, "FakeVoiceProvider: voice deleted");
        Ok(())
    }
}
