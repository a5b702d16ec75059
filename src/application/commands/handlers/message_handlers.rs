//! Message Command Handlers

use std::sync::Arc;

use crate::application::commands::GenerateMessage;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AssetStorePort, LocatorEncoderPort, RegistryPort, SynthesizeRequest, VoiceProviderPort,
};
use crate::domain::message::{GeneratedMessage, MessageIdGenerator, NewMessage};
use crate::domain::voice::{VoiceId, VoiceSettings};

const MISSING_MESSAGE_INPUT: &str = "Please select a voice and provide message text";

/// 合成音频统一以 MP3 落盘
const GENERATED_AUDIO_EXTENSION: &str = "mp3";

/// GenerateMessage Handler
///
/// Validating -> Synthesizing -> Persisting -> Encoding -> Recording -> Done
///
/// Encoding 失败时已写入的音频文件不会被回收（没有消息引用它）
pub struct GenerateMessageHandler {
    asset_store: Arc<dyn AssetStorePort>,
    provider: Arc<dyn VoiceProviderPort>,
    encoder: Arc<dyn LocatorEncoderPort>,
    registry: Arc<dyn RegistryPort>,
    id_generator: MessageIdGenerator,
    default_settings: VoiceSettings,
    /// 内容区对外的 URL 路径前缀，如 `/uploads`
    public_path: String,
}

impl GenerateMessageHandler {
    pub fn new(
        asset_store: Arc<dyn AssetStorePort>,
        provider: Arc<dyn VoiceProviderPort>,
        encoder: Arc<dyn LocatorEncoderPort>,
        registry: Arc<dyn RegistryPort>,
        default_settings: VoiceSettings,
        public_path: impl Into<String>,
    ) -> Self {
        Self {
            asset_store,
            provider,
            encoder,
            registry,
            id_generator: MessageIdGenerator::new(),
            default_settings,
            public_path: public_path.into(),
        }
    }

    pub async fn handle(&self, command: GenerateMessage) -> Result<GeneratedMessage, ApplicationError> {
        // Validating
        let voice_id = VoiceId::new(command.voice_id)
            .map_err(|_| ApplicationError::missing_input(MISSING_MESSAGE_INPUT))?;
        if command.message_text.trim().is_empty() {
            return Err(ApplicationError::missing_input(MISSING_MESSAGE_INPUT));
        }
        let settings = self
            .default_settings
            .with_overrides(command.stability, command.similarity_boost)
            .map_err(ApplicationError::missing_input)?;

        // Synthesizing
        let request = SynthesizeRequest {
            voice_id: voice_id.clone(),
            text: command.message_text.clone(),
            settings,
        };
        let audio = self.provider.synthesize(request).await.map_err(|e| {
            tracing::error!(
                voice_id = %voice_id,
                status = ?e.status(),
                transport = e.is_transport(),
                error = %e,
                "Message generation failed"
            );
            ApplicationError::from(e)
        })?;

        // Persisting
        let persisted = self
            .asset_store
            .persist(&audio.data, GENERATED_AUDIO_EXTENSION)
            .await
            .map_err(|e| {
                tracing::error!(voice_id = %voice_id, error = %e, "Failed to persist generated audio");
                ApplicationError::from(e)
            })?;
        let audio_url = self.audio_url(&command.public_base_url, &persisted.file_name);

        // Encoding
        let scannable_code = self.encoder.encode(&audio_url).map_err(|e| {
            tracing::error!(
                audio_url = %audio_url,
                audio_file = %persisted.file_name,
                error = %e,
                "Failed to encode audio address, audio file left orphaned"
            );
            ApplicationError::from(e)
        })?;

        // Recording
        let voice_name = self.registry.find_voice_name(&voice_id);
        let message = GeneratedMessage::new(NewMessage {
            id: self.id_generator.next_id(),
            voice_id,
            voice_name,
            message_text: command.message_text,
            patient_name: command.patient_name,
            audio_file_name: persisted.file_name,
            audio_url,
            scannable_code,
        });
        self.registry.add_message(message.clone());

        tracing::info!(
            message_id = %message.id(),
            voice_id = %message.voice_id(),
            audio_file = %message.audio_file_name(),
            audio_size = audio.data.len(),
            "Voice message generated"
        );

        Ok(message)
    }

    /// `{base_url}{public_path}/{file_name}`
    fn audio_url(&self, base_url: &str, file_name: &str) -> String {
        format!(
            "{}/{}/{}",
            base_url.trim_end_matches('/'),
            self.public_path.trim_matches('/'),
            file_name
        )
    }
}
