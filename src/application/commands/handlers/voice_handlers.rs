//! Voice Command Handlers

use std::sync::Arc;

use crate::application::commands::{CloneVoice, DeleteVoice};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AssetStorePort, RegisterVoiceRequest, RegistryPort, VoiceProviderPort,
};
use crate::domain::voice::{resolve_description, VoiceId, VoiceIdentity, VoiceName};

use super::StagedUpload;

const MISSING_CLONE_INPUT: &str = "Please provide doctor name and audio file";
const MISSING_VOICE_ID: &str = "Please select a voice";

// ============================================================================
// CloneVoice
// ============================================================================

/// CloneVoice Handler
///
/// Validating -> Staging -> Registering -> Recording -> Cleanup -> Done
pub struct CloneVoiceHandler {
    asset_store: Arc<dyn AssetStorePort>,
    provider: Arc<dyn VoiceProviderPort>,
    registry: Arc<dyn RegistryPort>,
}

impl CloneVoiceHandler {
    pub fn new(
        asset_store: Arc<dyn AssetStorePort>,
        provider: Arc<dyn VoiceProviderPort>,
        registry: Arc<dyn RegistryPort>,
    ) -> Self {
        Self {
            asset_store,
            provider,
            registry,
        }
    }

    pub async fn handle(&self, command: CloneVoice) -> Result<VoiceIdentity, ApplicationError> {
        // Validating
        let display_name = VoiceName::new(command.display_name)
            .map_err(|_| ApplicationError::missing_input(MISSING_CLONE_INPUT))?;
        let audio = command
            .audio
            .ok_or_else(|| ApplicationError::missing_input(MISSING_CLONE_INPUT))?;
        let description = resolve_description(command.description);

        // Staging
        let staged = self
            .asset_store
            .stage_upload(&audio.data, &audio.file_name, &audio.mime_type)
            .await
            .map_err(|e| {
                tracing::warn!(
                    file = %audio.file_name,
                    mime_type = %audio.mime_type,
                    error = %e,
                    "Failed to stage voice sample"
                );
                ApplicationError::from(e)
            })?;
        drop(audio);
        let staged = StagedUpload::new(self.asset_store.clone(), staged);

        // Registering + Recording
        let outcome = self.register(&staged, display_name, description).await;

        // Cleanup
        staged.release().await;

        outcome
    }

    async fn register(
        &self,
        staged: &StagedUpload,
        display_name: VoiceName,
        description: String,
    ) -> Result<VoiceIdentity, ApplicationError> {
        let file = staged.file();
        let audio = self.asset_store.read_staged(file).await.map_err(|e| {
            tracing::error!(file = %file.file_name, error = %e, "Failed to read staged voice sample");
            ApplicationError::from(e)
        })?;

        let request = RegisterVoiceRequest {
            display_name: display_name.as_str().to_string(),
            description: description.clone(),
            file_name: file.original_name.clone(),
            mime_type: file.mime_type.clone(),
            audio,
        };

        let voice_id = self.provider.register_voice(request).await.map_err(|e| {
            tracing::error!(
                name = %display_name,
                status = ?e.status(),
                transport = e.is_transport(),
                error = %e,
                "Voice cloning failed"
            );
            ApplicationError::from(e)
        })?;

        let voice = VoiceIdentity::new(
            voice_id,
            display_name,
            Some(description),
            file.file_name.clone(),
        );
        self.registry.add_voice(voice.clone());

        tracing::info!(
            voice_id = %voice.id(),
            name = %voice.display_name(),
            "Voice clone created"
        );

        Ok(voice)
    }
}

// ============================================================================
// DeleteVoice
// ============================================================================

/// 删除音色响应
#[derive(Debug, Clone)]
pub struct DeleteVoiceResponse {
    pub voice_id: VoiceId,
    /// 本地注册表中是否存在并已移除
    pub removed: bool,
}

/// DeleteVoice Handler
///
/// 先删除上游音色，成功后才从注册表移除
pub struct DeleteVoiceHandler {
    provider: Arc<dyn VoiceProviderPort>,
    registry: Arc<dyn RegistryPort>,
}

impl DeleteVoiceHandler {
    pub fn new(provider: Arc<dyn VoiceProviderPort>, registry: Arc<dyn RegistryPort>) -> Self {
        Self { provider, registry }
    }

    pub async fn handle(&self, command: DeleteVoice) -> Result<DeleteVoiceResponse, ApplicationError> {
        let voice_id = VoiceId::new(command.voice_id)
            .map_err(|_| ApplicationError::missing_input(MISSING_VOICE_ID))?;

        self.provider.delete_voice(&voice_id).await.map_err(|e| {
            tracing::error!(
                voice_id = %voice_id,
                status = ?e.status(),
                error = %e,
                "Delete voice failed"
            );
            ApplicationError::from(e)
        })?;

        let removed = self.registry.remove_voice(&voice_id).is_some();

        tracing::info!(voice_id = %voice_id, removed = removed, "Voice deleted");

        Ok(DeleteVoiceResponse { voice_id, removed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::AudioAttachment;
    use crate::application::testing::{Fixture, ProviderBehavior};
    use crate::domain::voice::DEFAULT_VOICE_DESCRIPTION;

    fn wav_attachment() -> Option<AudioAttachment> {
        Some(AudioAttachment {
            file_name: "sample.wav".to_string(),
            mime_type: "audio/wav".to_string(),
            data: b"RIFF....WAVEfmt ".to_vec(),
        })
    }

    fn clone_command(name: &str, audio: Option<AudioAttachment>) -> CloneVoice {
        CloneVoice {
            display_name: name.to_string(),
            description: Some(String::new()),
            audio,
        }
    }

    #[tokio::test]
    async fn test_clone_voice_success() {
        let fx = Fixture::new().await;
        let handler = fx.clone_voice_handler();

        let voice = handler
            .handle(clone_command("Dr. Smith", wav_attachment()))
            .await
            .unwrap();

        assert_eq!(voice.display_name().as_str(), "Dr. Smith");
        assert_eq!(voice.description(), DEFAULT_VOICE_DESCRIPTION);
        assert!(voice.source_file_name().ends_with("-sample.wav"));

        let voices = fx.registry.list_voices();
        assert_eq!(voices.len(), 1);
        assert_eq!(voices[0].id(), voice.id());

        assert_eq!(fx.asset_store.staged_count().await.unwrap(), 0);
        assert_eq!(fx.provider.register_calls(), 1);

        let sent = fx.provider.last_registration().unwrap();
        assert_eq!(sent.display_name, "Dr. Smith");
        assert_eq!(sent.description, DEFAULT_VOICE_DESCRIPTION);
        assert_eq!(sent.file_name, "sample.wav");
        assert_eq!(sent.audio, b"RIFF....WAVEfmt ".to_vec());
    }

    #[tokio::test]
    async fn test_clone_voice_missing_name_or_audio() {
        let fx = Fixture::new().await;
        let handler = fx.clone_voice_handler();

        let err = handler
            .handle(clone_command("", wav_attachment()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::MissingInput(_)));

        let err = handler
            .handle(clone_command("Dr. Smith", None))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::MissingInput(_)));

        assert!(fx.registry.list_voices().is_empty());
        assert_eq!(fx.provider.register_calls(), 0);
        assert_eq!(fx.asset_store.staged_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clone_voice_rejects_non_audio() {
        let fx = Fixture::new().await;
        let handler = fx.clone_voice_handler();

        let audio = Some(AudioAttachment {
            file_name: "notes.txt".to_string(),
            mime_type: "text/plain".to_string(),
            data: b"hello".to_vec(),
        });
        let err = handler
            .handle(clone_command("Dr. Smith", audio))
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::InvalidMediaType(_)));
        assert_eq!(fx.provider.register_calls(), 0);
        assert!(fx.registry.list_voices().is_empty());
        assert_eq!(fx.asset_store.staged_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clone_voice_provider_failure_cleans_up() {
        let fx = Fixture::with_behavior(ProviderBehavior::RejectAll).await;
        let handler = fx.clone_voice_handler();

        let err = handler
            .handle(clone_command("Dr. Smith", wav_attachment()))
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ProviderError(_)));
        assert!(!err.user_message().contains("quota"));
        assert_eq!(fx.provider.register_calls(), 1);
        assert!(fx.registry.list_voices().is_empty());
        assert_eq!(fx.asset_store.staged_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_voice_success() {
        let fx = Fixture::new().await;
        let voice = fx
            .clone_voice_handler()
            .handle(clone_command("Dr. Smith", wav_attachment()))
            .await
            .unwrap();

        let response = fx
            .delete_voice_handler()
            .handle(DeleteVoice {
                voice_id: voice.id().to_string(),
            })
            .await
            .unwrap();

        assert!(response.removed);
        assert_eq!(fx.provider.delete_calls(), 1);
        assert!(fx
            .registry
            .list_voices()
            .iter()
            .all(|v| v.id() != voice.id()));
    }

    #[tokio::test]
    async fn test_delete_voice_failure_keeps_registry_entry() {
        let fx = Fixture::new().await;
        let voice = fx
            .clone_voice_handler()
            .handle(clone_command("Dr. Smith", wav_attachment()))
            .await
            .unwrap();

        fx.provider.set_behavior(ProviderBehavior::RejectAll);
        let err = fx
            .delete_voice_handler()
            .handle(DeleteVoice {
                voice_id: voice.id().to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ProviderError(_)));
        assert_eq!(fx.registry.list_voices().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_voice_requires_id() {
        let fx = Fixture::new().await;
        let err = fx
            .delete_voice_handler()
            .handle(DeleteVoice {
                voice_id: String::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::MissingInput(_)));
        assert_eq!(fx.provider.delete_calls(), 0);
    }
}
