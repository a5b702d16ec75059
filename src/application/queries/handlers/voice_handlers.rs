//! Voice Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::RegistryPort;
use crate::application::queries::{GetVoice, ListVoices};
use crate::domain::voice::{VoiceId, VoiceIdentity};

/// GetVoice Handler
pub struct GetVoiceHandler {
    registry: Arc<dyn RegistryPort>,
}

impl GetVoiceHandler {
    pub fn new(registry: Arc<dyn RegistryPort>) -> Self {
        Self { registry }
    }

    pub fn handle(&self, query: GetVoice) -> Result<VoiceIdentity, ApplicationError> {
        let voice_id = VoiceId::new(query.voice_id.as_str())
            .map_err(|_| ApplicationError::not_found("Voice", &query.voice_id))?;

        self.registry
            .find_voice(&voice_id)
            .ok_or_else(|| ApplicationError::not_found("Voice", voice_id))
    }
}

/// ListVoices Handler
pub struct ListVoicesHandler {
    registry: Arc<dyn RegistryPort>,
}

impl ListVoicesHandler {
    pub fn new(registry: Arc<dyn RegistryPort>) -> Self {
        Self { registry }
    }

    pub fn handle(&self, _query: ListVoices) -> Vec<VoiceIdentity> {
        self.registry.list_voices()
    }
}
