//! In-Memory Registry Implementation
//!
//! 音色与消息各一把读写锁；IndexMap 提供按 ID 查找，同时保持插入顺序

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::application::ports::RegistryPort;
use crate::domain::message::{GeneratedMessage, MessageId, UNKNOWN_VOICE_NAME};
use crate::domain::voice::{VoiceId, VoiceIdentity};

/// 内存注册表
pub struct InMemoryRegistry {
    voices: RwLock<IndexMap<VoiceId, VoiceIdentity>>,
    messages: RwLock<IndexMap<MessageId, GeneratedMessage>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self {
            voices: RwLock::new(IndexMap::new()),
            messages: RwLock::new(IndexMap::new()),
        }
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryPort for InMemoryRegistry {
    fn add_voice(&self, voice: VoiceIdentity) {
        let voice_id = voice.id().clone();
        if self.voices.write().insert(voice_id.clone(), voice).is_some() {
            tracing::warn!(voice_id = %voice_id, "Voice already registered, record replaced");
        }
        tracing::debug!(voice_id = %voice_id, "Voice added to registry");
    }

    fn remove_voice(&self, id: &VoiceId) -> Option<VoiceIdentity> {
        // shift_remove 保持剩余元素的相对顺序
        let removed = self.voices.write().shift_remove(id);
        if removed.is_some() {
            tracing::debug!(voice_id = %id, "Voice removed from registry");
        }
        removed
    }

    fn list_voices(&self) -> Vec<VoiceIdentity> {
        self.voices.read().values().cloned().collect()
    }

    fn find_voice(&self, id: &VoiceId) -> Option<VoiceIdentity> {
        self.voices.read().get(id).cloned()
    }

    fn find_voice_name(&self, id: &VoiceId) -> String {
        self.voices
            .read()
            .get(id)
            .map(|v| v.display_name().as_str().to_string())
            .unwrap_or_else(|| UNKNOWN_VOICE_NAME.to_string())
    }

    fn add_message(&self, message: GeneratedMessage) {
        let message_id = message.id();
        self.messages.write().insert(message_id, message);
        tracing::debug!(message_id = %message_id, "Message added to registry");
    }

    fn list_messages(&self) -> Vec<GeneratedMessage> {
        self.messages.read().values().cloned().collect()
    }

    fn find_message(&self, id: MessageId) -> Option<GeneratedMessage> {
        self.messages.read().get(&id).cloned()
    }
}
