//! Voice Provider Adapter - ElevenLabs 客户端 + 本地 Fake 实现

mod elevenlabs_client;
mod fake_provider;

pub use elevenlabs_client::{ElevenLabsClient, ElevenLabsClientConfig};
pub use fake_provider::{FakeVoiceProvider, FakeVoiceProviderConfig};
