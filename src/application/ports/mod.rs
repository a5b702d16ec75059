//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod asset_store;
mod locator_encoder;
mod registry;
mod voice_provider;

pub use asset_store::{AssetStoreError, AssetStorePort, PersistedFile, StagedFile};
pub use locator_encoder::{EncodingError, LocatorEncoderPort};
pub use registry::RegistryPort;
pub use voice_provider::{
    ProviderError, RegisterVoiceRequest, SynthesizeRequest, SynthesizedAudio, VoiceProviderPort,
};
