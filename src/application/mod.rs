//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（AssetStore、LocatorEncoder、VoiceProvider、Registry）
//! - commands: CQRS 命令及处理器（CloneVoice、GenerateMessage、DeleteVoice）
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use commands::{
    AudioAttachment, CloneVoice, DeleteVoice, GenerateMessage,
    // Handlers
    handlers::{
        CloneVoiceHandler, DeleteVoiceHandler, DeleteVoiceResponse, GenerateMessageHandler,
        StagedUpload,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Asset store
    AssetStoreError,
    AssetStorePort,
    PersistedFile,
    StagedFile,
    // Locator encoder
    EncodingError,
    LocatorEncoderPort,
    // Registry
    RegistryPort,
    // Voice provider
    ProviderError,
    RegisterVoiceRequest,
    SynthesizeRequest,
    SynthesizedAudio,
    VoiceProviderPort,
};

pub use queries::{
    GetMessage, GetVoice, ListMessages, ListVoices,
    // Handlers
    handlers::{GetMessageHandler, GetVoiceHandler, ListMessagesHandler, ListVoicesHandler},
};
