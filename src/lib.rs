//! Voicegram - 医生音色克隆与语音消息服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice: 音色身份（外部语音服务分配的 ID + 展示信息）
//! - Message: 生成的语音消息（音频地址 + 二维码）
//!
//! 应用层 (application/):
//! - Ports: AssetStore, LocatorEncoder, VoiceProvider, Registry
//! - Commands: CloneVoice, GenerateMessage, DeleteVoice
//! - Queries: 音色与消息的列表/详情
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: ElevenLabs 客户端、文件存储、二维码编码
//! - Memory: 进程内注册表
//! - HTTP: JSON API + 生成音频的静态访问

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
