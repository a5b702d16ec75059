//! Memory Layer - In-Memory State Management
//!
//! 音色与语音消息的进程内注册表，重启后不保留

mod registry;

pub use registry::InMemoryRegistry;
