//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod message_handlers;
mod staged_upload;
mod voice_handlers;

pub use message_handlers::*;
pub use staged_upload::StagedUpload;
pub use voice_handlers::*;
