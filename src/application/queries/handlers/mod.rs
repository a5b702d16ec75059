//! Query Handlers 实现

mod message_handlers;
mod voice_handlers;

pub use message_handlers::*;
pub use voice_handlers::*;
