//! HTTP Handlers

mod message;
mod ping;
mod voice;

pub use message::*;
pub use ping::*;
pub use voice::*;
