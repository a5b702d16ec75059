//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod locator;
pub mod provider;
pub mod storage;

pub use locator::*;
pub use provider::*;
pub use storage::*;
