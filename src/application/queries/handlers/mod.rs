//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod quiz_handlers;
mod voice_clone_handlers;

pub use quiz_handlers::*;
pub use voice_clone_handlers::*;
