//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod card_handlers;
mod quiz_handlers;
mod reading_handlers;
mod voice_clone_handlers;

pub use card_handlers::*;
pub use quiz_handlers::*;
pub use reading_handlers::*;
pub use voice_clone_handlers::*;
