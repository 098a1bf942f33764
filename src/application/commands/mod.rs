//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：识别、克隆、合成等会调用外部服务或修改状态的操作

mod card_commands;
mod quiz_commands;
mod reading_commands;
mod voice_clone_commands;

pub mod handlers;

pub use card_commands::*;
pub use quiz_commands::*;
pub use reading_commands::*;
pub use voice_clone_commands::*;
