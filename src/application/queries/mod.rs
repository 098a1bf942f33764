//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod quiz_queries;
mod voice_clone_queries;

pub mod handlers;

pub use quiz_queries::*;
pub use voice_clone_queries::*;
