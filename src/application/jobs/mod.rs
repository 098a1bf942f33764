//! Remote Jobs - 远程任务编排
//!
//! - client: 提交 / 轮询 / 终态
//! - fallback: 视觉模型降级链
//! - fan_out: 批量并发

mod client;
mod fallback;
mod fan_out;

pub use client::RemoteJobClient;
pub use fallback::{recognize_with_fallback, RecognitionOutcome};
pub use fan_out::{fan_out, BranchOutcome};
