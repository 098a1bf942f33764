//! Job Context - 远程任务限界上下文
//!
//! 职责:
//! - 任务请求 / 句柄 / 终态
//! - 失败分类（传输 / 提供方 / 无法识别）
//! - 提供方响应的纯函数分类

mod classify;
mod value_objects;

pub use classify::{classify_poll, classify_submit, extract_artifact, unwrap_envelope, PollStatus, SubmitShape};
pub use value_objects::{
    JobError, JobFailure, JobHandle, JobRequest, JobResult, PollPolicy, SubmitOutcome,
};
