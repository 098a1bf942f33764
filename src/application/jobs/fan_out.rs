//! Batch Fan-out - 并发执行多个独立分支
//!
//! 某个分支失败（返回 Err 或 panic）不会取消其他分支，结果按输入顺序返回

use futures_util::future::join_all;
use futures_util::FutureExt;
use serde::Serialize;
use std::any::Any;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;

/// 单个分支的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchOutcome<T> {
    pub index: usize,
    pub success: bool,
    pub value: Option<T>,
    pub error: Option<String>,
}

impl<T> BranchOutcome<T> {
    fn from_result<E: Display>(index: usize, result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self {
                index,
                success: true,
                value: Some(value),
                error: None,
            },
            Err(e) => Self::failed(index, e.to_string()),
        }
    }

    fn failed(index: usize, error: String) -> Self {
        Self {
            index,
            success: false,
            value: None,
            error: Some(error),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// 同时启动所有分支并等待全部结束
pub async fn fan_out<T, E, F>(label: &str, branches: Vec<F>) -> Vec<BranchOutcome<T>>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    let total = branches.len();
    let guarded = branches
        .into_iter()
        .map(|branch| AssertUnwindSafe(branch).catch_unwind());
    let outcomes: Vec<BranchOutcome<T>> = join_all(guarded)
        .await
        .into_iter()
        .enumerate()
        .map(|(index, result)| match result {
            Ok(result) => BranchOutcome::from_result(index, result),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!(label, index, "Fan-out branch panicked: {message}");
                BranchOutcome::failed(index, format!("Branch panicked: {message}"))
            }
        })
        .collect();

    let mut failed = 0;
    for outcome in outcomes.iter().filter(|o| !o.success) {
        failed += 1;
        tracing::warn!(
            label,
            index = outcome.index,
            error = outcome.error.as_deref().unwrap_or_default(),
            "Fan-out branch failed"
        );
    }
    tracing::info!(label, total, failed, "Fan-out finished");

    outcomes
}
