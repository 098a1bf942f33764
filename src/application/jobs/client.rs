//! Remote Job Client - 提交 / 轮询远程异步任务
//!
//! 提供方可能同步返回结果，也可能返回任务票据；
//! 客户端统一成 submit → (poll) → 终态，且不做任何重试

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{JobTransportPort, Sleeper};
use crate::domain::job::{
    classify_poll, classify_submit, JobFailure, JobHandle, JobRequest, JobResult, PollPolicy,
    PollStatus, SubmitOutcome, SubmitShape,
};

/// 日志中响应体的最大长度
const MAX_LOGGED_BODY: usize = 200;

fn truncate_for_log(text: &str) -> String {
    if text.len() <= MAX_LOGGED_BODY {
        return text.to_string();
    }
    let mut end = MAX_LOGGED_BODY;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// 远程任务客户端
///
/// 每个提供方一个实例（鉴权由 transport 决定），可以在多个调用方之间共享
pub struct RemoteJobClient {
    transport: Arc<dyn JobTransportPort>,
    sleeper: Arc<dyn Sleeper>,
}

impl RemoteJobClient {
    pub fn new(transport: Arc<dyn JobTransportPort>, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { transport, sleeper }
    }

    /// 提交任务
    pub async fn submit(&self, request: &JobRequest) -> SubmitOutcome {
        tracing::debug!(
            label = %request.label,
            endpoint = %request.endpoint,
            "Submitting job"
        );

        let body = match self
            .transport
            .post_json(&request.endpoint, &request.payload)
            .await
        {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(label = %request.label, error = %e, "Job submission failed");
                return SubmitOutcome::Failed(JobFailure::Transport(e.to_string()));
            }
        };

        match classify_submit(&body, request.status_base.as_deref()) {
            SubmitShape::Direct(artifact) => {
                tracing::info!(label = %request.label, "Job completed synchronously");
                SubmitOutcome::Succeeded(artifact)
            }
            SubmitShape::Ticket { id, status_url } => {
                tracing::info!(label = %request.label, job_id = %id, "Job accepted, polling");
                SubmitOutcome::Pending(
                    JobHandle::new(id, status_url).with_optional_artifact(request.artifact_optional),
                )
            }
            SubmitShape::Failed(message) => {
                tracing::warn!(label = %request.label, error = %message, "Job rejected on submit");
                SubmitOutcome::Failed(JobFailure::Provider(message))
            }
            SubmitShape::Unrecognized => {
                let snippet = truncate_for_log(&body.to_string());
                tracing::warn!(label = %request.label, body = %snippet, "Unrecognized submit response");
                SubmitOutcome::Failed(JobFailure::UnrecognizedResponse(snippet))
            }
        }
    }

    /// 轮询直到终态
    ///
    /// 每轮先挂起 `policy.interval` 再查询一次；`max_attempts` 次后仍未终结则 TimedOut。
    /// 取消在挂起或查询期间生效，之后不再发出请求
    pub async fn poll_until_terminal(
        &self,
        handle: &JobHandle,
        policy: PollPolicy,
        cancel: &CancellationToken,
    ) -> JobResult {
        for attempt in 1..=policy.max_attempts {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!(job_id = %handle.id, attempt, "Job polling cancelled");
                    return JobResult::Cancelled;
                }
                _ = self.sleeper.sleep(policy.interval) => {}
            }

            let response = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!(job_id = %handle.id, attempt, "Job polling cancelled");
                    return JobResult::Cancelled;
                }
                response = self.transport.get_json(&handle.status_url) => response,
            };

            let body = match response {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(job_id = %handle.id, attempt, error = %e, "Job poll failed");
                    return JobResult::Failed(JobFailure::Transport(e.to_string()));
                }
            };

            match classify_poll(&body, handle.artifact_optional) {
                PollStatus::Completed(artifact) => {
                    tracing::info!(job_id = %handle.id, attempt, "Job completed");
                    return JobResult::Succeeded(artifact);
                }
                PollStatus::Failed(message) => {
                    tracing::warn!(job_id = %handle.id, attempt, error = %message, "Job failed");
                    return JobResult::Failed(JobFailure::Provider(message));
                }
                PollStatus::Pending(status) => {
                    tracing::debug!(
                        job_id = %handle.id,
                        attempt,
                        status = status.as_deref().unwrap_or("-"),
                        "Job still running"
                    );
                }
            }
        }

        tracing::warn!(
            job_id = %handle.id,
            attempts = policy.max_attempts,
            "Job timed out"
        );
        JobResult::TimedOut
    }

    /// 提交并在需要时轮询
    pub async fn run(
        &self,
        request: &JobRequest,
        policy: PollPolicy,
        cancel: &CancellationToken,
    ) -> JobResult {
        if cancel.is_cancelled() {
            return JobResult::Cancelled;
        }

        match self.submit(request).await {
            SubmitOutcome::Succeeded(artifact) => JobResult::Succeeded(artifact),
            SubmitOutcome::Failed(failure) => JobResult::Failed(failure),
            SubmitOutcome::Pending(handle) => {
                self.poll_until_terminal(&handle, policy, cancel).await
            }
        }
    }
}
