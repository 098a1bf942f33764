//! Provider Response Classification
//!
//! 提交响应: 直接结果 / 异步任务 / 已失败 / 无法识别
//! 轮询响应: 完成 / 失败 / 继续等待

use serde_json::Value;

/// 提交响应的形态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitShape {
    /// 响应里直接带着产物
    Direct(String),
    /// 异步任务票据
    Ticket { id: String, status_url: String },
    /// 提交时就已报告 failed / error
    Failed(String),
    Unrecognized,
}

/// 单次轮询的分类
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStatus {
    Completed(String),
    Failed(String),
    /// 其余状态（queued / processing / 缺省），附带原始状态便于日志
    Pending(Option<String>),
}

const DEFAULT_FAILURE_MESSAGE: &str = "Job failed";

/// 去掉 `{ "data": { … } }` 外层（Wavespeed 的响应格式）
pub fn unwrap_envelope(body: &Value) -> &Value {
    match body.get("data") {
        Some(inner) if inner.is_object() => inner,
        _ => body,
    }
}

/// 提取产物引用
///
/// 支持的形态:
/// - `outputs: [first, ...]`
/// - `audio: "<base64>"`
/// - `output: { audio_url }`
/// - `content: [{ text }]`（Anthropic messages）
pub fn extract_artifact(body: &Value) -> Option<String> {
    if let Some(first) = body
        .get("outputs")
        .and_then(Value::as_array)
        .and_then(|outputs| outputs.first())
    {
        return Some(match first {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
    }

    if let Some(audio) = body.get("audio").and_then(Value::as_str) {
        if !audio.is_empty() {
            return Some(audio.to_string());
        }
    }

    if let Some(url) = body.pointer("/output/audio_url").and_then(Value::as_str) {
        return Some(url.to_string());
    }

    body.pointer("/content/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// 分类提交响应
///
/// `{id, urls.get}` 优先于直接结果（Wavespeed 的异步票据也带着空的 outputs），
/// 只有 id 的响应在没有直接结果时才借助 `status_base` 生成轮询地址
pub fn classify_submit(body: &Value, status_base: Option<&str>) -> SubmitShape {
    let body = unwrap_envelope(body);
    if let Some(message) = failure_message(body) {
        return SubmitShape::Failed(message);
    }
    let id = body.get("id").and_then(Value::as_str);

    if let (Some(id), Some(get_url)) = (id, body.pointer("/urls/get").and_then(Value::as_str)) {
        return SubmitShape::Ticket {
            id: id.to_string(),
            status_url: get_url.to_string(),
        };
    }

    if let Some(artifact) = extract_artifact(body) {
        return SubmitShape::Direct(artifact);
    }

    match (id, status_base) {
        (Some(id), Some(base)) => SubmitShape::Ticket {
            id: id.to_string(),
            status_url: format!("{}/{}", base.trim_end_matches('/'), id),
        },
        _ => SubmitShape::Unrecognized,
    }
}

fn status_of(body: &Value) -> Option<String> {
    body.get("status")
        .and_then(Value::as_str)
        .map(str::to_lowercase)
}

/// `status` 为 failed / error 时返回失败信息
fn failure_message(body: &Value) -> Option<String> {
    match status_of(body).as_deref() {
        Some("failed") | Some("error") => Some(
            body.get("error")
                .and_then(error_message)
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
        ),
        _ => None,
    }
}

/// 分类轮询响应
///
/// `completed` 但没有产物时: `artifact_optional` 为 true 则以空串完成，否则继续等待
pub fn classify_poll(body: &Value, artifact_optional: bool) -> PollStatus {
    let body = unwrap_envelope(body);
    if let Some(message) = failure_message(body) {
        return PollStatus::Failed(message);
    }

    let status = status_of(body);
    if status.as_deref() != Some("completed") {
        return PollStatus::Pending(status);
    }

    match extract_artifact(body) {
        Some(artifact) => PollStatus::Completed(artifact),
        None if artifact_optional => PollStatus::Completed(String::new()),
        None => PollStatus::Pending(status),
    }
}

fn error_message(value: &Value) -> Option<String> {
    let message = match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(_) => value.get("message").and_then(Value::as_str),
        _ => None,
    }?;

    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direct_outputs() {
        let body = json!({ "outputs": ["https://cdn/a.mp3"] });
        assert_eq!(
            classify_submit(&body, None),
            SubmitShape::Direct("https://cdn/a.mp3".to_string())
        );
    }

    #[test]
    fn test_wavespeed_ticket_inside_envelope() {
        let body = json!({
            "code": 200,
            "data": {
                "id": "job-1",
                "status": "created",
                "outputs": [],
                "urls": { "get": "https://api/predictions/job-1/result" }
            }
        });
        assert_eq!(
            classify_submit(&body, None),
            SubmitShape::Ticket {
                id: "job-1".to_string(),
                status_url: "https://api/predictions/job-1/result".to_string(),
            }
        );
    }

    #[test]
    fn test_inline_audio_and_anthropic_text() {
        assert_eq!(
            classify_submit(&json!({ "audio": "UklGRg==" }), None),
            SubmitShape::Direct("UklGRg==".to_string())
        );
        let message = json!({ "content": [{ "type": "text", "text": " THE FOOL " }] });
        assert_eq!(
            classify_submit(&message, None),
            SubmitShape::Direct(" THE FOOL ".to_string())
        );
    }

    #[test]
    fn test_id_only_uses_status_base() {
        let body = json!({ "id": "rp-7", "status": "IN_QUEUE" });
        assert_eq!(
            classify_submit(&body, Some("https://runpod/v2/ep/status/")),
            SubmitShape::Ticket {
                id: "rp-7".to_string(),
                status_url: "https://runpod/v2/ep/status/rp-7".to_string(),
            }
        );
        assert_eq!(classify_submit(&body, None), SubmitShape::Unrecognized);
    }

    #[test]
    fn test_runsync_completed_is_direct() {
        let body = json!({
            "id": "rp-8",
            "status": "COMPLETED",
            "output": { "audio_url": "https://runpod/out.mp3" }
        });
        assert_eq!(
            classify_submit(&body, Some("https://runpod/status")),
            SubmitShape::Direct("https://runpod/out.mp3".to_string())
        );
    }

    #[test]
    fn test_unrecognized_shape() {
        assert_eq!(
            classify_submit(&json!({ "message": "ok" }), None),
            SubmitShape::Unrecognized
        );
    }

    #[test]
    fn test_submit_reporting_failure() {
        let body = json!({
            "data": {
                "id": "job-2",
                "status": "failed",
                "error": "invalid audio",
                "urls": { "get": "https://api/predictions/job-2/result" }
            }
        });
        assert_eq!(
            classify_submit(&body, None),
            SubmitShape::Failed("invalid audio".to_string())
        );
        assert_eq!(
            classify_submit(&json!({ "id": "rp-9", "status": "ERROR" }), Some("https://rp/status")),
            SubmitShape::Failed(DEFAULT_FAILURE_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_poll_completed_requires_output() {
        assert_eq!(
            classify_poll(&json!({ "data": { "status": "completed", "outputs": ["u"] } }), false),
            PollStatus::Completed("u".to_string())
        );
        assert_eq!(
            classify_poll(&json!({ "status": "completed", "outputs": [] }), false),
            PollStatus::Pending(Some("completed".to_string()))
        );
    }

    #[test]
    fn test_poll_completed_without_output_when_optional() {
        assert_eq!(
            classify_poll(&json!({ "data": { "status": "completed", "outputs": [] } }), true),
            PollStatus::Completed(String::new())
        );
        assert_eq!(
            classify_poll(&json!({ "data": { "status": "completed" } }), true),
            PollStatus::Completed(String::new())
        );
        assert_eq!(
            classify_poll(&json!({ "status": "processing" }), true),
            PollStatus::Pending(Some("processing".to_string()))
        );
    }

    #[test]
    fn test_poll_failure_messages() {
        assert_eq!(
            classify_poll(&json!({ "status": "failed", "error": "voice not found" }), false),
            PollStatus::Failed("voice not found".to_string())
        );
        assert_eq!(
            classify_poll(&json!({ "status": "FAILED", "error": { "message": "oom" } }), false),
            PollStatus::Failed("oom".to_string())
        );
        assert_eq!(
            classify_poll(&json!({ "status": "error", "error": "" }), false),
            PollStatus::Failed(DEFAULT_FAILURE_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_poll_pending_states() {
        assert_eq!(
            classify_poll(&json!({ "status": "processing" }), false),
            PollStatus::Pending(Some("processing".to_string()))
        );
        assert_eq!(classify_poll(&json!({}), false), PollStatus::Pending(None));
    }
}
