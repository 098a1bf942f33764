//! Card Context - 模型降级链决策
//!
//! 纯函数，不做 I/O：输入已经完成的尝试记录，输出下一步动作

use serde::{Deserialize, Serialize};

use super::Recognition;
use crate::domain::job::JobError;

/// 视觉模型的一个变体（由弱到强排列）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelVariant {
    /// 模型标识
    pub model: String,
    /// 输出 token 上限
    pub max_tokens: u32,
}

impl ModelVariant {
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            max_tokens,
        }
    }
}

/// 单次尝试的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Answer(Recognition),
    Error(JobError),
}

/// 降级链上的一条尝试记录（只用于诊断和日志）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantAttemptRecord {
    pub variant: String,
    pub outcome: AttemptOutcome,
}

impl VariantAttemptRecord {
    pub fn answer(variant: impl Into<String>, recognition: Recognition) -> Self {
        Self {
            variant: variant.into(),
            outcome: AttemptOutcome::Answer(recognition),
        }
    }

    pub fn error(variant: impl Into<String>, error: JobError) -> Self {
        Self {
            variant: variant.into(),
            outcome: AttemptOutcome::Error(error),
        }
    }

    fn is_sentinel_answer(&self) -> bool {
        matches!(&self.outcome, AttemptOutcome::Answer(r) if r.is_sentinel())
    }
}

/// 下一步动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackDecision {
    /// 以该结果结束
    Accept(Recognition),
    /// 尝试下一个变体
    Escalate,
    /// 整体失败
    Fail(JobError),
}

/// 根据已有尝试记录决定下一步
///
/// - 合法卡牌名: 立即接受，不再尝试更贵的变体
/// - 哨兵值: 只升级一次；此前已出现过哨兵或已是最后一个变体时接受
/// - 其他无法识别的文本: 原样接受
/// - 可恢复错误: 还有变体则继续，否则以最后一个错误失败
/// - 不可恢复错误（提供方业务失败 / 取消）: 立即失败
pub fn decide(records: &[VariantAttemptRecord], total_variants: usize) -> FallbackDecision {
    let Some((last, earlier)) = records.split_last() else {
        return if total_variants == 0 {
            FallbackDecision::Fail(JobError::unrecognized("no model variants configured"))
        } else {
            FallbackDecision::Escalate
        };
    };

    let has_remaining = records.len() < total_variants;

    match &last.outcome {
        AttemptOutcome::Answer(recognition @ Recognition::Sentinel(_)) => {
            let already_escalated = earlier.iter().any(VariantAttemptRecord::is_sentinel_answer);
            if has_remaining && !already_escalated {
                FallbackDecision::Escalate
            } else {
                FallbackDecision::Accept(recognition.clone())
            }
        }
        AttemptOutcome::Answer(recognition) => FallbackDecision::Accept(recognition.clone()),
        AttemptOutcome::Error(error) if error.is_recoverable() && has_remaining => {
            FallbackDecision::Escalate
        }
        AttemptOutcome::Error(error) => FallbackDecision::Fail(error.clone()),
    }
}
