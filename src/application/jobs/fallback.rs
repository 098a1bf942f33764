//! Fallback Chain - 按顺序尝试视觉模型变体
//!
//! 只负责 I/O 和记录，下一步怎么走由 `domain::card::decide` 决定

use crate::application::ports::{CardImage, VisionModelPort};
use crate::domain::card::{decide, FallbackDecision, ModelVariant, Recognition, VariantAttemptRecord};
use crate::domain::job::JobError;

/// 识别结果及尝试记录
#[derive(Debug, Clone)]
pub struct RecognitionOutcome {
    pub recognition: Recognition,
    /// 给出最终结果的变体
    pub model: String,
    pub attempts: Vec<VariantAttemptRecord>,
}

/// 依次调用各变体直到得到可接受的结果
pub async fn recognize_with_fallback(
    vision: &dyn VisionModelPort,
    variants: &[ModelVariant],
    image: &CardImage,
) -> Result<RecognitionOutcome, JobError> {
    let mut attempts: Vec<VariantAttemptRecord> = Vec::with_capacity(variants.len());

    loop {
        match decide(&attempts, variants.len()) {
            FallbackDecision::Accept(recognition) => {
                let model = attempts
                    .last()
                    .map(|a| a.variant.clone())
                    .unwrap_or_default();
                tracing::info!(
                    model = %model,
                    label = recognition.label(),
                    kind = recognition.kind(),
                    attempts = attempts.len(),
                    "Card recognized"
                );
                return Ok(RecognitionOutcome {
                    recognition,
                    model,
                    attempts,
                });
            }
            FallbackDecision::Fail(error) => {
                tracing::warn!(attempts = attempts.len(), error = %error, "Card recognition failed");
                return Err(error);
            }
            FallbackDecision::Escalate => {}
        }

        // decide 只会在还有剩余变体时返回 Escalate
        let Some(variant) = variants.get(attempts.len()) else {
            return Err(JobError::unrecognized("model variants exhausted"));
        };

        let record = match vision.read_card(variant, image).await {
            Ok(raw) => {
                let recognition = Recognition::classify(&raw);
                tracing::debug!(
                    model = %variant.model,
                    raw = %raw.trim(),
                    kind = recognition.kind(),
                    "Vision attempt answered"
                );
                VariantAttemptRecord::answer(variant.model.clone(), recognition)
            }
            Err(error) => {
                tracing::warn!(model = %variant.model, error = %error, "Vision attempt failed");
                VariantAttemptRecord::error(variant.model.clone(), error)
            }
        };
        attempts.push(record);
    }
}
