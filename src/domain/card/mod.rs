//! Card Context - 卡牌识别限界上下文
//!
//! 职责:
//! - 封闭的卡牌词表和哨兵值
//! - 识别结果规范化与分类
//! - 模型降级链的决策函数

mod fallback;
mod label;

pub use fallback::{decide, AttemptOutcome, FallbackDecision, ModelVariant, VariantAttemptRecord};
pub use label::{CardLabel, Recognition, Sentinel};
