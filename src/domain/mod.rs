//! Domain Layer - 领域层
//!
//! 限界上下文:
//! - Job Context: 远程任务（提交 / 轮询 / 终态分类）
//! - Card Context: 卡牌词表与识别降级决策
//! - Voice Context: 音色克隆与合成情绪
//! - Character Context: 测验角色
//! - Reading Context: 塔罗解读文本

pub mod card;
pub mod character;
pub mod job;
pub mod reading;
pub mod voice;

// 共享的随机数来源
pub mod random;

pub use random::RandomSource;
