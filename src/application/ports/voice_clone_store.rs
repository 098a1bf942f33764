//! Voice Clone Store Port - 用户音色克隆注册表
//!
//! 同一 key 的并发写入是后写者胜，不保证原子性

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::VoiceCloneRecord;

/// 存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Voice Clone Store Port
///
/// 读写在内存中完成，`persist` 把当前快照整体落盘
#[async_trait]
pub trait VoiceCloneStorePort: Send + Sync {
    fn get(&self, user_id: &str) -> Option<VoiceCloneRecord>;

    fn set(&self, user_id: &str, record: VoiceCloneRecord);

    /// 返回被删除的记录
    fn delete(&self, user_id: &str) -> Option<VoiceCloneRecord>;

    fn contains(&self, user_id: &str) -> bool {
        self.get(user_id).is_some()
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn persist(&self) -> Result<(), StoreError>;
}
