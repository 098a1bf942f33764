//! Narration Port - 塔罗解读朗读

use async_trait::async_trait;

use crate::domain::job::JobError;

/// 朗读请求
#[derive(Debug, Clone)]
pub struct NarrationRequest {
    pub text: String,
    /// 语气风格，例如 `mystical`
    pub style: String,
}

#[async_trait]
pub trait NarrationPort: Send + Sync {
    /// 返回音频地址
    async fn narrate(&self, request: &NarrationRequest) -> Result<String, JobError>;

    fn is_configured(&self) -> bool {
        true
    }
}
