//! Vision Model Port - 卡牌图片识别

use async_trait::async_trait;

use crate::domain::card::ModelVariant;
use crate::domain::job::JobError;

/// 待识别的卡牌图片
#[derive(Debug, Clone)]
pub struct CardImage {
    /// base64 编码的图片数据（不带 data URL 前缀）
    pub data_base64: String,
    /// 例如 `image/jpeg`
    pub media_type: String,
}

impl CardImage {
    pub fn jpeg(data_base64: impl Into<String>) -> Self {
        Self {
            data_base64: data_base64.into(),
            media_type: "image/jpeg".to_string(),
        }
    }
}

/// Vision Model Port
///
/// 返回模型的原始文本回答，规范化和分类由调用方完成
#[async_trait]
pub trait VisionModelPort: Send + Sync {
    async fn read_card(&self, variant: &ModelVariant, image: &CardImage) -> Result<String, JobError>;
}
