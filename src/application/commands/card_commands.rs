//! Card Commands - 卡牌识别

/// 识别卡牌命令
#[derive(Debug, Clone)]
pub struct RecognizeCard {
    /// base64 图片，也接受 `data:image/...;base64,` 形式
    pub image_base64: String,
}

/// 识别卡牌响应
#[derive(Debug, Clone)]
pub struct RecognizeCardResponse {
    /// 规范化后的结果（卡牌名或哨兵值）
    pub label: String,
    /// card / unknown / wrong_card / unrecognized
    pub kind: &'static str,
    /// 给出结果的模型
    pub model: String,
    pub attempts: usize,
}
