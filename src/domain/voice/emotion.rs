//! Voice Context - 合成情绪

use serde::{Deserialize, Serialize};

use crate::domain::random::RandomSource;

/// MiniMax speech-02 支持的情绪
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Fearful,
    Disgusted,
    Surprised,
    Neutral,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Fearful => "fearful",
            Emotion::Disgusted => "disgusted",
            Emotion::Surprised => "surprised",
            Emotion::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 带权重的情绪选择器
///
/// 调用方未指定情绪时按权重随机选择
#[derive(Debug, Clone)]
pub struct EmotionPicker {
    weights: Vec<(Emotion, u32)>,
}

impl Default for EmotionPicker {
    /// happy 权重翻倍
    fn default() -> Self {
        Self::new(vec![(Emotion::Happy, 2), (Emotion::Surprised, 1)])
    }
}

impl EmotionPicker {
    pub fn new(weights: Vec<(Emotion, u32)>) -> Self {
        Self { weights }
    }

    pub fn pick(&self, requested: Option<Emotion>, random: &dyn RandomSource) -> Emotion {
        if let Some(emotion) = requested {
            return emotion;
        }

        let total: u32 = self.weights.iter().map(|(_, w)| *w).sum();
        if total == 0 {
            return Emotion::Neutral;
        }

        let mut target = random.next() * f64::from(total);
        for (emotion, weight) in &self.weights {
            let weight = f64::from(*weight);
            if target < weight {
                return *emotion;
            }
            target -= weight;
        }

        self.weights
            .iter()
            .rev()
            .find(|(_, w)| *w > 0)
            .map(|(e, _)| *e)
            .unwrap_or(Emotion::Neutral)
    }
}
