//! Card Context - 卡牌词表

use serde::Serialize;

const MAJOR_ARCANA: [&str; 22] = [
    "THE FOOL",
    "THE MAGICIAN",
    "THE HIGH PRIESTESS",
    "THE EMPRESS",
    "THE EMPEROR",
    "THE HIEROPHANT",
    "THE LOVERS",
    "THE CHARIOT",
    "STRENGTH",
    "THE HERMIT",
    "WHEEL OF FORTUNE",
    "JUSTICE",
    "THE HANGED MAN",
    "DEATH",
    "TEMPERANCE",
    "THE DEVIL",
    "THE TOWER",
    "THE STAR",
    "THE MOON",
    "THE SUN",
    "JUDGEMENT",
    "THE WORLD",
];

/// 猫咪塔罗牌组特有的卡牌
const DECK_EXTRAS: [&str; 2] = ["THE ICEBEAR", "THE UNICORN"];

const RANKS: [&str; 14] = [
    "ACE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE", "TEN", "PAGE",
    "KNIGHT", "QUEEN", "KING",
];

const SUITS: [&str; 4] = ["WANDS", "CUPS", "SWORDS", "PENTACLES"];

/// 合法卡牌名（封闭词表，大写）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CardLabel(String);

impl CardLabel {
    /// 精确匹配已规范化（trim + 大写）的文本，不做模糊匹配
    pub fn parse(normalized: &str) -> Option<Self> {
        let known = MAJOR_ARCANA.contains(&normalized)
            || DECK_EXTRAS.contains(&normalized)
            || is_minor_arcana(normalized);

        known.then(|| Self(normalized.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 词表中的全部卡牌
    pub fn all() -> Vec<CardLabel> {
        let majors = MAJOR_ARCANA.iter().chain(DECK_EXTRAS.iter()).map(|s| s.to_string());
        let minors = SUITS
            .iter()
            .flat_map(|suit| RANKS.iter().map(move |rank| format!("{} OF {}", rank, suit)));

        majors.chain(minors).map(CardLabel).collect()
    }
}

impl std::fmt::Display for CardLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_minor_arcana(normalized: &str) -> bool {
    normalized
        .split_once(" OF ")
        .map(|(rank, suit)| RANKS.contains(&rank) && SUITS.contains(&suit))
        .unwrap_or(false)
}

/// 识别模型给出的"非答案"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentinel {
    Unknown,
    WrongCard,
}

impl Sentinel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentinel::Unknown => "UNKNOWN",
            Sentinel::WrongCard => "WRONG_CARD",
        }
    }

    /// 识别提示词是德语的，所以同时接受德语写法
    pub fn parse(normalized: &str) -> Option<Self> {
        match normalized {
            "UNKNOWN" | "UNBEKANNT" => Some(Sentinel::Unknown),
            "WRONG_CARD" | "FALSCHE KARTE" => Some(Sentinel::WrongCard),
            _ => None,
        }
    }
}

/// 单次识别的分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognition {
    Card(CardLabel),
    Sentinel(Sentinel),
    /// 既不在词表中也不是哨兵值
    Unrecognized(String),
}

impl Recognition {
    /// 规范化（trim + 大写）后分类；空白输出视为 UNKNOWN
    pub fn classify(raw: &str) -> Self {
        let normalized = raw.trim().to_uppercase();

        if normalized.is_empty() {
            return Recognition::Sentinel(Sentinel::Unknown);
        }
        if let Some(sentinel) = Sentinel::parse(&normalized) {
            return Recognition::Sentinel(sentinel);
        }
        match CardLabel::parse(&normalized) {
            Some(label) => Recognition::Card(label),
            None => Recognition::Unrecognized(normalized),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Recognition::Card(label) => label.as_str(),
            Recognition::Sentinel(sentinel) => sentinel.as_str(),
            Recognition::Unrecognized(text) => text,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Recognition::Card(_) => "card",
            Recognition::Sentinel(Sentinel::Unknown) => "unknown",
            Recognition::Sentinel(Sentinel::WrongCard) => "wrong_card",
            Recognition::Unrecognized(_) => "unrecognized",
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, Recognition::Sentinel(_))
    }
}
