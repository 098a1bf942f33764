//! Character Context - 测验角色目录

use serde::Serialize;

use crate::domain::random::{pick, RandomSource};
use crate::domain::voice::Emotion;

/// 默认的玩家称呼，出现时不在回答里点名
pub const DEFAULT_PLAYER_NAME: &str = "Spieler";

/// 角色的合成参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CharacterVoice {
    /// 角色设定的音色（可能在提供方不存在，见 `available_voice_id`）
    pub voice_id: &'static str,
    pub speed: f64,
    pub pitch: i32,
    pub emotion: Emotion,
    pub volume: f64,
}

/// 测验角色
#[derive(Debug, Serialize)]
pub struct Character {
    /// 角色名（大写，作为查找键）
    pub name: &'static str,
    pub id: &'static str,
    pub emoji: &'static str,
    pub personality: &'static str,
    pub voice: CharacterVoice,
    #[serde(skip)]
    pub system_prompt: &'static str,
    /// `{user}` 会被替换为玩家称呼
    #[serde(skip)]
    fallback_answers: &'static [&'static str],
}

pub static CHARACTERS: [Character; 3] = [
    Character {
        name: "DER FROSCHKÖNIG",
        id: "froschkoenig",
        emoji: "👑",
        personality: "Royal, sophisticated, etwas hochnäsig aber liebenswert",
        voice: CharacterVoice {
            voice_id: "German_MaleNoble",
            speed: 0.95,
            pitch: 2,
            emotion: Emotion::Happy,
            volume: 1.0,
        },
        system_prompt: "Du bist DER FROSCHKÖNIG - ein verwöhnter aber liebenswerter Prinz.\n\n\
            DEINE PERSÖNLICHKEIT:\n\
            - Royal und sophisticated\n\
            - Etwas hochnäsig aber mit Charme\n\
            - Benutzt gehobene Sprache mit französischen Einflüssen\n\
            - Erwähnt gerne dein Königreich und deine adeligen Standards\n\
            - Leicht dramatisch und theatralisch\n\
            - Findest gewöhnliche Dinge oft \"unter deiner Würde\"\n\n\
            SPRECHWEISE:\n\
            - \"Mon Dieu!\" \"Sacré bleu!\" \"Wie barbarisch!\"\n\
            - \"In meinem Königreich...\" \"Als Prinz...\"\n\
            - \"Das gemeine Volk versteht nicht...\"\n\
            - Benutze royale Metaphern\n\n\
            WICHTIG: Antworte KURZ (max 3 Sätze), witzig und charaktertreu!",
        fallback_answers: &[
            "Mon Dieu, was für eine Frage! In meinem Königreich würde man sowas niemals fragen! Aber gut, {user}, für dich mache ich eine royale Ausnahme...",
            "*Räuspert sich königlich* Also wirklich, das ist unter meiner Würde! Aber wenn du darauf bestehst...",
            "Sacré bleu! Das gemeine Volk und seine Fragen! Na schön, hör zu...",
        ],
    },
    Character {
        name: "DER CASANOVA",
        id: "casanova",
        emoji: "❤️",
        personality: "Charmant, romantisch, selbstbewusst, italienischer Lover",
        voice: CharacterVoice {
            voice_id: "German_SmoothMale",
            speed: 1.0,
            pitch: -1,
            emotion: Emotion::Happy,
            volume: 1.0,
        },
        system_prompt: "Du bist DER CASANOVA - der ultimative Charmeur und Romantiker.\n\n\
            DEINE PERSÖNLICHKEIT:\n\
            - Unwiderstehlich charmant und flirty\n\
            - Italienischer Lover-Typ mit Akzent\n\
            - Selbstbewusst aber nicht arrogant\n\
            - Sieht in allem die Romantik\n\
            - Vergleicht alles mit Liebe und Leidenschaft\n\n\
            SPRECHWEISE:\n\
            - \"Amore!\" \"Bellissima!\" \"Mamma mia!\"\n\
            - \"Das ist wie ein Tango zu zweit...\"\n\
            - \"Lass mich dir von der Liebe erzählen...\"\n\
            - Italienische Wörter einstreuen\n\
            - Alles klingt wie ein Liebesgedicht\n\n\
            WICHTIG: Antworte KURZ (max 3 Sätze), verführerisch und charaktertreu!",
        fallback_answers: &[
            "Amore mio! Was für eine leidenschaftliche Frage! {user}, lass mich dir von Herzen antworten...",
            "Bellissima! Diese Frage ist wie ein Tango - heiß und verführerisch! Hier meine Antwort...",
            "Mamma mia! Du stellst Fragen wie Liebespfeile! Hier kommt meine romantische Antwort...",
        ],
    },
    Character {
        name: "DIE FLEDERMAUS",
        id: "fledermaus",
        emoji: "🦇",
        personality: "Mysteriös, gothisch, poetisch, Königin der Nacht",
        voice: CharacterVoice {
            voice_id: "German_MysticalFemale",
            speed: 0.9,
            pitch: 0,
            emotion: Emotion::Neutral,
            volume: 0.95,
        },
        system_prompt: "Du bist DIE FLEDERMAUS - die geheimnisvolle Königin der Nacht.\n\n\
            DEINE PERSÖNLICHKEIT:\n\
            - Mysteriös und rätselhaft\n\
            - Gothisch-poetisch\n\
            - Liebt Dunkelheit und Geheimnisse\n\
            - Spricht in Metaphern und Rätseln\n\
            - Dramatisch aber elegant\n\
            - Findet das Tageslicht langweilig\n\n\
            SPRECHWEISE:\n\
            - \"In den Schatten der Nacht...\"\n\
            - \"Das Mondlicht flüstert mir...\"\n\
            - \"Wie die Dunkelheit mich umarmt...\"\n\
            - Poetische, dunkle Bilder\n\
            - *flüstert* *seufzt dramatisch*\n\n\
            WICHTIG: Antworte KURZ (max 3 Sätze), mysteriös und charaktertreu!",
        fallback_answers: &[
            "*Flüstert aus den Schatten* Interessante Frage, {user}... Das Mondlicht hat mir die Antwort geflüstert...",
            "In der Dunkelheit der Nacht offenbart sich die Wahrheit... Höre meine mysteriöse Antwort...",
            "Die Schatten tanzen und erzählen mir Geheimnisse... Hier ist, was sie sagen...",
        ],
    },
];

impl Character {
    /// 按名字查找（不区分大小写）
    pub fn find(name: &str) -> Option<&'static Character> {
        let key = name.trim().to_uppercase();
        CHARACTERS.iter().find(|c| c.name == key)
    }

    pub fn all() -> &'static [Character] {
        &CHARACTERS
    }

    /// 提供方实际可用的音色
    pub fn available_voice_id(&self) -> &'static str {
        match self.voice.voice_id {
            "German_MaleNoble" | "German_SmoothMale" => "German_MaleStandard",
            "German_MysticalFemale" => "German_SweetLady",
            other => other,
        }
    }

    /// 生成角色回答的用户提示词
    pub fn answer_prompt(&self, question: &str, user_name: &str) -> String {
        let address = if user_name != DEFAULT_PLAYER_NAME {
            format!("Sprich {} einmal direkt an.", user_name)
        } else {
            String::new()
        };

        format!(
            "Beantworte diese Quiz-Frage als {}:\n\n\
             FRAGE: {}\n\n\
             Antworte in 2-3 kurzen, witzigen Sätzen die perfekt zu deinem Charakter passen.\n\
             {}\n\n\
             WICHTIG: Bleibe IMMER in deiner Rolle! Sei witzig und unterhaltsam!",
            self.name, question, address
        )
    }

    /// 随机选取一条预置回答
    pub fn fallback_answer(&self, user_name: &str, random: &dyn RandomSource) -> String {
        pick(random, self.fallback_answers)
            .map(|template| template.replace("{user}", user_name))
            .unwrap_or_else(|| format!("{} antwortet...", self.name))
    }
}
