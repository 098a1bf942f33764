//! Reading Context - 牌阵解读文本

use serde::{Deserialize, Serialize};

/// 牌阵类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpreadType {
    #[default]
    ThreeCard,
    CelticCross,
    Single,
}

impl SpreadType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpreadType::ThreeCard => "three-card",
            SpreadType::CelticCross => "celtic-cross",
            SpreadType::Single => "single",
        }
    }
}

/// 分段的解读脚本，每段单独合成
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingScript {
    pub segments: Vec<String>,
}

impl ReadingScript {
    pub fn full_text(&self) -> String {
        self.segments.join("\n\n")
    }
}

fn card_meaning(card: &str) -> Option<&'static str> {
    let meaning = match card {
        "THE FOOL" => "Neue Anfänge und unbegrenztes Potenzial erwarten dich.",
        "THE MAGICIAN" => "Du hast alle Werkzeuge, die du brauchst, um deine Ziele zu erreichen.",
        "THE HIGH PRIESTESS" => "Vertraue deiner Intuition und inneren Weisheit.",
        "THE EMPRESS" => "Fruchtbarkeit und Kreativität fließen durch dein Leben.",
        "THE EMPEROR" => "Struktur und Disziplin werden dir Erfolg bringen.",
        "THE LOVERS" => "Wichtige Entscheidungen in der Liebe stehen bevor.",
        "THE ICEBEAR" => "Stärke in der Einsamkeit, Zeit für innere Reflexion.",
        "THE UNICORN" => "Magie und Reinheit umgeben dich, folge deinen Träumen.",
        _ => return None,
    };
    Some(meaning)
}

/// 按牌阵组织解读文本
///
/// 张数不足时退化为单牌解读；`cards` 不能为空（由调用方校验）
pub fn compose_reading(cards: &[String], spread: SpreadType) -> ReadingScript {
    let cards: Vec<String> = cards.iter().map(|c| c.trim().to_uppercase()).collect();
    let mut segments = vec![format!(
        "Willkommen zu deiner mystischen Tarot-Lesung. Ich habe {} Karten für dich gezogen. \
         Lass uns sehen, was das Universum dir mitteilen möchte.",
        cards.len()
    )];

    match spread {
        SpreadType::ThreeCard if cards.len() >= 3 => {
            let positions = [
                ("Die erste Karte repräsentiert deine Vergangenheit", "Diese Karte birgt Geheimnisse."),
                ("Die zweite Karte zeigt deine Gegenwart", "Der gegenwärtige Moment ist voller Möglichkeiten."),
                ("Die dritte Karte enthüllt deine Zukunft", "Die Zukunft formt sich durch deine Handlungen."),
            ];
            for (card, (position, default_meaning)) in cards.iter().zip(positions) {
                segments.push(format!(
                    "{}: {}. {}",
                    position,
                    card,
                    card_meaning(card).unwrap_or(default_meaning)
                ));
            }
        }
        SpreadType::CelticCross if cards.len() >= 5 => {
            segments.push(format!(
                "Im Zentrum steht {} - dies ist deine aktuelle Situation. \
                 Gekreuzt von {} - dies ist deine Herausforderung.",
                cards[0], cards[1]
            ));
            segments.push(format!(
                "Über dir schwebt {} - dein bewusstes Ziel. \
                 Unter dir liegt {} - deine unbewusste Basis.",
                cards[2], cards[3]
            ));
            segments.push(format!(
                "Die Zukunft zeigt {} - das mögliche Ergebnis.",
                cards[4]
            ));
        }
        _ => {
            let card = cards.first().map(String::as_str).unwrap_or("");
            segments.push(format!(
                "Deine Karte ist {}. {}",
                card,
                card_meaning(card).unwrap_or("Diese Karte spricht zu deiner Seele.")
            ));
        }
    }

    segments.push("Möge diese Lesung dir Klarheit und Führung bringen. Namaste.".to_string());

    ReadingScript { segments }
}
