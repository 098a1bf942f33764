//! Reading Command Handlers

use std::sync::Arc;

use crate::application::commands::{GenerateReading, GenerateReadingResponse, ReadingSegment};
use crate::application::error::ApplicationError;
use crate::application::jobs::fan_out;
use crate::application::ports::{NarrationPort, NarrationRequest};
use crate::domain::reading::compose_reading;

const DEFAULT_VOICE_STYLE: &str = "mystical";

/// GenerateReading Handler
///
/// 各段并发朗读；朗读失败的段落只返回文本
pub struct GenerateReadingHandler {
    narration: Arc<dyn NarrationPort>,
}

impl GenerateReadingHandler {
    pub fn new(narration: Arc<dyn NarrationPort>) -> Self {
        Self { narration }
    }

    pub async fn handle(
        &self,
        command: GenerateReading,
    ) -> Result<GenerateReadingResponse, ApplicationError> {
        let cards: Vec<String> = command
            .cards
            .iter()
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .collect();
        if cards.is_empty() {
            return Err(ApplicationError::validation("At least one card is required"));
        }

        let script = compose_reading(&cards, command.spread);
        let style = command
            .voice_style
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_VOICE_STYLE.to_string());

        let audio: Vec<Option<String>> = if self.narration.is_configured() {
            let requests: Vec<NarrationRequest> = script
                .segments
                .iter()
                .map(|text| NarrationRequest {
                    text: text.clone(),
                    style: style.clone(),
                })
                .collect();
            fan_out(
                "reading-narration",
                requests.iter().map(|r| self.narration.narrate(r)).collect(),
            )
            .await
            .into_iter()
            .map(|branch| branch.value)
            .collect()
        } else {
            tracing::warn!("Narration not configured, returning text-only reading");
            vec![None; script.segments.len()]
        };

        let fully_narrated = audio.iter().all(Option::is_some);
        let text = script.full_text();
        let segments = script
            .segments
            .into_iter()
            .zip(audio)
            .map(|(text, audio_url)| ReadingSegment { text, audio_url })
            .collect();

        tracing::info!(
            spread = command.spread.as_str(),
            cards = cards.len(),
            fully_narrated,
            "Reading generated"
        );

        Ok(GenerateReadingResponse {
            spread: command.spread,
            cards,
            text,
            segments,
            fully_narrated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reading::SpreadType;
    use crate::testing::FakeNarration;

    fn command(cards: &[&str]) -> GenerateReading {
        GenerateReading {
            cards: cards.iter().map(|c| c.to_string()).collect(),
            spread: SpreadType::ThreeCard,
            voice_style: None,
        }
    }

    #[tokio::test]
    async fn test_failed_segment_degrades_to_text() {
        let narration = Arc::new(FakeNarration::new().failing_text("Gegenwart"));
        let handler = GenerateReadingHandler::new(narration.clone());

        let response = handler
            .handle(command(&["the fool", "THE LOVERS", "THE SUN"]))
            .await
            .unwrap();

        assert_eq!(response.segments.len(), 5);
        assert_eq!(narration.calls(), 5);
        assert!(response.segments[2].audio_url.is_none());
        assert!(response.segments[1].audio_url.is_some());
        assert!(response.segments[3].audio_url.is_some());
        assert!(!response.fully_narrated);
        assert_eq!(response.cards[0], "THE FOOL");
    }

    #[tokio::test]
    async fn test_unconfigured_narration_returns_text_only() {
        let narration = Arc::new(FakeNarration::new().unconfigured());
        let handler = GenerateReadingHandler::new(narration.clone());

        let response = handler.handle(command(&["THE UNICORN"])).await.unwrap();

        assert_eq!(narration.calls(), 0);
        assert!(response.segments.iter().all(|s| s.audio_url.is_none()));
        assert!(response.text.contains("Deine Karte ist THE UNICORN"));
    }

    #[tokio::test]
    async fn test_requires_cards() {
        let handler = GenerateReadingHandler::new(Arc::new(FakeNarration::new()));

        let result = handler.handle(command(&["  "])).await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }
}
