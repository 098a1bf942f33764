//! Card Command Handlers

use std::sync::Arc;

use crate::application::commands::{RecognizeCard, RecognizeCardResponse};
use crate::application::error::ApplicationError;
use crate::application::jobs::recognize_with_fallback;
use crate::application::ports::{CardImage, VisionModelPort};
use crate::domain::card::ModelVariant;

/// 拆分 `data:<media>;base64,<data>`，纯 base64 视为 JPEG
fn parse_image(input: &str) -> Option<CardImage> {
    let input = input.trim();
    let image = match input.strip_prefix("data:") {
        Some(rest) => {
            let (meta, data) = rest.split_once(',')?;
            let media_type = meta.strip_suffix(";base64")?;
            CardImage {
                data_base64: data.to_string(),
                media_type: media_type.to_string(),
            }
        }
        None => CardImage::jpeg(input),
    };
    (!image.data_base64.is_empty()).then_some(image)
}

/// RecognizeCard Handler
pub struct RecognizeCardHandler {
    vision: Arc<dyn VisionModelPort>,
    variants: Vec<ModelVariant>,
}

impl RecognizeCardHandler {
    pub fn new(vision: Arc<dyn VisionModelPort>, variants: Vec<ModelVariant>) -> Self {
        Self { vision, variants }
    }

    pub async fn handle(
        &self,
        command: RecognizeCard,
    ) -> Result<RecognizeCardResponse, ApplicationError> {
        let image = parse_image(&command.image_base64)
            .ok_or_else(|| ApplicationError::validation("No image provided"))?;

        let outcome = recognize_with_fallback(self.vision.as_ref(), &self.variants, &image).await?;

        Ok(RecognizeCardResponse {
            label: outcome.recognition.label().to_string(),
            kind: outcome.recognition.kind(),
            model: outcome.model,
            attempts: outcome.attempts.len(),
        })
    }
}
