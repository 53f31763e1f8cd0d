pub mod bridge;
pub mod filter;
pub mod tesseract;

use anyhow::Result;

use crate::config::{EngineKind, PipelineConfig};
use crate::core::model::{PageImage, TextObservation};

pub use bridge::BridgeEngine;
pub use tesseract::TesseractEngine;

/// Produces recognized fragments for one page image, in reading order.
///
/// An `Ok` with no observations means the page simply had no text.
pub trait RecognitionEngine {
    fn recognize(&self, page: &PageImage) -> Result<Vec<TextObservation>>;
}

pub fn engine_for(config: &PipelineConfig) -> Box<dyn RecognitionEngine> {
    match config.engine {
        EngineKind::Tesseract => Box::new(TesseractEngine::new().with_lang(config.lang.clone())),
        EngineKind::Bridge => {
            let mut bridge = BridgeEngine::new().with_lang(config.lang.clone());
            if let Some(script) = &config.bridge_script {
                bridge = bridge.with_script(script.clone());
            }
            Box::new(bridge)
        }
    }
}
