use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::Command;

use crate::core::geometry::{BBox, Quad};
use crate::core::model::{PageImage, TextObservation};
use crate::ocr::RecognitionEngine;

/// One fragment as printed by a bridge helper. Either a full quad or a
/// normalized `[x0, y0, x1, y1]` box must be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeToken {
    pub text: String,
    #[serde(default)]
    pub quad: Option<Quad>,
    #[serde(default)]
    pub bbox: Option<[f64; 4]>,
}

impl BridgeToken {
    fn into_observation(self) -> Option<TextObservation> {
        let quad = self
            .quad
            .or_else(|| self.bbox.map(|[x0, y0, x1, y1]| BBox::new(x0, y0, x1, y1).to_quad()))?;
        Some(TextObservation::new(self.text, quad))
    }
}

/// Delegates recognition to an external helper script that prints JSON.
#[derive(Debug, Clone)]
pub struct BridgeEngine {
    interpreter: String,
    script_path: PathBuf,
    lang: String,
}

impl Default for BridgeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BridgeEngine {
    pub fn new() -> Self {
        Self {
            interpreter: "python3".to_string(),
            script_path: PathBuf::from("ocr/bridge/ocr_bridge.py"),
            lang: "eng".to_string(),
        }
    }

    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    pub fn with_script(mut self, script_path: PathBuf) -> Self {
        self.script_path = script_path;
        self
    }

    pub fn with_lang(mut self, lang: String) -> Self {
        self.lang = lang;
        self
    }
}

impl RecognitionEngine for BridgeEngine {
    fn recognize(&self, page: &PageImage) -> Result<Vec<TextObservation>> {
        let output = Command::new(&self.interpreter)
            .arg(&self.script_path)
            .arg("--image")
            .arg(&page.path)
            .arg("--lang")
            .arg(&self.lang)
            .output()
            .with_context(|| format!("failed to invoke OCR bridge via {}", self.interpreter))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("OCR bridge failed: {}", stderr.trim());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_tokens(&stdout)
    }
}

/// Tokens without any geometry are dropped here rather than failing the page.
pub fn parse_tokens(json: &str) -> Result<Vec<TextObservation>> {
    let tokens: Vec<BridgeToken> =
        serde_json::from_str(json).with_context(|| "failed to parse OCR JSON response")?;
    Ok(tokens
        .into_iter()
        .filter_map(BridgeToken::into_observation)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quads_and_boxes() {
        let json = r#"[
            {"text": "Heading", "quad": {
                "top_left": [0.1, 0.1], "top_right": [0.9, 0.1],
                "bottom_left": [0.1, 0.15], "bottom_right": [0.9, 0.15]}},
            {"text": "Item", "bbox": [0.2, 0.2, 0.5, 0.25]},
            {"text": "Floating"}
        ]"#;

        let obs = parse_tokens(json).unwrap();
        assert_eq!(obs.len(), 2);
        assert_eq!((obs[0].start(), obs[0].end()), (1, 9));
        assert_eq!(obs[1].text, "Item");
        assert_eq!((obs[1].start(), obs[1].end()), (2, 5));
    }

    #[test]
    fn empty_array_is_no_text() {
        assert!(parse_tokens("[]").unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = parse_tokens("Traceback (most recent call last)").unwrap_err();
        assert!(err.to_string().contains("OCR JSON"));
    }

    #[test]
    fn failing_helper_is_an_engine_error() {
        let engine = BridgeEngine::new().with_interpreter("pagetext-missing-python");
        let page = PageImage {
            path: "page.png".into(),
            page_idx: 0,
            width: 10,
            height: 10,
        };
        assert!(engine.recognize(&page).is_err());
    }
}
