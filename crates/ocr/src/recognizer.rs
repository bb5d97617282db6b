use image::RgbImage;
use thiserror::Error;

use crate::config::EngineConfig;

#[derive(Debug, Error)]
pub enum OcrError {
    /// The engine could not find enough recognizable structure to work with.
    /// Tiling the image and retrying is the usual remedy (see the pipeline).
    #[error("Engine found too few characters: {0}")]
    TooFewCharacters(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available; build with the `tesseract` feature")]
    NotAvailable,
}

/// Abstraction over an external OCR engine.
///
/// Both operations take the decoded image and an explicit [`EngineConfig`];
/// no configuration state outlives a call. `detect_osd` returns the engine's
/// raw orientation/script report for the caller to parse.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image: &RgbImage, config: &EngineConfig) -> Result<String, OcrError>;

    fn detect_osd(&self, image: &RgbImage, config: &EngineConfig) -> Result<String, OcrError>;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Report shape produced by `tesseract <image> stdout --psm 0`.
pub const SAMPLE_OSD: &str = "Page number: 0\n\
Orientation in degrees: 0\n\
Rotate: 0\n\
Orientation confidence: 12.74\n\
Script: Latin\n\
Script confidence: 8.10\n";

/// Returns pre-set outputs, useful for exercising the pipeline without a
/// Tesseract install.
///
/// `detect_osd` fails with [`OcrError::TooFewCharacters`] when the image has
/// fewer pixels than the configured minimum, mirroring how the real engine
/// gives up on images with too little content.
pub struct MockBackend {
    text: String,
    osd: String,
    min_osd_pixels: u64,
}

impl MockBackend {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            osd: SAMPLE_OSD.to_string(),
            min_osd_pixels: 0,
        }
    }

    /// Replace the report `detect_osd` returns on success.
    pub fn with_osd(mut self, osd: impl Into<String>) -> Self {
        self.osd = osd.into();
        self
    }

    /// Fail `detect_osd` for images with fewer than `pixels` pixels.
    pub fn with_min_osd_pixels(mut self, pixels: u64) -> Self {
        self.min_osd_pixels = pixels;
        self
    }
}

impl OcrBackend for MockBackend {
    fn recognize(&self, _image: &RgbImage, _config: &EngineConfig) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }

    fn detect_osd(&self, image: &RgbImage, _config: &EngineConfig) -> Result<String, OcrError> {
        let (w, h) = image.dimensions();
        let pixels = u64::from(w) * u64::from(h);
        if pixels < self.min_osd_pixels {
            return Err(OcrError::TooFewCharacters(format!(
                "Too few characters. Skipping this page ({w}×{h} image)"
            )));
        }
        Ok(self.osd.clone())
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError};
    use crate::config::{EngineConfig, PageSegMode};
    use image::{DynamicImage, RgbImage};
    use rusty_tesseract::{Args, Image};
    use std::collections::HashMap;
    use tracing::debug;

    /// Drives the `tesseract` binary. Stateless: every flag comes from the
    /// per-call [`EngineConfig`].
    #[derive(Debug, Default, Clone, Copy)]
    pub struct TesseractBackend;

    impl TesseractBackend {
        pub fn new() -> Self {
            TesseractBackend
        }
    }

    fn to_args(config: &EngineConfig) -> Args {
        Args {
            lang: config.language.clone(),
            config_variables: HashMap::new(),
            dpi: config.dpi,
            psm: Some(config.page_seg_mode.code()),
            oem: Some(config.engine_mode.code()),
        }
    }

    fn to_image(image: &RgbImage) -> Result<Image, OcrError> {
        Image::from_dynamic_image(&DynamicImage::ImageRgb8(image.clone()))
            .map_err(|e| OcrError::Engine(e.to_string()))
    }

    /// The engine reports degenerate input through its error text; map that
    /// onto [`OcrError::TooFewCharacters`] so callers can react, and leave
    /// everything else as [`OcrError::Engine`].
    fn classify(e: impl std::fmt::Display) -> OcrError {
        let message = e.to_string();
        if message.contains("Too few characters") {
            OcrError::TooFewCharacters(message)
        } else {
            OcrError::Engine(message)
        }
    }

    impl OcrBackend for TesseractBackend {
        fn recognize(&self, image: &RgbImage, config: &EngineConfig) -> Result<String, OcrError> {
            debug!(lang = %config.language, psm = config.page_seg_mode.code(), "running recognition");
            let img = to_image(image)?;
            rusty_tesseract::image_to_string(&img, &to_args(config)).map_err(classify)
        }

        fn detect_osd(&self, image: &RgbImage, config: &EngineConfig) -> Result<String, OcrError> {
            debug!(lang = %config.language, "running orientation/script detection");
            let img = to_image(image)?;
            // PSM 0 runs orientation/script detection only; the report goes
            // to stdout.
            let args = Args {
                psm: Some(PageSegMode::OsdOnly.code()),
                ..to_args(config)
            };
            rusty_tesseract::image_to_string(&img, &args).map_err(classify)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn blank(width: u32, height: u32) -> RgbImage {
        RgbImage::new(width, height)
    }

    #[test]
    fn mock_returns_preset_text() {
        let backend = MockBackend::new("Tesseract is great");
        let text = backend
            .recognize(&blank(4, 4), &EngineConfig::default())
            .unwrap();
        assert_eq!(text, "Tesseract is great");
    }

    #[test]
    fn mock_ignores_image_content() {
        let backend = MockBackend::new("hello");
        let config = EngineConfig::default();
        assert_eq!(backend.recognize(&blank(1, 1), &config).unwrap(), "hello");
        assert_eq!(backend.recognize(&blank(64, 64), &config).unwrap(), "hello");
    }

    #[test]
    fn mock_osd_default_report_names_latin() {
        let backend = MockBackend::new("");
        let osd = backend
            .detect_osd(&blank(10, 10), &EngineConfig::default())
            .unwrap();
        assert!(osd.contains("Script: Latin"));
    }

    #[test]
    fn mock_osd_below_threshold_fails() {
        let backend = MockBackend::new("").with_min_osd_pixels(1000);
        let err = backend
            .detect_osd(&blank(10, 10), &EngineConfig::default())
            .unwrap_err();
        assert!(matches!(err, OcrError::TooFewCharacters(_)));
    }

    #[test]
    fn mock_osd_at_threshold_succeeds() {
        let backend = MockBackend::new("").with_min_osd_pixels(1000);
        // 40 × 25 = exactly 1000 pixels.
        assert!(backend
            .detect_osd(&blank(40, 25), &EngineConfig::default())
            .is_ok());
    }

    #[test]
    fn mock_osd_report_is_replaceable() {
        let backend = MockBackend::new("").with_osd("Script: Arabic\n");
        let osd = backend
            .detect_osd(&blank(10, 10), &EngineConfig::default())
            .unwrap();
        assert_eq!(osd, "Script: Arabic\n");
    }
}
