use std::path::Path;

use image::RgbImage;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::extract::{ExtractError, OsdReport};
use crate::keyword::{self, KeywordHit};
use crate::recognizer::{OcrBackend, OcrError};
use crate::source::{self, SourceError};
use crate::tile::{self, TileError, TileGrid};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to load image: {0}")]
    Source(#[from] SourceError),
    #[error("Tiling failed: {0}")]
    Tile(#[from] TileError),
    #[error("OCR failed: {0}")]
    Ocr(#[from] OcrError),
    #[error("Could not read OSD report: {0}")]
    Extract(#[from] ExtractError),
}

/// The result of a single script-detection run.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptDetection {
    /// Raw engine report, kept verbatim for display and diagnosis.
    pub osd_text: String,
    /// Fields parsed out of the report.
    pub report: OsdReport,
    /// Whether the result came from the tiled retry.
    pub tiled: bool,
}

/// The result of a single keyword scan.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordScan {
    pub keyword: String,
    pub found: bool,
    pub hits: Vec<KeywordHit>,
    /// Full recognized text the scan ran over.
    pub text: String,
}

/// Orchestrates: load → (tile) → engine → extract.
///
/// The tile grid is the policy knob for the small-image retry in
/// [`detect_script`](OcrPipeline::detect_script); it defaults to
/// [`TileGrid::default`] and is overridable per pipeline.
pub struct OcrPipeline<B: OcrBackend> {
    backend: B,
    tile_grid: TileGrid,
}

impl<B: OcrBackend> OcrPipeline<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            tile_grid: TileGrid::default(),
        }
    }

    /// Override the grid used when retrying script detection on a tiled
    /// composite.
    pub fn with_tile_grid(mut self, grid: TileGrid) -> Self {
        self.tile_grid = grid;
        self
    }

    // ── Text recognition ──────────────────────────────────────────────────────

    pub fn recognize_file(
        &self,
        path: &Path,
        config: &EngineConfig,
    ) -> Result<String, PipelineError> {
        let image = source::load_rgb(path)?;
        debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "recognizing text"
        );
        self.recognize(&image, config)
    }

    pub fn recognize(
        &self,
        image: &RgbImage,
        config: &EngineConfig,
    ) -> Result<String, PipelineError> {
        Ok(self.backend.recognize(image, config)?)
    }

    // ── Script detection ──────────────────────────────────────────────────────

    pub fn detect_script_file(
        &self,
        path: &Path,
        config: &EngineConfig,
    ) -> Result<ScriptDetection, PipelineError> {
        let image = source::load_rgb(path)?;
        debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "detecting script"
        );
        self.detect_script(&image, config)
    }

    /// Run orientation/script detection on the image as-is; if the engine
    /// reports too little content, tile the image once and retry. A second
    /// failure after tiling is surfaced, as is any other engine fault.
    pub fn detect_script(
        &self,
        image: &RgbImage,
        config: &EngineConfig,
    ) -> Result<ScriptDetection, PipelineError> {
        match self.backend.detect_osd(image, config) {
            Ok(osd_text) => finish_detection(osd_text, false),
            Err(OcrError::TooFewCharacters(reason)) => {
                info!(
                    %reason,
                    horizontal = self.tile_grid.horizontal,
                    vertical = self.tile_grid.vertical,
                    "image has too little content for OSD; retrying tiled"
                );
                let composite = tile::tile(image, self.tile_grid)?;
                let osd_text = self.backend.detect_osd(&composite, config)?;
                finish_detection(osd_text, true)
            }
            Err(other) => Err(other.into()),
        }
    }

    // ── Keyword scan ──────────────────────────────────────────────────────────

    pub fn find_keyword_file(
        &self,
        path: &Path,
        keyword: &str,
        config: &EngineConfig,
    ) -> Result<KeywordScan, PipelineError> {
        let image = source::load_rgb(path)?;
        self.find_keyword(&image, keyword, config)
    }

    pub fn find_keyword(
        &self,
        image: &RgbImage,
        keyword: &str,
        config: &EngineConfig,
    ) -> Result<KeywordScan, PipelineError> {
        let text = self.backend.recognize(image, config)?;
        let found = keyword::contains_keyword(&text, keyword);
        let hits = keyword::keyword_hits(&text, keyword);
        debug!(keyword, found, hits = hits.len(), "keyword scan finished");
        Ok(KeywordScan {
            keyword: keyword.to_string(),
            found,
            hits,
            text,
        })
    }
}

fn finish_detection(osd_text: String, tiled: bool) -> Result<ScriptDetection, PipelineError> {
    let report = OsdReport::parse(&osd_text)?;
    debug!(script = %report.script, tiled, "script detected");
    Ok(ScriptDetection {
        osd_text,
        report,
        tiled,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
