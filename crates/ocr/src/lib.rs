//! Image text recognition, orientation/script detection, and keyword
//! scanning on top of an external Tesseract engine.
//!
//! The engine sits behind the [`OcrBackend`] trait; [`MockBackend`] serves
//! tests and engine-less builds, and the `tesseract` feature enables the
//! real backend in [`recognizer::tesseract_backend`]. [`OcrPipeline`] ties
//! loading, tiling, and report extraction together, including the one-shot
//! tiled retry for images with too little content for OSD.

pub mod config;
pub mod extract;
pub mod keyword;
pub mod pipeline;
pub mod recognizer;
pub mod source;
pub mod tile;

pub use config::{EngineConfig, EngineMode, PageSegMode};
pub use extract::{extract_script, ExtractError, OsdReport};
pub use keyword::{contains_keyword, keyword_hits, KeywordHit};
pub use pipeline::{KeywordScan, OcrPipeline, PipelineError, ScriptDetection};
pub use recognizer::{MockBackend, OcrBackend, OcrError};
pub use source::{decode_rgb, load_rgb, SourceError};
pub use tile::{hconcat, tile, vconcat, TileError, TileGrid};
