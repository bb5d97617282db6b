use std::path::Path;

use anyhow::{Context, Result};
use scripta_ocr::{EngineConfig, EngineMode, OcrPipeline, PageSegMode, TileGrid};

use crate::{Cli, Commands, EngineArgs};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Read {
            image,
            engine,
            json,
        } => read(&image, &engine, json),
        Commands::DetectScript {
            image,
            engine,
            tile_cols,
            tile_rows,
            json,
        } => detect_script(&image, &engine, tile_cols, tile_rows, json),
        Commands::Find {
            image,
            keyword,
            engine,
            json,
        } => find(&image, &keyword, &engine, json),
    }
}

fn read(image: &Path, engine: &EngineArgs, json: bool) -> Result<()> {
    let config = engine_config(engine)?;
    let pipeline = pipeline()?;

    tracing::info!("Reading text from {}", image.display());
    let text = pipeline
        .recognize_file(image, &config)
        .with_context(|| format!("could not read {}", image.display()))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "text": text }))?
        );
    } else {
        println!("{}", text.trim_end());
    }
    Ok(())
}

fn detect_script(
    image: &Path,
    engine: &EngineArgs,
    tile_cols: u32,
    tile_rows: u32,
    json: bool,
) -> Result<()> {
    let config = engine_config(engine)?;
    let pipeline = pipeline()?.with_tile_grid(TileGrid::new(tile_cols, tile_rows));

    tracing::info!("Detecting script in {}", image.display());
    let detection = pipeline
        .detect_script_file(image, &config)
        .with_context(|| format!("could not analyze {}", image.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&detection)?);
    } else {
        println!("{}", detection.osd_text.trim_end());
        println!();
        let via = if detection.tiled { " (after tiling)" } else { "" };
        println!("Detected script: {}{via}", detection.report.script);
    }
    Ok(())
}

fn find(image: &Path, keyword: &str, engine: &EngineArgs, json: bool) -> Result<()> {
    let config = engine_config(engine)?;
    let pipeline = pipeline()?;

    tracing::info!("Searching {} for \"{keyword}\"", image.display());
    let scan = pipeline
        .find_keyword_file(image, keyword, &config)
        .with_context(|| format!("could not search {}", image.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&scan)?);
    } else {
        println!("{}", scan.text.trim_end());
        println!();
        if scan.found {
            println!("Found \"{}\":", scan.keyword);
            for hit in &scan.hits {
                println!("  line {}: {}", hit.line_number, hit.line);
            }
        } else {
            println!("\"{}\" not found", scan.keyword);
        }
    }
    Ok(())
}

fn engine_config(args: &EngineArgs) -> Result<EngineConfig> {
    let engine_mode = EngineMode::from_code(args.oem)
        .with_context(|| format!("unknown engine mode {} (valid: 0-3)", args.oem))?;
    let page_seg_mode = PageSegMode::from_code(args.psm)
        .with_context(|| format!("unknown page segmentation mode {} (valid: 0-13)", args.psm))?;
    Ok(EngineConfig {
        language: args.lang.clone(),
        engine_mode,
        page_seg_mode,
        dpi: args.dpi,
    })
}

#[cfg(feature = "tesseract")]
fn pipeline() -> Result<OcrPipeline<scripta_ocr::recognizer::tesseract_backend::TesseractBackend>> {
    Ok(OcrPipeline::new(
        scripta_ocr::recognizer::tesseract_backend::TesseractBackend::new(),
    ))
}

#[cfg(not(feature = "tesseract"))]
fn pipeline() -> Result<OcrPipeline<scripta_ocr::MockBackend>> {
    Err(scripta_ocr::OcrError::NotAvailable.into())
}
