//! Subcommand implementations.

pub mod banks;
pub mod batch;
pub mod categorize;
pub mod config;
pub mod process;

use std::fs;
use std::path::Path;

use cardledger_core::{EngineConfig, ParseResult, StatementPipeline, TextSource};

/// Load the configuration from an explicit path, or fall back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<EngineConfig> {
    match config_path {
        Some(path) => Ok(EngineConfig::from_file(Path::new(path))?),
        None => Ok(EngineConfig::default()),
    }
}

/// Build a pipeline from the configured engine settings.
pub fn build_pipeline(config_path: Option<&str>, ocr: bool) -> anyhow::Result<StatementPipeline> {
    let config = load_config(config_path)?;
    let source = if ocr { TextSource::Ocr } else { TextSource::Digital };
    Ok(StatementPipeline::from_config(config)?.with_source(source))
}

/// Read one statement dump and run it through the pipeline.
///
/// `.txt` files hold pages separated by form feeds; `.json` files hold an
/// array of pages, each an array of lines.
pub fn extract_file(path: &Path, pipeline: &StatementPipeline) -> anyhow::Result<ParseResult> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "txt" => {
            let text = fs::read_to_string(path)?;
            Ok(pipeline.process_text(&text))
        }
        "json" => {
            let content = fs::read_to_string(path)?;
            let pages: Vec<Vec<String>> = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Expected an array of pages of lines: {}", e))?;
            Ok(pipeline.process(&pages))
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

/// Whether a path has an extension `extract_file` understands.
pub fn is_supported(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    matches!(ext.to_lowercase().as_str(), "txt" | "json")
}
