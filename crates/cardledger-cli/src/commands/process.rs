//! Process command - extract data from a single statement dump.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use crate::output::{format_result, write_summary, OutputFormat, SummaryRow};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (.txt with form-feed page breaks, or .json pages of lines)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// The text was recovered by OCR
    #[arg(long)]
    ocr: bool,

    /// Keep the classified lines in JSON output
    #[arg(long)]
    audit: bool,

    /// Also write a one-row summary CSV
    #[arg(long)]
    summary_csv: Option<PathBuf>,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let pipeline = super::build_pipeline(config_path, args.ocr)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let mut result = super::extract_file(&args.input, &pipeline)?;
    let processing_time_ms = start.elapsed().as_millis() as u64;

    if let Some(summary_path) = &args.summary_csv {
        let filename = args
            .input
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        write_summary(
            summary_path,
            &[SummaryRow {
                filename,
                result: Some(&result),
                error: None,
                processing_time_ms,
            }],
        )?;
    }

    if !args.audit {
        result.lines.clear();
    }

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if result.is_fatal() {
        eprintln!(
            "{} No recognizable lines in {}",
            style("!").red(),
            args.input.display()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
