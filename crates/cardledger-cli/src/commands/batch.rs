//! Batch processing command for multiple statement files.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use cardledger_core::ParseResult;

use crate::output::{format_result, write_summary, OutputFormat, SummaryRow};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Per-document timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// The text was recovered by OCR
    #[arg(long)]
    ocr: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Run `job` on the blocking pool once a permit is free, giving up after
/// `timeout`.
///
/// The permit moves into the blocking worker, so a job that outlives its
/// timeout keeps its slot until it actually returns and the number of
/// running jobs never exceeds the semaphore's size. A timed-out job
/// publishes nothing.
async fn run_bounded<T, F>(
    semaphore: Arc<Semaphore>,
    timeout: Duration,
    job: F,
) -> Result<T, String>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let permit = semaphore.acquire_owned().await.map_err(|e| e.to_string())?;
    let worker = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        job()
    });

    match tokio::time::timeout(timeout, worker).await {
        Ok(Ok(Ok(value))) => Ok(value),
        Ok(Ok(Err(e))) => Err(e.to_string()),
        Ok(Err(e)) => Err(format!("worker failed: {}", e)),
        Err(_) => Err(format!("timed out after {}s", timeout.as_secs())),
    }
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    result: Option<ParseResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    if args.jobs == 0 {
        anyhow::bail!("--jobs must be at least 1");
    }

    let pipeline = Arc::new(super::build_pipeline(config_path, args.ocr)?);

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| super::is_supported(p))
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let semaphore = Arc::new(Semaphore::new(args.jobs));
    let timeout = Duration::from_secs(args.timeout_secs);
    let mut tasks = JoinSet::new();

    for (index, path) in files.iter().cloned().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let pipeline = Arc::clone(&pipeline);

        tasks.spawn(async move {
            let file_start = Instant::now();
            let worker_path = path.clone();
            let outcome = run_bounded(semaphore, timeout, move || {
                super::extract_file(&worker_path, &pipeline)
            })
            .await;

            let processing_time_ms = file_start.elapsed().as_millis() as u64;
            (index, path, outcome, processing_time_ms)
        });
    }

    let mut slots: Vec<Option<ProcessResult>> = (0..files.len()).map(|_| None).collect();

    while let Some(joined) = tasks.join_next().await {
        let (index, path, outcome, processing_time_ms) = joined?;
        overall_pb.inc(1);

        match outcome {
            Ok(result) => {
                debug!("Processed {} in {}ms", path.display(), processing_time_ms);
                slots[index] = Some(ProcessResult {
                    path,
                    result: Some(result),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(error_msg) => {
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    slots[index] = Some(ProcessResult {
                        path,
                        result: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    tasks.abort_all();
                    overall_pb.abandon();
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }
    }

    overall_pb.finish_with_message("Complete");

    // results stay in input order regardless of completion order
    let results: Vec<ProcessResult> = slots.into_iter().flatten().collect();

    let successful: Vec<_> = results.iter().filter(|r| r.result.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for item in &successful {
            if let Some(result) = &item.result {
                let output_name = item
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("statement");

                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                let mut published = result.clone();
                published.lines.clear();
                fs::write(&output_path, format_result(&published, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        let rows: Vec<SummaryRow<'_>> = results
            .iter()
            .map(|r| SummaryRow {
                filename: r.path.file_name().and_then(|s| s.to_str()).unwrap_or(""),
                result: r.result.as_ref(),
                error: r.error.as_deref(),
                processing_time_ms: r.processing_time_ms,
            })
            .collect();

        write_summary(&summary_path, &rows)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for item in &failed {
            println!(
                "  - {}: {}",
                item.path.display(),
                item.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardledger_core::StatementPipeline;

    #[tokio::test]
    async fn test_timed_out_job_keeps_its_permit() {
        let semaphore = Arc::new(Semaphore::new(1));

        let outcome = run_bounded(Arc::clone(&semaphore), Duration::from_millis(20), || {
            std::thread::sleep(Duration::from_millis(300));
            Ok(())
        })
        .await;

        let error = outcome.unwrap_err();
        assert!(error.contains("timed out"), "{error}");
        assert_eq!(semaphore.available_permits(), 0);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(semaphore.available_permits(), 1);
    }

    #[tokio::test]
    async fn test_bounded_job_returns_value_and_permit() {
        let semaphore = Arc::new(Semaphore::new(2));

        let outcome = run_bounded(Arc::clone(&semaphore), Duration::from_secs(5), || Ok(42)).await;

        assert_eq!(outcome, Ok(42));
        assert_eq!(semaphore.available_permits(), 2);
    }

    #[tokio::test]
    async fn test_bounded_job_error_is_reported() {
        let semaphore = Arc::new(Semaphore::new(1));

        let outcome: Result<(), String> = run_bounded(semaphore, Duration::from_secs(5), || {
            anyhow::bail!("Unsupported file format: pdf")
        })
        .await;

        assert_eq!(outcome, Err("Unsupported file format: pdf".to_string()));
    }

    #[test]
    fn test_pipeline_is_shareable_across_workers() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StatementPipeline>();
    }
}
