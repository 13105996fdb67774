//! # doc-archive CLI
//!
//! Command-line interface for archiving a documentation website.
//!
//! ## Subcommands
//!
//! - `fetch`: Save the documentation pages as standalone HTML plus an index
//! - `render`: Convert saved pages to plain text and a combined reference
//! - `archive`: Run `fetch` followed by `render`
//!
//! Logs go to stderr (filtered by `RUST_LOG`), reports to stdout as text or
//! JSON.

mod telemetry;

use clap::{Args, Parser, Subcommand};
use doc_archive::fetcher::{FetchProgress, FetchReport, FetcherConfig, PageOutcome, fetch_docs};
use doc_archive::renderer::{BatchReport, RendererConfig, convert_directory};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::instrument;

#[derive(Parser)]
#[command(author, version, about = "Archive a documentation website as HTML and plain text", long_about = None)]
struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch documentation pages and save them as HTML
    Fetch(FetchArgs),

    /// Convert saved HTML pages to plain text
    Render(RenderArgs),

    /// Fetch the documentation, then convert it to plain text
    Archive(ArchiveArgs),
}

#[derive(Args, Debug, Clone)]
struct FetchArgs {
    /// Documentation listing page
    #[arg(default_value = "https://konvajs.org/docs/")]
    url: String,

    /// Directory to save HTML pages into
    #[arg(short, long, default_value = "docs/html")]
    output: PathBuf,

    /// Name of the documented site
    #[arg(short, long, default_value = "KonvaJS")]
    site_name: String,

    /// Path fragment documentation links must contain
    #[arg(short, long, default_value = "/docs/")]
    link_filter: String,

    /// Delay between page requests in milliseconds
    #[arg(short, long, default_value = "1000")]
    delay: u64,

    /// Request timeout in seconds
    #[arg(short, long, default_value = "10")]
    timeout: u64,

    /// CSS selectors for the main content, tried in order (comma-separated)
    #[arg(short, long)]
    include: Option<String>,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

#[derive(Args, Debug, Clone)]
struct RenderArgs {
    /// Directory holding the saved HTML pages
    #[arg(short, long, default_value = "docs/html")]
    input: PathBuf,

    /// Directory to write text files into
    #[arg(short, long, default_value = "docs/text")]
    output: PathBuf,

    /// Name of the documented site
    #[arg(short, long, default_value = "KonvaJS")]
    site_name: String,

    /// Index file to skip
    #[arg(long, default_value = "index.html")]
    index_file: String,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

#[derive(Args, Debug)]
struct ArchiveArgs {
    #[command(flatten)]
    fetch: FetchArgs,

    /// Directory to write text files into
    #[arg(long, default_value = "docs/text")]
    text_output: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing_subscriber(cli.log_file.as_deref())?;

    match cli.command {
        Some(Commands::Fetch(args)) => {
            let format = args.format.clone();
            let report = fetch_command(args).await?;
            print_fetch_report(&report, &format)?;
        }
        Some(Commands::Render(args)) => {
            let format = args.format.clone();
            let report = render_command(args).await?;
            print_batch_report(&report, &format)?;
        }
        Some(Commands::Archive(args)) => {
            let format = args.fetch.format.clone();
            let fetch_report = fetch_command(args.fetch.clone()).await?;
            print_fetch_report(&fetch_report, &format)?;

            let render_args = RenderArgs {
                input: args.fetch.output,
                output: args.text_output,
                site_name: args.fetch.site_name,
                index_file: doc_archive::fetcher::INDEX_FILE.to_string(),
                format: format.clone(),
            };
            let batch_report = render_command(render_args).await?;
            print_batch_report(&batch_report, &format)?;
        }
        None => {
            // If no command is provided, show help
            let _ = Cli::parse_from(["doc-archive", "--help"]);
        }
    }

    Ok(())
}

#[instrument]
async fn fetch_command(args: FetchArgs) -> anyhow::Result<FetchReport> {
    let mut builder = FetcherConfig::builder()
        .base_url(args.url)
        .output_dir(args.output)
        .site_name(args.site_name)
        .link_filter(args.link_filter)
        .delay_ms(args.delay)
        .timeout_secs(args.timeout);
    if let Some(include) = args.include {
        builder = builder.content_selectors(include.split(',').map(|s| s.trim().to_string()).collect());
    }
    let config = builder.build();

    let (progress_sender, mut progress_receiver) = mpsc::channel::<FetchProgress>(100);

    let progress_handle = tokio::spawn(async move {
        let mut progress_bar: Option<ProgressBar> = None;
        while let Some(update) = progress_receiver.recv().await {
            let bar = progress_bar.get_or_insert_with(|| {
                let bar = ProgressBar::new(update.total as u64);
                if let Ok(style) = ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({eta}) {msg}")
                {
                    bar.set_style(style.progress_chars("##-"));
                }
                bar
            });
            bar.inc(1);
            let status = match &update.outcome {
                PageOutcome::Saved(_) => "saved",
                PageOutcome::Duplicate => "duplicate",
                PageOutcome::NoContent => "no content",
                PageOutcome::Failed(_) => "failed",
            };
            bar.set_message(format!("{} ({})", update.url, status));
        }
        if let Some(bar) = progress_bar {
            bar.finish_with_message("Fetch completed");
        }
    });

    let report = fetch_docs(&config, Some(progress_sender)).await?;

    // The sender was moved into fetch_docs, so the task ends once it returns
    let _ = progress_handle.await;

    Ok(report)
}

#[instrument]
async fn render_command(args: RenderArgs) -> anyhow::Result<BatchReport> {
    let config = RendererConfig::builder()
        .input_dir(args.input)
        .output_dir(args.output)
        .site_name(args.site_name)
        .index_file(args.index_file)
        .build();

    let report = tokio::task::spawn_blocking(move || convert_directory(&config)).await??;
    Ok(report)
}

fn print_fetch_report(report: &FetchReport, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(report)?),
        _ => {
            println!("Found {} documentation links", report.discovered);
            println!(
                "Saved {} pages ({} duplicates, {} without content, {} failed)",
                report.saved, report.duplicates, report.empty, report.failed
            );
            println!("Index: {}", report.index_path.display());
        }
    }
    Ok(())
}

fn print_batch_report(report: &BatchReport, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(report)?),
        _ => {
            println!("Converted {} of {} files", report.converted, report.attempted);
            for failure in &report.failures {
                println!("Failed: {} ({})", failure.path.display(), failure.reason);
            }
            if let Some(path) = &report.combined_path {
                println!("Combined documentation: {}", path.display());
            }
        }
    }
    Ok(())
}
