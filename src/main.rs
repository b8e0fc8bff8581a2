//! skyswoop - Bluesky video downloader playground for your terminal
//!
//! Paste a post URL, preview it, and "download" it. Metadata and file content
//! are simulated; download history is real and persisted.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use skyswoop::core::batch::{run_batch, BatchQueue};
use skyswoop::core::downloader::Downloader;
use skyswoop::core::metadata::MetadataGenerator;
use skyswoop::core::parser::validate_post_url;
use skyswoop::core::random::SeededRandom;
use skyswoop::error::SkyswoopError;
use skyswoop::storage::backend::FileStorage;
use skyswoop::storage::history::{DownloadHistory, EXPORT_FILE_NAME};
use skyswoop::storage::config;
use skyswoop::types::{AppState, DownloadRecord, VideoFormat, VideoInfo, VideoQuality};
use skyswoop::ui::progress::with_spinner;
use skyswoop::ui::selector;
use skyswoop::utils::paths::{ensure_app_dirs, get_data_dir};

/// Download videos from Bluesky in various formats and qualities.
#[derive(Parser, Debug)]
#[command(name = "skyswoop")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Bluesky post URL(s), e.g. https://bsky.app/profile/user.bsky.social/post/3knomg4x3vm2r
    urls: Vec<String>,

    /// Container format (defaults to config)
    #[arg(short, long, value_enum)]
    format: Option<VideoFormat>,

    /// Video quality (defaults to config)
    #[arg(short, long, value_enum)]
    quality: Option<VideoQuality>,

    /// Output directory (defaults to config download_dir)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only show the preview, don't download
    #[arg(long)]
    info: bool,

    /// Process several URLs; reads stdin when none are given
    #[arg(short, long)]
    batch: bool,

    /// Show download history
    #[arg(long)]
    history: bool,

    /// Export download history as CSV
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = EXPORT_FILE_NAME)]
    export: Option<PathBuf>,

    /// Clear download history
    #[arg(long)]
    clear_history: bool,

    /// Pick format and quality interactively
    #[arg(short, long)]
    choose: bool,

    /// Edit the configuration file
    #[arg(short, long)]
    edit: bool,

    /// Log simulated steps to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Determine initial state from CLI options
fn determine_initial_state(cli: &Cli) -> AppState {
    if cli.clear_history {
        return AppState::Clear;
    }
    if cli.export.is_some() {
        return AppState::Export;
    }
    if cli.history {
        return AppState::History;
    }
    if cli.batch || cli.urls.len() > 1 {
        return AppState::Batch;
    }
    if !cli.urls.is_empty() {
        return AppState::Process;
    }
    AppState::Init
}

fn init_logging(verbose: bool) {
    let default = if verbose { "skyswoop=debug" } else { "skyswoop=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_error(e: &SkyswoopError) {
    eprintln!("{} {}", "Error:".red(), e);
}

fn print_preview(video: &VideoInfo, format: VideoFormat, quality: VideoQuality) {
    println!("{} {}", "✓".green(), "Video processed successfully".bold());
    println!("  {}", video.title.bold());
    if let Some(ref author) = video.author {
        println!("  {} {}", "Author:".dimmed(), author.cyan());
    }
    if let Some(ref duration) = video.duration {
        println!("  {} {}", "Duration:".dimmed(), duration);
    }
    println!("  {} {}", "Thumbnail:".dimmed(), video.thumbnail_url);
    println!(
        "  {} {} ({})",
        "Format:".dimmed(),
        format.as_str().to_uppercase(),
        format.mime_type()
    );
    println!("  {} {}", "Quality:".dimmed(), quality);
    println!("  {} {}", "Estimated size:".dimmed(), quality.estimated_size());
}

fn format_record(record: &DownloadRecord) -> String {
    let date = chrono::DateTime::parse_from_rfc3339(&record.date)
        .map(|d| d.with_timezone(&chrono::Local).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| record.date.clone());

    format!(
        "{} {} {} {}",
        record.title,
        format!("[{}]", record.format.as_str().to_uppercase()).dimmed(),
        record.quality.to_string().cyan(),
        date.dimmed()
    )
}

/// URLs from the command line go through the queue one by one; stdin is bulk text
async fn read_batch_queue(cli: &Cli) -> anyhow::Result<BatchQueue> {
    if !cli.urls.is_empty() {
        return Ok(BatchQueue::from_urls(cli.urls.iter().cloned())?);
    }
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read URLs from stdin")?;
    Ok(BatchQueue::from_text(&text))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Ensure app directories exist; history and config still fail soft without them
    if let Err(e) = ensure_app_dirs().await {
        print_error(&e);
    }

    let cfg = config::load_config_or_default().await;

    // Handle --edit flag
    if cli.edit {
        if let Err(e) = config::edit_config(&cfg.editor).await {
            print_error(&e);
        }
        return Ok(());
    }

    let mut history = DownloadHistory::new(FileStorage::new(get_data_dir()), cfg.max_history_entries);
    history.load().await;

    let mut generator = MetadataGenerator::new(
        SeededRandom::from_entropy(),
        Duration::from_millis(cfg.processing_delay_ms),
    );
    let output_dir = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&cfg.download_dir));
    let downloader = Downloader::new(output_dir, Duration::from_millis(cfg.download_delay_ms));

    let mut format = cli.format.unwrap_or(cfg.default_format);
    let mut quality = cli.quality.unwrap_or(cfg.default_quality);

    // State machine
    let mut state = determine_initial_state(&cli);
    let mut url = cli.urls.first().cloned().unwrap_or_default();
    let mut video: Option<VideoInfo> = None;

    while state != AppState::Exit {
        match state {
            AppState::Init => {
                state = match selector::prompt_url() {
                    Ok(input) => {
                        url = input;
                        AppState::Process
                    }
                    Err(e) => {
                        print_error(&e);
                        AppState::Exit
                    }
                };
            }

            AppState::Process => {
                if let Err(e) = validate_post_url(&url) {
                    print_error(&SkyswoopError::from(e));
                    state = AppState::Exit;
                    continue;
                }

                let info = with_spinner("Processing video...", generator.fetch_video_info(&url)).await;
                print_preview(&info, format, quality);
                video = Some(info);

                state = if cli.info {
                    AppState::Exit
                } else {
                    AppState::Download
                };
            }

            AppState::Download => {
                let Some(ref info) = video else {
                    state = AppState::Exit;
                    continue;
                };

                if cli.choose {
                    match selector::choose_format(format)
                        .and_then(|f| selector::choose_quality(quality).map(|q| (f, q)))
                    {
                        Ok((f, q)) => {
                            format = f;
                            quality = q;
                        }
                        Err(e) => {
                            print_error(&e);
                            state = AppState::Exit;
                            continue;
                        }
                    }
                }

                let result = with_spinner(
                    "Downloading...",
                    downloader.download(info, format, quality, &mut history),
                )
                .await;

                match result {
                    Ok(outcome) => {
                        println!(
                            "{} Download complete: {} ({:.2} MB, {} {})",
                            "✓".green(),
                            outcome.path.display(),
                            outcome.bytes_written as f64 / (1024.0 * 1024.0),
                            format.as_str().to_uppercase(),
                            quality
                        );
                    }
                    Err(e) => print_error(&e),
                }

                state = AppState::Exit;
            }

            AppState::Batch => {
                let queue = match read_batch_queue(&cli).await {
                    Ok(queue) => queue,
                    Err(e) => {
                        eprintln!("{} {:#}", "Error:".red(), e);
                        state = AppState::Exit;
                        continue;
                    }
                };

                let urls = match queue.eligible() {
                    Ok(urls) => urls,
                    Err(e) => {
                        print_error(&e);
                        state = AppState::Exit;
                        continue;
                    }
                };

                println!("{}", format!("Processing {} URLs", urls.len()).dimmed());
                let items = with_spinner(
                    "Processing batch...",
                    run_batch(&urls, &mut generator, &downloader, format, quality, &mut history),
                )
                .await;

                for item in items {
                    match item.result {
                        Ok(outcome) => println!(
                            "{} {} → {}",
                            "✓".green(),
                            item.url,
                            outcome.path.display()
                        ),
                        Err(e) => println!("{} {} ({})", "✗".red(), item.url, e),
                    }
                }

                state = AppState::Exit;
            }

            AppState::History => {
                if history.is_empty() {
                    println!("{}", "No download history yet.".yellow());
                } else {
                    for record in history.entries() {
                        println!("{}", format_record(record));
                    }
                }
                state = AppState::Exit;
            }

            AppState::Export => {
                let path = cli
                    .export
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));

                match history.export_csv_to(&path).await {
                    Ok(()) => println!(
                        "{} Exported {} records to {}",
                        "✓".green(),
                        history.len(),
                        path.display()
                    ),
                    Err(SkyswoopError::NothingToExport) => {
                        println!("{}", "No history to export. Your download history is empty.".yellow())
                    }
                    Err(e) => print_error(&e),
                }
                state = AppState::Exit;
            }

            AppState::Clear => {
                match history.clear().await {
                    Ok(()) => println!("{}", "History cleared".green()),
                    Err(e) => print_error(&e),
                }
                state = AppState::Exit;
            }

            AppState::Exit => break,
        }
    }

    Ok(())
}
