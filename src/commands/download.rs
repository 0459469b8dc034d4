use anyhow::{Context, Result};
use harvester_core::download::destination_filename;
use harvester_core::rows::{into_download_items, read_rows};
use harvester_core::{DownloadEngine, DownloadItem, OutputDirectoryAllocator, format_size};
use tracing::info;

use crate::ProcessExit;
use crate::app::context::RunContext;
use crate::app::exit_handler;
use crate::app::progress::TerminalObserver;
use crate::app::terminal::now_stamp;
use crate::cli::DownloadArgs;

const CSV_SOURCE: &str = "CSV";

pub(crate) async fn run_download_command(
    args: &DownloadArgs,
    ctx: &RunContext,
) -> Result<ProcessExit> {
    let rows = read_rows(&args.csv)
        .with_context(|| format!("Cannot read rows from {}", args.csv.display()))?;
    let items = into_download_items(rows);

    if args.dry_run {
        print_inventory(&items, CSV_SOURCE);
        if !items.is_empty() {
            print_dry_run(&items);
        }
        return Ok(ProcessExit::Success);
    }

    download_items(items, CSV_SOURCE, ctx).await
}

/// Runs the engine over `items` with terminal progress and prints the summary.
/// `source` names where the items came from in the inventory line.
pub(crate) async fn download_items(
    items: Vec<DownloadItem>,
    source: &str,
    ctx: &RunContext,
) -> Result<ProcessExit> {
    print_inventory(&items, source);
    if items.is_empty() {
        return Ok(ProcessExit::Success);
    }

    let client = ctx
        .http_client()
        .context("Cannot build the download HTTP client")?;
    let engine = DownloadEngine::new(client, ctx.engine_options());
    let allocator = OutputDirectoryAllocator::new(&ctx.download_dir);
    let mut observer = TerminalObserver::new(ctx.use_progress_bar, ctx.quiet);

    println!("Starting download at {}", now_stamp());
    let summary = engine.run(items, &allocator, &mut observer).await?;
    println!("Finished at {}", now_stamp());
    print!("{}", summary.render());

    info!(
        succeeded = summary.succeeded,
        failed = summary.failed(),
        skipped = summary.skipped,
        "Download run complete"
    );

    Ok(exit_handler::download_exit_outcome(&summary))
}

fn print_inventory(items: &[DownloadItem], source: &str) {
    for line in inventory_lines(items, source) {
        println!("{line}");
    }
}

fn inventory_lines(items: &[DownloadItem], source: &str) -> Vec<String> {
    let declared: u64 = items.iter().map(|item| item.declared_size).sum();
    let mut lines = vec![
        format!("Found {} total binaries in {source}.", items.len()),
        format!("Sum of file sizes: {}", format_size(declared)),
    ];
    if items.is_empty() {
        lines.push("No items to process. Exiting.".to_string());
    }
    lines
}

fn print_dry_run(items: &[DownloadItem]) {
    println!("[TEST MODE] No downloads will be performed.");
    for line in dry_run_lines(items) {
        println!("{line}");
    }
}

fn dry_run_lines(items: &[DownloadItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| {
            if item.has_url() {
                format!("  {}. {}", item.ordinal, destination_filename(item))
            } else {
                format!("  {}. (no objectUrl, would skip)", item.ordinal)
            }
        })
        .collect()
}
