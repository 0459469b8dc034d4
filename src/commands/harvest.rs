use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use harvester_core::rows::into_download_items;
use harvester_core::{
    ApiKey, CatalogClient, HarvestOutcome, PageStore, PaginatedHarvester, QueryTarget, harvest_batch,
};
use tracing::{info, warn};

use super::download::download_items;
use crate::ProcessExit;
use crate::app::context::RunContext;
use crate::app::exit_handler;
use crate::app::terminal::log_error;
use crate::cli::HarvestArgs;

pub(crate) async fn run_harvest_command(
    args: &HarvestArgs,
    ctx: &RunContext,
) -> Result<ProcessExit> {
    // Checked before any request is made
    let api_key = ApiKey::from_env()?;
    println!("[*] Using NARA_API_KEY={}", api_key.redacted());

    let targets = collect_targets(args)?;
    info!(targets = targets.len(), limit = ctx.page_limit, "Harvest starting");

    let client = CatalogClient::new(&ctx.catalog_config(api_key))
        .context("Cannot build the catalog HTTP client")?;
    let store = PageStore::new(&ctx.results_dir);
    let harvester = PaginatedHarvester::new(Arc::new(client), store, ctx.page_limit)?;

    let batch = harvest_batch(&harvester, &targets).await;
    for target in &batch.targets {
        println!("{}", target.summary_line());
        if let HarvestOutcome::Partial {
            failed_page,
            reason,
        } = &target.report.outcome
        {
            log_error(&format!(
                "{}: stopped at page {failed_page}: {reason}",
                target.report.target
            ));
        }
    }

    let mut exit = exit_handler::harvest_exit_outcome(&batch);
    if args.download {
        let items = into_download_items(batch.all_rows());
        let download_exit = download_items(items, "harvested rows", ctx).await?;
        exit = exit_handler::combine(exit, download_exit);
    }

    Ok(exit)
}

/// Parents each form their own target; `--naid` values form one combined target.
fn collect_targets(args: &HarvestArgs) -> Result<Vec<QueryTarget>> {
    let mut parents = args.parent_naids.clone();
    if let Some(path) = &args.targets_file {
        parents.extend(read_targets_file(path)?);
    }

    let mut targets = parents
        .iter()
        .map(QueryTarget::parent)
        .collect::<Result<Vec<_>, _>>()?;
    if !args.naids.is_empty() {
        targets.push(QueryTarget::ids(&args.naids)?);
    }

    if targets.is_empty() {
        bail!("No harvest targets given");
    }
    Ok(targets)
}

fn read_targets_file(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read targets file {}", path.display()))?;
    let ids = parse_target_lines(&text);
    if ids.is_empty() {
        warn!(path = %path.display(), "Targets file lists no identifiers");
    }
    Ok(ids)
}

fn parse_target_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect()
}
