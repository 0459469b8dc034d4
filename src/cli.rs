//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

/// Harvest archival catalog metadata and bulk-download the referenced assets.
///
/// `harvest` walks every page of a catalog query and writes page snapshots plus
/// a `naId,title,objectUrl,objectFileSize` row file. `download` fetches every
/// row of such a file into a fresh `{YYYYMMDD}-{N}` directory. `split` breaks a
/// row file into parts for separate runs.
#[derive(Parser, Debug)]
#[command(name = "harvester")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file (default: $XDG_CONFIG_HOME/catalog-harvester/config.toml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch every page of one or more catalog queries and write their rows
    Harvest(HarvestArgs),
    /// Download every asset listed in a row file
    Download(DownloadArgs),
    /// Split a CSV file into parts of roughly equal size
    Split(SplitArgs),
}

/// Arguments for `harvest`.
#[derive(Args, Debug, Clone)]
#[command(group(
    ArgGroup::new("targets")
        .required(true)
        .multiple(true)
        .args(["parent_naids", "naids", "targets_file"])
))]
pub struct HarvestArgs {
    /// Parent identifier to harvest; repeat for a batch of independent harvests
    #[arg(long = "parent-naid", value_name = "ID")]
    pub parent_naids: Vec<String>,

    /// Record identifier to look up; repeated values form one query
    #[arg(long = "naid", value_name = "ID")]
    pub naids: Vec<String>,

    /// File of parent identifiers, one per line (# comments allowed)
    #[arg(long, value_name = "PATH")]
    pub targets_file: Option<PathBuf>,

    /// Records per page (1-10000)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=10_000))]
    pub limit: Option<u32>,

    /// Directory for page snapshots and row files
    #[arg(long, value_name = "DIR")]
    pub outdir: Option<PathBuf>,

    /// Catalog API base URL
    #[arg(long, value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Download the harvested assets right away
    #[arg(long)]
    pub download: bool,

    /// Base directory for download runs (with --download)
    #[arg(long, value_name = "DIR", requires = "download")]
    pub download_path: Option<PathBuf>,

    /// Pause between downloads in milliseconds (with --download, max 60000)
    #[arg(long, requires = "download", value_parser = clap::value_parser!(u64).range(0..=60_000))]
    pub delay_ms: Option<u64>,
}

/// Arguments for `download`.
#[derive(Args, Debug, Clone)]
pub struct DownloadArgs {
    /// Row file with columns naId,title,objectUrl,objectFileSize
    #[arg(long, value_name = "PATH")]
    pub csv: PathBuf,

    /// Base directory; each run gets a fresh {YYYYMMDD}-{N} subdirectory
    #[arg(long, value_name = "DIR")]
    pub download_path: Option<PathBuf>,

    /// Pause between downloads in milliseconds (0 to disable, max 60000)
    #[arg(long, value_parser = clap::value_parser!(u64).range(0..=60_000))]
    pub delay_ms: Option<u64>,

    /// Report what would be downloaded without touching disk or network
    #[arg(long, visible_alias = "test")]
    pub dry_run: bool,
}

/// Arguments for `split`.
#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    /// CSV file to split (header row required)
    #[arg(long, value_name = "PATH")]
    pub input: PathBuf,

    /// Number of parts to write
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u16).range(1..))]
    pub parts: u16,
}
