use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use crate::app::config::{self, VerbositySetting};
use crate::app::context::{CliOverrides, RunContext};
use crate::app::terminal;
use crate::cli::{Cli, Command};
use crate::{ProcessExit, commands};

pub(crate) async fn run_harvester() -> Result<ProcessExit> {
    // Parse before tracing so --help works without logs
    let cli = Cli::parse();

    let file_config = config::load_file_config(cli.config.as_deref())?;
    let file_verbosity = file_config.as_ref().and_then(|cfg| cfg.verbosity);

    let quiet = cli.quiet || file_verbosity == Some(VerbositySetting::Quiet);
    let default_level = terminal::resolve_log_level(
        cli.verbose,
        quiet,
        file_verbosity.map(VerbositySetting::level),
    );
    let force_cli_log_level = cli.verbose > 0 || cli.quiet;
    let dumb_terminal = terminal::is_dumb_terminal();
    let no_color = terminal::should_disable_color(
        cli.no_color,
        terminal::no_color_env_requested(),
        dumb_terminal,
    );
    terminal::init_tracing(default_level, force_cli_log_level, no_color);

    debug!(?cli, "CLI arguments parsed");
    info!("Harvester starting");

    let use_progress_bar =
        terminal::should_use_progress_bar(io::stdout().is_terminal(), quiet, dumb_terminal);

    match &cli.command {
        Command::Harvest(args) => {
            let ctx = RunContext::resolve(
                &CliOverrides::from_harvest(args),
                file_config.as_ref(),
                quiet,
                use_progress_bar,
            );
            commands::run_harvest_command(args, &ctx).await
        }
        Command::Download(args) => {
            let ctx = RunContext::resolve(
                &CliOverrides::from_download(args),
                file_config.as_ref(),
                quiet,
                use_progress_bar,
            );
            commands::run_download_command(args, &ctx).await
        }
        Command::Split(args) => commands::run_split_command(args),
    }
}
