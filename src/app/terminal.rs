//! Terminal concerns: tracing setup, colour and progress-bar decisions, and
//! timestamped error lines.

use chrono::{DateTime, Local};

pub(crate) fn no_color_env_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}

pub(crate) fn is_dumb_terminal() -> bool {
    std::env::var("TERM")
        .map(|value| value.eq_ignore_ascii_case("dumb"))
        .unwrap_or(false)
}

pub(crate) fn should_disable_color(
    no_color_flag: bool,
    no_color_env: bool,
    dumb_terminal: bool,
) -> bool {
    no_color_flag || no_color_env || dumb_terminal
}

pub(crate) fn should_use_progress_bar(
    stdout_is_terminal: bool,
    quiet: bool,
    dumb_terminal: bool,
) -> bool {
    stdout_is_terminal && !quiet && !dumb_terminal
}

/// Log level from `-v`/`-q`, falling back to the config file's verbosity.
pub(crate) fn resolve_log_level(verbose: u8, quiet: bool, file_level: Option<&'static str>) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => file_level.unwrap_or("info"),
        1 => "debug",
        _ => "trace",
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins unless a CLI flag forced the level.
pub(crate) fn init_tracing(default_level: &str, force_cli_level: bool, no_color: bool) {
    let filter = if force_cli_level {
        tracing_subscriber::EnvFilter::new(default_level)
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level))
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_env_filter(filter)
        .try_init();
}

/// `[ERROR] [2024-02-03T10:11:12.345678] message`
pub(crate) fn format_error_line(message: &str, at: DateTime<Local>) -> String {
    format!("[ERROR] [{}] {message}", at.format("%Y-%m-%dT%H:%M:%S%.6f"))
}

/// Writes a timestamped error line to stderr.
pub(crate) fn log_error(message: &str) {
    eprintln!("{}", format_error_line(message, Local::now()));
}

/// Local timestamp for operator lines.
pub(crate) fn now_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
