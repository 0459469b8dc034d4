//! CLI command handlers.

mod download;
mod harvest;
mod split;

pub(crate) use download::run_download_command;
pub(crate) use harvest::run_harvest_command;
pub(crate) use split::run_split_command;
