use anyhow::{Context, Result};
use harvester_core::rows::split_csv;

use crate::ProcessExit;
use crate::cli::SplitArgs;

pub(crate) fn run_split_command(args: &SplitArgs) -> Result<ProcessExit> {
    let report = split_csv(&args.input, usize::from(args.parts))
        .with_context(|| format!("Cannot split {}", args.input.display()))?;

    println!(
        "Total data rows found (excluding header): {}",
        report.total_rows
    );
    if report.parts.is_empty() {
        println!("No rows to split. Exiting.");
        return Ok(ProcessExit::Success);
    }

    for part in &report.parts {
        if part.rows == 0 {
            println!("Writing empty chunk to {}", part.path.display());
        } else {
            println!("Writing {} rows to {}", part.rows, part.path.display());
        }
    }
    println!("Done splitting CSV into {} parts.", report.parts.len());

    Ok(ProcessExit::Success)
}
