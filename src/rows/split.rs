//! Splitting one row file into N files of roughly equal size.

use std::fs::File;
use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::info;

use super::RowsError;

/// One written part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPart {
    /// File that was written.
    pub path: PathBuf,
    /// Data rows in it (header excluded).
    pub rows: usize,
}

/// Result of a split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    /// Data rows in the input.
    pub total_rows: usize,
    /// Parts written, in order. Empty when the input had no data rows.
    pub parts: Vec<SplitPart>,
}

/// Row ranges for splitting `len` rows into `parts` parts.
///
/// Each part gets `ceil(len / parts)` rows except the last, which gets
/// whatever remains; trailing parts may be empty.
#[must_use]
pub fn partition(len: usize, parts: usize) -> Vec<Range<usize>> {
    if parts == 0 {
        return Vec::new();
    }
    let chunk = len.div_ceil(parts);
    (0..parts)
        .map(|index| {
            let start = (index * chunk).min(len);
            let end = if index + 1 == parts {
                len
            } else {
                (start + chunk).min(len)
            };
            start..end
        })
        .collect()
}

/// Path of part `index` (1-based): `{stem}_part{index}.csv` beside `input`.
#[must_use]
pub fn part_path(input: &Path, index: usize) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "rows".into(), |s| s.to_string_lossy());
    input.with_file_name(format!("{stem}_part{index}.csv"))
}

/// Splits `input` into `parts` files, each with the input's header.
///
/// Any header is accepted and copied verbatim. Nothing is written when the
/// input has no data rows.
///
/// # Errors
///
/// Returns [`RowsError::InvalidParts`] for `parts == 0`, and other
/// [`RowsError`] variants when reading the input or writing a part fails.
pub fn split_csv(input: &Path, parts: usize) -> Result<SplitReport, RowsError> {
    if parts == 0 {
        return Err(RowsError::InvalidParts { parts });
    }

    let file = File::open(input).map_err(|e| RowsError::io(input, e))?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let header = reader.headers().map_err(|e| RowsError::read(input, e))?.clone();
    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| RowsError::read(input, e))?;

    let total_rows = records.len();
    info!(input = %input.display(), total_rows, "read rows to split");
    if total_rows == 0 {
        return Ok(SplitReport {
            total_rows,
            parts: Vec::new(),
        });
    }

    let mut written = Vec::with_capacity(parts);
    for (index, range) in partition(total_rows, parts).into_iter().enumerate() {
        let path = part_path(input, index + 1);
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(|e| RowsError::write(&path, e))?;
        writer
            .write_record(&header)
            .map_err(|e| RowsError::write(&path, e))?;
        for record in &records[range.clone()] {
            writer
                .write_record(record)
                .map_err(|e| RowsError::write(&path, e))?;
        }
        writer.flush().map_err(|e| RowsError::io(&path, e))?;

        info!(part = %path.display(), rows = range.len(), "wrote part");
        written.push(SplitPart {
            path,
            rows: range.len(),
        });
    }

    Ok(SplitReport {
        total_rows,
        parts: written,
    })
}
