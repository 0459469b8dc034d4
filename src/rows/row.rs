//! The flat four-column row: `naId,title,objectUrl,objectFileSize`.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::RowsError;
use crate::download::DownloadItem;

/// Header written to every row file, in column order.
pub const ROW_HEADER: [&str; 4] = ["naId", "title", "objectUrl", "objectFileSize"];

const URL_COLUMN: &str = "objectUrl";

/// One asset of one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRow {
    /// Owning record identifier.
    #[serde(rename = "naId", default)]
    pub record_id: String,
    /// Owning record title; may be empty.
    #[serde(default)]
    pub title: String,
    /// Asset URL; may be empty.
    #[serde(rename = "objectUrl", default)]
    pub object_url: String,
    /// Declared size in bytes; blank or non-numeric reads as zero.
    #[serde(
        rename = "objectFileSize",
        default,
        deserialize_with = "lenient_size"
    )]
    pub declared_size: u64,
}

impl AssetRow {
    /// Converts into a download item at the given 1-based ordinal.
    #[must_use]
    pub fn into_download_item(self, ordinal: usize) -> DownloadItem {
        DownloadItem {
            ordinal,
            record_id: self.record_id,
            title: self.title,
            url: self.object_url,
            declared_size: self.declared_size,
        }
    }
}

fn lenient_size<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0))
}

/// Numbers rows 1, 2, ... in order.
#[must_use]
pub fn into_download_items(rows: Vec<AssetRow>) -> Vec<DownloadItem> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| row.into_download_item(index + 1))
        .collect()
}

/// Reads every data row of a row file.
///
/// Extra columns are ignored and short rows take defaults. The header must at
/// least name the `objectUrl` column.
///
/// # Errors
///
/// Returns [`RowsError`] if the file cannot be opened, is not valid CSV, or
/// has no `objectUrl` column.
pub fn read_rows(path: &Path) -> Result<Vec<AssetRow>, RowsError> {
    let file = File::open(path).map_err(|e| RowsError::io(path, e))?;
    read_rows_from(file, path)
}

fn read_rows_from(reader: impl std::io::Read, path: &Path) -> Result<Vec<AssetRow>, RowsError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = reader.headers().map_err(|e| RowsError::read(path, e))?;
    if !headers.iter().any(|h| h.trim() == URL_COLUMN) {
        return Err(RowsError::MissingColumn {
            path: path.to_path_buf(),
            column: URL_COLUMN,
        });
    }

    let rows = reader
        .deserialize::<AssetRow>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| RowsError::read(path, e))?;
    debug!(path = %path.display(), rows = rows.len(), "read row file");
    Ok(rows)
}

/// Writes the header and then every row; returns the number of rows written.
///
/// The header is written even when `rows` is empty.
///
/// # Errors
///
/// Returns [`RowsError`] if the file cannot be created or written.
pub fn write_rows<'a, I>(path: &Path, rows: I) -> Result<usize, RowsError>
where
    I: IntoIterator<Item = &'a AssetRow>,
{
    let file = File::create(path).map_err(|e| RowsError::io(path, e))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer
        .write_record(ROW_HEADER)
        .map_err(|e| RowsError::write(path, e))?;

    let mut written = 0;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| RowsError::write(path, e))?;
        written += 1;
    }
    writer
        .flush()
        .map_err(|e| RowsError::io(path, e))?;
    Ok(written)
}
