//! The flat row format shared by the harvester and the download engine.
//!
//! A row file is a CSV with the header `naId,title,objectUrl,objectFileSize`
//! and one row per asset. Harvests write it; downloads read it.

mod error;
mod row;
mod split;

pub use error::RowsError;
pub use row::{AssetRow, ROW_HEADER, into_download_items, read_rows, write_rows};
pub use split::{SplitPart, SplitReport, part_path, partition, split_csv};
