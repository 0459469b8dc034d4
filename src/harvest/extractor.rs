//! Flattening records into asset rows.
//!
//! One row per asset descriptor per record, in page order, then hit order,
//! then descriptor order. Hits without a record, and records without assets,
//! contribute nothing.

use crate::catalog::{DigitalObject, Hit, Record};
use crate::rows::AssetRow;

/// Lazily yields the rows of `hits` in order.
pub fn extract_rows(hits: &[Hit]) -> impl Iterator<Item = AssetRow> + '_ {
    hits.iter()
        .filter_map(Hit::record)
        .flat_map(|record| {
            let record_id = record.identifier();
            record
                .assets()
                .iter()
                .map(move |asset| row_for(&record_id, record, asset))
        })
}

/// Number of rows [`extract_rows`] would yield, without building them.
#[must_use]
pub fn count_rows(hits: &[Hit]) -> usize {
    hits.iter()
        .filter_map(Hit::record)
        .map(|record| record.assets().len())
        .sum()
}

fn row_for(record_id: &str, record: &Record, asset: &DigitalObject) -> AssetRow {
    AssetRow {
        record_id: record_id.to_string(),
        title: record.title_or_empty().to_string(),
        object_url: asset.url().to_string(),
        declared_size: asset.declared_bytes(),
    }
}
