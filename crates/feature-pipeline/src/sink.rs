//! CSV output for combined tables and snapshots.

use std::fs;
use std::io;
use std::path::Path;
use feature_core::error::{FeatureError, FeatureResult};
use feature_core::types::{EnrichedRow, FeatureSet, SnapshotRow};
use tracing::info;

use crate::aggregate::CombinedTable;

/// Raw bar columns, always present.
pub const RAW_COLUMNS: [&str; 8] = [
    "Ticker", "Date", "Open", "High", "Low", "Close", "Adj_Close", "Volume",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

fn output_err(e: csv::Error) -> FeatureError {
    FeatureError::Output(e.to_string())
}

/// Missing values are written as empty cells.
fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Columns present in the written table.
///
/// Indicator columns appear only if at least one row was enriched; the
/// label column additionally requires a labelled variant.
pub fn table_columns(table: &CombinedTable) -> Vec<&'static str> {
    let mut columns = RAW_COLUMNS.to_vec();
    if table.has_features() {
        columns.extend(FeatureSet::COLUMNS);
        if table.variant().has_label() {
            columns.push(FeatureSet::LABEL_COLUMN);
        }
    }
    columns
}

fn row_record(row: &EnrichedRow, width: usize, with_label: bool) -> Vec<String> {
    let bar = &row.bar;
    let mut record = Vec::with_capacity(width);
    record.push(row.ticker.clone());
    record.push(bar.date.format(DATE_FORMAT).to_string());
    record.push(bar.open.to_string());
    record.push(bar.high.to_string());
    record.push(bar.low.to_string());
    record.push(bar.close.to_string());
    record.push(bar.adj_close.to_string());
    record.push(bar.volume.to_string());

    if width > RAW_COLUMNS.len() {
        match &row.features {
            Some(features) => {
                record.extend(features.values().into_iter().map(cell));
                if with_label {
                    record.push(cell(features.next_day_return));
                }
            }
            None => record.resize(width, String::new()),
        }
    }

    record
}

/// Write the combined table as CSV to any writer.
pub fn write_table_to<W: io::Write>(table: &CombinedTable, writer: W) -> FeatureResult<()> {
    let columns = table_columns(table);
    let with_label = columns.last() == Some(&FeatureSet::LABEL_COLUMN);

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&columns).map_err(output_err)?;

    for row in table.rows() {
        wtr.write_record(row_record(row, columns.len(), with_label))
            .map_err(output_err)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the latest-row snapshot as CSV to any writer.
pub fn write_snapshot_to<W: io::Write>(rows: &[SnapshotRow], writer: W) -> FeatureResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["Ticker"];
    header.extend(FeatureSet::SNAPSHOT_COLUMNS);
    wtr.write_record(&header).map_err(output_err)?;

    for row in rows {
        let mut record = vec![row.ticker.clone()];
        record.extend(row.values().into_iter().map(cell));
        wtr.write_record(&record).map_err(output_err)?;
    }

    wtr.flush()?;
    Ok(())
}

fn create_parent(path: &Path) -> FeatureResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write the combined table to `path`, replacing any existing file.
pub fn write_table(table: &CombinedTable, path: &Path) -> FeatureResult<()> {
    create_parent(path)?;
    let file = fs::File::create(path)?;
    write_table_to(table, file)?;
    info!(path = %path.display(), rows = table.len(), "Wrote combined table");
    Ok(())
}

/// Write the snapshot to `path`, replacing any existing file.
pub fn write_snapshot(rows: &[SnapshotRow], path: &Path) -> FeatureResult<()> {
    create_parent(path)?;
    let file = fs::File::create(path)?;
    write_snapshot_to(rows, file)?;
    info!(path = %path.display(), rows = rows.len(), "Wrote latest snapshot");
    Ok(())
}

/// Render the combined table as a CSV string.
pub fn table_to_string(table: &CombinedTable) -> FeatureResult<String> {
    let mut buf = Vec::new();
    write_table_to(table, &mut buf)?;
    String::from_utf8(buf).map_err(|e| FeatureError::Output(e.to_string()))
}
