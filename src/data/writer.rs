use std::path::Path;

use anyhow::{Context, Result};

use super::model::ResultTable;

/// Write a [`ResultTable`] back out as CSV: index first under its original
/// header (empty when unnamed), then data columns in table order. Cells a row
/// does not carry become empty fields, matching how the producing pipeline
/// serializes missing values.
pub fn write_table(path: &Path, table: &ResultTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;

    let mut header = Vec::with_capacity(table.columns.len() + 1);
    header.push(table.index_name.clone().unwrap_or_default());
    header.extend(table.columns.iter().cloned());
    writer.write_record(&header).context("writing CSV header")?;

    for row in &table.rows {
        let mut record = Vec::with_capacity(header.len());
        record.push(row.index.clone());
        for col in &table.columns {
            record.push(match row.cells.get(col) {
                Some(value) => value.to_string(),
                None => String::new(),
            });
        }
        writer.write_record(&record).context("writing CSV row")?;
    }

    writer.flush().context("flushing CSV")?;
    Ok(())
}
