use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::{CellValue, ResultTable, Row};

/// Read one result CSV into a [`ResultTable`].
///
/// Layout: header row with column names; the first column is the row index
/// (the producing pipeline writes frames with `index_col=0`, so its header is
/// usually empty). All other columns are data columns with type-guessed cells.
pub fn read_table(path: &Path) -> Result<ResultTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if headers.is_empty() {
        bail!("CSV has an empty header row");
    }

    let index_name = if headers[0].is_empty() {
        None
    } else {
        Some(headers[0].clone())
    };
    let columns: Vec<String> = headers[1..].to_vec();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let index = record.get(0).unwrap_or("").to_string();
        if index.is_empty() {
            bail!("CSV row {row_no}: empty row index");
        }

        let mut cells = BTreeMap::new();
        for (col_idx, col_name) in columns.iter().enumerate() {
            let raw = record.get(col_idx + 1).unwrap_or("");
            cells.insert(col_name.clone(), guess_cell_value(raw));
        }
        rows.push(Row { index, cells });
    }

    Ok(ResultTable {
        index_name,
        columns,
        rows,
    })
}

fn guess_cell_value(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_unnamed_index_and_guesses_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "m_evaluation_results.csv",
            ",MSE,Pearson,drug,converged\n\
             ElasticNet_predictions_LPO_split_0,0.42,0.9,5330286,true\n\
             ElasticNet_predictions_LPO_split_1,0.44,,GDC-0941,false\n",
        );

        let table = read_table(&path).unwrap();
        assert_eq!(table.index_name, None);
        assert_eq!(table.columns, vec!["MSE", "Pearson", "drug", "converged"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].index, "ElasticNet_predictions_LPO_split_0");
        assert_eq!(table.get(0, "MSE"), Some(&CellValue::Float(0.42)));
        assert_eq!(table.get(0, "drug"), Some(&CellValue::Integer(5330286)));
        assert_eq!(table.get(0, "converged"), Some(&CellValue::Bool(true)));
        assert_eq!(table.get(1, "Pearson"), Some(&CellValue::Null));
        assert_eq!(table.get(1, "drug"), Some(&CellValue::String("GDC-0941".into())));
    }

    #[test]
    fn keeps_named_index_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "named.csv",
            "run,MSE\nSVM_predictions_LCO_split_0,1.5\n",
        );

        let table = read_table(&path).unwrap();
        assert_eq!(table.index_name.as_deref(), Some("run"));
        assert_eq!(table.columns, vec!["MSE"]);
    }

    #[test]
    fn rejects_rows_without_an_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "bad.csv", ",MSE\n,0.5\n");
        let err = read_table(&path).unwrap_err();
        assert!(err.to_string().contains("empty row index"));
    }

    #[test]
    fn missing_file_reports_the_open_step() {
        let err = read_table(Path::new("/nonexistent/x.csv")).unwrap_err();
        assert!(err.to_string().contains("opening CSV"));
    }
}
