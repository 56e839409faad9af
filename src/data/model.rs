use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a result table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

/// `Display` doubles as the CSV field form: floats print in their round-trip
/// form and `Null` prints as the empty field.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Row – one row of a result table
// ---------------------------------------------------------------------------

/// A single table row: the run index plus its dynamic data columns.
#[derive(Debug, Clone)]
pub struct Row {
    /// Row index (first CSV column, `index_col=0` in the producing pipeline).
    pub index: String,
    /// Dynamic data columns: column_name → value.
    pub cells: BTreeMap<String, CellValue>,
}

// ---------------------------------------------------------------------------
// ResultTable – a consolidated result table
// ---------------------------------------------------------------------------

/// A flat, dynamically-typed table of evaluation results.
#[derive(Debug, Clone)]
pub struct ResultTable {
    /// Header of the index column; `None` when the source CSV left it unnamed.
    pub index_name: Option<String>,
    /// Ordered list of data column names (excludes the index).
    pub columns: Vec<String>,
    /// All rows.
    pub rows: Vec<Row>,
}

impl ResultTable {
    /// Append another table, pandas-`concat` style: rows are stacked, the
    /// column set becomes the union in first-seen order, and cells a row does
    /// not carry stay absent (written out as empty fields).
    pub fn append(&mut self, other: ResultTable) {
        for col in other.columns {
            if !self.columns.contains(&col) {
                self.columns.push(col);
            }
        }
        if self.index_name.is_none() {
            self.index_name = other.index_name;
        }
        self.rows.extend(other.rows);
    }

    /// Whether a data column of that name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Register a data column name, appending it after the existing ones.
    pub fn ensure_column(&mut self, name: &str) {
        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
    }

    /// Rewrite every cell of a column to its `String` form. The `drug` column
    /// goes through this so purely numeric identifiers never round-trip as
    /// numbers.
    pub fn coerce_column_to_string(&mut self, name: &str) {
        for row in &mut self.rows {
            if let Some(value) = row.cells.get_mut(name) {
                if !matches!(value, CellValue::String(_) | CellValue::Null) {
                    *value = CellValue::String(value.to_string());
                }
            }
        }
    }

    /// Cell lookup by row position and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.cells.get(column))
    }

    /// Sorted set of distinct values in a column.
    pub fn unique_values(&self, column: &str) -> BTreeSet<CellValue> {
        self.rows
            .iter()
            .filter_map(|r| r.cells.get(column))
            .cloned()
            .collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: &str, cells: &[(&str, CellValue)]) -> Row {
        Row {
            index: index.to_string(),
            cells: cells
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    fn table(columns: &[&str], rows: Vec<Row>) -> ResultTable {
        ResultTable {
            index_name: None,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    #[test]
    fn append_unions_columns_in_first_seen_order() {
        let mut a = table(
            &["MSE", "Pearson"],
            vec![row(
                "m1_predictions_LPO_split_0",
                &[("MSE", CellValue::Float(0.5))],
            )],
        );
        let b = table(
            &["MSE", "drug"],
            vec![row(
                "m2_predictions_LPO_split_0",
                &[("drug", CellValue::Integer(42))],
            )],
        );
        a.append(b);

        assert_eq!(a.columns, vec!["MSE", "Pearson", "drug"]);
        assert_eq!(a.len(), 2);
        // the first row never carried "drug"
        assert_eq!(a.get(0, "drug"), None);
        assert_eq!(a.get(1, "drug"), Some(&CellValue::Integer(42)));
    }

    #[test]
    fn append_keeps_first_index_name() {
        let mut a = table(&["MSE"], vec![]);
        let mut b = table(&["MSE"], vec![]);
        b.index_name = Some("run".to_string());
        a.append(b);
        assert_eq!(a.index_name.as_deref(), Some("run"));
    }

    #[test]
    fn coerce_column_rewrites_numbers_but_not_nulls() {
        let mut t = table(
            &["drug"],
            vec![
                row("a_p_LPO_split_0", &[("drug", CellValue::Integer(5330286))]),
                row("b_p_LPO_split_0", &[("drug", CellValue::Float(12.5))]),
                row("c_p_LPO_split_0", &[("drug", CellValue::Null)]),
                row(
                    "d_p_LPO_split_0",
                    &[("drug", CellValue::String("GDC-0941".into()))],
                ),
            ],
        );
        t.coerce_column_to_string("drug");

        assert_eq!(t.get(0, "drug"), Some(&CellValue::String("5330286".into())));
        assert_eq!(t.get(1, "drug"), Some(&CellValue::String("12.5".into())));
        assert_eq!(t.get(2, "drug"), Some(&CellValue::Null));
        assert_eq!(t.get(3, "drug"), Some(&CellValue::String("GDC-0941".into())));
    }

    #[test]
    fn unique_values_are_sorted_and_deduplicated() {
        let t = table(
            &["algorithm"],
            vec![
                row("x", &[("algorithm", CellValue::String("SVM".into()))]),
                row("y", &[("algorithm", CellValue::String("ElasticNet".into()))]),
                row("z", &[("algorithm", CellValue::String("SVM".into()))]),
            ],
        );
        let unique: Vec<CellValue> = t.unique_values("algorithm").into_iter().collect();
        assert_eq!(
            unique,
            vec![
                CellValue::String("ElasticNet".into()),
                CellValue::String("SVM".into()),
            ]
        );
    }
}
