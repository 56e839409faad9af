use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::data::model::{CellValue, ResultTable};

// ---------------------------------------------------------------------------
// Run identity parsed from a row index
// ---------------------------------------------------------------------------

/// Evaluation scheme: which entity is held out of the training split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Scheme {
    /// Leave pairs out.
    Lpo,
    /// Leave cell lines out.
    Lco,
    /// Leave drugs out.
    Ldo,
}

impl FromStr for Scheme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LPO" => Ok(Scheme::Lpo),
            "LCO" => Ok(Scheme::Lco),
            "LDO" => Ok(Scheme::Ldo),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Scheme::Lpo => "LPO",
            Scheme::Lco => "LCO",
            Scheme::Ldo => "LDO",
        })
    }
}

/// The run identity encoded in a row index:
/// `{algorithm}_{rand_setting}_{scheme}_split_{k}`.
///
/// `algorithm` may contain underscores; `rand_setting` may not (multi-word
/// randomization settings use dashes in the pipeline), so the index is parsed
/// from the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunId {
    pub algorithm: String,
    pub rand_setting: String,
    pub scheme: Scheme,
    pub cv_split: u32,
}

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("run index '{0}' does not match '{{algorithm}}_{{rand_setting}}_{{scheme}}_split_{{k}}'")]
    MalformedIndex(String),
    #[error("run index '{index}' has unknown evaluation scheme '{scheme}' (expected LPO, LCO or LDO)")]
    UnknownScheme { index: String, scheme: String },
}

pub fn parse_run_id(index: &str) -> Result<RunId, EnrichError> {
    let malformed = || EnrichError::MalformedIndex(index.to_string());

    let tokens: Vec<&str> = index.split('_').collect();
    // minimum: algorithm, rand_setting, scheme, "split", k
    if tokens.len() < 5 {
        return Err(malformed());
    }

    let n = tokens.len();
    let cv_split: u32 = tokens[n - 1].parse().map_err(|_| malformed())?;
    if tokens[n - 2] != "split" {
        return Err(malformed());
    }
    let scheme = Scheme::from_str(tokens[n - 3]).map_err(|_| EnrichError::UnknownScheme {
        index: index.to_string(),
        scheme: tokens[n - 3].to_string(),
    })?;
    let rand_setting = tokens[n - 4].to_string();
    let algorithm = tokens[..n - 4].join("_");
    if algorithm.is_empty() || rand_setting.is_empty() {
        return Err(malformed());
    }

    Ok(RunId {
        algorithm,
        rand_setting,
        scheme,
        cv_split,
    })
}

// ---------------------------------------------------------------------------
// Table annotation
// ---------------------------------------------------------------------------

/// Columns the enrichment step appends, in output order.
pub const METADATA_COLUMNS: [&str; 5] =
    ["algorithm", "rand_setting", "LPO_LCO_LDO", "split", "CV_split"];

/// Derive the run-metadata columns from every row index and append them to
/// the table. Fails on the first index that does not carry a run identity.
pub fn annotate_run_metadata(table: &mut ResultTable) -> Result<(), EnrichError> {
    let ids: Vec<RunId> = table
        .rows
        .iter()
        .map(|row| parse_run_id(&row.index))
        .collect::<Result<_, _>>()?;

    for col in METADATA_COLUMNS {
        table.ensure_column(col);
    }
    for (row, id) in table.rows.iter_mut().zip(ids) {
        row.cells
            .insert("algorithm".to_string(), CellValue::String(id.algorithm));
        row.cells.insert(
            "rand_setting".to_string(),
            CellValue::String(id.rand_setting),
        );
        row.cells.insert(
            "LPO_LCO_LDO".to_string(),
            CellValue::String(id.scheme.to_string()),
        );
        row.cells.insert(
            "split".to_string(),
            CellValue::String(format!("split_{}", id.cv_split)),
        );
        row.cells.insert(
            "CV_split".to_string(),
            CellValue::Integer(i64::from(id.cv_split)),
        );
    }
    Ok(())
}
