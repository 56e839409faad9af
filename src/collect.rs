use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::data::loader::read_table;
use crate::data::model::ResultTable;
use crate::data::writer::write_table;
use crate::enrich::annotate_run_metadata;

// ---------------------------------------------------------------------------
// Result categories
// ---------------------------------------------------------------------------

/// The four result file categories a benchmarking run produces per model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResultKind {
    Evaluation,
    PerDrug,
    PerCellLine,
    TrueVsPred,
}

impl ResultKind {
    pub const ALL: [ResultKind; 4] = [
        ResultKind::Evaluation,
        ResultKind::PerDrug,
        ResultKind::PerCellLine,
        ResultKind::TrueVsPred,
    ];

    /// Filename suffix of per-model files in this category. The consolidated
    /// output file carries the same name.
    pub fn suffix(self) -> &'static str {
        match self {
            ResultKind::Evaluation => "evaluation_results.csv",
            ResultKind::PerDrug => "evaluation_results_per_drug.csv",
            ResultKind::PerCellLine => "evaluation_results_per_cl.csv",
            ResultKind::TrueVsPred => "true_vs_pred.csv",
        }
    }

    /// Classify a path by its file name suffix. Suffix matching (rather than
    /// substring matching on the whole path) so directory names cannot
    /// misfile an input.
    pub fn of_path(path: &Path) -> Option<ResultKind> {
        let name = path.file_name()?.to_str()?;
        Self::ALL.into_iter().find(|kind| name.ends_with(kind.suffix()))
    }
}

/// Group input files by category; paths matching no known suffix are skipped
/// with a warning.
pub fn classify_outfiles(outfiles: &[PathBuf]) -> BTreeMap<ResultKind, Vec<PathBuf>> {
    let mut groups: BTreeMap<ResultKind, Vec<PathBuf>> = BTreeMap::new();
    for path in outfiles {
        match ResultKind::of_path(path) {
            Some(kind) => groups.entry(kind).or_default().push(path.clone()),
            None => warn!(
                "{} matches no known result suffix, skipping",
                path.display()
            ),
        }
    }
    groups
}

// ---------------------------------------------------------------------------
// Concatenation
// ---------------------------------------------------------------------------

/// Concatenate one category's files into a single table; `None` when the
/// category has no files. The `drug` identifier column, when present, is
/// coerced to string after concatenation.
pub fn collapse(files: &[PathBuf]) -> Result<Option<ResultTable>> {
    let mut merged: Option<ResultTable> = None;
    for file in files {
        let table =
            read_table(file).with_context(|| format!("reading {}", file.display()))?;
        debug!("{}: {} rows", file.display(), table.len());
        match merged.as_mut() {
            Some(out) => out.append(table),
            None => merged = Some(table),
        }
    }

    if let Some(out) = merged.as_mut() {
        if out.has_column("drug") {
            out.coerce_column_to_string("drug");
        }
    }
    Ok(merged)
}

// ---------------------------------------------------------------------------
// End-to-end pass
// ---------------------------------------------------------------------------

/// Single pass over the input files: classify → collapse per category →
/// annotate run metadata → write the consolidated CSVs into `path_out`.
pub fn run(outfiles: &[PathBuf], path_data: &Path, path_out: &Path) -> Result<()> {
    if !path_data.is_dir() {
        // accepted for pipeline interface compatibility; nothing is read from it
        warn!("data directory {} does not exist", path_data.display());
    }
    if !path_out.as_os_str().is_empty() {
        std::fs::create_dir_all(path_out)
            .with_context(|| format!("creating output directory {}", path_out.display()))?;
    }

    let groups = classify_outfiles(outfiles);
    for kind in ResultKind::ALL {
        let Some(files) = groups.get(&kind) else {
            debug!("no {} files among the inputs", kind.suffix());
            continue;
        };
        let Some(mut table) = collapse(files)? else {
            continue;
        };
        if table.is_empty() {
            warn!("{} inputs contain no rows", kind.suffix());
        }
        annotate_run_metadata(&mut table)
            .with_context(|| format!("annotating {}", kind.suffix()))?;

        let out_path = path_out.join(kind.suffix());
        write_table(&out_path, &table)
            .with_context(|| format!("writing {}", out_path.display()))?;
        info!(
            "wrote {} ({} rows from {} files)",
            out_path.display(),
            table.len(),
            files.len()
        );

        if kind == ResultKind::Evaluation {
            let algorithms: Vec<String> = table
                .unique_values("algorithm")
                .into_iter()
                .map(|v| v.to_string())
                .collect();
            info!("collected algorithms: {}", algorithms.join(", "));
        }
    }
    Ok(())
}
