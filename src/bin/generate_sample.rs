//! Generate a deterministic set of fake per-model result files so the
//! collector can be exercised without a full benchmarking run.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

// The empty-renamed field is the index column, matching the frames the
// pipeline writes with index_col=0.

#[derive(Serialize)]
struct EvalRow {
    #[serde(rename = "")]
    run: String,
    #[serde(rename = "MSE")]
    mse: f64,
    #[serde(rename = "RMSE")]
    rmse: f64,
    #[serde(rename = "MAE")]
    mae: f64,
    #[serde(rename = "Pearson")]
    pearson: f64,
    #[serde(rename = "R^2")]
    r2: f64,
}

#[derive(Serialize)]
struct PerEntityRow {
    #[serde(rename = "")]
    run: String,
    drug: String,
    cell_line: String,
    #[serde(rename = "MSE")]
    mse: f64,
    #[serde(rename = "Pearson")]
    pearson: f64,
}

#[derive(Serialize)]
struct TrueVsPredRow {
    #[serde(rename = "")]
    run: String,
    drug: String,
    cell_line: String,
    y_true: f64,
    y_pred: f64,
}

const MODELS: [(&str, f64); 3] = [
    ("NaivePredictor", 1.0),
    ("ElasticNet", 0.5),
    ("SimpleNeuralNetwork", 0.35),
];
const RAND_SETTINGS: [&str; 2] = ["predictions", "randomize-gene-expression"];
const SCHEMES: [&str; 3] = ["LPO", "LCO", "LDO"];
const SPLITS: u32 = 5;

const DRUGS: [&str; 4] = ["5330286", "GDC-0941", "Erlotinib", "17-AAG"];
const CELL_LINES: [&str; 4] = ["MCF7", "HL-60", "A549", "HeLa"];

fn run_index(model: &str, setting: &str, scheme: &str, split: u32) -> String {
    format!("{model}_{setting}_{scheme}_split_{split}")
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("serializing row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = Path::new("sample_results");
    std::fs::create_dir_all(out_dir).context("creating sample_results/")?;

    let mut rng = SimpleRng::new(42);
    let mut n_files = 0;
    let mut n_rows = 0;

    for (model, base_error) in MODELS {
        let mut eval_rows = Vec::new();
        let mut per_drug_rows = Vec::new();
        let mut per_cl_rows = Vec::new();
        let mut t_vs_p_rows = Vec::new();

        for setting in RAND_SETTINGS {
            // randomized runs degrade towards the naive error level
            let error = if setting == "predictions" {
                base_error
            } else {
                (base_error + 1.0) / 2.0
            };

            for scheme in SCHEMES {
                for split in 0..SPLITS {
                    let run = run_index(model, setting, scheme, split);

                    let mse = (error + rng.gauss(0.0, 0.05)).max(0.01);
                    eval_rows.push(EvalRow {
                        run: run.clone(),
                        mse,
                        rmse: mse.sqrt(),
                        mae: mse * 0.8,
                        pearson: (1.0 - mse).clamp(-1.0, 1.0),
                        r2: 1.0 - mse,
                    });

                    for drug in DRUGS {
                        let mse = (error + rng.gauss(0.0, 0.1)).max(0.01);
                        per_drug_rows.push(PerEntityRow {
                            run: run.clone(),
                            drug: drug.to_string(),
                            cell_line: String::new(),
                            mse,
                            pearson: (1.0 - mse).clamp(-1.0, 1.0),
                        });
                    }
                    for cell_line in CELL_LINES {
                        let mse = (error + rng.gauss(0.0, 0.1)).max(0.01);
                        per_cl_rows.push(PerEntityRow {
                            run: run.clone(),
                            drug: String::new(),
                            cell_line: cell_line.to_string(),
                            mse,
                            pearson: (1.0 - mse).clamp(-1.0, 1.0),
                        });
                    }
                    for drug in DRUGS {
                        for cell_line in CELL_LINES {
                            let y_true = rng.gauss(0.0, 1.0);
                            t_vs_p_rows.push(TrueVsPredRow {
                                run: run.clone(),
                                drug: drug.to_string(),
                                cell_line: cell_line.to_string(),
                                y_true,
                                y_pred: y_true + rng.gauss(0.0, error),
                            });
                        }
                    }
                }
            }
        }

        write_rows(&out_dir.join(format!("{model}_evaluation_results.csv")), &eval_rows)?;
        write_rows(
            &out_dir.join(format!("{model}_evaluation_results_per_drug.csv")),
            &per_drug_rows,
        )?;
        write_rows(
            &out_dir.join(format!("{model}_evaluation_results_per_cl.csv")),
            &per_cl_rows,
        )?;
        write_rows(&out_dir.join(format!("{model}_true_vs_pred.csv")), &t_vs_p_rows)?;

        n_files += 4;
        n_rows += eval_rows.len() + per_drug_rows.len() + per_cl_rows.len() + t_vs_p_rows.len();
    }

    println!(
        "Wrote {n_files} result files ({n_rows} rows) to {}",
        out_dir.display()
    );
    println!(
        "Try: eval-collect --outfiles {}/*.csv --path_out collected",
        out_dir.display()
    );
    Ok(())
}
