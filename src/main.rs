mod collect;
mod data;
mod enrich;

use std::path::PathBuf;

use clap::Parser;

/// Collect results and write to single files.
///
/// Takes the per-model result files of a benchmarking run, concatenates them
/// per category, derives the run-metadata columns, and writes the four
/// consolidated CSVs.
#[derive(Parser)]
#[command(name = "eval-collect", version)]
struct Cli {
    /// Per-model result files produced by the benchmarking run.
    #[arg(long, num_args = 1.., required = true)]
    outfiles: Vec<PathBuf>,

    /// Pipeline data directory.
    #[arg(long = "path_data", default_value = "data")]
    path_data: PathBuf,

    /// Directory the consolidated CSVs are written to (default: current dir).
    #[arg(long = "path_out", default_value = "")]
    path_out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    collect::run(&cli.outfiles, &cli.path_data, &cli.path_out)
}
