//! `ventakit` binary: consolidate per-branch sales workbooks into one
//! formatted report, or generate demo input data.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ventakit_analysis::conf::N_TOP_PRODUCTS_DEFAULT;
use ventakit_cli::pipeline::{SpecPipelineOptions, run_consolidation};
use ventakit_cli::sample::{SpecSampleOptions, gen_sample_files};
use ventakit_ingest::conf::PATTERN_INPUT_DEFAULT;

#[derive(Parser)]
#[command(
    name = "ventakit",
    version,
    about = "Consolidates per-branch sales workbooks into a formatted XLSX report"
)]
struct Cli {
    #[command(subcommand)]
    command: EnumCommand,
}

#[derive(Subcommand)]
enum EnumCommand {
    /// Read all matching workbooks from a directory and write the report.
    Consolidate {
        /// Directory containing the per-branch input workbooks.
        #[arg(long)]
        input_dir: PathBuf,
        /// Output report path.
        #[arg(long)]
        output: PathBuf,
        /// Glob pattern applied to input file basenames.
        #[arg(long, default_value = PATTERN_INPUT_DEFAULT)]
        pattern: String,
        /// Ranking length on the top-products sheet.
        #[arg(long, default_value_t = N_TOP_PRODUCTS_DEFAULT)]
        top_n: usize,
    },
    /// Generate three demo input workbooks.
    GenSample {
        /// Directory the demo workbooks are written to.
        #[arg(long)]
        output_dir: PathBuf,
        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let result: Result<(), String> = match cli.command {
        EnumCommand::Consolidate {
            input_dir,
            output,
            pattern,
            top_n,
        } => run_consolidation(&SpecPipelineOptions {
            dir_input: input_dir,
            path_file_out: output,
            pattern,
            top_n,
        })
        .map(|outcome| {
            tracing::info!(
                total_sales = outcome.stats.total_sales,
                transactions = outcome.stats.cnt_transactions,
                "consolidation finished"
            );
        })
        .map_err(|err| err.to_string()),
        EnumCommand::GenSample { output_dir, seed } => {
            gen_sample_files(&output_dir, &SpecSampleOptions { seed }).map(|l_paths| {
                tracing::info!(files = l_paths.len(), "sample generation finished");
            })
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
