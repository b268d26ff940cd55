use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use insight::pipeline::{self, Config, NarrativeStatus, DEFAULT_API_URL, DEFAULT_MODEL, TOKEN_ENV};
use insight::stats::DEFAULT_SEED;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "insight")]
#[command(about = "Analyse a CSV file and write a narrated Markdown report with charts")]
#[command(version)]
struct Cli {
    /// Delimited text file to analyse
    dataset: Option<PathBuf>,

    /// Directory for charts and README.md [default: ./<dataset name>]
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,

    /// Chat-completions endpoint
    #[arg(long, env = "LLM_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Model identifier sent with every request
    #[arg(long, env = "LLM_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Send the correlation heatmap inline with the narrative request
    #[arg(long)]
    attach_chart: bool,

    /// Seed for k-means initialisation
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let Some(dataset) = cli.dataset else {
        eprintln!("Usage: insight <DATASET> [OPTIONS]");
        eprintln!("       insight --help for more information");
        return ExitCode::FAILURE;
    };

    let api_key = match std::env::var(TOKEN_ENV) {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("Error: {TOKEN_ENV} environment variable is not set");
            return ExitCode::FAILURE;
        }
    };

    let mut config = Config::new(dataset, api_key)
        .with_api_url(cli.api_url)
        .with_model(cli.model)
        .with_seed(cli.seed)
        .with_attach_chart(cli.attach_chart);
    if let Some(output_dir) = cli.output_dir {
        config = config.with_output_dir(output_dir);
    }

    match pipeline::run(&config) {
        Ok(summary) => {
            if let NarrativeStatus::Failed(reason) = &summary.narrative {
                eprintln!("Warning: report written without narrative: {reason}");
            }
            eprintln!(
                "{} analyses completed, {} skipped",
                summary.completed, summary.skipped
            );
            println!("{}", summary.report_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
