//! aarshjul - render a radial calendar chart.
//!
//! Usage: aarshjul [--settings settings.json] [--events events.csv]
//!                 [--out-dir plots] [--stem aarshjul]
//!
//! Output: `Plot successfully saved to {path}.` on stdout. Logs go to stderr.

use std::path::PathBuf;

use aarshjul_cli::{
    DEFAULT_EVENTS, DEFAULT_OUTPUT_DIR, DEFAULT_SETTINGS, DEFAULT_STEM, RunConfig, run,
    success_message,
};
use clap::Parser;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Render a radial calendar chart")]
struct Cli {
    /// Settings document (JSON, or TOML by extension)
    #[arg(long, default_value = DEFAULT_SETTINGS)]
    settings: PathBuf,

    /// Event log CSV with `name` and `weight` columns
    #[arg(long, default_value = DEFAULT_EVENTS)]
    events: PathBuf,

    /// Existing directory that receives the numbered PNG
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    out_dir: PathBuf,

    /// Output file name stem
    #[arg(long, default_value = DEFAULT_STEM)]
    stem: String,
}

/// Initialize logging to stderr, `info` unless RUST_LOG says otherwise
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let config = RunConfig {
        settings_path: cli.settings,
        events_path: cli.events,
        output_dir: cli.out_dir,
        stem: cli.stem,
    };

    match run(&config) {
        Ok(path) => println!("{}", success_message(&path)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render chart");
            std::process::exit(1);
        }
    }
}
