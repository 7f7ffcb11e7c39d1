use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use sov_ballot_cli::{clap, Workflows};
use tracing::error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
/// Run a yes/no ballot stored on the local disk
pub struct App {
    /// TOML file naming the storage directory
    #[arg(long, global = true, default_value = "ballot_config.toml")]
    config: PathBuf,
    #[clap(subcommand)]
    workflow: Workflows,
}

fn main() -> Result<ExitCode, anyhow::Error> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Unable to set global default subscriber")?;

    let invocation = <App as clap::Parser>::parse();
    let output = invocation.workflow.run(&invocation.config)?;

    println!("{}", output.to_json()?);

    match output.reverted_reason() {
        Some(reason) => {
            error!("Call reverted: {}", reason);
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}
