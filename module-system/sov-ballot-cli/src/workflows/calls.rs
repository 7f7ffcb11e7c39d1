use std::path::PathBuf;

use anyhow::Context as _;
use sov_ballot::{Ballot, CallMessage};
use sov_modules_api::{apply_call, Address, Context, FileStorage, StateCheckpoint};
use tracing::info;

use super::{save, Output};
use crate::Ctx;

/// Import a call message from a JSON file or as a JSON string
#[derive(clap::Subcommand, Debug)]
pub enum ImportCall {
    /// Import a call message from a JSON file at the provided path
    FromFile { path: PathBuf },
    /// Provide a JSON serialized call message directly as input
    FromString { json: String },
}

impl ImportCall {
    pub fn read(self) -> anyhow::Result<CallMessage<Ctx>> {
        let json = match self {
            ImportCall::FromFile { path } => std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            ImportCall::FromString { json } => json,
        };
        serde_json::from_str(&json).context("Malformed call message")
    }
}

#[derive(clap::Parser, Debug)]
pub struct CallSubcommand {
    /// Address the call is sent from
    #[arg(long)]
    pub sender: Address,
    #[clap(subcommand)]
    pub inner: ImportCall,
}

/// Parses a yes/no choice.
pub fn parse_choice(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        other => Err(format!("Expected yes or no, got {other:?}")),
    }
}

/// Applies `message` as `sender` and saves the state when the call succeeds.
pub(crate) fn submit(
    storage: &FileStorage,
    sender: Address,
    message: CallMessage<Ctx>,
) -> anyhow::Result<Output> {
    let ballot = Ballot::<Ctx>::default();
    let checkpoint = StateCheckpoint::new(storage.clone());

    let (receipt, checkpoint) = apply_call(&ballot, message, &Ctx::new(sender), checkpoint);
    if receipt.is_successful() {
        save(storage, checkpoint)?;
        info!("Call from {} applied", sender);
    }

    Ok(Output::Receipt(receipt.try_into()?))
}
