mod calls;
mod queries;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
pub use calls::{parse_choice, CallSubcommand, ImportCall};
pub use queries::QueryWorkflow;
use serde::Serialize;
use sov_ballot::{Ballot, BallotConfig, CallMessage};
use sov_modules_api::utils::generate_address;
use sov_modules_api::{
    apply_genesis, Address, FileStorage, StateCheckpoint, Storage, TransactionReceipt, TxEffect,
};
use tracing::info;

use crate::config::{from_toml_path, BallotCliConfig};
use crate::Ctx;

#[derive(clap::Subcommand, Debug)]
pub enum Workflows {
    /// Initialize the ballot from a JSON genesis file
    Genesis { path: PathBuf },
    /// Register a voter (official only)
    AddVoter {
        #[arg(long)]
        sender: Address,
        #[arg(long)]
        voter: Address,
        #[arg(long, default_value = "")]
        label: String,
    },
    /// Open the vote (official only)
    StartVote {
        #[arg(long)]
        sender: Address,
    },
    /// Close the vote (official only)
    EndVote {
        #[arg(long)]
        sender: Address,
    },
    /// Cast a vote as a registered voter
    Vote {
        #[arg(long)]
        sender: Address,
        /// yes, no, true or false
        #[arg(long, action = clap::ArgAction::Set, value_parser = parse_choice)]
        choice: bool,
    },
    /// Submit a JSON encoded call message
    Submit(CallSubcommand),
    /// Read the ballot
    #[clap(subcommand)]
    Query(QueryWorkflow),
    /// Print the JSON schema of the call messages
    Schema,
    /// Derive an address from a seed string
    Address { seed: String },
}

/// What a workflow produced.
#[derive(Debug)]
pub enum Output {
    Receipt(PrintableReceipt),
    Value(serde_json::Value),
}

impl Output {
    pub fn to_json(&self) -> anyhow::Result<String> {
        let json = match self {
            Output::Receipt(receipt) => serde_json::to_string_pretty(receipt)?,
            Output::Value(value) => serde_json::to_string_pretty(value)?,
        };
        Ok(json)
    }

    /// The reason of a reverted call, `None` for anything else.
    pub fn reverted_reason(&self) -> Option<&str> {
        match self {
            Output::Receipt(PrintableReceipt {
                outcome: TxEffect::Reverted(reason),
                ..
            }) => Some(reason.as_str()),
            _ => None,
        }
    }
}

/// A receipt with its events decoded.
#[derive(Debug, Serialize)]
pub struct PrintableReceipt {
    pub sender: Address,
    pub outcome: TxEffect,
    pub events: Vec<PrintableEvent>,
}

#[derive(Debug, Serialize)]
pub struct PrintableEvent {
    pub key: String,
    pub event: sov_ballot::Event<Ctx>,
}

impl TryFrom<TransactionReceipt<Address>> for PrintableReceipt {
    type Error = anyhow::Error;

    fn try_from(receipt: TransactionReceipt<Address>) -> Result<Self, Self::Error> {
        let events = receipt
            .events
            .iter()
            .map(|event| {
                Ok(PrintableEvent {
                    key: String::from_utf8_lossy(event.key().inner()).into_owned(),
                    event: event.decode().context("Malformed ballot event")?,
                })
            })
            .collect::<anyhow::Result<_>>()?;

        Ok(Self {
            sender: receipt.sender,
            outcome: receipt.outcome,
            events,
        })
    }
}

impl Workflows {
    /// Runs the workflow. The config at `config_path` is only read by workflows touching the state.
    pub fn run(self, config_path: &Path) -> anyhow::Result<Output> {
        match self {
            Workflows::Genesis { path } => {
                let storage = create_storage(config_path)?;
                let genesis = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read genesis file {}", path.display()))?;
                let config: BallotConfig<Ctx> =
                    serde_json::from_str(&genesis).context("Malformed genesis file")?;
                run_genesis(&storage, &config)
            }
            Workflows::AddVoter {
                sender,
                voter,
                label,
            } => {
                let storage = open_storage(config_path)?;
                calls::submit(&storage, sender, CallMessage::AddVoter { voter, label })
            }
            Workflows::StartVote { sender } => {
                let storage = open_storage(config_path)?;
                calls::submit(&storage, sender, CallMessage::StartVote)
            }
            Workflows::EndVote { sender } => {
                let storage = open_storage(config_path)?;
                calls::submit(&storage, sender, CallMessage::EndVote)
            }
            Workflows::Vote { sender, choice } => {
                let storage = open_storage(config_path)?;
                calls::submit(&storage, sender, CallMessage::Vote { choice })
            }
            Workflows::Submit(subcommand) => {
                let storage = open_storage(config_path)?;
                let message = subcommand.inner.read()?;
                calls::submit(&storage, subcommand.sender, message)
            }
            Workflows::Query(query) => {
                let storage = open_storage(config_path)?;
                query.run(storage).map(Output::Value)
            }
            Workflows::Schema => {
                let schema = schemars::schema_for!(CallMessage<Ctx>);
                Ok(Output::Value(serde_json::to_value(schema)?))
            }
            Workflows::Address { seed } => {
                let address = generate_address::<Ctx>(&seed);
                Ok(Output::Value(serde_json::to_value(address)?))
            }
        }
    }
}

fn load_config(config_path: &Path) -> anyhow::Result<BallotCliConfig> {
    from_toml_path(config_path)
        .with_context(|| format!("Failed to read config {}", config_path.display()))
}

/// Storage for `genesis`, created if missing.
fn create_storage(config_path: &Path) -> anyhow::Result<FileStorage> {
    let config = load_config(config_path)?;
    info!("Creating ballot storage at {:?}", config.storage.path);
    FileStorage::with_config(config.storage)
}

/// Storage of a ballot that went through `genesis`. Nothing is created on disk.
fn open_storage(config_path: &Path) -> anyhow::Result<FileStorage> {
    let config = load_config(config_path)?;
    info!("Opening ballot storage at {:?}", config.storage.path);
    FileStorage::open_existing(&config.storage.path).with_context(|| {
        format!(
            "No ballot storage at {}, run `genesis` first",
            config.storage.path.display()
        )
    })
}

fn run_genesis(storage: &FileStorage, config: &BallotConfig<Ctx>) -> anyhow::Result<Output> {
    let ballot = Ballot::<Ctx>::default();
    let checkpoint = StateCheckpoint::new(storage.clone());

    let (result, checkpoint) = apply_genesis(&ballot, config, checkpoint);
    let receipt = match result {
        Ok(events) => {
            save(storage, checkpoint)?;
            TransactionReceipt {
                sender: config.official,
                outcome: TxEffect::Successful,
                events,
            }
        }
        Err(e) => TransactionReceipt {
            sender: config.official,
            outcome: TxEffect::Reverted(e.to_string()),
            events: Vec::new(),
        },
    };

    Ok(Output::Receipt(receipt.try_into()?))
}

pub(crate) fn save(
    storage: &FileStorage,
    mut checkpoint: StateCheckpoint<FileStorage>,
) -> anyhow::Result<()> {
    let writes = checkpoint.freeze();
    storage
        .commit(&writes)
        .context("Failed to save the ballot state")
}
