//! Command line front end of the ballot module.
//!
//! Every invocation opens the file storage named in the TOML config, applies at most one
//! call through the dispatcher and saves the state when the call succeeds.

pub mod config;
mod workflows;

pub use clap;
pub use config::{from_toml_path, BallotCliConfig, StorageConfig};
pub use workflows::{
    parse_choice, CallSubcommand, ImportCall, Output, PrintableEvent, PrintableReceipt,
    QueryWorkflow, Workflows,
};

/// The context the command line signs calls with.
pub type Ctx = sov_modules_api::default_context::DefaultContext;
