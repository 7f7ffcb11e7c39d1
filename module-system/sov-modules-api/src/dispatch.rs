//! Atomic application of genesis and calls to a [`StateCheckpoint`].

use serde::{Deserialize, Serialize};
use sov_state::{Event, StateCheckpoint};
use tracing::{debug, error};

use crate::{Context, Error, Module, Spec};

type Checkpoint<M> = StateCheckpoint<<<M as Module>::Context as Spec>::Storage>;

/// Outcome of a single dispatched call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxEffect {
    /// The call succeeded and its writes were folded into the checkpoint.
    Successful,
    /// The call failed. None of its writes or events survived.
    Reverted(String),
}

/// What a caller gets back after submitting a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionReceipt<A> {
    pub sender: A,
    pub outcome: TxEffect,
    /// Empty when the call reverted.
    pub events: Vec<Event>,
}

impl<A> TransactionReceipt<A> {
    pub fn is_successful(&self) -> bool {
        self.outcome == TxEffect::Successful
    }
}

/// Runs `genesis` on a fresh revertable working set. On failure nothing is written.
pub fn apply_genesis<M: Module>(
    module: &M,
    config: &M::Config,
    checkpoint: Checkpoint<M>,
) -> (Result<Vec<Event>, Error>, Checkpoint<M>) {
    let mut working_set = checkpoint.to_revertable();

    match module.genesis(config, &mut working_set) {
        Ok(()) => {
            let events = working_set.take_events();
            debug!("Genesis applied, {} events", events.len());
            (Ok(events), working_set.checkpoint())
        }
        Err(e) => {
            error!("Genesis failed: {}", e);
            (Err(e), working_set.revert())
        }
    }
}

/// Runs one call against `checkpoint`.
///
/// A successful call is folded into the returned checkpoint together with its events.
/// A failed call is reverted: the returned checkpoint is exactly the one passed in.
pub fn apply_call<M: Module>(
    module: &M,
    message: M::CallMessage,
    context: &M::Context,
    checkpoint: Checkpoint<M>,
) -> (
    TransactionReceipt<<M::Context as Spec>::Address>,
    Checkpoint<M>,
) {
    let sender = context.sender().clone();
    debug!("Applying call from {}: {:?}", sender, message);

    let mut working_set = checkpoint.to_revertable();

    match module.call(message, context, &mut working_set) {
        Ok(_) => {
            let events = working_set.take_events();
            debug!("Call from {} succeeded with {} events", sender, events.len());
            let receipt = TransactionReceipt {
                sender,
                outcome: TxEffect::Successful,
                events,
            };
            (receipt, working_set.checkpoint())
        }
        Err(e) => {
            error!("Call from {} reverted: {}", sender, e);
            let receipt = TransactionReceipt {
                sender,
                outcome: TxEffect::Reverted(e.to_string()),
                events: Vec::new(),
            };
            (receipt, working_set.revert())
        }
    }
}
