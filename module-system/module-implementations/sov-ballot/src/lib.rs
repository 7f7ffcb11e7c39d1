#![doc = include_str!("../README.md")]

pub mod call;
mod error;
mod event;
pub mod genesis;
pub mod query;
#[cfg(test)]
mod tests;
mod types;

pub use call::CallMessage;
pub use error::BallotError;
pub use event::Event;
pub use query::BallotSummary;
use serde::{Deserialize, Serialize};
use sov_modules_api::{CallResponse, Context, Error, Module, Prefix, WorkingSet};
use sov_state::{StateMap, StateValue};
pub use types::{Phase, VoterRecord};

/// Initial configuration of the ballot. The `official` plays the part of the deployer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "C::Address: Serialize + serde::de::DeserializeOwned")]
pub struct BallotConfig<C: Context> {
    pub official: C::Address,
    pub official_name: String,
    pub proposal: String,
}

/// A single-authority yes/no ballot.
#[derive(Clone)]
pub struct Ballot<C: Context> {
    pub(crate) official: StateValue<C::Address>,

    pub(crate) official_name: StateValue<String>,

    pub(crate) proposal: StateValue<String>,

    pub(crate) phase: StateValue<Phase>,

    pub(crate) voters: StateMap<C::Address, VoterRecord>,

    pub(crate) total_voters: StateValue<u64>,

    pub(crate) total_votes: StateValue<u64>,

    // Every voter weighs one, so this is also the final result.
    pub(crate) yes_votes: StateValue<u64>,
}

const MODULE_NAME: &str = "Ballot";

impl<C: Context> Default for Ballot<C> {
    fn default() -> Self {
        let module_path = module_path!();
        let storage = |name: &'static str| -> sov_state::Prefix {
            Prefix::new_storage(module_path, MODULE_NAME, name).into()
        };

        Self {
            official: StateValue::new(storage("official")),
            official_name: StateValue::new(storage("official_name")),
            proposal: StateValue::new(storage("proposal")),
            phase: StateValue::new(storage("phase")),
            voters: StateMap::new(storage("voters")),
            total_voters: StateValue::new(storage("total_voters")),
            total_votes: StateValue::new(storage("total_votes")),
            yes_votes: StateValue::new(storage("yes_votes")),
        }
    }
}

impl<C: Context> Module for Ballot<C> {
    type Context = C;

    type Config = BallotConfig<C>;

    type CallMessage = CallMessage<C>;

    type Event = Event<C>;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), Error> {
        Ok(self.init_module(config, working_set)?)
    }

    fn call(
        &self,
        msg: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, Error> {
        match msg {
            CallMessage::AddVoter { voter, label } => {
                Ok(self.add_voter(voter, label, context, working_set)?)
            }

            CallMessage::StartVote => Ok(self.start_vote(context, working_set)?),

            CallMessage::EndVote => Ok(self.end_vote(context, working_set)?),

            CallMessage::Vote { choice } => Ok(self.vote(choice, context, working_set)?),
        }
    }
}

impl<C: Context> Ballot<C> {
    pub(crate) fn emit(&self, event: Event<C>, working_set: &mut WorkingSet<C::Storage>) {
        working_set.add_typed_event(event.key(), &event);
    }
}
