use anyhow::{bail, Result};
use sov_modules_api::WorkingSet;
use tracing::info;

use crate::{Ballot, BallotError, Event, Phase};

impl<C: sov_modules_api::Context> Ballot<C> {
    pub(crate) fn init_module(
        &self,
        config: &<Self as sov_modules_api::Module>::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        if self.official.get(working_set).is_some() {
            bail!(BallotError::<C::Address>::AlreadyInitialized);
        }

        if config.official_name.trim().is_empty() {
            bail!(BallotError::<C::Address>::InvalidConfig(
                "official name is empty".to_owned()
            ));
        }

        if config.proposal.trim().is_empty() {
            bail!(BallotError::<C::Address>::InvalidConfig(
                "proposal is empty".to_owned()
            ));
        }

        self.official.set(&config.official, working_set);
        self.official_name.set(&config.official_name, working_set);
        self.proposal.set(&config.proposal, working_set);
        self.phase.set(&Phase::Created, working_set);
        self.total_voters.set(&0, working_set);
        self.total_votes.set(&0, working_set);
        self.yes_votes.set(&0, working_set);

        info!(
            "Ballot created by {} on proposal {:?}",
            config.official, config.proposal
        );
        self.emit(
            Event::BallotCreated {
                official: config.official.clone(),
                official_name: config.official_name.clone(),
                proposal: config.proposal.clone(),
            },
            working_set,
        );

        Ok(())
    }
}
