//! Read-only accessors. None of them require authorization.

use anyhow::Result;
use sov_modules_api::WorkingSet;

use crate::{Ballot, Phase, VoterRecord};

/// All scalar fields of the ballot in one response.
#[derive(Debug, Clone, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct BallotSummary<A> {
    pub official: A,
    pub official_name: String,
    pub proposal: String,
    pub phase: Phase,
    pub total_voters: u64,
    pub total_votes: u64,
    pub yes_votes: u64,
}

impl<C: sov_modules_api::Context> Ballot<C> {
    pub fn official(&self, working_set: &mut WorkingSet<C::Storage>) -> Result<C::Address> {
        Ok(self.official.get_or_err(working_set)?)
    }

    pub fn official_name(&self, working_set: &mut WorkingSet<C::Storage>) -> Result<String> {
        Ok(self.official_name.get_or_err(working_set)?)
    }

    pub fn proposal(&self, working_set: &mut WorkingSet<C::Storage>) -> Result<String> {
        Ok(self.proposal.get_or_err(working_set)?)
    }

    /// Current phase, see [`Phase::as_u8`] for its numeric code.
    pub fn phase(&self, working_set: &mut WorkingSet<C::Storage>) -> Result<Phase> {
        Ok(self.phase.get_or_err(working_set)?)
    }

    pub fn total_voters(&self, working_set: &mut WorkingSet<C::Storage>) -> u64 {
        self.total_voters.get(working_set).unwrap_or_default()
    }

    pub fn total_votes(&self, working_set: &mut WorkingSet<C::Storage>) -> u64 {
        self.total_votes.get(working_set).unwrap_or_default()
    }

    /// Number of `yes` votes. Available in every phase, final once the ballot has ended.
    pub fn final_result(&self, working_set: &mut WorkingSet<C::Storage>) -> u64 {
        self.yes_votes.get(working_set).unwrap_or_default()
    }

    pub fn voter_register(
        &self,
        voter: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Option<VoterRecord> {
        self.voters.get(voter, working_set)
    }

    pub fn summary(
        &self,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<BallotSummary<C::Address>> {
        Ok(BallotSummary {
            official: self.official(working_set)?,
            official_name: self.official_name(working_set)?,
            proposal: self.proposal(working_set)?,
            phase: self.phase(working_set)?,
            total_voters: self.total_voters(working_set),
            total_votes: self.total_votes(working_set),
            yes_votes: self.final_result(working_set),
        })
    }
}
