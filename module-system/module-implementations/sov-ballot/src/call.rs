use anyhow::{bail, Result};
use sov_modules_api::{CallResponse, Context, WorkingSet};
use tracing::debug;

use crate::{Ballot, BallotError, Event, Phase, VoterRecord};

/// Call actions supported by the module.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
    Debug,
    PartialEq,
    Clone,
)]
#[serde(bound = "C::Address: serde::Serialize + serde::de::DeserializeOwned")]
#[schemars(bound = "C::Address: ::schemars::JsonSchema", rename = "CallMessage")]
pub enum CallMessage<C: Context> {
    /// Registers a voter. Official only, before voting starts.
    AddVoter { voter: C::Address, label: String },
    /// Opens the vote. Official only.
    StartVote,
    /// Closes the vote. Official only.
    EndVote,
    /// Casts the sender's vote.
    Vote { choice: bool },
}

impl<C: Context> Ballot<C> {
    /// Adds a voter to the registry. Must be called by the official.
    pub(crate) fn add_voter(
        &self,
        voter: C::Address,
        label: String,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_official(context, working_set)?;

        let phase = self.phase.get_or_err(working_set)?;
        if phase != Phase::Created {
            bail!(BallotError::<C::Address>::RegistrationClosed { phase });
        }

        self.exit_if_voter_already_set(&voter, working_set)?;

        let total_voters = self
            .total_voters
            .get(working_set)
            .unwrap_or_default()
            .checked_add(1)
            .ok_or(BallotError::<C::Address>::Overflow)?;

        self.voters
            .set(&voter, &VoterRecord::fresh(label.clone()), working_set);
        self.total_voters.set(&total_voters, working_set);

        debug!("Registered voter {} ({} in total)", voter, total_voters);
        self.emit(Event::VoterAdded { voter, label }, working_set);

        Ok(CallResponse::default())
    }

    /// Opens the vote. Must be called by the official.
    pub(crate) fn start_vote(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_official(context, working_set)?;
        self.advance_phase(Phase::Created, Phase::Voting, working_set)?;

        self.emit(Event::VotingStarted, working_set);

        Ok(CallResponse::default())
    }

    /// Closes the vote. Must be called by the official.
    pub(crate) fn end_vote(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_official(context, working_set)?;
        self.advance_phase(Phase::Voting, Phase::Ended, working_set)?;

        let total_votes = self.total_votes.get(working_set).unwrap_or_default();
        let yes_votes = self.yes_votes.get(working_set).unwrap_or_default();
        self.emit(
            Event::VotingEnded {
                total_votes,
                yes_votes,
            },
            working_set,
        );

        Ok(CallResponse::default())
    }

    /// Records the sender's vote. Must be called by a registered voter who has not voted yet.
    pub(crate) fn vote(
        &self,
        choice: bool,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        let phase = self.phase.get_or_err(working_set)?;
        if phase != Phase::Voting {
            bail!(BallotError::<C::Address>::VotingNotOpen { phase });
        }

        let sender = context.sender();
        let record = match self.voters.get(sender, working_set) {
            Some(record) => record,
            None => bail!(BallotError::NotRegistered {
                voter: sender.clone()
            }),
        };

        if record.voted {
            bail!(BallotError::AlreadyVoted {
                voter: sender.clone()
            });
        }

        let total_votes = self
            .total_votes
            .get(working_set)
            .unwrap_or_default()
            .checked_add(1)
            .ok_or(BallotError::<C::Address>::Overflow)?;

        let mut yes_votes = self.yes_votes.get(working_set).unwrap_or_default();
        if choice {
            yes_votes = yes_votes
                .checked_add(u64::from(record.weight))
                .ok_or(BallotError::<C::Address>::Overflow)?;
        }

        self.voters.set(sender, &record.voted(choice), working_set);
        self.total_votes.set(&total_votes, working_set);
        self.yes_votes.set(&yes_votes, working_set);

        debug!("Vote from {} accepted", sender);
        self.emit(
            Event::VoteCast {
                voter: sender.clone(),
                choice,
            },
            working_set,
        );

        Ok(CallResponse::default())
    }

    fn advance_phase(
        &self,
        from: Phase,
        to: Phase,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        let current = self.phase.get_or_err(working_set)?;

        if current != from {
            bail!(BallotError::<C::Address>::InvalidPhaseTransition { from: current, to });
        }

        self.phase.set(&to, working_set);
        debug!("Ballot moved from {} to {}", from, to);
        Ok(())
    }

    fn exit_if_not_official(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        let official = self.official.get_or_err(working_set)?;

        if &official != context.sender() {
            bail!(BallotError::Unauthorized {
                sender: context.sender().clone()
            });
        }
        Ok(())
    }

    fn exit_if_voter_already_set(
        &self,
        voter: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        if self.voters.get(voter, working_set).is_some() {
            bail!(BallotError::AlreadyRegistered {
                voter: voter.clone()
            });
        }
        Ok(())
    }
}
