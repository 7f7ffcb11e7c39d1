use sov_modules_api::Context;

/// Notifications recorded by the ballot, one per successful state change.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    PartialEq,
    Clone,
)]
#[serde(bound = "C::Address: serde::Serialize + serde::de::DeserializeOwned")]
pub enum Event<C: Context> {
    BallotCreated {
        official: C::Address,
        official_name: String,
        proposal: String,
    },
    VoterAdded {
        voter: C::Address,
        label: String,
    },
    VotingStarted,
    VotingEnded {
        total_votes: u64,
        yes_votes: u64,
    },
    VoteCast {
        voter: C::Address,
        choice: bool,
    },
}

impl<C: Context> Event<C> {
    /// Key under which the event is recorded in the working set.
    pub fn key(&self) -> &'static str {
        match self {
            Event::BallotCreated { .. } => "Ballot: created",
            Event::VoterAdded { .. } => "Ballot: voter_added",
            Event::VotingStarted => "Ballot: voting_started",
            Event::VotingEnded { .. } => "Ballot: voting_ended",
            Event::VoteCast { .. } => "Ballot: vote_cast",
        }
    }
}
