use std::fmt::{Debug, Display};

use crate::Phase;

/// Reasons a ballot call is rejected. A rejected call never changes the ballot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BallotError<A: Debug + Display> {
    #[error("Only the official can do this, {sender} is not the official")]
    Unauthorized { sender: A },
    #[error("Cannot move the ballot from {from} to {to}")]
    InvalidPhaseTransition { from: Phase, to: Phase },
    #[error("Voting is not open, the ballot is {phase}")]
    VotingNotOpen { phase: Phase },
    #[error("{voter} is not a registered voter")]
    NotRegistered { voter: A },
    #[error("{voter} has already voted")]
    AlreadyVoted { voter: A },
    #[error("{voter} is already registered")]
    AlreadyRegistered { voter: A },
    #[error("Voters can only be added before voting starts, the ballot is {phase}")]
    RegistrationClosed { phase: Phase },
    #[error("The ballot is already initialized")]
    AlreadyInitialized,
    #[error("Invalid ballot config: {0}")]
    InvalidConfig(String),
    #[error("Vote counter overflow")]
    Overflow,
}
