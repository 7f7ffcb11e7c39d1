use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Lifecycle stage of the ballot. It only ever moves forward.
#[derive(
    BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Phase {
    Created,
    Voting,
    Ended,
}

impl Phase {
    /// Numeric code of the phase: 0 for `Created`, 1 for `Voting`, 2 for `Ended`.
    pub fn as_u8(self) -> u8 {
        match self {
            Phase::Created => 0,
            Phase::Voting => 1,
            Phase::Ended => 2,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Created => "Created",
            Phase::Voting => "Voting",
            Phase::Ended => "Ended",
        };
        f.write_str(name)
    }
}

/// Registration of a single voter.
#[derive(
    BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, Clone, PartialEq, Eq,
)]
pub struct VoterRecord {
    pub weight: u32,
    pub voted: bool,
    /// Meaningless until `voted` is set.
    pub choice: bool,
    pub label: String,
}

impl VoterRecord {
    pub(crate) fn fresh(label: String) -> Self {
        Self {
            weight: 1,
            voted: false,
            choice: false,
            label,
        }
    }

    pub(crate) fn voted(self, choice: bool) -> Self {
        Self {
            voted: true,
            choice,
            ..self
        }
    }
}
