use sov_ballot::Ballot;
use sov_modules_api::{Address, FileStorage, WorkingSet};

use crate::Ctx;

/// Read the ballot state
#[derive(clap::Subcommand, Debug)]
pub enum QueryWorkflow {
    /// Every scalar field of the ballot
    Summary,
    /// The registration record of a voter
    Voter { address: Address },
    /// The number of yes votes
    Result,
}

impl QueryWorkflow {
    pub fn run(self, storage: FileStorage) -> anyhow::Result<serde_json::Value> {
        let ballot = Ballot::<Ctx>::default();
        let mut working_set = WorkingSet::new(storage);

        let value = match self {
            QueryWorkflow::Summary => {
                let summary = ballot.summary(&mut working_set)?;
                serde_json::json!({
                    "summary": summary,
                    "phase_code": summary.phase.as_u8(),
                })
            }
            QueryWorkflow::Voter { address } => {
                serde_json::to_value(ballot.voter_register(&address, &mut working_set))?
            }
            QueryWorkflow::Result => serde_json::json!({
                "phase": ballot.phase(&mut working_set)?,
                "total_votes": ballot.total_votes(&mut working_set),
                "yes_votes": ballot.final_result(&mut working_set),
            }),
        };

        Ok(value)
    }
}
