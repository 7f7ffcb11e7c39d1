use sov_ballot::{Ballot, BallotConfig, BallotError, CallMessage};
use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::utils::generate_address;
use sov_modules_api::{Address, CallResponse, Context, Error, FileStorage, Module, WorkingSet};
use tempfile::TempDir;

pub type C = DefaultContext;

pub struct BallotFixture {
    pub ballot: Ballot<C>,
    pub official: Address,
    pub working_set: WorkingSet<FileStorage>,
    // Keeps the storage directory alive for the duration of the test.
    _tmpdir: TempDir,
}

impl BallotFixture {
    /// A ballot right after genesis.
    pub fn new() -> Self {
        let tmpdir = tempfile::tempdir().unwrap();
        let mut working_set = WorkingSet::new(FileStorage::with_path(tmpdir.path()).unwrap());
        let ballot = Ballot::<C>::default();
        let official = generate_address::<C>("official");

        ballot
            .genesis(&default_config(official), &mut working_set)
            .unwrap();

        Self {
            ballot,
            official,
            working_set,
            _tmpdir: tmpdir,
        }
    }

    pub fn call_as(
        &mut self,
        sender: Address,
        message: CallMessage<C>,
    ) -> Result<CallResponse, Error> {
        self.ballot
            .call(message, &C::new(sender), &mut self.working_set)
    }

    pub fn official_call(&mut self, message: CallMessage<C>) -> Result<CallResponse, Error> {
        self.call_as(self.official, message)
    }

    pub fn add_voter(&mut self, voter: Address) -> Result<CallResponse, Error> {
        self.official_call(CallMessage::AddVoter {
            voter,
            label: format!("label of {}", voter),
        })
    }

    pub fn vote(&mut self, voter: Address, choice: bool) -> Result<CallResponse, Error> {
        self.call_as(voter, CallMessage::Vote { choice })
    }

    /// Registers `count` voters and opens the vote.
    pub fn open_with_voters(&mut self, count: usize) -> Vec<Address> {
        let voters: Vec<_> = (0..count).map(voter_address).collect();
        for voter in &voters {
            self.add_voter(*voter).unwrap();
        }
        self.official_call(CallMessage::StartVote).unwrap();
        voters
    }
}

pub fn default_config(official: Address) -> BallotConfig<C> {
    BallotConfig {
        official,
        official_name: "Official".to_owned(),
        proposal: "Proposal".to_owned(),
    }
}

pub fn voter_address(index: usize) -> Address {
    generate_address::<C>(&format!("voter_{}", index))
}

/// The ballot error behind a rejected call.
#[allow(dead_code)]
pub fn ballot_error(result: Result<CallResponse, Error>) -> BallotError<Address> {
    let Error::ModuleError(err) = result.expect_err("The call should have been rejected");
    err.downcast_ref::<BallotError<Address>>()
        .cloned()
        .unwrap_or_else(|| panic!("Unexpected error: {err:?}"))
}
