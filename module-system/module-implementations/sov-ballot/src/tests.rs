use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::utils::generate_address;
use sov_modules_api::{Context, FileStorage, Module, WorkingSet};

use super::call::CallMessage;
use super::{Ballot, BallotConfig, Event, Phase};

type C = DefaultContext;

#[test]
fn test_ballot() {
    let official = generate_address::<C>("official");
    let tmpdir = tempfile::tempdir().unwrap();
    let mut working_set = WorkingSet::new(FileStorage::with_path(tmpdir.path()).unwrap());

    let official_context = C::new(official);
    let ballot = Ballot::<C>::default();

    // Init module
    {
        let config = BallotConfig {
            official,
            official_name: "Official".to_owned(),
            proposal: "Proposal".to_owned(),
        };
        ballot.genesis(&config, &mut working_set).unwrap();

        assert_eq!(ballot.phase(&mut working_set).unwrap(), Phase::Created);
        assert_eq!(ballot.total_voters(&mut working_set), 0);
        assert_eq!(ballot.official(&mut working_set).unwrap(), official);
        assert_eq!(ballot.official_name(&mut working_set).unwrap(), "Official");
        assert_eq!(ballot.proposal(&mut working_set).unwrap(), "Proposal");
    }

    let voter_1 = generate_address::<C>("voter_1");
    let voter_2 = generate_address::<C>("voter_2");

    // Register voters
    {
        let add_voter = CallMessage::AddVoter {
            voter: voter_1,
            label: "Voter1".to_owned(),
        };
        ballot
            .call(add_voter, &official_context, &mut working_set)
            .unwrap();

        let add_voter = CallMessage::AddVoter {
            voter: voter_2,
            label: "Voter2".to_owned(),
        };
        ballot
            .call(add_voter, &official_context, &mut working_set)
            .unwrap();

        assert_eq!(ballot.total_voters(&mut working_set), 2);
        assert!(!ballot.voter_register(&voter_1, &mut working_set).unwrap().voted);
    }

    ballot
        .call(CallMessage::StartVote, &official_context, &mut working_set)
        .unwrap();
    assert_eq!(ballot.phase(&mut working_set).unwrap().as_u8(), 1);

    // Vote
    {
        let sender_context = C::new(voter_1);
        let vote = CallMessage::Vote { choice: true };
        ballot.call(vote, &sender_context, &mut working_set).unwrap();

        let sender_context = C::new(voter_2);
        let vote = CallMessage::Vote { choice: false };
        ballot.call(vote, &sender_context, &mut working_set).unwrap();
    }

    ballot
        .call(CallMessage::EndVote, &official_context, &mut working_set)
        .unwrap();

    // Get result
    {
        assert_eq!(ballot.total_votes(&mut working_set), 2);
        assert_eq!(ballot.final_result(&mut working_set), 1);
        assert_eq!(ballot.phase(&mut working_set).unwrap(), Phase::Ended);

        let record_1 = ballot.voter_register(&voter_1, &mut working_set).unwrap();
        assert!(record_1.voted);
        assert!(record_1.choice);
        assert_eq!(record_1.weight, 1);
        assert_eq!(record_1.label, "Voter1");

        let record_2 = ballot.voter_register(&voter_2, &mut working_set).unwrap();
        assert!(record_2.voted);
        assert!(!record_2.choice);
    }

    // Events, in emission order
    {
        let keys: Vec<_> = working_set
            .events()
            .iter()
            .map(|event| event.key().as_str().unwrap().to_owned())
            .collect();
        assert_eq!(
            keys,
            vec![
                "Ballot: created",
                "Ballot: voter_added",
                "Ballot: voter_added",
                "Ballot: voting_started",
                "Ballot: vote_cast",
                "Ballot: vote_cast",
                "Ballot: voting_ended",
            ]
        );

        let vote_cast: Event<C> = working_set.events()[4].decode().unwrap();
        assert_eq!(
            vote_cast,
            Event::VoteCast {
                voter: voter_1,
                choice: true
            }
        );

        let voting_ended: Event<C> = working_set.events()[6].decode().unwrap();
        assert_eq!(
            voting_ended,
            Event::VotingEnded {
                total_votes: 2,
                yes_votes: 1
            }
        );
    }
}

#[test]
fn test_summary_matches_queries() {
    let official = generate_address::<C>("official");
    let tmpdir = tempfile::tempdir().unwrap();
    let mut working_set = WorkingSet::new(FileStorage::with_path(tmpdir.path()).unwrap());
    let ballot = Ballot::<C>::default();

    let config = BallotConfig {
        official,
        official_name: "Clerk".to_owned(),
        proposal: "Build a bridge".to_owned(),
    };
    ballot.genesis(&config, &mut working_set).unwrap();

    let summary = ballot.summary(&mut working_set).unwrap();
    assert_eq!(summary.official, official);
    assert_eq!(summary.official_name, "Clerk");
    assert_eq!(summary.proposal, "Build a bridge");
    assert_eq!(summary.phase, Phase::Created);
    assert_eq!(summary.total_voters, 0);
    assert_eq!(summary.total_votes, 0);
    assert_eq!(summary.yes_votes, 0);
}

#[test]
fn test_queries_before_genesis() {
    let tmpdir = tempfile::tempdir().unwrap();
    let mut working_set = WorkingSet::new(FileStorage::with_path(tmpdir.path()).unwrap());
    let ballot = Ballot::<C>::default();

    assert!(ballot.phase(&mut working_set).is_err());
    assert!(ballot.summary(&mut working_set).is_err());
    assert_eq!(ballot.total_voters(&mut working_set), 0);
    assert_eq!(ballot.final_result(&mut working_set), 0);
}

#[test]
fn test_phase_codes() {
    assert_eq!(Phase::Created.as_u8(), 0);
    assert_eq!(Phase::Voting.as_u8(), 1);
    assert_eq!(Phase::Ended.as_u8(), 2);
    assert_eq!(Phase::Voting.to_string(), "Voting");
}
