use std::path::{Path, PathBuf};

use sov_ballot_cli::{CallSubcommand, ImportCall, Output, QueryWorkflow, Workflows};
use sov_modules_api::utils::generate_address;
use sov_modules_api::{Address, TxEffect};

type Ctx = sov_ballot_cli::Ctx;

struct CliFixture {
    config_path: PathBuf,
    _tmpdir: tempfile::TempDir,
}

impl CliFixture {
    fn new() -> Self {
        let tmpdir = tempfile::tempdir().unwrap();
        let config_path = tmpdir.path().join("ballot_config.toml");
        let storage_path = tmpdir.path().join("state");
        std::fs::write(
            &config_path,
            format!("[storage]\npath = {:?}\n", storage_path.display().to_string()),
        )
        .unwrap();

        Self {
            config_path,
            _tmpdir: tmpdir,
        }
    }

    fn dir(&self) -> &Path {
        self._tmpdir.path()
    }

    fn run(&self, workflow: Workflows) -> Output {
        workflow.run(&self.config_path).unwrap()
    }

    fn genesis(&self, official: Address) -> Output {
        let genesis_path = self.dir().join("genesis.json");
        let genesis = serde_json::json!({
            "official": official,
            "official_name": "Official",
            "proposal": "Proposal",
        });
        std::fs::write(&genesis_path, genesis.to_string()).unwrap();
        self.run(Workflows::Genesis { path: genesis_path })
    }
}

fn assert_successful(output: &Output) {
    match output {
        Output::Receipt(receipt) => assert_eq!(receipt.outcome, TxEffect::Successful),
        Output::Value(value) => panic!("Expected a receipt, got {value}"),
    }
}

#[test]
fn full_ballot_through_the_cli() {
    let fixture = CliFixture::new();
    let official = generate_address::<Ctx>("official");
    let v1 = generate_address::<Ctx>("voter_1");
    let v2 = generate_address::<Ctx>("voter_2");

    assert_successful(&fixture.genesis(official));

    for voter in [v1, v2] {
        assert_successful(&fixture.run(Workflows::AddVoter {
            sender: official,
            voter,
            label: "voter".to_owned(),
        }));
    }
    assert_successful(&fixture.run(Workflows::StartVote { sender: official }));
    assert_successful(&fixture.run(Workflows::Vote {
        sender: v1,
        choice: true,
    }));

    let vote_json = r#"{"Vote":{"choice":false}}"#.to_owned();
    let output = fixture.run(Workflows::Submit(CallSubcommand {
        sender: v2,
        inner: ImportCall::FromString { json: vote_json },
    }));
    assert_successful(&output);
    if let Output::Receipt(receipt) = &output {
        assert_eq!(receipt.events.len(), 1);
        assert_eq!(receipt.events[0].key, "Ballot: vote_cast");
        assert_eq!(
            receipt.events[0].event,
            sov_ballot::Event::VoteCast {
                voter: v2,
                choice: false
            }
        );
    }

    assert_successful(&fixture.run(Workflows::EndVote { sender: official }));

    let Output::Value(summary) = fixture.run(Workflows::Query(QueryWorkflow::Summary)) else {
        panic!("Expected a value");
    };
    assert_eq!(summary["summary"]["total_voters"], 2);
    assert_eq!(summary["summary"]["total_votes"], 2);
    assert_eq!(summary["summary"]["yes_votes"], 1);
    assert_eq!(summary["summary"]["phase"], "Ended");
    assert_eq!(summary["phase_code"], 2);

    let Output::Value(voter) = fixture.run(Workflows::Query(QueryWorkflow::Voter { address: v1 }))
    else {
        panic!("Expected a value");
    };
    assert_eq!(voter["voted"], true);
    assert_eq!(voter["choice"], true);
}

#[test]
fn reverted_call_is_reported_and_not_saved() {
    let fixture = CliFixture::new();
    let official = generate_address::<Ctx>("official");
    let intruder = generate_address::<Ctx>("intruder");
    fixture.genesis(official);

    let output = fixture.run(Workflows::StartVote { sender: intruder });
    let reason = output.reverted_reason().unwrap();
    assert!(reason.contains("Only the official"));

    let Output::Value(result) = fixture.run(Workflows::Query(QueryWorkflow::Result)) else {
        panic!("Expected a value");
    };
    assert_eq!(result["phase"], "Created");
    assert_eq!(result["yes_votes"], 0);
}

#[test]
fn second_genesis_is_reverted() {
    let fixture = CliFixture::new();
    let official = generate_address::<Ctx>("official");

    assert!(fixture.genesis(official).reverted_reason().is_none());
    let reason = fixture
        .genesis(generate_address::<Ctx>("other"))
        .reverted_reason()
        .map(str::to_owned);
    assert_eq!(reason.as_deref(), Some("The ballot is already initialized"));
}

#[test]
fn schema_and_address_need_no_config() {
    let missing = Path::new("/definitely/not/here/ballot_config.toml");

    let schema = Workflows::Schema.run(missing).unwrap().to_json().unwrap();
    assert!(schema.contains("AddVoter"));
    assert!(schema.contains("StartVote"));

    let Output::Value(address) = (Workflows::Address {
        seed: "official".to_owned(),
    })
    .run(missing)
    .unwrap() else {
        panic!("Expected a value");
    };
    assert_eq!(
        address,
        serde_json::to_value(generate_address::<Ctx>("official")).unwrap()
    );
}

#[test]
fn missing_config_is_an_error() {
    let missing = Path::new("/definitely/not/here/ballot_config.toml");
    assert!(Workflows::Query(QueryWorkflow::Summary).run(missing).is_err());
}

#[test]
fn query_without_genesis_reports_missing_storage() {
    let fixture = CliFixture::new();
    let storage_path = fixture.dir().join("state");

    let err = Workflows::Query(QueryWorkflow::Summary)
        .run(&fixture.config_path)
        .unwrap_err();
    assert!(format!("{err:#}").contains("No ballot storage at"));
    assert!(!storage_path.exists());

    let err = Workflows::StartVote {
        sender: generate_address::<Ctx>("official"),
    }
    .run(&fixture.config_path)
    .unwrap_err();
    assert!(format!("{err:#}").contains("run `genesis` first"));
    assert!(!storage_path.exists());
}
