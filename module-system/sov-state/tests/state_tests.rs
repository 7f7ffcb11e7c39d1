use sov_state::*;

fn commit(storage: &FileStorage, working_set: WorkingSet<FileStorage>) {
    let writes = working_set.checkpoint().freeze();
    storage.commit(&writes).unwrap();
}

#[test]
fn test_revert_drops_writes_and_events() {
    let tempdir = tempfile::tempdir().unwrap();
    let storage = FileStorage::with_path(tempdir.path()).unwrap();
    let state_value = StateValue::<u32>::new(Prefix::new(vec![1]));

    let mut working_set = WorkingSet::new(storage);
    state_value.set(&1, &mut working_set);
    let mut working_set = working_set.checkpoint().to_revertable();

    state_value.set(&2, &mut working_set);
    working_set.add_typed_event("test", &2u32);
    assert_eq!(working_set.events().len(), 1);

    let mut working_set = working_set.revert().to_revertable();
    assert!(working_set.events().is_empty());
    assert_eq!(state_value.get(&mut working_set), Some(1));
}

#[test]
fn test_checkpoint_keeps_latest_write() {
    let tempdir = tempfile::tempdir().unwrap();
    let storage = FileStorage::with_path(tempdir.path()).unwrap();
    let state_map = StateMap::<u32, u32>::new(Prefix::new(vec![0]));

    let mut working_set = WorkingSet::new(storage.clone());
    state_map.set(&1, &11, &mut working_set);
    let mut working_set = working_set.checkpoint().to_revertable();
    state_map.set(&1, &12, &mut working_set);
    assert_eq!(state_map.get(&1, &mut working_set), Some(12));
    commit(&storage, working_set);

    let mut working_set = WorkingSet::new(FileStorage::with_path(tempdir.path()).unwrap());
    assert_eq!(state_map.get(&1, &mut working_set), Some(12));
}

#[test]
fn test_committed_state_survives_reopen() {
    let tempdir = tempfile::tempdir().unwrap();
    let state_map = StateMap::<String, u64>::new(Prefix::new(b"map".to_vec()));
    let state_value = StateValue::<bool>::new(Prefix::new(b"flag".to_vec()));

    {
        let storage = FileStorage::with_path(tempdir.path()).unwrap();
        let mut working_set = WorkingSet::new(storage.clone());
        state_map.set(&"alice".to_owned(), &7, &mut working_set);
        state_value.set(&true, &mut working_set);
        commit(&storage, working_set);
    }

    let storage = FileStorage::open_existing(tempdir.path()).unwrap();
    let mut working_set = WorkingSet::new(storage);
    assert_eq!(state_map.get(&"alice".to_owned(), &mut working_set), Some(7));
    assert!(state_map.get(&"bob".to_owned(), &mut working_set).is_none());
    assert_eq!(state_value.get(&mut working_set), Some(true));
}

#[test]
fn test_uncommitted_state_is_not_persisted() {
    let tempdir = tempfile::tempdir().unwrap();
    let state_value = StateValue::<u32>::new(Prefix::new(vec![2]));

    {
        let storage = FileStorage::with_path(tempdir.path()).unwrap();
        let mut working_set = WorkingSet::new(storage);
        state_value.set(&5, &mut working_set);
        let _checkpoint = working_set.checkpoint();
    }

    assert!(FileStorage::open_existing(tempdir.path()).is_err());
    let storage = FileStorage::with_path(tempdir.path()).unwrap();
    let mut working_set = WorkingSet::new(storage);
    assert!(state_value.get_or_err(&mut working_set).is_err());
}

#[test]
fn test_typed_event_roundtrip() {
    #[derive(borsh::BorshSerialize, borsh::BorshDeserialize, Debug, PartialEq)]
    struct Ping {
        seq: u64,
    }

    let tempdir = tempfile::tempdir().unwrap();
    let mut working_set = WorkingSet::new(FileStorage::with_path(tempdir.path()).unwrap());
    working_set.add_typed_event("ping", &Ping { seq: 3 });

    let events = working_set.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].key().as_str(), Some("ping"));
    assert_eq!(events[0].decode::<Ping>().unwrap(), Ping { seq: 3 });
    assert!(working_set.events().is_empty());
}
