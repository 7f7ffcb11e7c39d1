use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::Context;
use borsh::{BorshDeserialize, BorshSerialize};
use tracing::debug;

use crate::config::Config;
use crate::storage::{OrderedWrites, Storage, StorageKey, StorageValue};

const STATE_FILE: &str = "state.borsh";

type Snapshot = BTreeMap<Vec<u8>, Vec<u8>>;

/// A [`Storage`] implementation that keeps the whole state in memory and
/// writes a snapshot file on every commit.
///
/// Clones share the same snapshot.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
    db: Arc<RwLock<Snapshot>>,
}

impl FileStorage {
    /// Creates a new [`FileStorage`] instance at the specified directory, loading
    /// the snapshot from a previous run if there is one. The directory is created if missing.
    pub fn with_path(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref().to_path_buf();
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create storage directory {}", path.display()))?;

        let state_file = path.join(STATE_FILE);
        let snapshot = if state_file.exists() {
            read_snapshot(&state_file)?
        } else {
            Snapshot::new()
        };

        Ok(Self::from_snapshot(path, snapshot))
    }

    /// Opens a storage that already holds committed state, without creating anything on disk.
    pub fn open_existing(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref().to_path_buf();
        let state_file = path.join(STATE_FILE);
        if !state_file.is_file() {
            anyhow::bail!("No committed state found in {}", path.display());
        }

        let snapshot = read_snapshot(&state_file)?;
        Ok(Self::from_snapshot(path, snapshot))
    }

    /// Creates a new [`FileStorage`] from the storage [`Config`].
    pub fn with_config(config: Config) -> Result<Self, anyhow::Error> {
        Self::with_path(config.path)
    }

    /// The directory this storage lives in.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn from_snapshot(path: PathBuf, snapshot: Snapshot) -> Self {
        debug!(
            path = %path.display(),
            entries = snapshot.len(),
            "Opened file storage"
        );

        Self {
            path,
            db: Arc::new(RwLock::new(snapshot)),
        }
    }

    // The snapshot is only swapped after a successful flush, so a panicking
    // holder never leaves it half-written and a poisoned lock is safe to reuse.
    fn read_db(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.db.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_db(&self) -> RwLockWriteGuard<'_, Snapshot> {
        self.db.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn flush(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let bytes = snapshot.try_to_vec()?;
        let tmp_file = self.path.join(format!("{STATE_FILE}.tmp"));
        {
            let mut file = fs::File::create(&tmp_file)
                .with_context(|| format!("Failed to create {}", tmp_file.display()))?;
            file.write_all(&bytes)
                .with_context(|| format!("Failed to write {}", tmp_file.display()))?;
            file.sync_all()
                .with_context(|| format!("Failed to sync {}", tmp_file.display()))?;
        }
        fs::rename(&tmp_file, self.path.join(STATE_FILE))
            .context("Failed to replace the state snapshot")?;
        Ok(())
    }
}

fn read_snapshot(state_file: &Path) -> anyhow::Result<Snapshot> {
    let bytes =
        fs::read(state_file).with_context(|| format!("Failed to read {}", state_file.display()))?;
    Snapshot::try_from_slice(&bytes)
        .with_context(|| format!("Corrupted state snapshot {}", state_file.display()))
}

impl Storage for FileStorage {
    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        let db = self.read_db();
        db.get(key.as_ref()).cloned().map(StorageValue::from)
    }

    fn commit(&self, writes: &OrderedWrites) -> anyhow::Result<()> {
        if writes.is_empty() {
            return Ok(());
        }

        let mut db = self.write_db();

        let mut next = db.clone();
        for (key, value) in writes.ordered_writes.iter() {
            next.insert(key.as_ref().clone(), value.value().to_vec());
        }

        self.flush(&next)?;
        debug!(writes = writes.len(), "Committed state to file storage");
        *db = next;
        Ok(())
    }
}
