use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::sync::broadcast;

use super::{KeyValueStore, StoreChange, StoreError};

/// Directory-backed store: one `<key>.json` file per collection key.
pub struct FileStore {
    root: PathBuf,
    changes: broadcast::Sender<StoreChange>,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory when absent.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let (changes, _) = broadcast::channel(16);
        Ok(Self { root, changes })
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        fs::write(self.path_for(key), value)?;
        let _ = self.changes.send(StoreChange {
            key: key.to_string(),
        });
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}
