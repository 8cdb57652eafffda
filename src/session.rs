use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::time::SystemTime;

/// Timestamps kept alongside the session data
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionMetadata {
    created_at: SystemTime,
    last_used: SystemTime,
}

impl Default for SessionMetadata {
    fn default() -> Self {
        let now = SystemTime::now();
        Self {
            created_at: now,
            last_used: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct SessionEntry<T> {
    data: T,
    metadata: SessionMetadata,
}

/// Session data, optionally mirrored to a JSON file so it survives server restarts
#[derive(Debug, Clone)]
pub struct SessionStore<T> {
    entry: SessionEntry<T>,
    storage_path: Option<PathBuf>,
}

impl<T> SessionStore<T>
where
    T: Serialize + for<'de> Deserialize<'de> + Clone + Default,
{
    pub fn new(storage_path: Option<PathBuf>) -> Result<Self> {
        if let Some(storage_path) = &storage_path {
            if let Some(parent) = storage_path.parent() {
                fs::create_dir_all(parent)?;
            }

            OpenOptions::new()
                .append(true)
                .create(true)
                .open(storage_path)
                .map_err(|_| anyhow!("could not open {}", storage_path.to_string_lossy()))?;
        }

        let mut store = Self {
            entry: SessionEntry::default(),
            storage_path,
        };
        store.load()?;
        Ok(store)
    }

    pub fn get(&self) -> &T {
        &self.entry.data
    }

    pub fn update<R>(&mut self, fun: impl FnOnce(&mut T) -> R) -> Result<R> {
        let result = fun(&mut self.entry.data);
        self.entry.metadata.last_used = SystemTime::now();
        self.save()?;
        Ok(result)
    }

    fn load(&mut self) -> Result<()> {
        if let Some(storage_path) = &self.storage_path {
            let contents = fs::read_to_string(storage_path)?;
            match serde_json::from_str(&contents) {
                Ok(entry) => self.entry = entry,
                Err(e) if !contents.trim().is_empty() => {
                    log::warn!(
                        "ignoring unreadable session file {}: {e}",
                        storage_path.display()
                    );
                }
                Err(_) => {}
            }
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if let Some(storage_path) = &self.storage_path {
            let contents = serde_json::to_string_pretty(&self.entry)?;
            fs::write(storage_path, contents)?;
        }
        Ok(())
    }
}
