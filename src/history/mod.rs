//! Persisted proposal history.
//!
//! Archived conversations are kept most-recent-first in a single
//! `history.json` under the data directory. The whole collection is read
//! once when the store opens and fully rewritten after every mutation.

use crate::chat::Message;
use crate::config::XdgDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the serialized history collection.
pub const HISTORY_FILE: &str = "history.json";

/// History persistence errors.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("History serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// An archived conversation snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalEntry {
    pub id: String,
    pub title: String,
    /// Archive date, `dd/mm/yyyy`.
    pub date: String,
    pub messages: Vec<Message>,
}

/// Store for archived proposals.
pub struct HistoryStore {
    dir: PathBuf,
    entries: Vec<ProposalEntry>,
}

impl HistoryStore {
    /// Open the store in the default data directory.
    pub fn open() -> Result<Self, HistoryError> {
        Self::with_dir(XdgDirs::new().data)
    }

    /// Open the store in a specific directory (used by tests).
    pub fn with_dir(dir: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let dir = dir.as_ref().to_path_buf();
        let entries = read_entries(&dir.join(HISTORY_FILE))?;
        Ok(Self { dir, entries })
    }

    /// Path of the backing file.
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    /// Archived entries, most recent first.
    pub fn entries(&self) -> &[ProposalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ProposalEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Archive a conversation snapshot under the given title.
    ///
    /// A conversation holding only the greeting is not worth keeping, so
    /// snapshots with one message or fewer return `None` and leave the
    /// collection untouched.
    pub fn archive(
        &mut self,
        title: &str,
        messages: &[Message],
    ) -> Result<Option<ProposalEntry>, HistoryError> {
        if messages.len() <= 1 {
            return Ok(None);
        }

        let entry = ProposalEntry {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            date: chrono::Local::now().format("%d/%m/%Y").to_string(),
            messages: messages.to_vec(),
        };

        self.entries.insert(0, entry.clone());
        self.persist()?;

        tracing::debug!(title = %entry.title, "archived proposal");
        Ok(Some(entry))
    }

    /// Remove an entry by id. Returns whether it existed; deleting an
    /// unknown id is a no-op.
    pub fn delete(&mut self, id: &str) -> Result<bool, HistoryError> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);

        if self.entries.len() == before {
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    /// Rewrite the whole collection to disk.
    fn persist(&self) -> Result<(), HistoryError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(self.file_path(), json)?;
        Ok(())
    }
}

/// Read the collection from disk. A missing file means an empty history;
/// a malformed one is logged and treated as empty rather than aborting.
fn read_entries(path: &Path) -> Result<Vec<ProposalEntry>, HistoryError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    match serde_json::from_str(&raw) {
        Ok(entries) => Ok(entries),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "malformed history file, starting empty");
            Ok(Vec::new())
        }
    }
}
