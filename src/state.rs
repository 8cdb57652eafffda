use std::path::PathBuf;

use anyhow::{anyhow, Result};
use fieldwork::Fieldwork;
use serde::{Deserialize, Serialize};

use crate::operation::EditOperation;
use crate::session::SessionStore;

/// Session data for deck editing
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DeckSession {
    /// Directory that relative file paths resolve against
    pub context_path: Option<PathBuf>,
    /// Batch waiting for `commit_staged`
    pub staged: Option<StagedEdits>,
}

/// A previewed batch of edits for one deck file
#[derive(Debug, Clone, PartialEq, Eq, Fieldwork, Serialize, Deserialize)]
#[fieldwork(get)]
pub struct StagedEdits {
    pub file_path: PathBuf,
    pub operations: Vec<EditOperation>,
}

type CommitFn = Box<dyn FnMut(PathBuf, String) + 'static>;

#[derive(Fieldwork)]
#[fieldwork(get)]
pub struct SlideEditTools {
    #[fieldwork(get_mut)]
    session_store: SessionStore<DeckSession>,
    #[fieldwork(set, get_mut, option = false)]
    commit_fn: Option<CommitFn>,
}

impl std::fmt::Debug for SlideEditTools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideEditTools")
            .field("session_store", &self.session_store)
            .field("commit_fn", &self.commit_fn.is_some())
            .finish()
    }
}

impl SlideEditTools {
    pub fn new(storage_path: Option<&str>) -> Result<Self> {
        let storage_path = storage_path.map(|s| PathBuf::from(&*shellexpand::tilde(s)));
        Ok(Self {
            session_store: SessionStore::new(storage_path)?,
            commit_fn: None,
        })
    }

    pub fn context(&self) -> Option<&PathBuf> {
        self.session_store.get().context_path.as_ref()
    }

    pub fn set_context(&mut self, path: PathBuf) -> Result<()> {
        self.session_store
            .update(|session| session.context_path = Some(path))
    }

    /// Stage a batch, replacing any batch already staged
    pub fn stage(&mut self, staged: Option<StagedEdits>) -> Result<()> {
        self.session_store.update(|session| session.staged = staged)
    }

    pub fn staged(&self) -> Option<&StagedEdits> {
        self.session_store.get().staged.as_ref()
    }

    /// Take the staged batch, removing it from the session
    pub fn take_staged(&mut self) -> Result<Option<StagedEdits>> {
        self.session_store.update(|session| session.staged.take())
    }

    /// Write a committed document, through the commit hook when one is installed
    pub fn write_output(&mut self, path: PathBuf, output: String) -> Result<()> {
        match &mut self.commit_fn {
            Some(commit) => {
                commit(path, output);
                Ok(())
            }
            None => std::fs::write(&path, output)
                .map_err(|e| anyhow!("could not write {}: {e}", path.display())),
        }
    }

    /// Resolve `path_str` against the session context unless it is absolute
    pub fn resolve_path(&self, path_str: &str) -> Result<PathBuf> {
        let path = PathBuf::from(&*shellexpand::tilde(path_str));

        if path.is_absolute() {
            return Ok(std::fs::canonicalize(path)?);
        }

        match self.context() {
            Some(context) => Ok(std::fs::canonicalize(context.join(&path))?),
            None => Err(anyhow!(
                "No context set. Use set_context first or provide an absolute path to `{path_str}`."
            )),
        }
    }
}
