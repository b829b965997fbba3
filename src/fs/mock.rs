use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use crate::models::{EntryKind, FsEntry};

use super::FileSystem;

#[derive(Clone, Debug)]
enum Response {
    Ok(Vec<FsEntry>),
    Err(String),
}

#[derive(Clone, Default)]
pub struct MockFileSystem {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    responses: HashMap<PathBuf, Response>,
    stats: HashMap<PathBuf, FsEntry>,
    calls: Vec<PathBuf>,
}

impl MockFileSystem {
    /// Registers `dir` as a directory holding `entries`.
    pub fn set_dir_entries(&self, dir: impl Into<PathBuf>, entries: Vec<FsEntry>) {
        let dir = dir.into();
        let mut inner = self.inner.lock().expect("mock fs lock");
        let name = dir.to_string_lossy().into_owned();
        inner
            .stats
            .entry(dir.clone())
            .or_insert_with(|| entry(&name, EntryKind::Directory));
        inner.responses.insert(dir, Response::Ok(entries));
    }

    pub fn set_stat(&self, path: impl Into<PathBuf>, entry: FsEntry) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.stats.insert(path.into(), entry);
    }

    pub fn set_error(&self, dir: impl Into<PathBuf>, message: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner
            .responses
            .insert(dir.into(), Response::Err(message.into()));
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.calls.clone()
    }
}

#[async_trait]
impl FileSystem for MockFileSystem {
    async fn read_dir(&self, dir: &Path) -> Result<Vec<FsEntry>> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.calls.push(dir.to_path_buf());

        match inner.responses.get(dir) {
            Some(Response::Ok(entries)) => Ok(entries.clone()),
            Some(Response::Err(message)) => Err(anyhow!("{message}")),
            None => Err(anyhow!("no mock response for {}", dir.display())),
        }
    }

    async fn stat(&self, path: &Path) -> Result<FsEntry> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner
            .stats
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("No such file or directory"))
    }
}

/// A plain entry with `rw-r--r--` (or `rwxr-xr-x` for directories) permissions.
pub fn entry(name: &str, kind: EntryKind) -> FsEntry {
    let mode = match kind {
        EntryKind::Directory => 0o040755,
        EntryKind::Symlink => 0o120777,
        EntryKind::File | EntryKind::Other => 0o100644,
    };
    FsEntry {
        name: name.to_owned(),
        kind,
        mode,
        size: 0,
        modified: SystemTime::UNIX_EPOCH,
        uid: 0,
        gid: 0,
        link_target: None,
    }
}
