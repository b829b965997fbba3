use anyhow::Result;
use async_trait::async_trait;
use std::fs::{FileType, Metadata};
use std::path::Path;
use std::time::SystemTime;
use tokio::task;

use crate::models::{EntryKind, FsEntry, LinkTarget};

use super::FileSystem;

pub struct RealFileSystem;

#[async_trait]
impl FileSystem for RealFileSystem {
    async fn read_dir(&self, dir: &Path) -> Result<Vec<FsEntry>> {
        let dir = dir.to_path_buf();
        task::spawn_blocking(move || {
            let mut entries = Vec::new();
            for entry in std::fs::read_dir(&dir)?.filter_map(|e| e.ok()) {
                let metadata = match entry.metadata() {
                    Ok(metadata) => metadata,
                    Err(err) => {
                        tracing::debug!(path = %entry.path().display(), %err, "skipping entry");
                        continue;
                    }
                };
                let name = entry.file_name().to_string_lossy().into_owned();
                entries.push(to_entry(&entry.path(), name, &metadata));
            }
            Ok(entries)
        })
        .await?
    }

    async fn stat(&self, path: &Path) -> Result<FsEntry> {
        let path = path.to_path_buf();
        task::spawn_blocking(move || {
            let metadata = std::fs::symlink_metadata(&path)?;
            let name = path.as_os_str().to_string_lossy().into_owned();
            Ok(to_entry(&path, name, &metadata))
        })
        .await?
    }
}

fn to_entry(path: &Path, name: String, metadata: &Metadata) -> FsEntry {
    let kind = entry_kind(metadata.file_type());
    let (mode, uid, gid) = ownership(metadata);
    let link_target = (kind == EntryKind::Symlink).then(|| resolve_link(path));

    FsEntry {
        name,
        kind,
        mode,
        size: metadata.len(),
        modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        uid,
        gid,
        link_target,
    }
}

fn entry_kind(file_type: FileType) -> EntryKind {
    if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}

/// Reads the link text, then stats what it finally points at.
fn resolve_link(path: &Path) -> LinkTarget {
    let Ok(text) = std::fs::read_link(path) else {
        return LinkTarget::Broken;
    };
    match std::fs::metadata(path) {
        Ok(target) => LinkTarget::Resolved {
            path: text.to_string_lossy().into_owned(),
            kind: entry_kind(target.file_type()),
            mode: ownership(&target).0,
        },
        Err(_) => LinkTarget::Broken,
    }
}

#[cfg(unix)]
fn ownership(metadata: &Metadata) -> (u32, u32, u32) {
    use std::os::unix::fs::MetadataExt;
    (metadata.mode(), metadata.uid(), metadata.gid())
}

#[cfg(not(unix))]
fn ownership(metadata: &Metadata) -> (u32, u32, u32) {
    let type_bits = if metadata.is_dir() { 0o040000 } else { 0o100000 };
    let perm_bits = if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    };
    (type_bits | perm_bits, 0, 0)
}
