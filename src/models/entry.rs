use std::time::SystemTime;

const EXECUTABLE_BITS: u32 = 0o111;

/// Any of the owner, group or other execute bits.
pub fn is_executable_mode(mode: u32) -> bool {
    mode & EXECUTABLE_BITS != 0
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
    Other,
}

/// Where a symlink points, resolved once at scan time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LinkTarget {
    Resolved {
        path: String,
        kind: EntryKind,
        mode: u32,
    },
    Broken,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FsEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Raw `st_mode` bits, including the file type.
    pub mode: u32,
    pub size: u64,
    pub modified: SystemTime,
    pub uid: u32,
    pub gid: u32,
    pub link_target: Option<LinkTarget>,
}

impl FsEntry {
    pub fn is_executable(&self) -> bool {
        is_executable_mode(self.mode)
    }
}
