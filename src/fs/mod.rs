mod real;

#[cfg(test)]
mod mock;

pub use real::RealFileSystem;

#[cfg(test)]
pub use mock::{MockFileSystem, entry};

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::models::FsEntry;

#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Raw entries of `dir`, hidden ones included, in no particular order.
    async fn read_dir(&self, dir: &Path) -> Result<Vec<FsEntry>>;

    /// The entry for `path` itself, without following a final symlink.
    async fn stat(&self, path: &Path) -> Result<FsEntry>;
}
