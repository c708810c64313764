pub mod client;
pub mod config;
pub mod dashboard;
pub mod init;
pub mod lookup;
pub mod request;
pub mod reservation;
pub mod room;

use anyhow::Context;
use hotel_core::{repository::Repository, store::FileStore};
use std::path::Path;

/// Open the file-backed collections, with a hint when `init` never ran.
pub fn open_repo(root: &Path) -> anyhow::Result<Repository<FileStore>> {
    Repository::open(root).with_context(|| format!("failed to open hotel data in {}", root.display()))
}
