pub mod history;
pub mod init;
pub mod log;
pub mod prove;
pub mod role;
pub mod verify;

use std::sync::Arc;

use attest_store::{Repository, RocksRepository};

use crate::config::AttestConfig;

/// Open the durable local repository from the configured data directory.
pub fn open_repository(config: &AttestConfig) -> anyhow::Result<Arc<dyn Repository>> {
    let repo = RocksRepository::open(&config.storage.data_dir)?;
    Ok(Arc::new(repo))
}
