use dashmap::DashMap;
use rocksdb::{ColumnFamilyDescriptor, Options, DB};
use std::path::Path;

use crate::error::StoreError;

/// Column family for per-identity proof history lists.
pub const CF_PROOFS: &str = "proofs";
/// Column family for the verification log.
pub const CF_LOGS: &str = "logs";
/// Column family for per-identity role records.
pub const CF_ROLES: &str = "roles";

/// Durable key-value cache behind the local stores.
///
/// Injected into the proof store, verification log, and role directory so
/// tests can substitute [`MemoryRepository`] with no disk or network
/// dependency. Last-write-wins; the stored values are immutable lists, so
/// no transactions are needed.
pub trait Repository: Send + Sync {
    fn get(&self, cf: &str, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn put(&self, cf: &str, key: &str, value: &[u8]) -> Result<(), StoreError>;
    fn list(&self, cf: &str) -> Result<Vec<(String, Vec<u8>)>, StoreError>;
}

/// RocksDB-backed repository with one column family per data type.
pub struct RocksRepository {
    db: DB,
}

impl RocksRepository {
    /// Open or create the database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(path).map_err(|e| StoreError::Storage(e.to_string()))?;

        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors = vec![
            ColumnFamilyDescriptor::new(CF_PROOFS, Options::default()),
            ColumnFamilyDescriptor::new(CF_LOGS, Options::default()),
            ColumnFamilyDescriptor::new(CF_ROLES, Options::default()),
        ];

        let db = DB::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        Ok(Self { db })
    }

    fn cf_handle(&self, cf: &str) -> Result<&rocksdb::ColumnFamily, StoreError> {
        self.db
            .cf_handle(cf)
            .ok_or_else(|| StoreError::Storage(format!("column family '{}' not found", cf)))
    }
}

impl Repository for RocksRepository {
    fn get(&self, cf: &str, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let handle = self.cf_handle(cf)?;
        self.db
            .get_cf(handle, key.as_bytes())
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    fn put(&self, cf: &str, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let handle = self.cf_handle(cf)?;
        self.db
            .put_cf(handle, key.as_bytes(), value)
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    fn list(&self, cf: &str) -> Result<Vec<(String, Vec<u8>)>, StoreError> {
        let handle = self.cf_handle(cf)?;
        let mut entries = Vec::new();
        for item in self.db.iterator_cf(handle, rocksdb::IteratorMode::Start) {
            let (key, value) = item.map_err(|e| StoreError::Storage(e.to_string()))?;
            entries.push((String::from_utf8_lossy(&key).into_owned(), value.to_vec()));
        }
        Ok(entries)
    }
}

/// In-memory repository for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryRepository {
    entries: DashMap<(String, String), Vec<u8>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for MemoryRepository {
    fn get(&self, cf: &str, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .entries
            .get(&(cf.to_string(), key.to_string()))
            .map(|v| v.clone()))
    }

    fn put(&self, cf: &str, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.entries
            .insert((cf.to_string(), key.to_string()), value.to_vec());
        Ok(())
    }

    fn list(&self, cf: &str) -> Result<Vec<(String, Vec<u8>)>, StoreError> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.key().0 == cf)
            .map(|entry| (entry.key().1.clone(), entry.value().clone()))
            .collect())
    }
}
