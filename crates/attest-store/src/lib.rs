//! Attest Store — Everything that outlives a session.
//!
//! A small [`Repository`] interface fronts the durable local cache (RocksDB
//! in production, a DashMap fake in tests). On top of it sit the
//! identity-scoped [`ProofStore`], the global [`VerificationLog`], and the
//! per-identity [`RoleDirectory`]. The shared remote document store is a
//! separate async seam ([`DocumentStore`]) with its own trust level.

pub mod error;
pub mod log;
pub mod proof_store;
pub mod remote;
pub mod repository;
pub mod roles;

pub use error::StoreError;
pub use log::VerificationLog;
pub use proof_store::ProofStore;
pub use remote::{DocumentStore, HttpDocumentStore, MemoryDocumentStore, UnreachableDocumentStore};
pub use repository::{MemoryRepository, Repository, RocksRepository, CF_LOGS, CF_PROOFS, CF_ROLES};
pub use roles::RoleDirectory;
