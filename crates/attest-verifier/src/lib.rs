//! Attest Verifier — Resolves a proof identifier to a verification result.
//!
//! Lookup is an ordered chain of strategies, highest trust first: the
//! shared remote document store, then the identity's own issuance history,
//! then a syntax-only heuristic accept. First hit wins and is logged;
//! a miss on every tier is `NotFound` and leaves no log entry. Adding or
//! removing a tier is one line in the chain.

pub mod error;
pub mod strategy;
pub mod verifier;

pub use error::VerifierError;
pub use strategy::{HeuristicLookup, LocalCacheLookup, LookupStrategy, RemoteLookup};
pub use verifier::ProofVerifier;
