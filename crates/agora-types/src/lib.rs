//! Agora Types - Core type definitions for the AGORA voting ledger.
//!
//! This crate provides the identifier types used throughout the ledger:
//! - Addresses (20-byte, Bech32m encoded)
//! - Proposal identifiers

pub mod address;
pub mod error;
pub mod proposal_id;

pub use address::Address;
pub use error::TypesError;
pub use proposal_id::ProposalId;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Address, ProposalId, TypesError};
}
