//! Agora Ledger - Quadratic voting ledger.
//!
//! This crate provides:
//! - Per-participant credit allowances with quadratic vote pricing
//! - Per-proposal vote tallies
//! - Governor-controlled round lifecycle with participation rewards

pub mod config;
pub mod error;
pub mod ledger;
pub mod math;

pub use config::LedgerConfig;
pub use error::LedgerError;
pub use ledger::{Participant, RoundSummary, VotingLedger};
pub use math::{integer_sqrt, is_perfect_square, max_votes_from_budget, quadratic_cost};
