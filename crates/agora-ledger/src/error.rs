use agora_types::Address;
use thiserror::Error;

/// Errors that can occur in ledger operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Not enough votes: allowance {available}, requested {requested}")]
    InsufficientAllowance { available: u64, requested: u64 },

    #[error("Count must be quadratic: {0} is not a perfect square")]
    NonQuadraticCost(u64),

    #[error("Vote cost must be positive")]
    ZeroCost,

    #[error("Unknown participant: {0}")]
    UnknownParticipant(Address),

    #[error("Already registered: {0}")]
    AlreadyRegistered(Address),

    #[error("Only the governor can close voting, not {0}")]
    NotGovernor(Address),

    #[error("Vote count overflow")]
    Overflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_allowance_display() {
        let err = LedgerError::InsufficientAllowance { available: 10, requested: 11 };
        let msg = err.to_string();
        assert!(msg.starts_with("Not enough votes"));
        assert!(msg.contains("10"));
        assert!(msg.contains("11"));
    }

    #[test]
    fn test_non_quadratic_display() {
        let err = LedgerError::NonQuadraticCost(2);
        assert!(err.to_string().starts_with("Count must be quadratic"));
    }
}
