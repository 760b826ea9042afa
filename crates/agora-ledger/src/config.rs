use serde::{Deserialize, Serialize};

/// Ledger-level configuration parameters.
///
/// These are fixed at construction time; changing them mid-round would
/// retroactively reprice votes already cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Credits granted to each participant at registration
    pub initial_allowance: u64,
    /// Allowance bonus for participants who voted when a round closes
    pub participation_reward: u64,
    /// Allowance penalty for participants who did not vote (saturating)
    pub abstention_penalty: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::civic()
    }
}

impl LedgerConfig {
    /// The standard civic configuration: 10 credits, +/-1 on round close.
    pub fn civic() -> Self {
        Self {
            initial_allowance: 10,
            participation_reward: 1,
            abstention_penalty: 1,
        }
    }

    /// Configuration with a custom starting allowance.
    pub fn with_allowance(initial_allowance: u64) -> Self {
        Self {
            initial_allowance,
            ..Self::civic()
        }
    }
}
