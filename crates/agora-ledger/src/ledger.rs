//! The quadratic voting ledger.
//!
//! Participants spend credits from a personal allowance to vote on
//! proposals; `n` votes cost `n^2` credits. A designated governor closes
//! each round, which refunds spent credits and nudges allowances up for
//! voters and down for absentees.

use std::collections::HashMap;

use agora_types::{Address, ProposalId};
use serde::{Deserialize, Serialize};

use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::math::{integer_sqrt, is_perfect_square};

/// Per-participant ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Remaining spendable credits
    pub allowance: u64,
    /// Credits spent in the current round (refunded at close)
    pub spent_this_round: u64,
    /// Whether the participant has voted in the current round
    pub voted_this_round: bool,
}

impl Participant {
    fn new(allowance: u64) -> Self {
        Self {
            allowance,
            spent_this_round: 0,
            voted_this_round: false,
        }
    }
}

/// Outcome of closing a voting round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    /// The round that was closed
    pub round: u64,
    /// Participants who voted in the round
    pub voters: usize,
    /// Participants who did not
    pub absentees: usize,
}

/// Single-writer quadratic voting ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotingLedger {
    governor: Address,
    config: LedgerConfig,
    participants: HashMap<Address, Participant>,
    tallies: HashMap<ProposalId, u64>,
    round: u64,
}

impl VotingLedger {
    /// Create a ledger with an empty roster.
    pub fn new(governor: Address, config: LedgerConfig) -> Self {
        Self {
            governor,
            config,
            participants: HashMap::new(),
            tallies: HashMap::new(),
            round: 0,
        }
    }

    /// Create a ledger with the roster fixed at construction.
    ///
    /// Duplicate addresses in `participants` collapse to one entry.
    pub fn with_participants(
        governor: Address,
        config: LedgerConfig,
        participants: impl IntoIterator<Item = Address>,
    ) -> Self {
        let mut ledger = Self::new(governor, config);
        for address in participants {
            ledger
                .participants
                .entry(address)
                .or_insert_with(|| Participant::new(config.initial_allowance));
        }
        ledger
    }

    /// Register a participant with the initial allowance.
    pub fn register(&mut self, address: Address) -> Result<(), LedgerError> {
        if self.participants.contains_key(&address) {
            return Err(LedgerError::AlreadyRegistered(address));
        }

        self.participants
            .insert(address, Participant::new(self.config.initial_allowance));

        tracing::debug!("Registered participant {}", address);
        Ok(())
    }

    /// Cast a vote: spend `cost` credits on `proposal`.
    ///
    /// `cost` must be a perfect square; the vote weight added to the tally
    /// is `sqrt(cost)`. All checks run before any mutation, so a rejected
    /// call leaves the ledger untouched. Returns the vote weight.
    pub fn vote(
        &mut self,
        caller: Address,
        cost: u64,
        proposal: ProposalId,
    ) -> Result<u64, LedgerError> {
        let allowance = self
            .participants
            .get(&caller)
            .ok_or(LedgerError::UnknownParticipant(caller))?
            .allowance;

        // Allowance is checked before squareness: overspending reports
        // "Not enough votes" even when the cost is also non-square.
        if cost > allowance {
            return Err(LedgerError::InsufficientAllowance {
                available: allowance,
                requested: cost,
            });
        }

        if cost == 0 {
            return Err(LedgerError::ZeroCost);
        }

        if !is_perfect_square(cost) {
            return Err(LedgerError::NonQuadraticCost(cost));
        }

        let votes = integer_sqrt(cost);
        let new_tally = self
            .vote_count(proposal)
            .checked_add(votes)
            .ok_or(LedgerError::Overflow)?;

        let participant = self
            .participants
            .get_mut(&caller)
            .ok_or(LedgerError::UnknownParticipant(caller))?;
        participant.allowance -= cost;
        participant.spent_this_round += cost;
        participant.voted_this_round = true;
        self.tallies.insert(proposal, new_tally);

        tracing::debug!(
            "Vote accepted: {} cast {} votes ({} credits) on proposal {}",
            caller,
            votes,
            cost,
            proposal
        );

        Ok(votes)
    }

    /// Close the current round. Governor only.
    ///
    /// Every participant gets their spent credits back, voters gain the
    /// participation reward, absentees lose the abstention penalty
    /// (saturating at zero). Has-voted markers reset and the next round
    /// opens implicitly.
    pub fn close_voting(&mut self, caller: Address) -> Result<RoundSummary, LedgerError> {
        if caller != self.governor {
            return Err(LedgerError::NotGovernor(caller));
        }

        let mut voters = 0usize;
        let mut absentees = 0usize;

        for participant in self.participants.values_mut() {
            participant.allowance += participant.spent_this_round;
            participant.spent_this_round = 0;

            if participant.voted_this_round {
                participant.allowance =
                    participant.allowance.saturating_add(self.config.participation_reward);
                participant.voted_this_round = false;
                voters += 1;
            } else {
                participant.allowance =
                    participant.allowance.saturating_sub(self.config.abstention_penalty);
                absentees += 1;
            }
        }

        let summary = RoundSummary {
            round: self.round,
            voters,
            absentees,
        };
        self.round += 1;

        tracing::info!(
            "Round {} closed: {} voters, {} absentees",
            summary.round,
            summary.voters,
            summary.absentees
        );

        Ok(summary)
    }

    /// Accumulated vote tally for a proposal. Zero if nobody has voted on it.
    pub fn vote_count(&self, proposal: ProposalId) -> u64 {
        self.tallies.get(&proposal).copied().unwrap_or(0)
    }

    /// Remaining allowance for a participant.
    pub fn allowance(&self, address: Address) -> Result<u64, LedgerError> {
        self.participants
            .get(&address)
            .map(|p| p.allowance)
            .ok_or(LedgerError::UnknownParticipant(address))
    }

    /// Whether a participant has voted in the current round.
    pub fn has_voted(&self, address: Address) -> Result<bool, LedgerError> {
        self.participants
            .get(&address)
            .map(|p| p.voted_this_round)
            .ok_or(LedgerError::UnknownParticipant(address))
    }

    /// Current round number (rounds start at 0).
    pub fn round(&self) -> u64 {
        self.round
    }

    /// The governor address.
    pub fn governor(&self) -> Address {
        self.governor
    }

    /// Number of registered participants.
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Iterate over registered participants.
    pub fn participants(&self) -> impl Iterator<Item = (&Address, &Participant)> {
        self.participants.iter()
    }

    /// Iterate over proposals that have received votes.
    pub fn tallies(&self) -> impl Iterator<Item = (&ProposalId, &u64)> {
        self.tallies.iter()
    }

    /// The ledger configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }
}
