use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Proposal identifier: a small integer chosen by the caller.
///
/// Proposals are not created explicitly; a tally springs into existence
/// the first time someone votes on an id.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProposalId(u64);

impl ProposalId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ProposalId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProposalId({})", self.0)
    }
}

impl FromStr for ProposalId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse::<u64>()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proposal_id_display() {
        let id = ProposalId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.as_u64(), 42);
    }

    #[test]
    fn test_proposal_id_parse() {
        let id: ProposalId = "7".parse().unwrap();
        assert_eq!(id, ProposalId::new(7));

        assert!("not-a-number".parse::<ProposalId>().is_err());
    }

    #[test]
    fn test_proposal_id_serde_transparent() {
        let id = ProposalId::new(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn test_proposal_id_ordering() {
        assert!(ProposalId::new(1) < ProposalId::new(2));
    }
}
