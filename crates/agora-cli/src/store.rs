//! Ledger persistence.
//!
//! The whole ledger lives in one pretty-printed JSON file between CLI
//! invocations; every mutating command rewrites it.

use std::fs;
use std::path::Path;

use agora_ledger::VotingLedger;
use anyhow::Context;

/// Load a ledger from a state file.
pub fn load(path: &Path) -> anyhow::Result<VotingLedger> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("No ledger state at {} (run `agora init` first)", path.display()))?;

    let ledger: VotingLedger = serde_json::from_str(&json)
        .with_context(|| format!("Corrupt ledger state at {}", path.display()))?;

    Ok(ledger)
}

/// Save a ledger to a state file.
pub fn save(path: &Path, ledger: &VotingLedger) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create {}", parent.display()))?;
        }
    }

    let json = serde_json::to_string_pretty(ledger).context("Cannot serialize ledger")?;
    fs::write(path, json)
        .with_context(|| format!("Cannot write ledger state to {}", path.display()))?;

    tracing::debug!("Ledger state persisted to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_ledger::LedgerConfig;
    use agora_types::{Address, ProposalId};

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let governor = Address::from_bytes([0u8; 20]);
        let voter = Address::from_bytes([1u8; 20]);
        let mut ledger =
            VotingLedger::with_participants(governor, LedgerConfig::civic(), [voter]);
        ledger.vote(voter, 4, ProposalId::new(2)).unwrap();

        save(&path, &ledger).unwrap();
        let restored = load(&path).unwrap();

        assert_eq!(restored.vote_count(ProposalId::new(2)), 2);
        assert_eq!(restored.allowance(voter).unwrap(), 6);
        assert_eq!(restored.governor(), governor);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("agora init"));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("Corrupt"));
    }
}
