//! CLI command implementations.
//!
//! Every subcommand loads the ledger from the state file, applies one
//! operation, and writes it back.

use std::path::PathBuf;

use agora_ledger::{LedgerConfig, VotingLedger};
use agora_types::{Address, ProposalId};
use anyhow::bail;
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::store;

/// Main CLI.
#[derive(Parser)]
#[command(name = "agora")]
#[command(about = "AGORA quadratic voting ledger")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Path to the ledger state file
    #[arg(short, long, global = true, default_value = "agora.json")]
    pub state: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new ledger state file
    Init {
        /// Governor address (the only address allowed to close rounds)
        #[arg(long)]
        governor: Address,

        /// Participant to seed the roster with (repeatable)
        #[arg(long = "participant")]
        participants: Vec<Address>,

        /// Starting credit allowance per participant
        #[arg(long, default_value_t = 10)]
        allowance: u64,
    },

    /// Register a participant
    Register {
        /// Participant address
        address: Address,
    },

    /// Cast a vote
    Vote {
        /// Voter address
        #[arg(long)]
        from: Address,

        /// Credits to spend (must be a perfect square)
        #[arg(long)]
        cost: u64,

        /// Proposal to vote on
        #[arg(long)]
        proposal: ProposalId,
    },

    /// Close the current voting round (governor only)
    Close {
        /// Caller address
        #[arg(long)]
        from: Address,
    },

    /// Show a proposal's vote tally
    Tally {
        /// Proposal id
        proposal: ProposalId,
    },

    /// Show a participant's remaining allowance
    Allowance {
        /// Participant address
        address: Address,
    },

    /// Show the whole ledger
    Status,
}

/// Execute a parsed command against the state file.
pub fn execute(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Init { governor, participants, allowance } => {
            if cli.state.exists() {
                bail!("Ledger state already exists at {}", cli.state.display());
            }

            let config = LedgerConfig::with_allowance(*allowance);
            let ledger =
                VotingLedger::with_participants(*governor, config, participants.iter().copied());
            store::save(&cli.state, &ledger)?;

            println!(
                "Initialized ledger with {} participant(s), governor {}",
                ledger.participant_count(),
                governor
            );
        }

        Commands::Register { address } => {
            let mut ledger = store::load(&cli.state)?;
            ledger.register(*address)?;
            store::save(&cli.state, &ledger)?;

            println!("Registered {}", address);
        }

        Commands::Vote { from, cost, proposal } => {
            let mut ledger = store::load(&cli.state)?;
            let votes = ledger.vote(*from, *cost, *proposal)?;
            store::save(&cli.state, &ledger)?;

            println!(
                "{} vote(s) cast on proposal {} ({} credits), {} credit(s) left",
                votes,
                proposal,
                cost,
                ledger.allowance(*from)?
            );
        }

        Commands::Close { from } => {
            let mut ledger = store::load(&cli.state)?;
            let summary = ledger.close_voting(*from)?;
            store::save(&cli.state, &ledger)?;

            println!(
                "Round {} closed: {} voter(s) rewarded, {} absentee(s) penalized",
                summary.round, summary.voters, summary.absentees
            );
        }

        Commands::Tally { proposal } => {
            let ledger = store::load(&cli.state)?;
            println!("Proposal {}: {} vote(s)", proposal, ledger.vote_count(*proposal));
        }

        Commands::Allowance { address } => {
            let ledger = store::load(&cli.state)?;
            println!("{}: {} credit(s)", address, ledger.allowance(*address)?);
        }

        Commands::Status => {
            let ledger = store::load(&cli.state)?;
            print_status(&ledger);
        }
    }

    Ok(())
}

fn print_status(ledger: &VotingLedger) {
    println!("{}", "Ledger".bold());
    println!("  Governor:     {}", ledger.governor());
    println!("  Round:        {}", ledger.round());
    println!("  Participants: {}", ledger.participant_count());

    let mut participants: Vec<_> = ledger.participants().collect();
    participants.sort_by_key(|(address, _)| **address);
    for (address, participant) in participants {
        let marker = if participant.voted_this_round {
            "voted".green()
        } else {
            "idle".dimmed()
        };
        println!("    {}  {:>4} credit(s)  [{}]", address, participant.allowance, marker);
    }

    let mut tallies: Vec<_> = ledger.tallies().collect();
    tallies.sort_by_key(|(proposal, _)| **proposal);
    if !tallies.is_empty() {
        println!("  Tallies:");
        for (proposal, votes) in tallies {
            println!("    proposal {:>3}: {} vote(s)", proposal, votes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    fn run(state: &std::path::Path, args: &[&str]) -> anyhow::Result<()> {
        let mut full = vec!["agora", "--state", state.to_str().unwrap()];
        full.extend_from_slice(args);
        let cli = Cli::parse_from(full);
        execute(&cli)
    }

    #[test]
    fn test_init_vote_close_flow() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("agora.json");

        let governor = addr(0).to_string();
        let bob = addr(1).to_string();
        let sue = addr(2).to_string();

        run(&state, &[
            "init", "--governor", &governor, "--participant", &bob, "--participant", &sue,
        ])
        .unwrap();

        run(&state, &["vote", "--from", &bob, "--cost", "4", "--proposal", "2"]).unwrap();
        run(&state, &["close", "--from", &governor]).unwrap();

        let ledger = store::load(&state).unwrap();
        assert_eq!(ledger.vote_count(ProposalId::new(2)), 2);
        assert_eq!(ledger.allowance(addr(1)).unwrap(), 11);
        assert_eq!(ledger.allowance(addr(2)).unwrap(), 9);
        assert_eq!(ledger.round(), 1);
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("agora.json");
        let governor = addr(0).to_string();

        run(&state, &["init", "--governor", &governor]).unwrap();
        let err = run(&state, &["init", "--governor", &governor]).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_register_then_vote() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("agora.json");
        let governor = addr(0).to_string();
        let carol = addr(9).to_string();

        run(&state, &["init", "--governor", &governor]).unwrap();
        run(&state, &["register", &carol]).unwrap();
        run(&state, &["vote", "--from", &carol, "--cost", "9", "--proposal", "1"]).unwrap();

        let ledger = store::load(&state).unwrap();
        assert_eq!(ledger.vote_count(ProposalId::new(1)), 3);
        assert_eq!(ledger.allowance(addr(9)).unwrap(), 1);
    }

    #[test]
    fn test_vote_errors_surface() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("agora.json");
        let governor = addr(0).to_string();
        let bob = addr(1).to_string();

        run(&state, &["init", "--governor", &governor, "--participant", &bob]).unwrap();

        let err =
            run(&state, &["vote", "--from", &bob, "--cost", "11", "--proposal", "1"]).unwrap_err();
        assert!(err.to_string().contains("Not enough votes"));

        let err =
            run(&state, &["vote", "--from", &bob, "--cost", "2", "--proposal", "1"]).unwrap_err();
        assert!(err.to_string().contains("Count must be quadratic"));

        // Failed votes left the state file untouched
        let ledger = store::load(&state).unwrap();
        assert_eq!(ledger.allowance(addr(1)).unwrap(), 10);
    }

    #[test]
    fn test_close_requires_governor() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("agora.json");
        let governor = addr(0).to_string();
        let bob = addr(1).to_string();

        run(&state, &["init", "--governor", &governor, "--participant", &bob]).unwrap();

        let err = run(&state, &["close", "--from", &bob]).unwrap_err();
        assert!(err.to_string().contains("governor"));
    }

    #[test]
    fn test_custom_allowance() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("agora.json");
        let governor = addr(0).to_string();
        let bob = addr(1).to_string();

        run(&state, &[
            "init", "--governor", &governor, "--participant", &bob, "--allowance", "100",
        ])
        .unwrap();

        let ledger = store::load(&state).unwrap();
        assert_eq!(ledger.allowance(addr(1)).unwrap(), 100);
    }
}
