//! Command-line interface for groundcontrol.
//!
//! This module provides the CLI structure for the `gndctl` binary; the
//! command handlers live in the binary crate.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AssignCommand, ConflictsCommand, ConfigCommand, HealthCommand, MatchCommand, OutputFormat,
    PilotsCommand, SetStatusCommand, StatusArg, UrgentCommand,
};

/// gndctl - drone operations coordination board
///
/// Tracks pilots, drones, and missions, suggests assignments, and flags
/// scheduling and capability conflicts.
#[derive(Debug, Parser)]
#[command(name = "gndctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Query available pilots by skill and location
    Pilots(PilotsCommand),

    /// Suggest pilot and drone matches for a mission
    Match(MatchCommand),

    /// Suggest an urgent reassignment shortlist for a mission
    Urgent(UrgentCommand),

    /// Apply a pilot/drone assignment to a mission
    Assign(AssignCommand),

    /// Update a pilot's status
    SetStatus(SetStatusCommand),

    /// Scan the board for scheduling and capability conflicts
    Conflicts(ConflictsCommand),

    /// Check backing-store connectivity and credentials
    Health(HealthCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
