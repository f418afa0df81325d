//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::model::Status;

/// Availability query arguments.
#[derive(Debug, Args)]
pub struct PilotsCommand {
    /// Comma-separated skill tags; pilots matching any tag qualify
    #[arg(short, long)]
    pub skills: Option<String>,

    /// Keep only pilots whose location contains this text
    #[arg(short, long)]
    pub location: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Match suggestion arguments.
#[derive(Debug, Args)]
pub struct MatchCommand {
    /// Mission project id to match against
    pub mission: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Urgent reassignment arguments.
#[derive(Debug, Args)]
pub struct UrgentCommand {
    /// Mission project id needing an urgent crew
    pub mission: String,

    /// Shortlist size (defaults to the configured candidate count)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Assignment arguments.
#[derive(Debug, Args)]
#[command(group = clap::ArgGroup::new("resource").required(true).multiple(true))]
pub struct AssignCommand {
    /// Mission project id to assign to
    pub mission: String,

    /// Pilot id to assign
    #[arg(short, long, group = "resource")]
    pub pilot: Option<String>,

    /// Drone id to assign
    #[arg(short, long, group = "resource")]
    pub drone: Option<String>,
}

/// Pilot status update arguments.
#[derive(Debug, Args)]
pub struct SetStatusCommand {
    /// Pilot id to update
    pub pilot: String,

    /// New status
    #[arg(value_enum)]
    pub status: StatusArg,
}

/// Conflict check arguments.
#[derive(Debug, Args)]
pub struct ConflictsCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Store health check arguments.
#[derive(Debug, Args)]
pub struct HealthCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Canonical status values accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Free for assignment
    Available,
    /// Currently assigned to a mission
    Assigned,
    /// On leave
    OnLeave,
    /// Not available for assignment
    Unavailable,
    /// In maintenance
    Maintenance,
}

impl From<StatusArg> for Status {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Available => Self::Available,
            StatusArg::Assigned => Self::Assigned,
            StatusArg::OnLeave => Self::OnLeave,
            StatusArg::Unavailable => Self::Unavailable,
            StatusArg::Maintenance => Self::Maintenance,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_arg_conversion() {
        assert_eq!(Status::from(StatusArg::Available), Status::Available);
        assert_eq!(Status::from(StatusArg::OnLeave), Status::OnLeave);
        assert_eq!(Status::from(StatusArg::Maintenance), Status::Maintenance);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_pilots_command_debug() {
        let cmd = PilotsCommand {
            skills: Some("Thermal,GIS".to_string()),
            location: None,
            format: OutputFormat::Table,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("skills"));
        assert!(debug_str.contains("Thermal"));
    }

    #[test]
    fn test_assign_command_debug() {
        let cmd = AssignCommand {
            mission: "PRJ-1".to_string(),
            pilot: Some("P1".to_string()),
            drone: None,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("PRJ-1"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
