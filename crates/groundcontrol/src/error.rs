//! Error types for groundcontrol.
//!
//! This module defines all error types used throughout the groundcontrol
//! crate. The taxonomy deliberately distinguishes connectivity failures
//! (backing workbook unreachable, credentials absent, tab missing), which
//! read-only commands degrade around, from usage errors (unknown ids passed
//! to mutating commands), which abort the command.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for groundcontrol operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Connectivity Errors ===
    /// The workbook directory could not be opened.
    #[error("failed to open workbook at {path}: {source}")]
    SourceOpen {
        /// Path to the workbook directory.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A named tab is missing from the workbook.
    #[error("workbook tab '{table}' not found at {path}")]
    TableMissing {
        /// Name of the missing tab.
        table: String,
        /// Path where the tab file was expected.
        path: PathBuf,
    },

    /// Reading a tab failed partway.
    #[error("failed to read tab '{table}': {source}")]
    TableRead {
        /// Name of the tab.
        table: String,
        /// The underlying error.
        #[source]
        source: csv::Error,
    },

    /// Writing a tab failed partway.
    #[error("failed to write tab '{table}': {source}")]
    TableWrite {
        /// Name of the tab.
        table: String,
        /// The underlying error.
        #[source]
        source: csv::Error,
    },

    /// No service-account payload was found in any known location.
    #[error("no service-account payload found in the secrets file or GROUNDCONTROL_SERVICE_ACCOUNT_JSON")]
    CredentialsMissing,

    /// A service-account payload was found but could not be used.
    #[error("invalid service-account payload: {message}")]
    CredentialsInvalid {
        /// Description of what was wrong with the payload.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Usage Errors ===
    /// A mission id named on the command line does not exist.
    #[error("no mission with project id '{id}'")]
    UnknownMission {
        /// The mission id that failed to resolve.
        id: String,
    },

    /// A pilot id named on the command line does not exist.
    #[error("no pilot with id '{id}'")]
    UnknownPilot {
        /// The pilot id that failed to resolve.
        id: String,
    },

    /// A drone id named on the command line does not exist.
    #[error("no drone with id '{id}'")]
    UnknownDrone {
        /// The drone id that failed to resolve.
        id: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for groundcontrol operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid-credentials error.
    #[must_use]
    pub fn credentials_invalid(message: impl Into<String>) -> Self {
        Self::CredentialsInvalid {
            message: message.into(),
        }
    }

    /// Create a missing-tab error.
    #[must_use]
    pub fn table_missing(table: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::TableMissing {
            table: table.into(),
            path: path.into(),
        }
    }

    /// Check if this error is a connectivity failure of the backing store.
    ///
    /// Read-only commands respond to these by degrading to an empty
    /// snapshot instead of aborting.
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            Self::SourceOpen { .. }
                | Self::TableMissing { .. }
                | Self::TableRead { .. }
                | Self::TableWrite { .. }
                | Self::CredentialsMissing
                | Self::CredentialsInvalid { .. }
        )
    }

    /// Check if this error is a usage error (bad id on the command line).
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::UnknownMission { .. } | Self::UnknownPilot { .. } | Self::UnknownDrone { .. }
        )
    }
}
