//! Store connectivity diagnostics.
//!
//! A separate, optional interface from the adapter contract: the health
//! check never fails, it just reports what it found so an operator can
//! tell a missing credential from a missing workbook from a missing tab
//! without going through the load path.

use serde::Serialize;

use crate::config::Config;

use super::credentials::{self, mask_email};

/// Diagnostic report for the backing store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreHealth {
    /// Whether a credential payload was found and parsed.
    pub credentials_loaded: bool,
    /// Which location supplied the payload, when loaded.
    pub credentials_source: Option<String>,
    /// Masked service-account email, when loaded.
    pub client_email: Option<String>,
    /// Whether the workbook directory could be opened.
    pub can_open: bool,
    /// Tab files present in the workbook.
    pub tabs: Vec<String>,
    /// The first error encountered, if any.
    pub error: Option<String>,
}

/// Run the diagnostics. Never fails.
///
/// A missing credential payload is reported as not-loaded without an
/// error (a purely local workbook is a valid setup); an invalid payload
/// is an error worth surfacing.
#[must_use]
pub fn check(config: &Config) -> StoreHealth {
    let mut health = StoreHealth::default();

    match credentials::resolve(config) {
        Ok(creds) => {
            health.credentials_loaded = true;
            health.credentials_source = Some(creds.source.to_string());
            health.client_email = Some(mask_email(&creds.account.client_email));
        }
        Err(crate::error::Error::CredentialsMissing) => {}
        Err(e) => health.error = Some(e.to_string()),
    }

    let dir = config.workbook_dir();
    if dir.is_dir() {
        health.can_open = true;
        for tab in [
            &config.store.pilots_tab,
            &config.store.drones_tab,
            &config.store.missions_tab,
        ] {
            if dir.join(format!("{tab}.csv")).is_file() {
                health.tabs.push(tab.clone());
            }
        }
    } else if health.error.is_none() {
        health.error = Some(format!(
            "workbook directory {} does not exist",
            dir.display()
        ));
    }

    health
}
