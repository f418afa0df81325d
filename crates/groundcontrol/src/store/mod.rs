//! Row store adapter for the board tables.
//!
//! The board treats its backing store as an external tabular collaborator:
//! whole tables in, whole tables out. [`RowStore`] is the one adapter
//! contract (load the snapshot, overwrite a table); the connectivity
//! diagnostic lives separately in [`health`] so a flaky backend can be
//! inspected without going through the load path.

pub mod credentials;
pub mod health;
mod workbook;

pub use credentials::{Credentials, CredentialsSource, ServiceAccount};
pub use health::StoreHealth;
pub use workbook::Workbook;

use crate::error::Result;
use crate::model::{Drone, Mission, Pilot, Snapshot};

/// The row store adapter contract.
///
/// `load` fails with a connectivity error when the source cannot be opened
/// or a named tab is missing; read-only callers degrade to an empty
/// snapshot. Saves are synchronous full-table overwrites, header included;
/// there are no partial-row updates and no transactions across tables.
pub trait RowStore {
    /// Load all three tables.
    fn load(&self) -> Result<Snapshot>;

    /// Overwrite the pilot roster tab.
    fn save_pilots(&self, pilots: &[Pilot]) -> Result<()>;

    /// Overwrite the drone fleet tab.
    fn save_drones(&self, drones: &[Drone]) -> Result<()>;

    /// Overwrite the missions tab.
    fn save_missions(&self, missions: &[Mission]) -> Result<()>;
}
