//! `groundcontrol` - Operations board for drone-services coordination
//!
//! This library tracks pilots, drones, and missions for a drone-services
//! business and provides the matching, scoring, and conflict-detection
//! heuristics a human operator uses to crew missions. All decision logic
//! is pure functions over an explicitly passed snapshot of the three
//! board tables; persistence goes through the row store adapter.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod assign;
pub mod cli;
pub mod config;
pub mod conflicts;
pub mod error;
pub mod logging;
pub mod matching;
pub mod model;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::{init_logging, Verbosity};
pub use model::{Drone, Mission, Pilot, Snapshot, Status};
pub use store::{RowStore, Workbook};
