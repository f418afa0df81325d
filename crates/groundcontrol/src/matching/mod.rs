//! Matching and scoring pipelines for the board.
//!
//! Three entry points, all pure functions over snapshot tables:
//! - [`available_pilots`]: the availability query (stable filter, no sort);
//! - [`match_pilots`] / [`match_drones`]: strict ranking for a mission;
//! - [`suggest_urgent`]: the relaxed fallback shortlist.

pub mod availability;
pub mod matcher;
pub mod tags;
pub mod urgent;

pub use availability::available_pilots;
pub use matcher::{
    duration_days, match_drones, match_pilots, weather_ok, DroneCandidate, PilotCandidate,
};
pub use tags::{TagMatch, TagSet};
pub use urgent::{suggest_urgent, UrgentDrone, UrgentPilot};
