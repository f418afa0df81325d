//! Assignment and status mutations.
//!
//! These functions mutate the in-memory snapshot only; callers persist the
//! touched tables through the row store afterwards. Unlike the read paths,
//! the ids named here come straight off the command line, so unresolvable
//! ids are usage errors rather than silently-skipped dangling references.

use tracing::info;

use crate::error::{Error, Result};
use crate::model::{Snapshot, Status};

/// Record an assignment of a pilot and/or drone to a mission.
///
/// Sets the mission's assignment fields, marks each named resource
/// `Assigned`, and points its `current_assignment` at the mission. The
/// caller then saves pilots, drones, and missions in that order; writes
/// are not transactional and a mid-sequence failure leaves earlier writes
/// in place.
///
/// # Errors
///
/// Returns [`Error::UnknownMission`], [`Error::UnknownPilot`], or
/// [`Error::UnknownDrone`] when an id does not resolve. All ids are
/// validated before anything is mutated.
pub fn apply(
    snapshot: &mut Snapshot,
    mission_id: &str,
    pilot_id: Option<&str>,
    drone_id: Option<&str>,
) -> Result<()> {
    if snapshot.mission(mission_id).is_none() {
        return Err(Error::UnknownMission {
            id: mission_id.to_string(),
        });
    }
    if let Some(id) = pilot_id {
        if snapshot.pilot(id).is_none() {
            return Err(Error::UnknownPilot { id: id.to_string() });
        }
    }
    if let Some(id) = drone_id {
        if snapshot.drone(id).is_none() {
            return Err(Error::UnknownDrone { id: id.to_string() });
        }
    }

    if let Some(id) = pilot_id {
        if let Some(mission) = snapshot.mission_mut(mission_id) {
            mission.assigned_pilot = Some(id.to_string());
        }
        if let Some(pilot) = snapshot.pilot_mut(id) {
            pilot.status = Status::Assigned.as_str().to_string();
            pilot.current_assignment = Some(mission_id.to_string());
        }
        info!("assigned pilot {id} to mission {mission_id}");
    }
    if let Some(id) = drone_id {
        if let Some(mission) = snapshot.mission_mut(mission_id) {
            mission.assigned_drone = Some(id.to_string());
        }
        if let Some(drone) = snapshot.drone_mut(id) {
            drone.status = Status::Assigned.as_str().to_string();
            drone.current_assignment = Some(mission_id.to_string());
        }
        info!("assigned drone {id} to mission {mission_id}");
    }

    Ok(())
}

/// Set a pilot's status to a canonical value.
///
/// Any status other than `Assigned` clears `current_assignment`, keeping
/// the status/assignment invariant maintained on the write path. Only the
/// pilots table needs saving afterwards.
///
/// # Errors
///
/// Returns [`Error::UnknownPilot`] when the id does not resolve.
pub fn set_pilot_status(snapshot: &mut Snapshot, pilot_id: &str, status: Status) -> Result<()> {
    let Some(pilot) = snapshot.pilot_mut(pilot_id) else {
        return Err(Error::UnknownPilot {
            id: pilot_id.to_string(),
        });
    };

    pilot.status = status.as_str().to_string();
    if status != Status::Assigned {
        pilot.current_assignment = None;
    }
    info!("pilot {pilot_id} status set to {status}");
    Ok(())
}
