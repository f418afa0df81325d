//! Conflict detection across the mission board.
//!
//! Scans all missions pairwise for double-bookings and per-mission for
//! capability and weather mismatches. Pairwise scanning is O(missions²),
//! fine at board sizes of a few hundred rows; there is deliberately no
//! incremental index to keep the check trivially re-runnable after every
//! edit.

use chrono::NaiveDate;
use serde::Serialize;

use crate::matching::{weather_ok, TagSet};
use crate::model::{Mission, Snapshot};

/// A detected scheduling or capability conflict.
///
/// `Display` yields the operator-facing issue line shown by the conflict
/// check; those strings are part of the observable contract and pinned by
/// tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conflict {
    /// The same pilot is assigned to two missions with overlapping dates.
    PilotDoubleBooked {
        /// The shared pilot id.
        pilot: String,
        /// Earlier mission (board order).
        first: String,
        /// Later mission (board order).
        second: String,
    },
    /// The same drone is assigned to two missions with overlapping dates.
    DroneDoubleBooked {
        /// The shared drone id.
        drone: String,
        /// Earlier mission (board order).
        first: String,
        /// Later mission (board order).
        second: String,
    },
    /// An assigned pilot is missing a required skill.
    SkillGap {
        /// The assigned pilot id.
        pilot: String,
        /// The required-skill tag not found in the pilot's skills field.
        skill: String,
        /// The mission requiring the skill.
        mission: String,
    },
    /// An assigned drone is not rated for the mission's forecast.
    WeatherMismatch {
        /// The assigned drone id.
        drone: String,
        /// The mission's weather forecast text.
        forecast: String,
        /// The affected mission.
        mission: String,
    },
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PilotDoubleBooked {
                pilot,
                first,
                second,
            } => write!(f, "Pilot {pilot} double-booked between {first} and {second}"),
            Self::DroneDoubleBooked {
                drone,
                first,
                second,
            } => write!(f, "Drone {drone} double-booked between {first} and {second}"),
            Self::SkillGap {
                pilot,
                skill,
                mission,
            } => write!(f, "Pilot {pilot} lacks skill {skill} for {mission}"),
            Self::WeatherMismatch {
                drone,
                forecast,
                mission,
            } => write!(f, "Drone {drone} not rated for weather {forecast} on {mission}"),
        }
    }
}

/// Inclusive date-range overlap. Any missing date disables the check.
fn overlap(
    a_start: Option<NaiveDate>,
    a_end: Option<NaiveDate>,
    b_start: Option<NaiveDate>,
    b_end: Option<NaiveDate>,
) -> bool {
    match (a_start, a_end, b_start, b_end) {
        (Some(a_start), Some(a_end), Some(b_start), Some(b_end)) => {
            a_start.max(b_start) <= a_end.min(b_end)
        }
        _ => false,
    }
}

fn dates_overlap(a: &Mission, b: &Mission) -> bool {
    overlap(a.start_date, a.end_date, b.start_date, b.end_date)
}

/// Scan the board for conflicts.
///
/// For each mission `i` in board order: every later mission `j` is checked
/// for pilot then drone double-booking, then mission `i` itself is checked
/// for skill gaps and a weather mismatch. Certification gaps are
/// deliberately not checked, preserving the board's historical skill-only
/// gap policy. Dangling assignment references are skipped silently.
#[must_use]
pub fn detect(snapshot: &Snapshot) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    let missions = &snapshot.missions;

    for (i, m1) in missions.iter().enumerate() {
        for m2 in &missions[i + 1..] {
            if let (Some(p1), Some(p2)) = (&m1.assigned_pilot, &m2.assigned_pilot) {
                if !p1.is_empty() && p1 == p2 && dates_overlap(m1, m2) {
                    conflicts.push(Conflict::PilotDoubleBooked {
                        pilot: p1.clone(),
                        first: m1.id.clone(),
                        second: m2.id.clone(),
                    });
                }
            }
            if let (Some(d1), Some(d2)) = (&m1.assigned_drone, &m2.assigned_drone) {
                if !d1.is_empty() && d1 == d2 && dates_overlap(m1, m2) {
                    conflicts.push(Conflict::DroneDoubleBooked {
                        drone: d1.clone(),
                        first: m1.id.clone(),
                        second: m2.id.clone(),
                    });
                }
            }
        }

        if let Some(pilot) = m1
            .assigned_pilot
            .as_deref()
            .and_then(|id| snapshot.pilot(id))
        {
            // Skill gaps stay a raw substring test against the whole
            // skills field, matching the board's historical check.
            for skill in &TagSet::parse(&m1.required_skills) {
                if !pilot.skills.contains(skill.as_str()) {
                    conflicts.push(Conflict::SkillGap {
                        pilot: pilot.id.clone(),
                        skill: skill.clone(),
                        mission: m1.id.clone(),
                    });
                }
            }
        }

        if let Some(drone) = m1
            .assigned_drone
            .as_deref()
            .and_then(|id| snapshot.drone(id))
        {
            if !weather_ok(drone, &m1.weather_forecast) {
                conflicts.push(Conflict::WeatherMismatch {
                    drone: drone.id.clone(),
                    forecast: m1.weather_forecast.clone(),
                    mission: m1.id.clone(),
                });
            }
        }
    }

    conflicts
}
