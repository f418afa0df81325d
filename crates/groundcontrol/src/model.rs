//! Core roster and mission types for groundcontrol.
//!
//! This module defines the three board tables (pilots, drones, missions)
//! and the `Snapshot` value that carries all of them through a single
//! command. Fields mirror the workbook columns: tag fields stay free-text
//! strings because the operative matching tests are substring checks, and
//! optional references stay plain ids because the board tolerates dangling
//! references everywhere.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A pilot roster row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pilot {
    /// Unique pilot identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Comma-separated skill tags (free text).
    pub skills: String,
    /// Comma-separated certification tags (free text).
    pub certifications: String,
    /// Home location (free text).
    pub location: String,
    /// Status field; availability is tested by substring, not equality.
    pub status: String,
    /// Mission id the pilot is currently assigned to, if any.
    pub current_assignment: Option<String>,
    /// Date the pilot becomes available, if recorded.
    pub available_from: Option<NaiveDate>,
    /// Daily rate, currency-agnostic. Unparseable cells read as 0.0.
    pub daily_rate: f64,
}

impl Pilot {
    /// Whether this pilot counts as available.
    ///
    /// The check is a case-sensitive substring test on the raw status
    /// field, preserved from the board's historical behavior.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status.contains("Available")
    }
}

/// A drone fleet row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    /// Unique drone identifier.
    pub id: String,
    /// Airframe model.
    pub model: String,
    /// Comma-separated capability tags (free text).
    pub capabilities: String,
    /// Status field; same substring availability test as pilots.
    pub status: String,
    /// Current base location (free text).
    pub location: String,
    /// Mission id the drone is currently assigned to, if any.
    pub current_assignment: Option<String>,
    /// Next scheduled maintenance date, if recorded.
    pub maintenance_due: Option<NaiveDate>,
    /// Weather-resistance rating, free text (e.g. "IP54").
    pub weather_resistance: String,
}

impl Drone {
    /// Whether this drone counts as available (substring test).
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status.contains("Available")
    }
}

/// A mission row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    /// Unique project identifier.
    pub id: String,
    /// Client name.
    pub client: String,
    /// Mission site (free text).
    pub location: String,
    /// Comma-separated required skill tags.
    pub required_skills: String,
    /// Comma-separated required certification tags.
    pub required_certs: String,
    /// Mission start date. Missing dates disable duration/overlap logic.
    pub start_date: Option<NaiveDate>,
    /// Mission end date. Inverted ranges are tolerated, not rejected.
    pub end_date: Option<NaiveDate>,
    /// Priority label (free text).
    pub priority: String,
    /// Mission budget; absent means every candidate is within budget.
    pub budget: Option<f64>,
    /// Weather forecast for the mission window (free text).
    pub weather_forecast: String,
    /// Assigned pilot id. May dangle; resolved leniently.
    pub assigned_pilot: Option<String>,
    /// Assigned drone id. May dangle; resolved leniently.
    pub assigned_drone: Option<String>,
}

/// Canonical status values written by mutating commands.
///
/// Reads keep the raw string field (the availability test is a substring
/// check); this enum exists so the write path only ever produces the
/// canonical spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Free for assignment.
    Available,
    /// Currently assigned to a mission.
    Assigned,
    /// On leave (pilots only).
    OnLeave,
    /// Not available for assignment.
    Unavailable,
    /// In maintenance (drones only).
    Maintenance,
}

impl Status {
    /// The canonical string written to the workbook.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Assigned => "Assigned",
            Self::OnLeave => "On Leave",
            Self::Unavailable => "Unavailable",
            Self::Maintenance => "Maintenance",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three board tables, loaded together and passed explicitly.
///
/// A snapshot is re-loaded per command; there is no ambient long-lived
/// table state anywhere in the crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Pilot roster, in workbook order.
    pub pilots: Vec<Pilot>,
    /// Drone fleet, in workbook order.
    pub drones: Vec<Drone>,
    /// Mission list, in workbook order.
    pub missions: Vec<Mission>,
}

impl Snapshot {
    /// An empty snapshot, used when the backing store is unreachable.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a pilot by id. Unresolved ids are "missing", never an error.
    #[must_use]
    pub fn pilot(&self, id: &str) -> Option<&Pilot> {
        self.pilots.iter().find(|p| p.id == id)
    }

    /// Look up a drone by id.
    #[must_use]
    pub fn drone(&self, id: &str) -> Option<&Drone> {
        self.drones.iter().find(|d| d.id == id)
    }

    /// Look up a mission by project id.
    #[must_use]
    pub fn mission(&self, id: &str) -> Option<&Mission> {
        self.missions.iter().find(|m| m.id == id)
    }

    /// Mutable pilot lookup, used by the assignment applier.
    pub fn pilot_mut(&mut self, id: &str) -> Option<&mut Pilot> {
        self.pilots.iter_mut().find(|p| p.id == id)
    }

    /// Mutable drone lookup.
    pub fn drone_mut(&mut self, id: &str) -> Option<&mut Drone> {
        self.drones.iter_mut().find(|d| d.id == id)
    }

    /// Mutable mission lookup.
    pub fn mission_mut(&mut self, id: &str) -> Option<&mut Mission> {
        self.missions.iter_mut().find(|m| m.id == id)
    }
}

/// Parse a workbook date cell leniently.
///
/// Accepts ISO `%Y-%m-%d` first, then `%d/%m/%Y`. Anything else (including
/// an empty cell) is `None`; date-dependent logic degrades rather than
/// erroring on bad cells.
#[must_use]
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(cell, "%d/%m/%Y"))
        .ok()
}

/// Normalize an optional reference cell: blank or whitespace is `None`.
#[must_use]
pub fn parse_ref(cell: &str) -> Option<String> {
    let cell = cell.trim();
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_pilot_is_available() {
        let mut pilot = Pilot {
            status: "Available".to_string(),
            ..Pilot::default()
        };
        assert!(pilot.is_available());

        // Substring test, not equality
        pilot.status = "Available from Monday".to_string();
        assert!(pilot.is_available());

        // Case-sensitive
        pilot.status = "available".to_string();
        assert!(!pilot.is_available());

        pilot.status = "Assigned".to_string();
        assert!(!pilot.is_available());
    }

    #[test]
    fn test_drone_is_available() {
        let drone = Drone {
            status: "Available".to_string(),
            ..Drone::default()
        };
        assert!(drone.is_available());

        let drone = Drone {
            status: "Maintenance".to_string(),
            ..Drone::default()
        };
        assert!(!drone.is_available());
    }

    #[test]
    fn test_status_as_str() {
        assert_eq!(Status::Available.as_str(), "Available");
        assert_eq!(Status::OnLeave.as_str(), "On Leave");
        assert_eq!(Status::Maintenance.to_string(), "Maintenance");
    }

    #[test]
    fn test_snapshot_lookup() {
        let snapshot = Snapshot {
            pilots: vec![Pilot {
                id: "P1".to_string(),
                name: "Asha".to_string(),
                ..Pilot::default()
            }],
            drones: vec![Drone {
                id: "D1".to_string(),
                ..Drone::default()
            }],
            missions: vec![Mission {
                id: "PRJ-001".to_string(),
                ..Mission::default()
            }],
        };

        assert_eq!(snapshot.pilot("P1").unwrap().name, "Asha");
        assert!(snapshot.drone("D1").is_some());
        assert!(snapshot.mission("PRJ-001").is_some());

        // Dangling references resolve to None, never an error
        assert!(snapshot.pilot("P99").is_none());
        assert!(snapshot.drone("").is_none());
        assert!(snapshot.mission("PRJ-404").is_none());
    }

    #[test]
    fn test_snapshot_mut_lookup() {
        let mut snapshot = Snapshot {
            pilots: vec![Pilot {
                id: "P1".to_string(),
                ..Pilot::default()
            }],
            ..Snapshot::default()
        };

        snapshot.pilot_mut("P1").unwrap().status = "Assigned".to_string();
        assert_eq!(snapshot.pilot("P1").unwrap().status, "Assigned");
        assert!(snapshot.pilot_mut("P2").is_none());
    }

    #[test]
    fn test_snapshot_empty() {
        let snapshot = Snapshot::empty();
        assert!(snapshot.pilots.is_empty());
        assert!(snapshot.drones.is_empty());
        assert!(snapshot.missions.is_empty());
    }

    #[test]
    fn test_parse_date_iso() {
        assert_eq!(parse_date("2024-01-15"), Some(date("2024-01-15")));
        assert_eq!(parse_date(" 2024-01-15 "), Some(date("2024-01-15")));
    }

    #[test]
    fn test_parse_date_dmy() {
        assert_eq!(parse_date("15/01/2024"), Some(date("2024-01-15")));
    }

    #[test]
    fn test_parse_date_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("  "), None);
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date("2024-13-99"), None);
    }

    #[test]
    fn test_parse_ref() {
        assert_eq!(parse_ref("P1"), Some("P1".to_string()));
        assert_eq!(parse_ref(" P1 "), Some("P1".to_string()));
        assert_eq!(parse_ref(""), None);
        assert_eq!(parse_ref("   "), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let mission = Mission {
            id: "PRJ-001".to_string(),
            client: "AgriCo".to_string(),
            start_date: Some(date("2024-03-01")),
            end_date: Some(date("2024-03-05")),
            budget: Some(50000.0),
            assigned_pilot: Some("P1".to_string()),
            ..Mission::default()
        };

        let json = serde_json::to_string(&mission).unwrap();
        let back: Mission = serde_json::from_str(&json).unwrap();
        assert_eq!(mission, back);
    }
}
