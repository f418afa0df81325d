//! Strict mission matching for pilots and drones.
//!
//! Pilot matching applies a strict AND filter over required skills and
//! certifications, then ranks by budget fit and cost. Drone matching
//! filters on availability only and ranks by capability/weather fit.
//! Neither path errors: a mission nobody qualifies for simply yields an
//! empty candidate list.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Drone, Mission, Pilot};

use super::tags::{TagMatch, TagSet};

/// Mission duration in whole days, inclusive of both endpoints.
///
/// Returns 1 when either date is missing, and floors at 1 for inverted
/// ranges. Used as the multiplier for cost estimation.
#[must_use]
pub fn duration_days(mission: &Mission) -> i64 {
    match (mission.start_date, mission.end_date) {
        (Some(start), Some(end)) => ((end - start).num_days() + 1).max(1),
        _ => 1,
    }
}

/// A pilot candidate for a mission, with its cost estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PilotCandidate<'a> {
    /// The qualifying pilot.
    pub pilot: &'a Pilot,
    /// `daily_rate × duration_days(mission)`.
    pub estimated_cost: f64,
    /// Whether the estimate fits the mission budget (true when no budget).
    pub within_budget: bool,
}

/// A drone candidate for a mission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroneCandidate<'a> {
    /// The available drone.
    pub drone: &'a Drone,
    /// Whether the drone's capabilities field contains the mission's
    /// required-skills string verbatim.
    pub capability_match: bool,
    /// Whether the drone passes the weather rule for this mission.
    pub weather_ok: bool,
}

/// Whether a drone is rated for the given forecast.
///
/// If the forecast mentions "rain" (case-insensitive) the drone's
/// weather-resistance field must mention "ip" (the ingress-protection
/// rating heuristic). Any other forecast passes every drone.
#[must_use]
pub fn weather_ok(drone: &Drone, forecast: &str) -> bool {
    if forecast.to_lowercase().contains("rain") {
        drone.weather_resistance.to_lowercase().contains("ip")
    } else {
        true
    }
}

/// Rank pilots for a mission with a strict AND filter.
///
/// A pilot survives only if every required skill matches its skills field
/// and every required cert matches its certifications field under `mode`.
/// No availability filter is applied here: callers see all qualifying
/// pilots and narrow by availability separately.
///
/// Results are sorted budget-compliant first, then cheapest first, with
/// ties kept in roster order.
#[must_use]
pub fn match_pilots<'a>(
    mission: &Mission,
    pilots: &'a [Pilot],
    mode: TagMatch,
) -> Vec<PilotCandidate<'a>> {
    let required_skills = TagSet::parse(&mission.required_skills);
    let required_certs = TagSet::parse(&mission.required_certs);
    let days = duration_days(mission);

    let mut candidates: Vec<PilotCandidate<'a>> = pilots
        .iter()
        .filter(|p| required_skills.all_match(&p.skills, mode))
        .filter(|p| required_certs.all_match(&p.certifications, mode))
        .map(|pilot| {
            #[allow(clippy::cast_precision_loss)]
            let estimated_cost = pilot.daily_rate * days as f64;
            let within_budget = mission.budget.map_or(true, |b| estimated_cost <= b);
            PilotCandidate {
                pilot,
                estimated_cost,
                within_budget,
            }
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.within_budget
            .cmp(&a.within_budget)
            .then_with(|| a.estimated_cost.total_cmp(&b.estimated_cost))
    });
    candidates
}

/// Rank available drones for a mission.
///
/// The capability check compares the mission's required-skills string
/// verbatim against the capabilities field (not tag-split); see the
/// module docs in [`super::tags`] for why this stays a separate policy.
///
/// Sort order: capability match first, weather-safe first, then
/// maintenance due date ascending with missing dates last. The ascending
/// tie-break ranks drones due for maintenance soonest highest within a
/// group; pinned by test, pending product sign-off.
#[must_use]
pub fn match_drones<'a>(mission: &Mission, drones: &'a [Drone]) -> Vec<DroneCandidate<'a>> {
    let mut candidates: Vec<DroneCandidate<'a>> = drones
        .iter()
        .filter(|d| d.is_available())
        .map(|drone| DroneCandidate {
            drone,
            capability_match: drone.capabilities.contains(&mission.required_skills),
            weather_ok: weather_ok(drone, &mission.weather_forecast),
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.capability_match
            .cmp(&a.capability_match)
            .then_with(|| b.weather_ok.cmp(&a.weather_ok))
            .then_with(|| cmp_dates_missing_last(a.drone.maintenance_due, b.drone.maintenance_due))
    });
    candidates
}

/// Ascending date comparison with `None` sorting after any real date.
pub(crate) fn cmp_dates_missing_last(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn pilot(id: &str, skills: &str, certs: &str, rate: f64) -> Pilot {
        Pilot {
            id: id.to_string(),
            skills: skills.to_string(),
            certifications: certs.to_string(),
            daily_rate: rate,
            status: "Available".to_string(),
            ..Pilot::default()
        }
    }

    fn drone(id: &str, caps: &str, status: &str, due: Option<&str>, wr: &str) -> Drone {
        Drone {
            id: id.to_string(),
            capabilities: caps.to_string(),
            status: status.to_string(),
            maintenance_due: due.map(date),
            weather_resistance: wr.to_string(),
            ..Drone::default()
        }
    }

    fn mission(skills: &str, certs: &str, budget: Option<f64>) -> Mission {
        Mission {
            id: "PRJ-001".to_string(),
            required_skills: skills.to_string(),
            required_certs: certs.to_string(),
            start_date: Some(date("2024-03-01")),
            end_date: Some(date("2024-03-03")),
            budget,
            ..Mission::default()
        }
    }

    #[test]
    fn test_duration_inclusive() {
        let m = mission("", "", None);
        assert_eq!(duration_days(&m), 3);
    }

    #[test]
    fn test_duration_same_day() {
        let mut m = mission("", "", None);
        m.end_date = m.start_date;
        assert_eq!(duration_days(&m), 1);
    }

    #[test]
    fn test_duration_missing_dates() {
        let mut m = mission("", "", None);
        m.end_date = None;
        assert_eq!(duration_days(&m), 1);
        m.start_date = None;
        assert_eq!(duration_days(&m), 1);
    }

    #[test]
    fn test_duration_inverted_range_floors_at_one() {
        let mut m = mission("", "", None);
        m.start_date = Some(date("2024-03-10"));
        m.end_date = Some(date("2024-03-01"));
        assert_eq!(duration_days(&m), 1);
    }

    #[test]
    fn test_strict_and_filter() {
        let pilots = vec![
            pilot("P1", "Thermal,GIS", "RPAS", 5000.0),
            pilot("P2", "Thermal", "RPAS", 3000.0),
            pilot("P3", "Thermal,GIS", "", 2000.0),
        ];
        let m = mission("Thermal,GIS", "RPAS", None);
        let results = match_pilots(&m, &pilots, TagMatch::Substring);
        // P2 lacks GIS, P3 lacks the cert
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].pilot.id, "P1");
    }

    #[test]
    fn test_no_availability_filter_in_strict_matching() {
        let mut p = pilot("P1", "Thermal", "RPAS", 5000.0);
        p.status = "On Leave".to_string();
        let m = mission("Thermal", "RPAS", None);
        let roster = [p];
        let results = match_pilots(&m, &roster, TagMatch::Substring);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_cost_and_budget_scenario() {
        // rate 5000, 3-day mission, budget 20000
        let pilots = vec![pilot("P1", "Thermal,GIS", "RPAS", 5000.0)];
        let m = mission("Thermal", "RPAS", Some(20000.0));
        let results = match_pilots(&m, &pilots, TagMatch::Substring);
        assert_eq!(results.len(), 1);
        assert!((results[0].estimated_cost - 15000.0).abs() < f64::EPSILON);
        assert!(results[0].within_budget);
    }

    #[test]
    fn test_missing_budget_always_within() {
        let pilots = vec![pilot("P1", "Thermal", "", 1_000_000.0)];
        let m = mission("Thermal", "", None);
        let results = match_pilots(&m, &pilots, TagMatch::Substring);
        assert!(results[0].within_budget);
    }

    #[test]
    fn test_sort_budget_first_then_cheapest() {
        let pilots = vec![
            pilot("P1", "Thermal", "", 9000.0), // over budget
            pilot("P2", "Thermal", "", 2000.0),
            pilot("P3", "Thermal", "", 1000.0),
        ];
        let m = mission("Thermal", "", Some(10000.0)); // 3 days
        let results = match_pilots(&m, &pilots, TagMatch::Substring);
        let ids: Vec<&str> = results.iter().map(|c| c.pilot.id.as_str()).collect();
        assert_eq!(ids, vec!["P3", "P2", "P1"]);
        assert!(!results[2].within_budget);
    }

    #[test]
    fn test_sort_ties_keep_roster_order() {
        let pilots = vec![
            pilot("B", "Thermal", "", 4000.0),
            pilot("A", "Thermal", "", 4000.0),
        ];
        let m = mission("Thermal", "", None);
        let results = match_pilots(&m, &pilots, TagMatch::Substring);
        let ids: Vec<&str> = results.iter().map(|c| c.pilot.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn test_match_pilots_idempotent() {
        let pilots = vec![
            pilot("P1", "Thermal", "", 9000.0),
            pilot("P2", "Thermal", "", 2000.0),
        ];
        let m = mission("Thermal", "", Some(10000.0));
        let first: Vec<String> = match_pilots(&m, &pilots, TagMatch::Substring)
            .iter()
            .map(|c| c.pilot.id.clone())
            .collect();
        let second: Vec<String> = match_pilots(&m, &pilots, TagMatch::Substring)
            .iter()
            .map(|c| c.pilot.id.clone())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_weather_rule() {
        let rated = drone("D1", "", "Available", None, "IP54");
        let unrated = drone("D2", "", "Available", None, "none");

        assert!(weather_ok(&rated, "Heavy rain expected"));
        assert!(!weather_ok(&unrated, "Heavy rain expected"));
        // Clear forecasts pass every drone regardless of rating
        assert!(weather_ok(&unrated, "Clear skies"));
        assert!(weather_ok(&rated, ""));
    }

    #[test]
    fn test_match_drones_filters_availability() {
        let drones = vec![
            drone("D1", "Thermal", "Available", None, "IP54"),
            drone("D2", "Thermal", "Maintenance", None, "IP54"),
        ];
        let m = mission("Thermal", "", None);
        let results = match_drones(&m, &drones);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].drone.id, "D1");
    }

    #[test]
    fn test_capability_match_is_verbatim() {
        // The whole required-skills string must appear, not each tag
        let drones = vec![drone("D1", "Thermal,GIS,Survey", "Available", None, "")];
        let m = mission("Thermal,GIS", "", None);
        assert!(match_drones(&m, &drones)[0].capability_match);

        let m = mission("GIS,Thermal", "", None);
        assert!(!match_drones(&m, &drones)[0].capability_match);
    }

    #[test]
    fn test_drone_sort_order() {
        let mut m = mission("Thermal", "", None);
        m.weather_forecast = "rain likely".to_string();
        let drones = vec![
            drone("D1", "Mapping", "Available", Some("2024-01-01"), "IP54"),
            drone("D2", "Thermal", "Available", Some("2024-06-01"), ""),
            drone("D3", "Thermal", "Available", Some("2024-06-01"), "IP43"),
        ];
        let results = match_drones(&m, &drones);
        let ids: Vec<&str> = results.iter().map(|c| c.drone.id.as_str()).collect();
        // capability beats weather beats maintenance date
        assert_eq!(ids, vec!["D3", "D2", "D1"]);
    }

    #[test]
    fn test_maintenance_due_ascending_tiebreak() {
        // Pinned deliberately: within an equal match/weather group the
        // drone due for maintenance SOONEST ranks first. Flagged for
        // product sign-off before anyone reverses it.
        let m = mission("Thermal", "", None);
        let drones = vec![
            drone("D1", "Thermal", "Available", Some("2024-09-01"), ""),
            drone("D2", "Thermal", "Available", Some("2024-02-01"), ""),
            drone("D3", "Thermal", "Available", None, ""),
        ];
        let results = match_drones(&m, &drones);
        let ids: Vec<&str> = results.iter().map(|c| c.drone.id.as_str()).collect();
        assert_eq!(ids, vec!["D2", "D1", "D3"]);
    }

    #[test]
    fn test_empty_tables() {
        let m = mission("Thermal", "RPAS", None);
        assert!(match_pilots(&m, &[], TagMatch::Substring).is_empty());
        assert!(match_drones(&m, &[]).is_empty());
    }
}
