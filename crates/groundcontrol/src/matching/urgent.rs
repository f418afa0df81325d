//! Relaxed urgent-reassignment scoring.
//!
//! When the strict matcher comes back empty for a mission that has to fly,
//! this module trades precision for a ranked shortlist: availability is
//! the only hard filter and everything else is a weighted score, so the
//! operator always gets something to act on. Scoring here always uses
//! lower-cased substring counting, independent of the configured tag-match
//! mode.

use serde::Serialize;

use crate::model::{Drone, Mission, Pilot};

use super::matcher::{self, cmp_dates_missing_last, duration_days};
use super::tags::TagSet;

/// A scored pilot candidate from the relaxed path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrgentPilot<'a> {
    /// The available pilot.
    pub pilot: &'a Pilot,
    /// Required-skill tags found in the pilot's skills field.
    pub skill_matches: usize,
    /// Required-cert tags found in the certifications field.
    pub cert_matches: usize,
    /// `daily_rate × duration_days(mission)`.
    pub estimated_cost: f64,
    /// Whether the estimate fits the mission budget.
    pub within_budget: bool,
    /// Whether the pilot's location contains the mission location.
    pub location_match: bool,
    /// The weighted score used for ranking.
    pub score: f64,
}

/// A scored drone candidate from the relaxed path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrgentDrone<'a> {
    /// The available drone.
    pub drone: &'a Drone,
    /// Verbatim capability match carried over from the strict matcher.
    pub capability_match: bool,
    /// Weather rule result carried over from the strict matcher.
    pub weather_ok: bool,
    /// Whether the drone's location contains the mission location.
    pub location_match: bool,
    /// The weighted score used for ranking.
    pub score: i64,
}

/// Produce ranked fallback shortlists for an urgent mission.
///
/// Pilot score: `skill_matches×3 + cert_matches×4 + within_budget×2 +
/// location_match − estimated_cost/10000`. Drone score:
/// `location_match + weather_ok×2`. Both lists are truncated to
/// `max_candidates`. An empty available pool yields an empty list, not an
/// error.
#[must_use]
pub fn suggest_urgent<'a>(
    mission: &Mission,
    pilots: &'a [Pilot],
    drones: &'a [Drone],
    max_candidates: usize,
) -> (Vec<UrgentPilot<'a>>, Vec<UrgentDrone<'a>>) {
    let req_skills = TagSet::parse(&mission.required_skills);
    let req_certs = TagSet::parse(&mission.required_certs);
    let days = duration_days(mission);

    let mut pilot_candidates: Vec<UrgentPilot<'a>> = pilots
        .iter()
        .filter(|p| p.is_available())
        .map(|pilot| {
            let skill_matches = req_skills.count_in_lowercase(&pilot.skills);
            let cert_matches = req_certs.count_in_lowercase(&pilot.certifications);
            #[allow(clippy::cast_precision_loss)]
            let estimated_cost = pilot.daily_rate * days as f64;
            let within_budget = mission.budget.map_or(true, |b| estimated_cost <= b);
            let location_match = pilot.location.contains(&mission.location);
            #[allow(clippy::cast_precision_loss)]
            let score = (skill_matches * 3 + cert_matches * 4) as f64
                + f64::from(u8::from(within_budget)) * 2.0
                + f64::from(u8::from(location_match))
                - estimated_cost / 10000.0;
            UrgentPilot {
                pilot,
                skill_matches,
                cert_matches,
                estimated_cost,
                within_budget,
                location_match,
                score,
            }
        })
        .collect();
    pilot_candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.estimated_cost.total_cmp(&b.estimated_cost))
    });
    pilot_candidates.truncate(max_candidates);

    let mut drone_candidates: Vec<UrgentDrone<'a>> = matcher::match_drones(mission, drones)
        .into_iter()
        .map(|c| {
            let location_match = c.drone.location.contains(&mission.location);
            let score = i64::from(location_match) + i64::from(c.weather_ok) * 2;
            UrgentDrone {
                drone: c.drone,
                capability_match: c.capability_match,
                weather_ok: c.weather_ok,
                location_match,
                score,
            }
        })
        .collect();
    drone_candidates.sort_by(|a, b| {
        b.score.cmp(&a.score).then_with(|| {
            cmp_dates_missing_last(a.drone.maintenance_due, b.drone.maintenance_due)
        })
    });
    drone_candidates.truncate(max_candidates);

    (pilot_candidates, drone_candidates)
}
