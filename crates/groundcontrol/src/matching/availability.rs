//! Availability query over the pilot roster.

use crate::model::Pilot;

use super::tags::{TagMatch, TagSet};

/// Find pilots currently marked available, optionally narrowed by
/// location and by a skill set.
///
/// - status must contain `"Available"` (case-sensitive substring);
/// - when `location` is given, the pilot's location must contain it;
/// - when `skills` is non-empty, the pilot must match *any* requested tag
///   (logical OR) under the given mode.
///
/// The filter is stable: matches keep their roster order, and no sort is
/// applied. Empty inputs are no-ops, so an empty query returns the whole
/// available set.
#[must_use]
pub fn available_pilots<'a>(
    pilots: &'a [Pilot],
    skills: &TagSet,
    location: Option<&str>,
    mode: TagMatch,
) -> Vec<&'a Pilot> {
    pilots
        .iter()
        .filter(|p| p.is_available())
        .filter(|p| location.map_or(true, |loc| p.location.contains(loc)))
        .filter(|p| skills.is_empty() || skills.any_match(&p.skills, mode))
        .collect()
}
