//! Tag parsing and matching policies.
//!
//! Roster tag fields are comma-separated free text. Historically the board
//! matched requested tags by raw substring search, which also matches
//! inside longer tags ("Pilot" matches "Co-Pilot-Trainer"). That behavior
//! is kept as the default `Substring` mode; `Exact` is an opt-in mode that
//! tag-splits the candidate field and requires a normalized token match.
//!
//! The drone capability check and the urgent scorer deliberately do NOT go
//! through this mode switch: the capability check compares the whole
//! required-skills string verbatim and the urgent scorer always uses
//! lower-cased substring counting. Those are separate policies and unifying
//! them would change observable ranking.

use serde::{Deserialize, Serialize};

/// A parsed set of requirement tags, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(Vec<String>);

impl TagSet {
    /// Parse a comma-separated tag field: split, trim, drop empties.
    #[must_use]
    pub fn parse(field: &str) -> Self {
        Self(
            field
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(ToString::to_string)
                .collect(),
        )
    }

    /// Whether the set holds no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the tags.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// True when every tag in the set matches the candidate field under
    /// the given mode. Vacuously true for an empty set.
    #[must_use]
    pub fn all_match(&self, field: &str, mode: TagMatch) -> bool {
        self.0.iter().all(|tag| mode.tag_in_field(tag, field))
    }

    /// True when at least one tag matches the candidate field under the
    /// given mode. An empty set matches nothing.
    #[must_use]
    pub fn any_match(&self, field: &str, mode: TagMatch) -> bool {
        self.0.iter().any(|tag| mode.tag_in_field(tag, field))
    }

    /// Count of tags whose lower-cased form appears as a substring of the
    /// lower-cased candidate field. Used by the urgent scorer regardless
    /// of the configured mode.
    #[must_use]
    pub fn count_in_lowercase(&self, field: &str) -> usize {
        let field = field.to_lowercase();
        self.0
            .iter()
            .filter(|tag| field.contains(&tag.to_lowercase()))
            .count()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// How a requested tag is matched against a roster tag field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagMatch {
    /// Raw substring search in the candidate field (historical default).
    #[default]
    Substring,
    /// The candidate field is tag-split and lower-cased; the requested tag
    /// must equal one of its tokens.
    Exact,
}

impl TagMatch {
    /// Test one requested tag against a candidate tag field.
    #[must_use]
    pub fn tag_in_field(&self, tag: &str, field: &str) -> bool {
        match self {
            Self::Substring => field.contains(tag),
            Self::Exact => {
                let wanted = tag.to_lowercase();
                field
                    .split(',')
                    .map(|t| t.trim().to_lowercase())
                    .any(|t| t == wanted)
            }
        }
    }
}
