//! Episodes: the nested structure carried by the Series attribute.
//!
//! A Series attribute holds a list of episodes keyed by their
//! `(season, episode)` pair. Episodes carry their own attribute map,
//! recursively typed like an entity but without an id. To block unbounded
//! recursion, any Series entry inside an incoming episode's map is stripped
//! before the episode is merged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, AttributeKind, UpdateMode};

/// One episode of a series: its position plus a nested attribute map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub season: u32,
    pub episode: u32,
    pub data: BTreeMap<AttributeKind, Attribute>,
}

impl Episode {
    pub fn new(season: u32, episode: u32, data: BTreeMap<AttributeKind, Attribute>) -> Self {
        Self {
            season,
            episode,
            data,
        }
    }

    /// The placeholder episode substituted for unparseable input.
    pub fn invalid() -> Self {
        Self::new(0, 0, BTreeMap::new())
    }

    /// Identity used for Add/Remove matching: position, not content.
    pub fn key(&self) -> (u32, u32) {
        (self.season, self.episode)
    }

    /// Parse an episode from its log value text:
    /// `"<season> <episode> <Kind> <value>"` where the value is the rest of
    /// the text and may contain spaces.
    ///
    /// Any failure — missing fields, non-numeric position, unknown kind, or
    /// an unconstructable nested attribute — yields [`Episode::invalid`]
    /// rather than an error, matching the log's lenient decode policy.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.splitn(4, ' ');
        let (Some(season), Some(episode), Some(kind), Some(value)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Self::invalid();
        };
        let (Ok(season), Ok(episode)) = (season.parse::<u32>(), episode.parse::<u32>()) else {
            return Self::invalid();
        };
        let Some(kind) = AttributeKind::parse(kind) else {
            return Self::invalid();
        };
        let Some(attribute) = Attribute::from_parts(kind, value) else {
            return Self::invalid();
        };

        let mut data = BTreeMap::new();
        data.insert(kind, attribute);
        Self::new(season, episode, data)
    }

    /// Log value strings for this episode, one per nested attribute value,
    /// in the same format [`Episode::parse`] reads back.
    pub fn log_values(&self) -> Vec<String> {
        let mut values = Vec::new();
        for (kind, attribute) in &self.data {
            for value in attribute.log_values() {
                values.push(format!("{} {} {kind} {value}", self.season, self.episode));
            }
        }
        values
    }

    /// Strip any nested Series entry so a series can never contain itself.
    pub(crate) fn prune_series(&mut self) {
        self.data.remove(&AttributeKind::Series);
    }
}

/// Series merge rule. Matching is by `(season, episode)` key: Add replaces
/// any episode sharing the incoming key before appending, Remove deletes by
/// key without re-adding, RemoveAll clears the list.
pub(crate) fn merge_episodes(current: &mut Vec<Episode>, incoming: &[Episode], mode: UpdateMode) {
    match mode {
        UpdateMode::Add => {
            for episode in incoming {
                let mut episode = episode.clone();
                episode.prune_series();
                current.retain(|existing| existing.key() != episode.key());
                current.push(episode);
            }
        }
        UpdateMode::Remove => {
            for episode in incoming {
                current.retain(|existing| existing.key() != episode.key());
            }
        }
        UpdateMode::RemoveAll => current.clear(),
    }
}
