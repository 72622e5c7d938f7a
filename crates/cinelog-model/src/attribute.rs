//! Typed attribute values and their merge/comparison rules.
//!
//! Attributes come in two merge modes. Replace-mode kinds (Name, Provider,
//! Release, Type) hold a single scalar that an incoming value overwrites.
//! Incremental-mode kinds (Cast, Directors, Series) hold a collection that
//! Add/Remove/RemoveAll mutate in place. The entity-level dispatch in
//! [`crate::video::Video::update_attribute`] decides between replacing the
//! map entry and delegating to [`Attribute::merge`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::episode::{self, Episode};
use crate::kind::VideoKind;

/// How an incoming attribute combines with a stored one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateMode {
    Add,
    Remove,
    RemoveAll,
}

impl UpdateMode {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "Add" => Some(Self::Add),
            "Remove" => Some(Self::Remove),
            "RemoveAll" => Some(Self::RemoveAll),
            _ => None,
        }
    }

    pub const fn token(&self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Remove => "Remove",
            Self::RemoveAll => "RemoveAll",
        }
    }
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Discriminator for the typed attribute values. Doubles as the attribute
/// map key: an entity holds at most one value per kind.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum AttributeKind {
    Cast,
    Directors,
    Name,
    Provider,
    Release,
    Series,
    Type,
}

impl AttributeKind {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "Cast" => Some(Self::Cast),
            "Directors" => Some(Self::Directors),
            "Name" => Some(Self::Name),
            "Provider" => Some(Self::Provider),
            "Release" => Some(Self::Release),
            "Series" => Some(Self::Series),
            "Type" => Some(Self::Type),
            _ => None,
        }
    }

    pub const fn token(&self) -> &'static str {
        match self {
            Self::Cast => "Cast",
            Self::Directors => "Directors",
            Self::Name => "Name",
            Self::Provider => "Provider",
            Self::Release => "Release",
            Self::Series => "Series",
            Self::Type => "Type",
        }
    }

    /// Replace-mode kinds overwrite the stored value wholesale; the rest
    /// merge incrementally.
    pub const fn replaces(&self) -> bool {
        matches!(self, Self::Name | Self::Provider | Self::Release | Self::Type)
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A typed attribute value held by a video entity or a series episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Attribute {
    Name(String),
    Provider(String),
    Release(i64),
    Type(VideoKind),
    Cast(Vec<String>),
    Directors(Vec<String>),
    Series(Vec<Episode>),
}

impl Attribute {
    pub const fn kind(&self) -> AttributeKind {
        match self {
            Self::Name(_) => AttributeKind::Name,
            Self::Provider(_) => AttributeKind::Provider,
            Self::Release(_) => AttributeKind::Release,
            Self::Type(_) => AttributeKind::Type,
            Self::Cast(_) => AttributeKind::Cast,
            Self::Directors(_) => AttributeKind::Directors,
            Self::Series(_) => AttributeKind::Series,
        }
    }

    /// Construct an attribute from its kind and the raw value text found in
    /// a log line.
    ///
    /// Construction is deliberately lenient for log compatibility: a
    /// non-numeric Release defaults to timestamp 0, and a Series value that
    /// fails to parse still yields a Series holding the invalid episode
    /// `(0, 0)`. Only an unknown classification token makes construction
    /// fail, in which case the caller skips the value.
    pub fn from_parts(kind: AttributeKind, raw: &str) -> Option<Self> {
        match kind {
            AttributeKind::Name => Some(Self::Name(raw.to_string())),
            AttributeKind::Provider => Some(Self::Provider(raw.to_string())),
            AttributeKind::Release => Some(Self::Release(raw.parse().unwrap_or(0))),
            AttributeKind::Type => VideoKind::parse(raw).map(Self::Type),
            AttributeKind::Cast => Some(Self::Cast(vec![raw.to_string()])),
            AttributeKind::Directors => Some(Self::Directors(vec![raw.to_string()])),
            AttributeKind::Series => Some(Self::Series(vec![Episode::parse(raw)])),
        }
    }

    /// Merge an incoming attribute of the same kind into this one.
    ///
    /// Kind mismatches and scalar kinds are no-ops; replacement of scalars
    /// happens at the entity level, not here. Cast and Directors append on
    /// Add (duplicates permitted) and drop exact matches on Remove; their
    /// RemoveAll is also entity-level. Series merges by `(season, episode)`
    /// key and clears on RemoveAll.
    pub fn merge(&mut self, incoming: &Attribute, mode: UpdateMode) {
        match (self, incoming) {
            (Self::Cast(current), Self::Cast(incoming)) => merge_list(current, incoming, mode),
            (Self::Directors(current), Self::Directors(incoming)) => {
                merge_list(current, incoming, mode)
            }
            (Self::Series(current), Self::Series(incoming)) => {
                episode::merge_episodes(current, incoming, mode)
            }
            _ => {}
        }
    }

    /// Filter equality, used only by `find_all` query matching.
    ///
    /// Scalars compare by payload, Cast/Directors as order-insensitive
    /// multisets. A Series filter never matches a distinct stored Series;
    /// series identity is positional, not structural, so content equality
    /// is deliberately not defined for it.
    pub fn matches(&self, filter: &Attribute) -> bool {
        match (self, filter) {
            (Self::Name(a), Self::Name(b)) => a == b,
            (Self::Provider(a), Self::Provider(b)) => a == b,
            (Self::Release(a), Self::Release(b)) => a == b,
            (Self::Type(a), Self::Type(b)) => a == b,
            (Self::Cast(a), Self::Cast(b)) => same_entries(a, b),
            (Self::Directors(a), Self::Directors(b)) => same_entries(a, b),
            _ => false,
        }
    }

    /// The value strings written to the log for this attribute: one per
    /// element for incremental kinds, a single string for scalars.
    pub fn log_values(&self) -> Vec<String> {
        match self {
            Self::Name(name) | Self::Provider(name) => vec![name.clone()],
            Self::Release(timestamp) => vec![timestamp.to_string()],
            Self::Type(kind) => vec![kind.token().to_string()],
            Self::Cast(entries) | Self::Directors(entries) => entries.clone(),
            Self::Series(episodes) => episodes.iter().flat_map(Episode::log_values).collect(),
        }
    }
}

fn merge_list(current: &mut Vec<String>, incoming: &[String], mode: UpdateMode) {
    match mode {
        UpdateMode::Add => current.extend(incoming.iter().cloned()),
        UpdateMode::Remove => current.retain(|entry| !incoming.contains(entry)),
        UpdateMode::RemoveAll => {}
    }
}

fn same_entries(first: &[String], second: &[String]) -> bool {
    first.len() == second.len() && first.iter().all(|entry| second.contains(entry))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_kinds_are_flagged() {
        assert!(AttributeKind::Name.replaces());
        assert!(AttributeKind::Provider.replaces());
        assert!(AttributeKind::Release.replaces());
        assert!(AttributeKind::Type.replaces());
        assert!(!AttributeKind::Cast.replaces());
        assert!(!AttributeKind::Directors.replaces());
        assert!(!AttributeKind::Series.replaces());
    }

    #[test]
    fn cast_add_appends_and_remove_drops_exact_matches() {
        let mut cast = Attribute::Cast(vec![]);
        cast.merge(
            &Attribute::from_parts(AttributeKind::Cast, "Harrison Ford").unwrap(),
            UpdateMode::Add,
        );
        cast.merge(
            &Attribute::from_parts(AttributeKind::Cast, "Carrie Fisher").unwrap(),
            UpdateMode::Add,
        );
        assert_eq!(
            cast,
            Attribute::Cast(vec!["Harrison Ford".into(), "Carrie Fisher".into()])
        );

        cast.merge(
            &Attribute::from_parts(AttributeKind::Cast, "Harrison Ford").unwrap(),
            UpdateMode::Remove,
        );
        assert_eq!(cast, Attribute::Cast(vec!["Carrie Fisher".into()]));
    }

    #[test]
    fn cast_add_permits_duplicates() {
        let mut cast = Attribute::Cast(vec!["fred".into()]);
        cast.merge(&Attribute::Cast(vec!["fred".into()]), UpdateMode::Add);
        assert_eq!(cast, Attribute::Cast(vec!["fred".into(), "fred".into()]));

        // Remove drops every exact match.
        cast.merge(&Attribute::Cast(vec!["fred".into()]), UpdateMode::Remove);
        assert_eq!(cast, Attribute::Cast(vec![]));
    }

    #[test]
    fn merge_ignores_kind_mismatch() {
        let mut cast = Attribute::Cast(vec!["fred".into()]);
        cast.merge(&Attribute::Name("fred".into()), UpdateMode::Add);
        assert_eq!(cast, Attribute::Cast(vec!["fred".into()]));
    }

    #[test]
    fn scalar_merge_is_a_no_op() {
        let mut name = Attribute::Name("old".into());
        name.merge(&Attribute::Name("new".into()), UpdateMode::Add);
        assert_eq!(name, Attribute::Name("old".into()));
    }

    #[test]
    fn release_construction_defaults_to_zero_on_parse_failure() {
        assert_eq!(
            Attribute::from_parts(AttributeKind::Release, "not-a-number"),
            Some(Attribute::Release(0))
        );
        assert_eq!(
            Attribute::from_parts(AttributeKind::Release, "1456223331"),
            Some(Attribute::Release(1456223331))
        );
    }

    #[test]
    fn type_construction_rejects_unknown_classification() {
        assert_eq!(Attribute::from_parts(AttributeKind::Type, "InvalidType"), None);
        assert_eq!(
            Attribute::from_parts(AttributeKind::Type, "Movie"),
            Some(Attribute::Type(VideoKind::Movie))
        );
    }

    #[test]
    fn name_value_keeps_embedded_spaces() {
        let name = Attribute::from_parts(AttributeKind::Name, "The Empire Strikes Back").unwrap();
        assert_eq!(name.log_values(), vec!["The Empire Strikes Back".to_string()]);
    }

    #[test]
    fn filter_matching_compares_kind_then_payload() {
        let stored = Attribute::Name("Video 3".into());
        assert!(stored.matches(&Attribute::Name("Video 3".into())));
        assert!(!stored.matches(&Attribute::Name("Video 4".into())));
        assert!(!stored.matches(&Attribute::Provider("Video 3".into())));
    }

    #[test]
    fn filter_matching_treats_lists_as_sets() {
        let stored = Attribute::Cast(vec!["a".into(), "b".into()]);
        assert!(stored.matches(&Attribute::Cast(vec!["b".into(), "a".into()])));
        assert!(!stored.matches(&Attribute::Cast(vec!["a".into()])));
        assert!(!stored.matches(&Attribute::Cast(vec!["a".into(), "c".into()])));
    }

    #[test]
    fn series_never_matches_a_distinct_instance() {
        let stored = Attribute::Series(vec![Episode::parse("1 1 Name Pilot")]);
        let filter = Attribute::Series(vec![Episode::parse("1 1 Name Pilot")]);
        assert!(!stored.matches(&filter));
    }

    #[test]
    fn log_values_per_kind() {
        assert_eq!(
            Attribute::Release(1456223331).log_values(),
            vec!["1456223331".to_string()]
        );
        assert_eq!(
            Attribute::Type(VideoKind::TvShow).log_values(),
            vec!["TvShow".to_string()]
        );
        assert_eq!(
            Attribute::Directors(vec!["Lucas".into(), "Kershner".into()]).log_values(),
            vec!["Lucas".to_string(), "Kershner".to_string()]
        );
    }

    #[test]
    fn serde_roundtrip() {
        let attribute = Attribute::Cast(vec!["some star".into()]);
        let json = serde_json::to_string(&attribute).unwrap();
        let parsed: Attribute = serde_json::from_str(&json).unwrap();
        assert_eq!(attribute, parsed);
    }
}
