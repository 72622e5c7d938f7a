use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, AttributeKind, UpdateMode};
use crate::id::VideoId;

/// A catalog entity: a unique id, a kind-keyed attribute map, and a logical
/// archival flag. Entities are never physically deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Video {
    id: VideoId,
    attributes: BTreeMap<AttributeKind, Attribute>,
    archived: bool,
}

impl Video {
    pub fn new(id: VideoId) -> Self {
        Self {
            id,
            attributes: BTreeMap::new(),
            archived: false,
        }
    }

    /// Construct a freshly registered entity carrying only its Name
    /// attribute, exactly what a Register event produces on replay.
    pub fn with_name(id: VideoId, name: &str) -> Self {
        let mut video = Self::new(id);
        video
            .attributes
            .insert(AttributeKind::Name, Attribute::Name(name.to_string()));
        video
    }

    pub const fn id(&self) -> VideoId {
        self.id
    }

    pub const fn archived(&self) -> bool {
        self.archived
    }

    pub fn set_archived(&mut self, archived: bool) {
        self.archived = archived;
    }

    pub fn attribute(&self, kind: AttributeKind) -> Option<&Attribute> {
        self.attributes.get(&kind)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Apply one attribute update, dispatching to the right merge rule.
    ///
    /// - `Add`: insert/replace when the kind is absent or replace-mode,
    ///   otherwise delegate to the stored value's merge.
    /// - `Remove`: delete the entry outright for replace-mode kinds,
    ///   otherwise delegate to the stored value's merge.
    /// - `RemoveAll`: delete the kind's entry unconditionally.
    ///
    /// Updates never fail; mismatched or missing targets are ignored.
    pub fn update_attribute(&mut self, attribute: Attribute, mode: UpdateMode) {
        let mut attribute = attribute;
        if let Attribute::Series(episodes) = &mut attribute {
            for episode in episodes.iter_mut() {
                episode.prune_series();
            }
        }

        let kind = attribute.kind();
        match mode {
            UpdateMode::Add => match self.attributes.get_mut(&kind) {
                Some(existing) if !kind.replaces() => existing.merge(&attribute, mode),
                _ => {
                    self.attributes.insert(kind, attribute);
                }
            },
            UpdateMode::Remove => {
                if kind.replaces() {
                    self.attributes.remove(&kind);
                } else if let Some(existing) = self.attributes.get_mut(&kind) {
                    existing.merge(&attribute, mode);
                }
            }
            UpdateMode::RemoveAll => {
                self.attributes.remove(&kind);
            }
        }
    }

    /// `true` when every filter attribute has a stored value of the same
    /// kind that matches it. An empty filter matches everything.
    pub fn matches_filter(&self, filter: &[Attribute]) -> bool {
        filter.iter().all(|wanted| {
            self.attribute(wanted.kind())
                .is_some_and(|stored| stored.matches(wanted))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::episode::Episode;
    use crate::kind::VideoKind;

    fn video() -> Video {
        Video::with_name(VideoId::new(1), "Faux Video")
    }

    #[test]
    fn with_name_carries_exactly_one_attribute() {
        let video = video();
        assert_eq!(video.attribute_count(), 1);
        assert_eq!(
            video.attribute(AttributeKind::Name),
            Some(&Attribute::Name("Faux Video".into()))
        );
        assert!(!video.archived());
    }

    #[test]
    fn replace_kind_keeps_exactly_one_value() {
        let mut video = video();
        video.update_attribute(Attribute::Type(VideoKind::Movie), UpdateMode::Add);
        video.update_attribute(Attribute::Type(VideoKind::TvShow), UpdateMode::Add);
        assert_eq!(
            video.attribute(AttributeKind::Type),
            Some(&Attribute::Type(VideoKind::TvShow))
        );
        assert_eq!(video.attribute_count(), 2);
    }

    #[test]
    fn remove_deletes_replace_kind_entry() {
        let mut video = video();
        video.update_attribute(Attribute::Provider("Netflix".into()), UpdateMode::Add);
        video.update_attribute(Attribute::Provider("ignored".into()), UpdateMode::Remove);
        assert_eq!(video.attribute(AttributeKind::Provider), None);
    }

    #[test]
    fn remove_of_absent_kind_is_a_no_op() {
        let mut video = video();
        video.update_attribute(Attribute::Cast(vec!["fred".into()]), UpdateMode::Remove);
        video.update_attribute(Attribute::Provider("x".into()), UpdateMode::Remove);
        assert_eq!(video.attribute_count(), 1);
    }

    #[test]
    fn incremental_kind_accumulates_then_removes() {
        let mut video = video();
        video.update_attribute(Attribute::Cast(vec!["A".into(), "B".into()]), UpdateMode::Add);
        video.update_attribute(Attribute::Cast(vec!["A".into()]), UpdateMode::Remove);
        assert_eq!(
            video.attribute(AttributeKind::Cast),
            Some(&Attribute::Cast(vec!["B".into()]))
        );
    }

    #[test]
    fn remove_all_deletes_the_entry_for_any_kind() {
        let mut video = video();
        video.update_attribute(Attribute::Cast(vec!["A".into()]), UpdateMode::Add);
        video.update_attribute(Attribute::Cast(vec![]), UpdateMode::RemoveAll);
        assert_eq!(video.attribute(AttributeKind::Cast), None);

        video.update_attribute(Attribute::Name("anything".into()), UpdateMode::RemoveAll);
        assert_eq!(video.attribute(AttributeKind::Name), None);
    }

    #[test]
    fn series_insert_path_prunes_self_containment() {
        let mut nested = std::collections::BTreeMap::new();
        nested.insert(AttributeKind::Series, Attribute::Series(vec![]));
        let mut video = video();
        video.update_attribute(
            Attribute::Series(vec![Episode::new(1, 1, nested)]),
            UpdateMode::Add,
        );
        let Some(Attribute::Series(episodes)) = video.attribute(AttributeKind::Series) else {
            panic!("series attribute missing");
        };
        assert!(!episodes[0].data.contains_key(&AttributeKind::Series));
    }

    #[test]
    fn attributes_iterates_every_stored_value() {
        let mut video = video();
        video.update_attribute(Attribute::Provider("HBO".into()), UpdateMode::Add);
        video.update_attribute(Attribute::Release(1456223331), UpdateMode::Add);

        let kinds: Vec<_> = video.attributes().map(Attribute::kind).collect();
        assert_eq!(
            kinds,
            vec![AttributeKind::Name, AttributeKind::Provider, AttributeKind::Release]
        );
        assert_eq!(video.attributes().count(), video.attribute_count());
    }

    #[test]
    fn filter_requires_every_attribute_to_match() {
        let mut video = video();
        video.update_attribute(Attribute::Provider("HBO".into()), UpdateMode::Add);

        assert!(video.matches_filter(&[]));
        assert!(video.matches_filter(&[Attribute::Name("Faux Video".into())]));
        assert!(video.matches_filter(&[
            Attribute::Name("Faux Video".into()),
            Attribute::Provider("HBO".into()),
        ]));
        assert!(!video.matches_filter(&[
            Attribute::Name("Faux Video".into()),
            Attribute::Provider("Netflix".into()),
        ]));
        assert!(!video.matches_filter(&[Attribute::Release(0)]));
    }
}
