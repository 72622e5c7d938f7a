use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use cinelog_journal::{replay, Journal, JournalEvent};
use cinelog_model::{Attribute, AttributeKind, IdGenerator, UpdateMode, Video, VideoId};

use crate::error::{RegistryError, Result};

/// The canonical in-memory index over the journal.
///
/// Owns the id-to-entity and name-to-id maps exclusively. Every mutation
/// first applies to the in-memory entity, then appends the corresponding
/// event to the journal (write-after-apply, not write-ahead). Single
/// writer; construct one registry per journal file and pass it by
/// reference to callers.
pub struct Registry {
    journal: Journal,
    videos: HashMap<VideoId, Video>,
    names: HashMap<String, VideoId>,
    ids: IdGenerator,
}

impl Registry {
    /// Open the registry over the journal at `path`, replaying any existing
    /// events to rebuild the index.
    pub fn open(path: &Path) -> Result<Self> {
        let journal = Journal::open(path)?;
        let replayed = replay(&journal)?;

        let ids = IdGenerator::new();
        let mut names = HashMap::new();
        for (id, video) in &replayed {
            ids.observe(*id);
            if let Some(Attribute::Name(name)) = video.attribute(AttributeKind::Name) {
                names.insert(name.clone(), *id);
            }
        }

        debug!(videos = replayed.len(), path = %path.display(), "registry opened");
        Ok(Self {
            journal,
            videos: replayed.into_iter().collect(),
            names,
            ids,
        })
    }

    /// Register a new video under a unique name.
    pub fn register(&mut self, name: &str) -> Result<&Video> {
        if self.names.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }

        let id = self.ids.next();
        self.names.insert(name.to_string(), id);
        self.videos.insert(id, Video::with_name(id, name));
        self.journal.append(&JournalEvent::Register {
            id,
            name: name.to_string(),
        })?;

        debug!(%id, name, "registered video");
        Ok(&self.videos[&id])
    }

    pub fn find_by_id(&self, id: VideoId) -> Result<&Video> {
        self.videos.get(&id).ok_or(RegistryError::NoSuchId(id))
    }

    pub fn find_by_name(&self, name: &str) -> Result<&Video> {
        let id = self
            .names
            .get(name)
            .ok_or_else(|| RegistryError::NoSuchName(name.to_string()))?;
        self.find_by_id(*id)
    }

    /// All videos whose attributes match every filter attribute. An empty
    /// filter returns the whole catalog.
    pub fn find_all(&self, filter: &[Attribute]) -> Vec<&Video> {
        self.videos
            .values()
            .filter(|video| video.matches_filter(filter))
            .collect()
    }

    /// Merge each attribute into the video, appending one Update event per
    /// log value of each given attribute.
    pub fn update(
        &mut self,
        id: VideoId,
        attributes: &[Attribute],
        mode: UpdateMode,
    ) -> Result<&Video> {
        let video = self
            .videos
            .get_mut(&id)
            .ok_or(RegistryError::NoSuchId(id))?;

        for attribute in attributes {
            video.update_attribute(attribute.clone(), mode);
            let kind = attribute.kind();
            for value in attribute.log_values() {
                self.journal.append(&JournalEvent::Update {
                    id,
                    mode,
                    kind,
                    value,
                })?;
            }
        }

        Ok(&self.videos[&id])
    }

    /// Set the logical archival flag.
    pub fn archive(&mut self, id: VideoId, flag: bool) -> Result<&Video> {
        let video = self
            .videos
            .get_mut(&id)
            .ok_or(RegistryError::NoSuchId(id))?;
        video.set_archived(flag);
        self.journal.append(&JournalEvent::Archive { id, flag })?;
        Ok(&self.videos[&id])
    }

    /// Drop all in-memory state and truncate the journal. Test isolation
    /// only; not part of steady-state operation.
    pub fn reset(&mut self) -> Result<()> {
        self.videos.clear();
        self.names.clear();
        self.journal.clear()?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}
