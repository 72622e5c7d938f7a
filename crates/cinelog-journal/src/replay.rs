use std::collections::BTreeMap;

use tracing::debug;

use cinelog_model::{Attribute, Video, VideoId};

use crate::error::Result;
use crate::event::JournalEvent;
use crate::journal::Journal;

/// Rebuild the entity map by folding the journal front to back.
///
/// Replay order is the journal's append order; since Add/Remove/RemoveAll
/// merges are order-dependent, preserving exact file order is the central
/// correctness property here. Undecodable lines are skipped, and events
/// referencing unknown ids are no-ops. Name uniqueness is not enforced at
/// replay time; the registrar guards it at write time.
pub fn replay(journal: &Journal) -> Result<BTreeMap<VideoId, Video>> {
    let mut videos = BTreeMap::new();
    let mut skipped = 0usize;

    for line in journal.lines()? {
        match JournalEvent::decode(&line) {
            Some(event) => apply(&mut videos, event),
            None => {
                skipped += 1;
                debug!(line = %line, "skipping undecodable journal line");
            }
        }
    }

    debug!(videos = videos.len(), skipped, "journal replay complete");
    Ok(videos)
}

fn apply(videos: &mut BTreeMap<VideoId, Video>, event: JournalEvent) {
    match event {
        JournalEvent::Register { id, name } => {
            videos.insert(id, Video::with_name(id, &name));
        }
        JournalEvent::Archive { id, flag } => {
            if let Some(video) = videos.get_mut(&id) {
                video.set_archived(flag);
            }
        }
        JournalEvent::Update {
            id,
            mode,
            kind,
            value,
        } => {
            if let Some(video) = videos.get_mut(&id) {
                if let Some(attribute) = Attribute::from_parts(kind, &value) {
                    video.update_attribute(attribute, mode);
                }
            }
        }
    }
}
