use cinelog_model::{Attribute, UpdateMode, Video, VideoId};

use crate::error::Result;
use crate::registry::Registry;

/// Boundary consumed by thin front-ends embedding the store.
///
/// Mirrors the registry's operations but returns owned snapshots, so a
/// facade never holds references into the index across its own calls.
pub trait Catalog {
    fn register(&mut self, name: &str) -> Result<Video>;

    fn find_by_id(&self, id: VideoId) -> Result<Video>;

    fn find_by_name(&self, name: &str) -> Result<Video>;

    fn find_all(&self, filter: &[Attribute]) -> Vec<Video>;

    fn update(&mut self, id: VideoId, attributes: &[Attribute], mode: UpdateMode)
        -> Result<Video>;

    fn archive(&mut self, id: VideoId, flag: bool) -> Result<Video>;
}

impl Catalog for Registry {
    fn register(&mut self, name: &str) -> Result<Video> {
        Registry::register(self, name).cloned()
    }

    fn find_by_id(&self, id: VideoId) -> Result<Video> {
        Registry::find_by_id(self, id).cloned()
    }

    fn find_by_name(&self, name: &str) -> Result<Video> {
        Registry::find_by_name(self, name).cloned()
    }

    fn find_all(&self, filter: &[Attribute]) -> Vec<Video> {
        Registry::find_all(self, filter)
            .into_iter()
            .cloned()
            .collect()
    }

    fn update(
        &mut self,
        id: VideoId,
        attributes: &[Attribute],
        mode: UpdateMode,
    ) -> Result<Video> {
        Registry::update(self, id, attributes, mode).cloned()
    }

    fn archive(&mut self, id: VideoId, flag: bool) -> Result<Video> {
        Registry::archive(self, id, flag).cloned()
    }
}
