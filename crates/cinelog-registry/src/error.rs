use cinelog_model::VideoId;

/// Errors produced by registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("a video named {0:?} is already registered")]
    DuplicateName(String),

    #[error("no video with id {0}")]
    NoSuchId(VideoId),

    #[error("no video named {0:?}")]
    NoSuchName(String),

    #[error(transparent)]
    Journal(#[from] cinelog_journal::JournalError),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
