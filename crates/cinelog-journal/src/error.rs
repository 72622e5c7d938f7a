/// Errors produced by journal operations. Malformed log content is not an
/// error: undecodable lines are skipped by policy, so only I/O can fail.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("journal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, JournalError>;
