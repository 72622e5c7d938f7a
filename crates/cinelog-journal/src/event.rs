//! The journal's event kinds and their single-line text codec.
//!
//! Wire grammar, one event per line:
//! ```text
//! Register <id> <name>
//! Archive <id> <bool>
//! Update <id> <mode> <attributeKind> <value>
//! ```
//! `<name>` and `<value>` are rest-of-line fields and may contain spaces.
//! Decoding splits on the first N spaces rather than using a regex; any
//! line that does not fit the grammar decodes to `None` and is skipped by
//! the replayer.

use serde::{Deserialize, Serialize};

use cinelog_model::{AttributeKind, UpdateMode, VideoId};

/// A durable catalog event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JournalEvent {
    /// A new entity came into existence under the given name.
    Register { id: VideoId, name: String },
    /// The entity's logical archival flag changed.
    Archive { id: VideoId, flag: bool },
    /// One attribute value was merged into the entity.
    Update {
        id: VideoId,
        mode: UpdateMode,
        kind: AttributeKind,
        value: String,
    },
}

impl JournalEvent {
    /// Encode to the single-line wire form, without a line terminator.
    pub fn encode(&self) -> String {
        match self {
            Self::Register { id, name } => format!("Register {id} {name}"),
            Self::Archive { id, flag } => format!("Archive {id} {flag}"),
            Self::Update {
                id,
                mode,
                kind,
                value,
            } => format!("Update {id} {mode} {kind} {value}"),
        }
    }

    /// Decode one line, or `None` if it does not fit the grammar.
    ///
    /// Unknown event keywords, non-numeric ids, and unknown mode or
    /// attribute-kind tokens all yield `None`; the caller skips the line.
    pub fn decode(line: &str) -> Option<Self> {
        let mut parts = line.splitn(3, ' ');
        let keyword = parts.next()?;
        let id = parse_id(parts.next()?)?;
        let rest = parts.next()?;

        match keyword {
            "Register" => Some(Self::Register {
                id,
                name: rest.to_string(),
            }),
            "Archive" => Some(Self::Archive {
                id,
                flag: rest.eq_ignore_ascii_case("true"),
            }),
            "Update" => {
                let mut parts = rest.splitn(3, ' ');
                let mode = UpdateMode::parse(parts.next()?)?;
                let kind = AttributeKind::parse(parts.next()?)?;
                let value = parts.next()?;
                Some(Self::Update {
                    id,
                    mode,
                    kind,
                    value: value.to_string(),
                })
            }
            _ => None,
        }
    }
}

fn parse_id(token: &str) -> Option<VideoId> {
    if token.is_empty() || !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    token.parse::<i64>().ok().map(VideoId::new)
}
