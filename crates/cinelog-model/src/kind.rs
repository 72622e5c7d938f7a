use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a video entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoKind {
    Error,
    Movie,
    MovieSeries,
    TvShow,
    TvSeries,
}

impl VideoKind {
    /// Parse a wire token. Unknown tokens yield `None`; callers treat an
    /// unparseable classification as an unconstructable attribute.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "Error" => Some(Self::Error),
            "Movie" => Some(Self::Movie),
            "MovieSeries" => Some(Self::MovieSeries),
            "TvShow" => Some(Self::TvShow),
            "TvSeries" => Some(Self::TvSeries),
            _ => None,
        }
    }

    pub const fn token(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Movie => "Movie",
            Self::MovieSeries => "MovieSeries",
            Self::TvShow => "TvShow",
            Self::TvSeries => "TvSeries",
        }
    }
}

impl fmt::Display for VideoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
