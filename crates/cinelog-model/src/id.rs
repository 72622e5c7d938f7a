use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Unique identifier for a video entity.
///
/// Ids are wall-clock-millisecond derived and strictly increasing, so a
/// newer registration always carries a larger id than any older one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(i64);

impl VideoId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Debug for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VideoId({})", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strictly monotonic id source seeded from wall-clock time.
///
/// Each call to [`next`](IdGenerator::next) returns the current wall-clock
/// millisecond or the previous id plus one, whichever is larger. Rapid
/// successive calls therefore never produce a duplicate and never sleep.
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    /// Create a generator seeded at the current wall-clock time.
    pub fn new() -> Self {
        Self {
            last: AtomicI64::new(now_millis()),
        }
    }

    /// Produce the next id, strictly greater than any id produced or
    /// observed so far.
    pub fn next(&self) -> VideoId {
        let now = now_millis();
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last + 1);
            match self.last.compare_exchange_weak(
                last,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return VideoId::new(candidate),
                Err(observed) => last = observed,
            }
        }
    }

    /// Record an externally assigned id (e.g. one replayed from the log)
    /// so that subsequent ids stay strictly above it.
    pub fn observe(&self, id: VideoId) {
        self.last.fetch_max(id.as_i64(), Ordering::Relaxed);
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_is_strictly_increasing() {
        let ids = IdGenerator::new();
        let mut previous = ids.next();
        for _ in 0..1000 {
            let id = ids.next();
            assert!(id > previous);
            previous = id;
        }
    }

    #[test]
    fn next_tracks_wall_clock() {
        let id = IdGenerator::new().next();
        // Should be after 2020-01-01 (1577836800000 ms).
        assert!(id.as_i64() > 1_577_836_800_000);
    }

    #[test]
    fn observe_pushes_generator_past_replayed_ids() {
        let ids = IdGenerator::new();
        let far_future = VideoId::new(i64::MAX - 10);
        ids.observe(far_future);
        assert!(ids.next() > far_future);
    }

    #[test]
    fn observe_of_old_id_does_not_regress() {
        let ids = IdGenerator::new();
        let first = ids.next();
        ids.observe(VideoId::new(1));
        assert!(ids.next() > first);
    }

    #[test]
    fn serde_roundtrip() {
        let id = VideoId::new(1_456_223_331);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "1456223331");
        let parsed: VideoId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn display_is_plain_decimal() {
        assert_eq!(format!("{}", VideoId::new(42)), "42");
    }
}
