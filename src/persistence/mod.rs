//! Reload survival via a flat key/value store
//!
//! Four keys, all plain strings:
//! - `timeLeft`: decimal seconds
//! - `timerRunning`: `"true"` / `"false"`, read but never re-applied
//! - `currentIndiceIndex`, `currentObjetIndex`: JSON objects, card → index
//!
//! Persistence is best-effort. Bad values fall back to defaults, storage
//! failures are logged and swallowed.

pub mod bridge;

pub use bridge::{PersistenceBridge, RestoreReport};

use crate::session::ProgressTrack;

pub const KEY_TIME_LEFT: &str = "timeLeft";
pub const KEY_TIMER_RUNNING: &str = "timerRunning";
pub const KEY_INDICE_PROGRESS: &str = "currentIndiceIndex";
pub const KEY_OBJET_PROGRESS: &str = "currentObjetIndex";

/// Every key the bridge owns
pub const ALL_KEYS: [&str; 4] = [
    KEY_TIME_LEFT,
    KEY_TIMER_RUNNING,
    KEY_INDICE_PROGRESS,
    KEY_OBJET_PROGRESS,
];

/// Storage key for a progress track
pub fn progress_key(track: ProgressTrack) -> &'static str {
    match track {
        ProgressTrack::Indice => KEY_INDICE_PROGRESS,
        ProgressTrack::Objet => KEY_OBJET_PROGRESS,
    }
}

/// Parse a persisted `timeLeft` value
pub fn parse_time_left(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// Parse a persisted `timerRunning` value
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
