//! Reality Switch - session controller for a timed browser escape room
//!
//! Core modules:
//! - `session`: Countdown/penalty state machine, puzzle progress, UI value holders
//! - `persistence`: Restore/snapshot against LocalStorage-style key/value storage
//! - `platform`: Browser/native platform abstraction (ticks, storage)
//! - `settings`: Validated timer configuration
//! - `web`: JS bindings for the UI layer (wasm32 only)

pub mod error;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{ConfigError, StorageError};
pub use persistence::{PersistenceBridge, RestoreReport};
pub use session::{Page, ProgressTrack, SessionEvent, SessionState};
pub use settings::{Settings, TimerConfig};

/// Session configuration constants
pub mod consts {
    /// Default countdown length (1 hour)
    pub const DEFAULT_TIME_LEFT_SECS: u32 = 3600;
    /// Default penalty for a wrong answer
    pub const DEFAULT_PENALTY_SECS: u32 = 60;
    /// Countdown tick period
    pub const TICK_INTERVAL_MS: i32 = 1000;
}

/// Format seconds as `MM:SS` for the countdown display.
/// Minutes are not wrapped into hours.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(3600), "60:00");
        assert_eq!(format_clock(3599), "59:59");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(0), "00:00");
    }
}
