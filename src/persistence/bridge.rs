//! Restore/snapshot between `SessionState` and a `KeyValueStore`

use super::{ALL_KEYS, KEY_TIME_LEFT, KEY_TIMER_RUNNING, parse_flag, parse_time_left, progress_key};
use crate::platform::KeyValueStore;
use crate::session::{ProgressMap, ProgressTrack, SessionState};

/// What `restore` did with each key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Keys whose values were applied
    pub restored: Vec<&'static str>,
    /// Keys that were present but malformed or unreadable
    pub discarded: Vec<&'static str>,
    /// Persisted running flag. Reported, never applied.
    pub timer_was_running: Option<bool>,
}

impl RestoreReport {
    pub fn is_empty(&self) -> bool {
        self.restored.is_empty() && self.discarded.is_empty() && self.timer_was_running.is_none()
    }
}

/// Moves the persisted subset of session state in and out of storage.
///
/// Built without a store when storage is unavailable; every operation is
/// then a no-op and the session lives purely in memory.
pub struct PersistenceBridge<S: KeyValueStore> {
    store: Option<S>,
}

impl<S: KeyValueStore> PersistenceBridge<S> {
    pub fn new(store: S) -> Self {
        Self { store: Some(store) }
    }

    /// Bridge for a host with no usable storage
    pub fn unavailable() -> Self {
        log::warn!("Storage unavailable, session will not survive reload");
        Self { store: None }
    }

    pub fn from_option(store: Option<S>) -> Self {
        match store {
            Some(store) => Self::new(store),
            None => Self::unavailable(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    /// Read a key; read failures count as "present but unusable"
    fn read(store: &S, key: &'static str, report: &mut RestoreReport) -> Option<String> {
        match store.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Could not read '{}': {}", key, e);
                report.discarded.push(key);
                None
            }
        }
    }

    /// Load persisted values into `session`.
    ///
    /// Well-formed keys overwrite their field; absent or malformed keys leave
    /// the field as it was. The timer always stays idle.
    pub fn restore(&self, session: &mut SessionState) -> RestoreReport {
        let mut report = RestoreReport::default();
        let Some(store) = &self.store else {
            return report;
        };

        if let Some(raw) = Self::read(store, KEY_TIME_LEFT, &mut report) {
            match parse_time_left(&raw) {
                Some(secs) => {
                    session.restore_time_left(secs);
                    report.restored.push(KEY_TIME_LEFT);
                    log::debug!("Restored {} = {}", KEY_TIME_LEFT, secs);
                }
                None => {
                    log::warn!("Discarding malformed {}: {:?}", KEY_TIME_LEFT, raw);
                    report.discarded.push(KEY_TIME_LEFT);
                }
            }
        }

        // Restarting here double-ticks the clock once the UI also starts it,
        // so the flag is only reported.
        if let Some(raw) = Self::read(store, KEY_TIMER_RUNNING, &mut report) {
            match parse_flag(&raw) {
                Some(running) => report.timer_was_running = Some(running),
                None => {
                    log::warn!("Discarding malformed {}: {:?}", KEY_TIMER_RUNNING, raw);
                    report.discarded.push(KEY_TIMER_RUNNING);
                }
            }
        }

        for track in ProgressTrack::ALL {
            let key = progress_key(track);
            let Some(raw) = Self::read(store, key, &mut report) else {
                continue;
            };
            match ProgressMap::from_json(&raw) {
                Ok(map) => {
                    log::debug!("Restored {} ({} cards)", key, map.len());
                    session.restore_progress(track, map);
                    report.restored.push(key);
                }
                Err(e) => {
                    log::warn!("Discarding malformed {}: {}", key, e);
                    report.discarded.push(key);
                }
            }
        }

        if !report.is_empty() {
            log::info!(
                "Session restored: {} keys applied, {} discarded",
                report.restored.len(),
                report.discarded.len()
            );
            session.emit_restored();
        }
        report
    }

    /// Write the persisted subset of `session`. Failures are logged only.
    pub fn snapshot(&mut self, session: &SessionState) {
        let Some(store) = &mut self.store else {
            return;
        };

        let mut entries = vec![
            (KEY_TIME_LEFT, session.time_left_secs().to_string()),
            (KEY_TIMER_RUNNING, session.is_timer_running().to_string()),
        ];
        for track in ProgressTrack::ALL {
            match session.progress_map(track).to_json() {
                Ok(json) => entries.push((progress_key(track), json)),
                Err(e) => log::warn!("Could not encode {}: {}", progress_key(track), e),
            }
        }

        let mut failed = 0;
        for (key, value) in &entries {
            if let Err(e) = store.set(key, value) {
                log::warn!("Snapshot write skipped: {}", e);
                failed += 1;
            }
        }

        if failed == 0 {
            log::info!("Session saved ({}s left)", session.time_left_secs());
        } else {
            log::warn!("Session partially saved ({} of {} keys failed)", failed, entries.len());
        }
    }

    /// Forget everything persisted, e.g. when starting a new game
    pub fn clear(&mut self) {
        let Some(store) = &mut self.store else {
            return;
        };
        for key in ALL_KEYS {
            if let Err(e) = store.remove(key) {
                log::warn!("Could not clear: {}", e);
            }
        }
        log::info!("Saved session cleared");
    }
}
