//! Session state and value holders
//!
//! Everything the UI layer reads lives here. The countdown itself is driven
//! by the methods in `timer.rs`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::events::{Field, Listener, SessionEvent};
use super::progress::{ProgressMap, ProgressTrack};
use crate::error::ConfigError;
use crate::platform::{TickHandle, TickScheduler};
use crate::settings::{Settings, TimerConfig, positive_secs};

/// Navigation mode of the UI
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Page {
    #[default]
    Menu,
    Machine,
    /// Any other screen the UI defines
    Other(String),
}

impl Page {
    pub fn as_str(&self) -> &str {
        match self {
            Page::Menu => "menu",
            Page::Machine => "machine",
            Page::Other(name) => name,
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "menu" => Page::Menu,
            "machine" => Page::Machine,
            other => Page::Other(other.to_string()),
        }
    }
}

impl From<String> for Page {
    fn from(s: String) -> Self {
        Page::from_str(&s)
    }
}

impl From<Page> for String {
    fn from(page: Page) -> Self {
        page.as_str().to_string()
    }
}

/// Authoritative state for one play session.
///
/// Owned by the application root. All mutation goes through methods so the
/// countdown invariants hold and listeners see every change.
pub struct SessionState {
    pub(super) config: TimerConfig,
    pub(super) time_left_secs: u32,
    pub(super) timer_running: bool,
    pub(super) penalty_secs: u32,
    pub(super) scheduler: Box<dyn TickScheduler>,
    /// Present exactly while the timer is running
    pub(super) ticker: Option<Box<dyn TickHandle>>,

    pub(super) cut_wires: BTreeSet<String>,
    indice_progress: ProgressMap,
    objet_progress: ProgressMap,

    current_page: Page,
    show_numeric_pad: bool,
    numeric_pad_context: Option<String>,
    last_entered_card_number: Option<u32>,

    is_muted: bool,
    is_music_playing: bool,
    current_music: Option<String>,

    listeners: Vec<Listener>,
}

impl SessionState {
    /// Fresh session with the given configuration, timer idle
    pub fn new(config: TimerConfig, scheduler: Box<dyn TickScheduler>) -> Self {
        Self {
            config,
            time_left_secs: config.initial_time_secs(),
            timer_running: false,
            penalty_secs: config.penalty_secs(),
            scheduler,
            ticker: None,
            cut_wires: BTreeSet::new(),
            indice_progress: ProgressMap::new(),
            objet_progress: ProgressMap::new(),
            current_page: Page::Menu,
            show_numeric_pad: false,
            numeric_pad_context: None,
            last_entered_card_number: None,
            is_muted: false,
            is_music_playing: false,
            current_music: None,
            listeners: Vec::new(),
        }
    }

    /// Validate raw settings and build a session
    pub fn from_settings(
        settings: &Settings,
        scheduler: Box<dyn TickScheduler>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(settings.validate()?, scheduler))
    }

    /// Register a change listener
    pub fn subscribe(&mut self, listener: impl FnMut(&SessionEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub(super) fn emit(&mut self, event: SessionEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    // === Countdown ===

    pub fn config(&self) -> TimerConfig {
        self.config
    }

    pub fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer_running
    }

    pub fn penalty_secs(&self) -> u32 {
        self.penalty_secs
    }

    /// Change the penalty; same range rules as construction
    pub fn set_penalty_secs(&mut self, secs: i64) -> Result<(), ConfigError> {
        let secs = positive_secs(secs).ok_or(ConfigError::PenaltyOutOfRange(secs))?;
        if self.penalty_secs != secs {
            self.penalty_secs = secs;
            self.emit(SessionEvent::FieldChanged(Field::PenaltySecs));
        }
        Ok(())
    }

    /// Restore path only. Does not touch the running flag.
    pub(crate) fn restore_time_left(&mut self, secs: u32) {
        self.time_left_secs = secs;
    }

    // === Progress ===

    pub fn record_progress(&mut self, track: ProgressTrack, card: u32, index: u32) {
        self.progress_map_mut(track).record(card, index);
        log::debug!("{} progress for card {} -> {}", track.as_str(), card, index);
        self.emit(SessionEvent::ProgressRecorded { track, card, index });
    }

    /// Progress index for `card`, 0 when never recorded
    pub fn progress(&self, track: ProgressTrack, card: u32) -> u32 {
        self.progress_map(track).get(card)
    }

    pub fn progress_map(&self, track: ProgressTrack) -> &ProgressMap {
        match track {
            ProgressTrack::Indice => &self.indice_progress,
            ProgressTrack::Objet => &self.objet_progress,
        }
    }

    fn progress_map_mut(&mut self, track: ProgressTrack) -> &mut ProgressMap {
        match track {
            ProgressTrack::Indice => &mut self.indice_progress,
            ProgressTrack::Objet => &mut self.objet_progress,
        }
    }

    /// Restore path only
    pub(crate) fn emit_restored(&mut self) {
        self.emit(SessionEvent::Restored);
    }

    /// Restore path only
    pub(crate) fn restore_progress(&mut self, track: ProgressTrack, map: ProgressMap) {
        *self.progress_map_mut(track) = map;
    }

    // === Wire puzzle ===

    /// Mark a wire as cut. Returns true if it was not cut before.
    pub fn cut_wire(&mut self, wire: &str) -> bool {
        let inserted = self.cut_wires.insert(wire.to_string());
        if inserted {
            self.emit(SessionEvent::WireCut(wire.to_string()));
        }
        inserted
    }

    pub fn is_wire_cut(&self, wire: &str) -> bool {
        self.cut_wires.contains(wire)
    }

    pub fn cut_wires(&self) -> &BTreeSet<String> {
        &self.cut_wires
    }

    // === Navigation and input ===

    pub fn current_page(&self) -> &Page {
        &self.current_page
    }

    pub fn set_current_page(&mut self, page: Page) {
        if self.current_page != page {
            log::debug!("Page: {} -> {}", self.current_page.as_str(), page.as_str());
            self.current_page = page;
            self.emit(SessionEvent::FieldChanged(Field::CurrentPage));
        }
    }

    pub fn show_numeric_pad(&self) -> bool {
        self.show_numeric_pad
    }

    pub fn set_show_numeric_pad(&mut self, show: bool) {
        if self.show_numeric_pad != show {
            self.show_numeric_pad = show;
            self.emit(SessionEvent::FieldChanged(Field::ShowNumericPad));
        }
    }

    pub fn numeric_pad_context(&self) -> Option<&str> {
        self.numeric_pad_context.as_deref()
    }

    pub fn set_numeric_pad_context(&mut self, context: Option<String>) {
        if self.numeric_pad_context != context {
            self.numeric_pad_context = context;
            self.emit(SessionEvent::FieldChanged(Field::NumericPadContext));
        }
    }

    pub fn last_entered_card_number(&self) -> Option<u32> {
        self.last_entered_card_number
    }

    /// Record a card number submitted through the keypad
    pub fn enter_card_number(&mut self, card: u32) {
        self.set_last_entered_card_number(Some(card));
    }

    pub fn set_last_entered_card_number(&mut self, card: Option<u32>) {
        if self.last_entered_card_number != card {
            self.last_entered_card_number = card;
            self.emit(SessionEvent::FieldChanged(Field::LastEnteredCardNumber));
        }
    }

    // === Audio ===

    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        if self.is_muted != muted {
            self.is_muted = muted;
            self.emit(SessionEvent::FieldChanged(Field::IsMuted));
        }
    }

    /// Flip mute, returning the new value
    pub fn toggle_muted(&mut self) -> bool {
        self.set_muted(!self.is_muted);
        self.is_muted
    }

    pub fn is_music_playing(&self) -> bool {
        self.is_music_playing
    }

    pub fn set_music_playing(&mut self, playing: bool) {
        if self.is_music_playing != playing {
            self.is_music_playing = playing;
            self.emit(SessionEvent::FieldChanged(Field::IsMusicPlaying));
        }
    }

    pub fn current_music(&self) -> Option<&str> {
        self.current_music.as_deref()
    }

    pub fn set_current_music(&mut self, track: Option<String>) {
        if self.current_music != track {
            self.current_music = track;
            self.emit(SessionEvent::FieldChanged(Field::CurrentMusic));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::platform::ManualTicker;

    fn session() -> SessionState {
        SessionState::new(TimerConfig::default(), Box::new(ManualTicker::new()))
    }

    #[test]
    fn test_defaults() {
        let s = session();
        assert_eq!(s.time_left_secs(), 3600);
        assert!(!s.is_timer_running());
        assert_eq!(s.penalty_secs(), 60);
        assert_eq!(s.current_page(), &Page::Menu);
        assert!(!s.show_numeric_pad());
        assert_eq!(s.numeric_pad_context(), None);
        assert_eq!(s.last_entered_card_number(), None);
        assert!(s.cut_wires().is_empty());
        assert!(s.progress_map(ProgressTrack::Indice).is_empty());
        assert!(s.progress_map(ProgressTrack::Objet).is_empty());
        assert!(!s.is_muted());
        assert!(!s.is_music_playing());
        assert_eq!(s.current_music(), None);
    }

    #[test]
    fn test_from_settings_rejects_bad_penalty() {
        let settings = Settings {
            initial_time_secs: 3600,
            penalty_secs: -10,
        };
        let result = SessionState::from_settings(&settings, Box::new(ManualTicker::new()));
        assert!(matches!(result, Err(ConfigError::PenaltyOutOfRange(-10))));
    }

    #[test]
    fn test_progress_tracks_are_independent() {
        let mut s = session();
        s.record_progress(ProgressTrack::Indice, 7, 2);
        assert_eq!(s.progress(ProgressTrack::Indice, 7), 2);
        assert_eq!(s.progress(ProgressTrack::Objet, 7), 0);
        assert!(!s.progress_map(ProgressTrack::Objet).contains(7));

        s.record_progress(ProgressTrack::Objet, 7, 5);
        assert_eq!(s.progress(ProgressTrack::Indice, 7), 2);
        assert_eq!(s.progress(ProgressTrack::Objet, 7), 5);
    }

    #[test]
    fn test_cut_wire_once() {
        let mut s = session();
        assert!(s.cut_wire("red"));
        assert!(!s.cut_wire("red"));
        assert!(s.is_wire_cut("red"));
        assert!(!s.is_wire_cut("blue"));
        assert_eq!(s.cut_wires().len(), 1);
    }

    #[test]
    fn test_page_string_forms() {
        assert_eq!(Page::from_str("menu"), Page::Menu);
        assert_eq!(Page::from_str("machine"), Page::Machine);
        assert_eq!(Page::from_str("indices"), Page::Other("indices".to_string()));
        assert_eq!(Page::Other("objets".to_string()).as_str(), "objets");
        assert_eq!(serde_json::to_string(&Page::Machine).unwrap(), r#""machine""#);
    }

    #[test]
    fn test_listeners_see_field_changes_once() {
        let mut s = session();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        s.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        s.set_muted(true);
        s.set_muted(true);
        s.set_current_page(Page::Machine);
        s.enter_card_number(42);

        assert_eq!(
            *seen.borrow(),
            vec![
                SessionEvent::FieldChanged(Field::IsMuted),
                SessionEvent::FieldChanged(Field::CurrentPage),
                SessionEvent::FieldChanged(Field::LastEnteredCardNumber),
            ]
        );
        assert_eq!(s.last_entered_card_number(), Some(42));
    }

    #[test]
    fn test_toggle_muted() {
        let mut s = session();
        assert!(s.toggle_muted());
        assert!(!s.toggle_muted());
    }

    #[test]
    fn test_set_penalty_validates() {
        let mut s = session();
        assert_eq!(s.set_penalty_secs(0), Err(ConfigError::PenaltyOutOfRange(0)));
        assert_eq!(s.penalty_secs(), 60);
        s.set_penalty_secs(90).unwrap();
        assert_eq!(s.penalty_secs(), 90);
    }
}
