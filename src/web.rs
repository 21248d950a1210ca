//! JS bindings consumed by the UI layer
//!
//! `GameSession` owns the session and its persistence bridge. Construction
//! restores from LocalStorage and hooks page-exit events for the snapshot.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::format_clock;
use crate::persistence::PersistenceBridge;
use crate::platform::{IntervalTicker, LocalStore};
use crate::session::{Page, ProgressTrack, SessionState};
use crate::settings::Settings;

type SharedSession = Rc<RefCell<SessionState>>;
type SharedBridge = Rc<RefCell<PersistenceBridge<LocalStore>>>;

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct GameSession {
    session: SharedSession,
    bridge: SharedBridge,
    timer_was_running: bool,
}

#[wasm_bindgen]
impl GameSession {
    /// Build the session, restore saved values and install exit hooks.
    /// Throws on an invalid initial time or penalty.
    #[wasm_bindgen(constructor)]
    pub fn new(
        initial_time_secs: Option<f64>,
        penalty_secs: Option<f64>,
    ) -> Result<GameSession, JsValue> {
        let defaults = Settings::default();
        let settings = Settings {
            initial_time_secs: initial_time_secs
                .map(|v| v as i64)
                .unwrap_or(defaults.initial_time_secs),
            penalty_secs: penalty_secs
                .map(|v| v as i64)
                .unwrap_or(defaults.penalty_secs),
        };
        let config = settings.validate().map_err(js_error)?;

        let session: SharedSession = Rc::new_cyclic(|weak| {
            RefCell::new(SessionState::new(
                config,
                Box::new(IntervalTicker::new(weak.clone())),
            ))
        });
        let bridge: SharedBridge = Rc::new(RefCell::new(PersistenceBridge::from_option(
            LocalStore::open(),
        )));

        let report = bridge.borrow().restore(&mut session.borrow_mut());
        install_exit_hooks(Rc::downgrade(&session), bridge.clone());

        log::info!(
            "Session ready: {} left, penalty {}s",
            format_clock(session.borrow().time_left_secs()),
            config.penalty_secs()
        );

        Ok(GameSession {
            session,
            bridge,
            timer_was_running: report.timer_was_running.unwrap_or(false),
        })
    }

    // === Countdown ===

    pub fn start(&self) -> bool {
        self.session.borrow_mut().start()
    }

    pub fn stop(&self) {
        self.session.borrow_mut().stop();
    }

    pub fn reset(&self) {
        self.session.borrow_mut().reset();
    }

    #[wasm_bindgen(js_name = applyPenalty)]
    pub fn apply_penalty(&self) -> u32 {
        self.session.borrow_mut().apply_penalty()
    }

    #[wasm_bindgen(getter, js_name = timeLeft)]
    pub fn time_left(&self) -> u32 {
        self.session.borrow().time_left_secs()
    }

    #[wasm_bindgen(getter, js_name = timerRunning)]
    pub fn timer_running(&self) -> bool {
        self.session.borrow().is_timer_running()
    }

    /// Whether the previous page had the timer running when it was saved.
    /// The timer is never restarted automatically.
    #[wasm_bindgen(getter, js_name = timerWasRunning)]
    pub fn timer_was_running(&self) -> bool {
        self.timer_was_running
    }

    #[wasm_bindgen(getter)]
    pub fn penalty(&self) -> u32 {
        self.session.borrow().penalty_secs()
    }

    #[wasm_bindgen(js_name = setPenalty)]
    pub fn set_penalty(&self, secs: f64) -> Result<(), JsValue> {
        self.session
            .borrow_mut()
            .set_penalty_secs(secs as i64)
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = formattedTime)]
    pub fn formatted_time(&self) -> String {
        format_clock(self.session.borrow().time_left_secs())
    }

    // === Progress ===

    #[wasm_bindgen(js_name = recordIndiceProgress)]
    pub fn record_indice_progress(&self, card: u32, index: u32) {
        self.session
            .borrow_mut()
            .record_progress(ProgressTrack::Indice, card, index);
    }

    #[wasm_bindgen(js_name = indiceProgress)]
    pub fn indice_progress(&self, card: u32) -> u32 {
        self.session.borrow().progress(ProgressTrack::Indice, card)
    }

    #[wasm_bindgen(js_name = recordObjetProgress)]
    pub fn record_objet_progress(&self, card: u32, index: u32) {
        self.session
            .borrow_mut()
            .record_progress(ProgressTrack::Objet, card, index);
    }

    #[wasm_bindgen(js_name = objetProgress)]
    pub fn objet_progress(&self, card: u32) -> u32 {
        self.session.borrow().progress(ProgressTrack::Objet, card)
    }

    // === Wire puzzle ===

    #[wasm_bindgen(js_name = cutWire)]
    pub fn cut_wire(&self, wire: &str) -> bool {
        self.session.borrow_mut().cut_wire(wire)
    }

    #[wasm_bindgen(js_name = isWireCut)]
    pub fn is_wire_cut(&self, wire: &str) -> bool {
        self.session.borrow().is_wire_cut(wire)
    }

    #[wasm_bindgen(getter, js_name = cutWires)]
    pub fn cut_wires(&self) -> Vec<String> {
        self.session.borrow().cut_wires().iter().cloned().collect()
    }

    // === Navigation and input ===

    #[wasm_bindgen(getter, js_name = currentPage)]
    pub fn current_page(&self) -> String {
        self.session.borrow().current_page().as_str().to_string()
    }

    #[wasm_bindgen(setter, js_name = currentPage)]
    pub fn set_current_page(&self, page: String) {
        self.session
            .borrow_mut()
            .set_current_page(Page::from(page));
    }

    #[wasm_bindgen(getter, js_name = showNumericPad)]
    pub fn show_numeric_pad(&self) -> bool {
        self.session.borrow().show_numeric_pad()
    }

    #[wasm_bindgen(setter, js_name = showNumericPad)]
    pub fn set_show_numeric_pad(&self, show: bool) {
        self.session.borrow_mut().set_show_numeric_pad(show);
    }

    #[wasm_bindgen(getter, js_name = numericPadContext)]
    pub fn numeric_pad_context(&self) -> Option<String> {
        self.session
            .borrow()
            .numeric_pad_context()
            .map(str::to_string)
    }

    #[wasm_bindgen(setter, js_name = numericPadContext)]
    pub fn set_numeric_pad_context(&self, context: Option<String>) {
        self.session.borrow_mut().set_numeric_pad_context(context);
    }

    #[wasm_bindgen(getter, js_name = lastEnteredCardNumber)]
    pub fn last_entered_card_number(&self) -> Option<u32> {
        self.session.borrow().last_entered_card_number()
    }

    #[wasm_bindgen(setter, js_name = lastEnteredCardNumber)]
    pub fn set_last_entered_card_number(&self, card: Option<u32>) {
        self.session
            .borrow_mut()
            .set_last_entered_card_number(card);
    }

    // === Audio ===

    #[wasm_bindgen(getter, js_name = isMuted)]
    pub fn is_muted(&self) -> bool {
        self.session.borrow().is_muted()
    }

    #[wasm_bindgen(setter, js_name = isMuted)]
    pub fn set_muted(&self, muted: bool) {
        self.session.borrow_mut().set_muted(muted);
    }

    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&self) -> bool {
        self.session.borrow_mut().toggle_muted()
    }

    #[wasm_bindgen(getter, js_name = isMusicPlaying)]
    pub fn is_music_playing(&self) -> bool {
        self.session.borrow().is_music_playing()
    }

    #[wasm_bindgen(setter, js_name = isMusicPlaying)]
    pub fn set_music_playing(&self, playing: bool) {
        self.session.borrow_mut().set_music_playing(playing);
    }

    #[wasm_bindgen(getter, js_name = currentMusic)]
    pub fn current_music(&self) -> Option<String> {
        self.session.borrow().current_music().map(str::to_string)
    }

    #[wasm_bindgen(setter, js_name = currentMusic)]
    pub fn set_current_music(&self, track: Option<String>) {
        self.session.borrow_mut().set_current_music(track);
    }

    // === Persistence and events ===

    /// Save now (also happens automatically when the page is hidden or unloaded)
    pub fn snapshot(&self) {
        self.bridge.borrow_mut().snapshot(&self.session.borrow());
    }

    /// Drop the saved session, e.g. before a new game
    #[wasm_bindgen(js_name = clearSaved)]
    pub fn clear_saved(&self) {
        self.bridge.borrow_mut().clear();
    }

    /// Register `callback(eventName)`. Calls are deferred with `setTimeout(0)`
    /// so the callback can read the session freely.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: js_sys::Function) {
        self.session.borrow_mut().subscribe(move |event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let name = JsValue::from_str(event.name());
            if window
                .set_timeout_with_callback_and_timeout_and_arguments_1(&callback, 0, &name)
                .is_err()
            {
                log::warn!("Could not deliver '{}' event", event.name());
            }
        });
    }
}

/// Snapshot on page hide/unload and whenever the tab is hidden
fn install_exit_hooks(session: Weak<RefCell<SessionState>>, bridge: SharedBridge) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let save: Rc<dyn Fn()> = Rc::new(move || {
        let Some(session) = session.upgrade() else {
            return;
        };
        match (session.try_borrow(), bridge.try_borrow_mut()) {
            (Ok(session), Ok(mut bridge)) => bridge.snapshot(&session),
            _ => log::warn!("Session busy, snapshot skipped"),
        };
    });

    for event in ["pagehide", "beforeunload"] {
        let save = save.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| save());
        let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    if let Some(document) = window.document() {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                save();
            }
        });
        let _ = document.add_event_listener_with_callback(
            "visibilitychange",
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
    }
}
