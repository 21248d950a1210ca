//! Reload scenarios: snapshot one session, restore into a fresh one

use std::cell::RefCell;
use std::rc::Rc;

use reality_switch::persistence::{KEY_TIME_LEFT, KEY_TIMER_RUNNING};
use reality_switch::platform::{KeyValueStore, ManualTicker, MemoryStore};
use reality_switch::{PersistenceBridge, ProgressTrack, SessionEvent, SessionState, TimerConfig};

fn fresh_session() -> (SessionState, ManualTicker) {
    let ticker = ManualTicker::new();
    (
        SessionState::new(TimerConfig::default(), Box::new(ticker.clone())),
        ticker,
    )
}

#[test]
fn test_restore_documented_snapshot() {
    let bridge = PersistenceBridge::new(MemoryStore::with_items([
        ("timeLeft", "1200"),
        ("timerRunning", "true"),
        ("currentIndiceIndex", r#"{"7":2}"#),
    ]));
    let (mut s, ticker) = fresh_session();
    let report = bridge.restore(&mut s);

    assert_eq!(s.time_left_secs(), 1200);
    assert_eq!(s.progress(ProgressTrack::Indice, 7), 2);
    assert!(!s.is_timer_running());
    assert_eq!(ticker.active_tasks(), 0);
    assert_eq!(report.timer_was_running, Some(true));
}

#[test]
fn test_malformed_time_left_keeps_default() {
    let bridge = PersistenceBridge::new(MemoryStore::with_items([("timeLeft", "not-a-number")]));
    let (mut s, _ticker) = fresh_session();
    bridge.restore(&mut s);
    assert_eq!(s.time_left_secs(), 3600);
}

#[test]
fn test_reload_round_trip() {
    let mut bridge = PersistenceBridge::new(MemoryStore::new());

    let (mut first, ticker) = fresh_session();
    first.start();
    ticker.advance(&mut first, 300);
    first.apply_penalty();
    first.record_progress(ProgressTrack::Indice, 4, 1);
    first.record_progress(ProgressTrack::Objet, 12, 3);
    first.cut_wire("blue");
    first.stop();
    bridge.snapshot(&first);

    let (mut second, ticker) = fresh_session();
    bridge.restore(&mut second);
    assert_eq!(second.time_left_secs(), 3240);
    assert_eq!(second.progress(ProgressTrack::Indice, 4), 1);
    assert_eq!(second.progress(ProgressTrack::Objet, 12), 3);
    assert_eq!(second.progress(ProgressTrack::Objet, 4), 0);
    // Wires are not part of the persisted subset
    assert!(second.cut_wires().is_empty());

    // Resuming is the UI's call, and then ticks at normal rate
    assert!(!second.is_timer_running());
    second.start();
    ticker.advance(&mut second, 10);
    assert_eq!(second.time_left_secs(), 3230);
}

#[test]
fn test_snapshot_while_running_does_not_resume_on_reload() {
    let mut bridge = PersistenceBridge::new(MemoryStore::new());

    let (mut first, ticker) = fresh_session();
    first.start();
    ticker.advance(&mut first, 5);
    bridge.snapshot(&first);
    assert_eq!(
        bridge.store().unwrap().get(KEY_TIMER_RUNNING).unwrap().as_deref(),
        Some("true")
    );

    let (mut second, ticker) = fresh_session();
    let report = bridge.restore(&mut second);
    assert_eq!(report.timer_was_running, Some(true));
    assert!(!second.is_timer_running());
    ticker.advance(&mut second, 60);
    assert_eq!(second.time_left_secs(), 3595);
}

#[test]
fn test_stop_then_snapshot_sees_final_value() {
    let mut bridge = PersistenceBridge::new(MemoryStore::new());
    let (mut s, ticker) = fresh_session();
    s.start();
    ticker.advance(&mut s, 42);
    s.stop();
    ticker.advance(&mut s, 10);
    bridge.snapshot(&s);

    assert_eq!(bridge.store().unwrap().peek(KEY_TIME_LEFT), Some("3558"));
}

#[test]
fn test_unwritable_storage_keeps_session_in_memory() {
    let mut bridge = PersistenceBridge::new(MemoryStore::read_only());
    let (mut s, ticker) = fresh_session();
    s.start();
    ticker.advance(&mut s, 3);
    bridge.snapshot(&s);

    assert!(bridge.store().unwrap().is_empty());
    assert!(s.is_timer_running());
    assert_eq!(s.time_left_secs(), 3597);
}

#[test]
fn test_restore_notifies_listeners() {
    let bridge = PersistenceBridge::new(MemoryStore::with_items([("timeLeft", "10")]));
    let (mut s, _ticker) = fresh_session();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    s.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    bridge.restore(&mut s);
    assert_eq!(*seen.borrow(), vec![SessionEvent::Restored]);
}

#[test]
fn test_new_game_clears_saved_session() {
    let mut bridge = PersistenceBridge::new(MemoryStore::new());
    let (mut s, _ticker) = fresh_session();
    s.apply_penalty();
    bridge.snapshot(&s);
    bridge.clear();

    let (mut next, _ticker) = fresh_session();
    let report = bridge.restore(&mut next);
    assert!(report.is_empty());
    assert_eq!(next.time_left_secs(), 3600);
}
