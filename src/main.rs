//! Reality Switch entry point
//!
//! On the web this only initializes logging; the UI constructs a
//! `GameSession` itself. Natively it runs a headless session against an
//! in-memory store and a simulated clock.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Reality Switch session controller loaded");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use reality_switch::platform::{ManualTicker, MemoryStore};
    use reality_switch::{PersistenceBridge, ProgressTrack, SessionState, Settings, format_clock};

    env_logger::init();
    log::info!("Reality Switch (native) starting...");
    log::info!("Native mode is a headless demo - build for wasm32 to drive a real page");

    let settings = match std::env::args().nth(1) {
        Some(json) => match Settings::from_json(&json) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(2);
            }
        },
        None => Settings::default(),
    };

    let new_session = |ticker: &ManualTicker| {
        SessionState::from_settings(&settings, Box::new(ticker.clone())).unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(2);
        })
    };

    let ticker = ManualTicker::new();
    let mut session = new_session(&ticker);
    let mut bridge = PersistenceBridge::new(MemoryStore::new());
    bridge.restore(&mut session);

    // First page load: play for a while, get one answer wrong, leave
    session.start();
    ticker.advance(&mut session, 90);
    session.record_progress(ProgressTrack::Indice, 7, 2);
    session.apply_penalty();
    println!("Before reload: {}", format_clock(session.time_left_secs()));
    session.stop();
    bridge.snapshot(&session);

    // Second page load
    let mut reloaded = new_session(&ManualTicker::new());
    let report = bridge.restore(&mut reloaded);
    println!(
        "After reload:  {} (running: {}, card 7 clue {})",
        format_clock(reloaded.time_left_secs()),
        reloaded.is_timer_running(),
        reloaded.progress(ProgressTrack::Indice, 7)
    );
    println!("Restored keys: {:?}", report.restored);
}
