//! Countdown state machine
//!
//! ```text
//! Idle --start()--> Running --stop() / reset() / clock hits 0--> Idle
//! ```
//!
//! The running flag doubles as the guard against a second tick task: while
//! it is set, `start()` does nothing. `ticker` holds the task handle exactly
//! while the flag is set.

use super::events::SessionEvent;
use super::state::SessionState;

impl SessionState {
    /// Begin counting down. Returns false if the timer was already running.
    pub fn start(&mut self) -> bool {
        if self.timer_running {
            return false;
        }
        self.timer_running = true;
        self.ticker = Some(self.scheduler.schedule_every_second());
        log::debug!("Timer started at {}s", self.time_left_secs);
        self.emit(SessionEvent::TimerStarted);
        true
    }

    /// Stop counting down. No tick is delivered after this returns.
    pub fn stop(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
        if self.timer_running {
            self.timer_running = false;
            log::debug!("Timer stopped at {}s", self.time_left_secs);
            self.emit(SessionEvent::TimerStopped);
        }
    }

    /// One elapsed second. Called by the scheduled tick task.
    pub fn tick(&mut self) {
        if !self.timer_running {
            return;
        }
        if self.time_left_secs > 0 {
            self.time_left_secs -= 1;
            log::trace!("Tick: {}s left", self.time_left_secs);
            self.emit(SessionEvent::Tick {
                time_left: self.time_left_secs,
            });
        }
        if self.time_left_secs == 0 {
            log::info!("Time expired");
            self.stop();
            self.emit(SessionEvent::TimeExpired);
        }
    }

    /// Back to the configured initial time with the machine puzzle cleared.
    /// Progress, audio and navigation are left alone.
    pub fn reset(&mut self) {
        self.time_left_secs = self.config.initial_time_secs();
        self.cut_wires.clear();
        self.stop();
        log::info!("Session reset to {}s", self.time_left_secs);
        self.emit(SessionEvent::Reset);
    }

    /// Deduct the penalty, clamping at zero. Returns the seconds removed.
    pub fn apply_penalty(&mut self) -> u32 {
        let before = self.time_left_secs;
        self.time_left_secs = before.saturating_sub(self.penalty_secs);
        let deducted = before - self.time_left_secs;
        log::debug!("Penalty: -{}s, {}s left", deducted, self.time_left_secs);
        self.emit(SessionEvent::PenaltyApplied {
            deducted,
            time_left: self.time_left_secs,
        });
        deducted
    }
}
