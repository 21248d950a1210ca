//! Repeating one-second tick scheduling
//!
//! `SessionState` owns a `TickScheduler` and stores the `TickHandle` it gets
//! back from `start()`. Dropping the handle cancels the task.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::session::SessionState;

/// Cancellable handle to a running repeating task
pub trait TickHandle {
    /// Stop the task. Calling more than once is harmless.
    fn cancel(&mut self);
}

/// Creates one-second repeating tasks that drive `SessionState::tick`
pub trait TickScheduler {
    fn schedule_every_second(&self) -> Box<dyn TickHandle>;
}

#[derive(Debug, Default)]
struct ManualClock {
    next_id: u64,
    active: BTreeSet<u64>,
    scheduled_total: u64,
    elapsed_secs: u64,
}

/// Simulated clock for tests and the native build.
///
/// Nothing fires on its own: `advance` delivers one tick per active task for
/// every simulated second. A second concurrent task would therefore show up
/// as the countdown decaying at double rate.
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    clock: Rc<RefCell<ManualClock>>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks currently scheduled
    pub fn active_tasks(&self) -> usize {
        self.clock.borrow().active.len()
    }

    /// Number of tasks ever scheduled
    pub fn scheduled_total(&self) -> u64 {
        self.clock.borrow().scheduled_total
    }

    /// Simulated seconds delivered so far
    pub fn elapsed_secs(&self) -> u64 {
        self.clock.borrow().elapsed_secs
    }

    /// Simulate `seconds` of wall-clock time.
    ///
    /// Active tasks are re-read every second, so a task cancelled by a tick
    /// (countdown hitting zero) stops receiving ticks immediately.
    pub fn advance(&self, session: &mut SessionState, seconds: u64) {
        for _ in 0..seconds {
            let active = {
                let mut clock = self.clock.borrow_mut();
                clock.elapsed_secs += 1;
                clock.active.iter().copied().collect::<Vec<_>>()
            };
            for id in active {
                if self.clock.borrow().active.contains(&id) {
                    session.tick();
                }
            }
        }
    }
}

impl TickScheduler for ManualTicker {
    fn schedule_every_second(&self) -> Box<dyn TickHandle> {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        clock.scheduled_total += 1;
        clock.active.insert(id);
        log::trace!("Manual tick task {} scheduled", id);
        Box::new(ManualHandle {
            id,
            clock: self.clock.clone(),
        })
    }
}

struct ManualHandle {
    id: u64,
    clock: Rc<RefCell<ManualClock>>,
}

impl TickHandle for ManualHandle {
    fn cancel(&mut self) {
        if self.clock.borrow_mut().active.remove(&self.id) {
            log::trace!("Manual tick task {} cancelled", self.id);
        }
    }
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
