//! Session state module
//!
//! The countdown/penalty state machine plus the value holders the UI binds
//! to. Single-threaded: every mutation completes synchronously inside one
//! host callback, so a tick never observes a half-applied change.

pub mod events;
pub mod progress;
pub mod state;
pub mod timer;

pub use events::{Field, Listener, SessionEvent};
pub use progress::{ProgressMap, ProgressTrack};
pub use state::{Page, SessionState};
