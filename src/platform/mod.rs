//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks (`ticker`)
//! - Storage (`storage`, LocalStorage on web)

pub mod storage;
pub mod ticker;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use storage::{KeyValueStore, MemoryStore};
pub use ticker::{ManualTicker, TickHandle, TickScheduler};
#[cfg(target_arch = "wasm32")]
pub use web::{IntervalTicker, LocalStore};
