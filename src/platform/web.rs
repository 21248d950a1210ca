//! Browser implementations of the platform traits

use std::cell::RefCell;
use std::rc::Weak;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::storage::KeyValueStore;
use super::ticker::{TickHandle, TickScheduler};
use crate::consts::TICK_INTERVAL_MS;
use crate::error::StorageError;
use crate::session::SessionState;

fn js_reason(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// `window.localStorage`
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    /// Open LocalStorage, or `None` when the browser denies access
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::ReadFailed {
                key: key.to_string(),
                reason: js_reason(e),
            })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::WriteFailed {
                key: key.to_string(),
                reason: js_reason(e),
            })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::WriteFailed {
                key: key.to_string(),
                reason: js_reason(e),
            })
    }
}

/// `window.setInterval` driving `SessionState::tick`.
///
/// Holds a weak reference so the session is not kept alive by its own timer.
pub struct IntervalTicker {
    session: Weak<RefCell<SessionState>>,
}

impl IntervalTicker {
    pub fn new(session: Weak<RefCell<SessionState>>) -> Self {
        Self { session }
    }
}

impl TickScheduler for IntervalTicker {
    fn schedule_every_second(&self) -> Box<dyn TickHandle> {
        let session = self.session.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let Some(session) = session.upgrade() else {
                return;
            };
            match session.try_borrow_mut() {
                Ok(mut session) => session.tick(),
                Err(_) => log::warn!("Session busy, tick skipped"),
            };
        });

        let id = web_sys::window().and_then(|w| {
            w.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                TICK_INTERVAL_MS,
            )
            .ok()
        });
        if id.is_none() {
            log::error!("Failed to schedule countdown interval");
        }

        Box::new(IntervalHandle {
            id,
            closure: Some(closure),
        })
    }
}

struct IntervalHandle {
    id: Option<i32>,
    closure: Option<Closure<dyn FnMut()>>,
}

impl TickHandle for IntervalHandle {
    fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(id);
            }
        }
        // May run inside the interval's own callback (countdown hit zero),
        // so the closure must outlive this call.
        if let Some(closure) = self.closure.take() {
            closure.forget();
        }
    }
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
