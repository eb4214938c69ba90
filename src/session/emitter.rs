use event_emitter_rs::EventEmitter;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

/// Dispatches session events to registered listeners.
///
/// Listeners run on their own threads, so emitting never blocks the caller.
#[derive(Clone, Default)]
pub struct Emitter {
    pub wrap: Arc<Mutex<EventEmitter>>,
}

#[derive(Debug)]
pub enum Event {
    /// A new session became active. Payload: `(display_name, account_id)`.
    SessionChanged,
    /// A status check against the identity service finished. Payload: `Status`.
    StatusChecked,
}

pub trait Emit {
    fn emit<T: Serialize>(&self, event: Event, data: T);
}

impl Emit for Option<&Emitter> {
    fn emit<T: Serialize>(&self, event: Event, data: T) {
        if let Some(emitter) = self {
            emitter.emit(event, data);
        }
    }
}

impl Emitter {
    pub fn emit<T: Serialize>(&self, event: Event, data: T) {
        self.wrap
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .emit(&format!("{:?}", event), data);
    }

    pub fn on<F, T>(&self, event: Event, listener: F)
    where
        F: Fn(T) + Send + Sync + 'static,
        T: for<'de> Deserialize<'de> + Serialize,
    {
        self.wrap
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on(&format!("{:?}", event), listener);
    }
}
