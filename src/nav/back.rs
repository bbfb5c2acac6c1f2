//! Platform back-signal source
//!
//! Models the native back-button bridge: an opaque event source that holds at
//! most one registered handler. Registering always displaces the previous
//! handler, so re-attaching a guard can never double-fire one signal.

use std::sync::Mutex;
use tokio::sync::mpsc;

/// Payload delivered with a back signal
#[derive(Debug, Clone, Copy)]
pub struct BackSignal {
    /// Whether in-app back navigation is possible at the time of the signal
    pub can_go_back: bool,
}

/// Single-handler event source for back signals
pub struct BackSignalSource {
    handler: Mutex<Option<mpsc::UnboundedSender<BackSignal>>>,
}

impl BackSignalSource {
    pub fn new() -> Self {
        Self {
            handler: Mutex::new(None),
        }
    }

    /// Install a handler, displacing any previous one. The displaced
    /// handler's receiver closes, which ends its consuming task.
    pub fn register(&self) -> mpsc::UnboundedReceiver<BackSignal> {
        let (tx, rx) = mpsc::unbounded_channel();
        let previous = self.handler.lock().unwrap().replace(tx);
        if previous.is_some() {
            log::debug!("Back handler replaced");
        }
        rx
    }

    /// Remove any registered handler
    pub fn remove_all(&self) {
        self.handler.lock().unwrap().take();
    }

    /// Whether a handler is currently registered
    pub fn has_handler(&self) -> bool {
        self.handler
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|tx| !tx.is_closed())
    }

    /// Deliver a back signal to the registered handler.
    /// Returns false when no live handler exists.
    pub fn emit(&self, signal: BackSignal) -> bool {
        let mut handler = self.handler.lock().unwrap();
        match handler.as_ref() {
            Some(tx) => {
                if tx.send(signal).is_ok() {
                    true
                } else {
                    // Receiver side is gone; drop the stale registration
                    handler.take();
                    false
                }
            }
            None => false,
        }
    }
}

impl Default for BackSignalSource {
    fn default() -> Self {
        Self::new()
    }
}
