use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};
use tokio::sync::mpsc;
use tracing::trace;

use super::types::MediaEvent;

type Listeners = Mutex<HashMap<u64, mpsc::UnboundedSender<MediaEvent>>>;

/// Fan-out of transport events to attached listeners
#[derive(Default)]
pub struct ListenerRegistry {
    inner: Arc<Listeners>,
    next_id: Mutex<u64>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener. The returned handle detaches it when removed or dropped.
    pub fn add(&self, sender: mpsc::UnboundedSender<MediaEvent>) -> ListenerHandle {
        let id = {
            let mut next_id = lock(&self.next_id);
            *next_id += 1;
            *next_id
        };
        lock(&self.inner).insert(id, sender);
        trace!("Listener {} attached", id);

        ListenerHandle {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver an event to every listener, pruning closed receivers
    pub fn emit(&self, event: MediaEvent) {
        lock(&self.inner).retain(|_, sender| sender.send(event.clone()).is_ok());
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Deregistration handle for a transport listener
pub struct ListenerHandle {
    id: u64,
    registry: Weak<Listeners>,
}

impl ListenerHandle {
    /// Detach explicitly; equivalent to dropping the handle
    pub fn remove(self) {}

    fn detach(&self) {
        if let Some(listeners) = self.registry.upgrade()
            && lock(&listeners).remove(&self.id).is_some()
        {
            trace!("Listener {} detached", self.id);
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.detach();
    }
}

// A poisoned registry still holds valid senders; keep using it.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
