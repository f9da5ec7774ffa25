use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::task::AbortOnDropHandle;
use tracing::trace;

/// Purpose of a deferred UI task. At most one timer per purpose is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Hides the controls after inactivity
    HideControls,
    /// Shows the paused synopsis overlay
    MediaInfo,
    /// Ends the branding intro
    Intro,
}

/// Message posted back to the owner when a timer elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    pub kind: TimerKind,
    pub generation: u64,
}

struct ArmedTimer {
    generation: u64,
    _task: AbortOnDropHandle<()>,
}

/// Cancellable deferred tasks keyed by purpose.
///
/// A timer posts a [`TimerTick`] into the owner's inbox instead of touching
/// state directly. Scheduling a purpose that is already armed aborts the
/// previous task; dropping the slots aborts everything. A tick that was
/// already queued when its timer got cancelled is rejected by [`claim`].
///
/// [`claim`]: TimerSlots::claim
pub struct TimerSlots<M> {
    sender: mpsc::UnboundedSender<M>,
    armed: HashMap<TimerKind, ArmedTimer>,
    generation: u64,
}

impl<M> TimerSlots<M>
where
    M: From<TimerTick> + Send + 'static,
{
    pub fn new(sender: mpsc::UnboundedSender<M>) -> Self {
        Self {
            sender,
            armed: HashMap::new(),
            generation: 0,
        }
    }

    /// Arm `kind` to fire after `delay`, replacing any pending timer of that kind
    pub fn schedule(&mut self, kind: TimerKind, delay: Duration) {
        self.generation += 1;
        let tick = TimerTick {
            kind,
            generation: self.generation,
        };

        let sender = self.sender.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(M::from(tick));
        });

        let replaced = self.armed.insert(
            kind,
            ArmedTimer {
                generation: tick.generation,
                _task: AbortOnDropHandle::new(task),
            },
        );
        trace!(
            "Scheduled {:?} in {:?}{}",
            kind,
            delay,
            if replaced.is_some() { " (replaced pending)" } else { "" }
        );
    }

    /// Returns true if a pending timer was cancelled
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        let cancelled = self.armed.remove(&kind).is_some();
        if cancelled {
            trace!("Cancelled {:?}", kind);
        }
        cancelled
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.armed.contains_key(&kind)
    }

    /// Accept a delivered tick. Stale ticks (cancelled or replaced after they
    /// were queued) return false and must be ignored.
    pub fn claim(&mut self, tick: TimerTick) -> bool {
        match self.armed.get(&tick.kind) {
            Some(armed) if armed.generation == tick.generation => {
                self.armed.remove(&tick.kind);
                true
            }
            _ => {
                trace!("Dropping stale {:?} tick", tick.kind);
                false
            }
        }
    }

    pub fn cancel_all(&mut self) {
        self.armed.clear();
    }
}

impl<M> Drop for TimerSlots<M> {
    fn drop(&mut self) {
        if !self.armed.is_empty() {
            trace!("Aborting {} pending timers", self.armed.len());
        }
        self.armed.clear();
    }
}
