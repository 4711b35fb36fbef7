//! Timers - Recurring callbacks with synchronous cancellation
//!
//! The spinner is the only time-driven printer. It registers a recurring
//! tick through a [`Scheduler`] and keeps the returned [`TimerHandle`].
//! Cancelling (or dropping) the handle guarantees the callback is not invoked
//! again once `cancel` returns.
//!
//! - [`TokioScheduler`] spawns an interval task on the ambient tokio runtime.
//! - [`ManualClock`] is a virtual clock: nothing fires until
//!   [`ManualClock::advance`] is called, and then every due tick fires
//!   synchronously, in deadline order.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::warn;

/// A recurring timer callback.
pub type Tick = Box<dyn FnMut() + Send + 'static>;

/// Shortest period a scheduler accepts; shorter periods are raised to it.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Registers recurring callbacks.
pub trait Scheduler: Send + Sync + fmt::Debug {
    /// Call `tick` every `period`, first after one full period.
    fn every(&self, period: Duration, tick: Tick) -> TimerHandle;
}

/// Owner of a registered timer. Cancels on drop.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TimerHandle {
    /// Handle that runs `cancel` exactly once, on [`TimerHandle::cancel`] or drop.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Handle for a timer that never fires.
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    /// Stop the timer. No tick runs after this returns.
    pub fn cancel(mut self) {
        self.fire();
    }

    fn fire(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.fire();
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

/// Scheduler backed by tokio interval tasks.
///
/// Without a runtime the timer cannot be spawned; a warning is logged and an
/// inert handle is returned, so the spinner degrades to a static line.
#[derive(Debug, Clone, Default)]
pub struct TokioScheduler {
    handle: Option<Handle>,
}

impl TokioScheduler {
    /// Spawn on whatever runtime is current when a timer is registered.
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Always spawn on `handle`.
    pub fn with_handle(handle: Handle) -> Self {
        Self {
            handle: Some(handle),
        }
    }
}

impl Scheduler for TokioScheduler {
    fn every(&self, period: Duration, mut tick: Tick) -> TimerHandle {
        let Some(handle) = self.handle.clone().or_else(|| Handle::try_current().ok()) else {
            warn!("no tokio runtime available, timer will not fire");
            return TimerHandle::inert();
        };
        let period = period.max(MIN_PERIOD);

        let task = handle.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tick();
            }
        });

        TimerHandle::new(move || task.abort())
    }
}

struct Entry {
    period: Duration,
    due: Duration,
    // Taken out while the callback runs so the lock is not held.
    tick: Option<Tick>,
}

#[derive(Default)]
struct ClockState {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<u64, Entry>,
}

/// Virtual-time scheduler for deterministic tests.
#[derive(Clone, Default)]
pub struct ManualClock {
    state: Arc<Mutex<ClockState>>,
}

impl ManualClock {
    /// Clock at time zero with no timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed so far.
    pub fn now(&self) -> Duration {
        lock(&self.state).now
    }

    /// Number of registered, uncancelled timers.
    pub fn pending(&self) -> usize {
        lock(&self.state).timers.len()
    }

    /// Move time forward by `by`, firing every tick that falls due on the way.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        while let Some((id, mut tick)) = self.next_due(target) {
            tick();
            let mut state = lock(&self.state);
            // Cancelled during the callback: the entry is gone, drop the tick.
            if let Some(entry) = state.timers.get_mut(&id) {
                entry.due += entry.period;
                entry.tick = Some(tick);
            }
        }
    }

    fn next_due(&self, target: Duration) -> Option<(u64, Tick)> {
        let mut state = lock(&self.state);
        let next = state
            .timers
            .iter()
            .filter(|(_, entry)| entry.due <= target && entry.tick.is_some())
            .min_by_key(|(id, entry)| (entry.due, **id))
            .map(|(id, entry)| (*id, entry.due));

        match next {
            Some((id, due)) => {
                state.now = due;
                let tick = state.timers.get_mut(&id).and_then(|entry| entry.tick.take());
                tick.map(|tick| (id, tick))
            }
            None => {
                state.now = target;
                None
            }
        }
    }
}

impl Scheduler for ManualClock {
    fn every(&self, period: Duration, tick: Tick) -> TimerHandle {
        let period = period.max(MIN_PERIOD);
        let id = {
            let mut state = lock(&self.state);
            let id = state.next_id;
            state.next_id += 1;
            let due = state.now + period;
            state.timers.insert(
                id,
                Entry {
                    period,
                    due,
                    tick: Some(tick),
                },
            );
            id
        };

        let state: Weak<Mutex<ClockState>> = Arc::downgrade(&self.state);
        TimerHandle::new(move || {
            if let Some(state) = state.upgrade() {
                lock(&state).timers.remove(&id);
            }
        })
    }
}

impl fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("ManualClock")
            .field("now", &state.now)
            .field("timers", &state.timers.len())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
