//! Timer service for Sightline.
//!
//! Provides one-shot and repeating timers for controllers that defer work
//! (delayed overlay focus, carousel advance scheduling). Sightline has no
//! event loop of its own, so the service never samples the clock: the host
//! passes `Instant`s in, pumps [`SharedTimers::process_expired`] from its own
//! loop, and routes the fired IDs to whichever controller owns them. Tests
//! drive the same API with synthetic instants.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, TimerError};

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// The type of timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires once after the specified duration.
    OneShot,
    /// Fires repeatedly at the specified interval.
    Repeating,
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData {
    /// When this timer should next fire.
    next_fire: Instant,
    /// The interval for repeating timers.
    interval: Duration,
    /// The kind of timer.
    kind: TimerKind,
    /// Whether this timer is active.
    active: bool,
}

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.fire_time.cmp(&self.fire_time)
    }
}

/// The timer service.
///
/// All methods take the current instant from the caller. Fired timer IDs are
/// returned rather than dispatched, so a handler that stops or re-arms timers
/// never re-enters the service mid-iteration.
pub struct Timers {
    /// All registered timers.
    timers: SlotMap<TimerId, TimerData>,
    /// Priority queue of pending timer fires (min-heap by fire time).
    queue: BinaryHeap<TimerQueueEntry>,
}

impl Timers {
    /// Create a new timer service.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Start a one-shot timer that fires once `delay` after `now`.
    ///
    /// Returns the timer ID that can be used to cancel the timer.
    pub fn start_one_shot(&mut self, now: Instant, delay: Duration) -> TimerId {
        self.insert(now + delay, delay, TimerKind::OneShot)
    }

    /// Start a repeating timer that fires at the specified interval.
    ///
    /// The first fire occurs `interval` after `now`.
    /// Returns the timer ID that can be used to cancel the timer.
    pub fn start_repeating(&mut self, now: Instant, interval: Duration) -> TimerId {
        self.insert(now + interval, interval, TimerKind::Repeating)
    }

    fn insert(&mut self, next_fire: Instant, interval: Duration, kind: TimerKind) -> TimerId {
        let data = TimerData {
            next_fire,
            interval,
            kind,
            active: true,
        };

        let id = self.timers.insert(data);
        self.queue.push(TimerQueueEntry {
            id,
            fire_time: next_fire,
        });

        tracing::trace!(target: "sightline_core::timer", ?id, ?kind, "timer started");
        id
    }

    /// Stop and remove a timer.
    ///
    /// Returns `Ok(())` if the timer was found and removed, or an error if
    /// not found. The stale heap entry is discarded lazily.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        if let Some(timer) = self.timers.get_mut(id) {
            timer.active = false;
            self.timers.remove(id);
            tracing::trace!(target: "sightline_core::timer", ?id, "timer stopped");
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId.into())
        }
    }

    /// Check if a timer is currently active.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.get(id).is_some_and(|t| t.active)
    }

    /// Get the duration until the next timer fires, if any.
    ///
    /// Returns `None` if there are no active timers.
    pub fn time_until_next(&mut self, now: Instant) -> Option<Duration> {
        // Clean up any inactive timers from the front of the queue.
        while let Some(entry) = self.queue.peek() {
            if !self.timers.get(entry.id).is_some_and(|t| t.active) {
                self.queue.pop();
            } else {
                break;
            }
        }

        self.queue.peek().map(|entry| {
            if entry.fire_time > now {
                entry.fire_time - now
            } else {
                Duration::ZERO
            }
        })
    }

    /// Process all timers due at `now`.
    ///
    /// Returns the IDs that fired, in fire-time order. One-shot timers are
    /// removed; repeating timers are rescheduled relative to `now`. The
    /// caller routes each ID to the controller that owns it.
    #[tracing::instrument(skip(self), target = "sightline_core::timer", level = "trace")]
    pub fn process_expired(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired = Vec::new();

        while let Some(peeked) = self.queue.peek() {
            // Check if this timer should fire.
            if peeked.fire_time > now {
                break;
            }

            let Some(entry) = self.queue.pop() else {
                break;
            };
            let id = entry.id;

            // Check if timer is still active (stale entries linger after stop).
            let Some(timer) = self.timers.get_mut(id) else {
                continue;
            };

            if !timer.active {
                continue;
            }

            tracing::trace!(target: "sightline_core::timer", ?id, "timer fired");
            fired.push(id);

            match timer.kind {
                TimerKind::OneShot => {
                    // One-shot timers are removed after firing.
                    timer.active = false;
                    self.timers.remove(id);
                }
                TimerKind::Repeating => {
                    // Schedule the next fire.
                    timer.next_fire = now + timer.interval;
                    self.queue.push(TimerQueueEntry {
                        id,
                        fire_time: timer.next_fire,
                    });
                }
            }
        }

        fired
    }

    /// Get the number of active timers.
    pub fn active_count(&self) -> usize {
        self.timers.iter().filter(|(_, t)| t.active).count()
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}

/// A shareable wrapper around [`Timers`].
///
/// Controllers borrow this for the calls that arm or cancel timers, while
/// the host owns it (typically in an `Arc`) and pumps expiry from its loop.
pub struct SharedTimers {
    inner: Mutex<Timers>,
}

impl SharedTimers {
    /// Create a new shared timer service.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Timers::new()),
        }
    }

    /// See [`Timers::start_one_shot`].
    pub fn start_one_shot(&self, now: Instant, delay: Duration) -> TimerId {
        self.inner.lock().start_one_shot(now, delay)
    }

    /// See [`Timers::start_repeating`].
    pub fn start_repeating(&self, now: Instant, interval: Duration) -> TimerId {
        self.inner.lock().start_repeating(now, interval)
    }

    /// See [`Timers::stop`].
    pub fn stop(&self, id: TimerId) -> Result<()> {
        self.inner.lock().stop(id)
    }

    /// See [`Timers::is_active`].
    pub fn is_active(&self, id: TimerId) -> bool {
        self.inner.lock().is_active(id)
    }

    /// See [`Timers::time_until_next`].
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.inner.lock().time_until_next(now)
    }

    /// See [`Timers::process_expired`].
    ///
    /// The lock is released before this returns, so handlers receiving the
    /// fired IDs may start and stop timers freely.
    pub fn process_expired(&self, now: Instant) -> Vec<TimerId> {
        self.inner.lock().process_expired(now)
    }

    /// See [`Timers::active_count`].
    pub fn active_count(&self) -> usize {
        self.inner.lock().active_count()
    }
}

impl Default for SharedTimers {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(SharedTimers: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut timers = Timers::new();
        let start = Instant::now();

        let id = timers.start_one_shot(start, ms(100));
        assert!(timers.is_active(id));

        // Not yet due.
        assert!(timers.process_expired(start + ms(50)).is_empty());
        assert!(timers.is_active(id));

        // Due now.
        assert_eq!(timers.process_expired(start + ms(100)), vec![id]);
        assert!(!timers.is_active(id));
        assert_eq!(timers.active_count(), 0);

        // Never fires again.
        assert!(timers.process_expired(start + ms(500)).is_empty());
    }

    #[test]
    fn test_repeating_reschedules() {
        let mut timers = Timers::new();
        let start = Instant::now();

        let id = timers.start_repeating(start, ms(100));

        assert_eq!(timers.process_expired(start + ms(100)), vec![id]);
        assert!(timers.is_active(id));
        assert_eq!(timers.process_expired(start + ms(200)), vec![id]);
        assert!(timers.is_active(id));

        timers.stop(id).unwrap();
        assert!(timers.process_expired(start + ms(300)).is_empty());
    }

    #[test]
    fn test_stop_unknown_id_errors() {
        let mut timers = Timers::new();
        let start = Instant::now();

        let id = timers.start_one_shot(start, ms(10));
        timers.stop(id).unwrap();
        assert!(timers.stop(id).is_err());
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timers = Timers::new();
        let start = Instant::now();

        let id = timers.start_one_shot(start, ms(10));
        timers.stop(id).unwrap();

        // The stale heap entry must be skipped.
        assert!(timers.process_expired(start + ms(20)).is_empty());
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_fire_order_is_by_due_time() {
        let mut timers = Timers::new();
        let start = Instant::now();

        let late = timers.start_one_shot(start, ms(200));
        let early = timers.start_one_shot(start, ms(100));

        assert_eq!(timers.process_expired(start + ms(250)), vec![early, late]);
    }

    #[test]
    fn test_time_until_next() {
        let mut timers = Timers::new();
        let start = Instant::now();

        assert_eq!(timers.time_until_next(start), None);

        let id = timers.start_one_shot(start, ms(100));
        assert_eq!(timers.time_until_next(start), Some(ms(100)));
        assert_eq!(timers.time_until_next(start + ms(40)), Some(ms(60)));

        // Already due reports zero, not a negative saturation.
        assert_eq!(timers.time_until_next(start + ms(150)), Some(Duration::ZERO));

        timers.stop(id).unwrap();
        assert_eq!(timers.time_until_next(start), None);
    }

    #[test]
    fn test_shared_timers_roundtrip() {
        let timers = SharedTimers::new();
        let start = Instant::now();

        let id = timers.start_one_shot(start, ms(100));
        assert_eq!(timers.active_count(), 1);
        assert_eq!(timers.process_expired(start + ms(100)), vec![id]);
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_rearm_from_fired_id_keeps_chain() {
        // The one-shot chain pattern: a handler re-arms after each fire.
        let timers = SharedTimers::new();
        let start = Instant::now();

        let mut current = timers.start_one_shot(start, ms(100));
        for step in 1..=3 {
            let now = start + ms(100 * step);
            let fired = timers.process_expired(now);
            assert_eq!(fired, vec![current]);
            current = timers.start_one_shot(now, ms(100));
        }
        assert_eq!(timers.active_count(), 1);
    }
}
