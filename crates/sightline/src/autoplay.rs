//! Timed horizontal advancement for a carousel track.
//!
//! [`CarouselAutoplay`] drives a [`TrackSurface`] forward on a fixed
//! cadence, wrapping to the start when the next step would run past the
//! scrollable end. Pointer or focus entering the track pauses the cadence;
//! leaving resumes it. Hosts honoring a reduced-motion preference get the
//! whole machine disabled at construction.
//!
//! Advancement runs on a one-shot timer chain rather than a repeating
//! timer: the next tick is armed only after the current advance has been
//! applied, so a slow host pump never piles up missed steps.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use sightline_core::{SharedTimers, Signal, TimerId};

use crate::events::TrackEvent;
use crate::page::PageAccess;

/// Default advance cadence, in milliseconds.
pub const DEFAULT_ADVANCE_INTERVAL_MS: u64 = 3000;

/// A horizontally scrollable track the autoplay engine can drive.
///
/// Offsets and sizes are in the same unit the host lays the track out in,
/// typically CSS pixels.
pub trait TrackSurface {
    /// Current scroll offset from the track's start.
    fn offset(&self) -> f32;

    /// Move the track to the given offset.
    fn set_offset(&mut self, offset: f32);

    /// Total scrollable length of the track's content.
    fn extent(&self) -> f32;

    /// Length of the track's visible window.
    fn span(&self) -> f32;

    /// How far a single advance moves the track.
    fn advance_step(&self) -> f32;

    /// Largest reachable offset. Zero when the content fits in the window.
    fn max_offset(&self) -> f32 {
        (self.extent() - self.span()).max(0.0)
    }
}

/// In-memory [`TrackSurface`] for hosts without a real scroll container.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryTrack {
    offset: f32,
    extent: f32,
    span: f32,
    step: f32,
}

impl MemoryTrack {
    pub fn new(extent: f32, span: f32, step: f32) -> Self {
        Self {
            offset: 0.0,
            extent,
            span,
            step,
        }
    }
}

impl TrackSurface for MemoryTrack {
    fn offset(&self) -> f32 {
        self.offset
    }

    fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    fn extent(&self) -> f32 {
        self.extent
    }

    fn span(&self) -> f32 {
        self.span
    }

    fn advance_step(&self) -> f32 {
        self.step
    }
}

/// Configuration for [`CarouselAutoplay`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayOptions {
    /// Milliseconds between automatic advances.
    pub interval_ms: u64,
}

impl Default for AutoplayOptions {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_ADVANCE_INTERVAL_MS,
        }
    }
}

impl AutoplayOptions {
    /// The configured cadence as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Advances a carousel track on a timer, pausing while hovered or focused.
pub struct CarouselAutoplay {
    options: AutoplayOptions,
    /// Captured once at construction. A reduced-motion preference or an
    /// empty track disables the engine for its whole lifetime.
    enabled: bool,
    paused: bool,
    pending: Option<TimerId>,
    disposed: bool,
    /// Emitted with the new offset after each automatic advance.
    pub advanced: Signal<f32>,
}

impl CarouselAutoplay {
    /// Create the engine for a track with `item_count` items.
    ///
    /// The page's reduced-motion preference is read here, once. Flipping
    /// the preference afterwards does not revive a disabled engine.
    pub fn new(page: &impl PageAccess, item_count: usize, options: AutoplayOptions) -> Self {
        let reduced = page.prefers_reduced_motion();
        let enabled = !reduced && item_count > 0;
        if !enabled {
            tracing::debug!(
                target: "sightline::autoplay",
                reduced,
                item_count,
                "autoplay disabled"
            );
        }
        Self {
            options,
            enabled,
            paused: false,
            pending: None,
            disposed: false,
            advanced: Signal::new(),
        }
    }

    /// Whether the engine survived the construction-time gate.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the cadence is currently paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Arm the first tick of the chain.
    ///
    /// Does nothing when disabled, paused, or already running.
    pub fn start(&mut self, now: Instant, timers: &SharedTimers) {
        if !self.enabled || self.paused || self.pending.is_some() {
            return;
        }
        self.pending = Some(timers.start_one_shot(now, self.options.interval()));
        tracing::debug!(target: "sightline::autoplay", "autoplay started");
    }

    /// Route a fired timer to the engine.
    ///
    /// Returns `true` when the ID belonged to this engine's pending tick.
    /// The track advances by one step, wrapping to offset zero when the
    /// step would overshoot [`TrackSurface::max_offset`], and the next tick
    /// is armed.
    pub fn on_timer(
        &mut self,
        id: TimerId,
        track: &mut impl TrackSurface,
        now: Instant,
        timers: &SharedTimers,
    ) -> bool {
        if self.pending != Some(id) {
            return false;
        }
        self.pending = None;

        let step = track.advance_step();
        let next = track.offset() + step;
        let next = if next > track.max_offset() { 0.0 } else { next };
        track.set_offset(next);
        tracing::trace!(target: "sightline::autoplay", offset = next, "advanced");
        self.advanced.emit(next);

        self.pending = Some(timers.start_one_shot(now, self.options.interval()));
        true
    }

    /// Suspend the cadence and cancel the pending tick.
    pub fn pause(&mut self, timers: &SharedTimers) {
        if self.paused {
            return;
        }
        self.paused = true;
        if let Some(id) = self.pending.take() {
            let _ = timers.stop(id);
        }
        tracing::trace!(target: "sightline::autoplay", "paused");
    }

    /// Lift a pause and arm the next tick.
    ///
    /// Does nothing when not paused or when the engine is disabled.
    pub fn resume(&mut self, now: Instant, timers: &SharedTimers) {
        if !self.paused {
            return;
        }
        self.paused = false;
        if self.enabled && self.pending.is_none() {
            self.pending = Some(timers.start_one_shot(now, self.options.interval()));
        }
        tracing::trace!(target: "sightline::autoplay", "resumed");
    }

    /// Map a track interaction to a pause or resume.
    ///
    /// Enter events pause, leave events resume. Pointer and focus share the
    /// single paused flag, so a pointer leaving resumes the cadence even
    /// while focus is still inside the track.
    pub fn handle_event(&mut self, event: TrackEvent, now: Instant, timers: &SharedTimers) {
        match event {
            TrackEvent::PointerEnter | TrackEvent::FocusEnter => self.pause(timers),
            TrackEvent::PointerLeave | TrackEvent::FocusLeave => self.resume(now, timers),
        }
    }

    /// Permanently shut the engine down.
    ///
    /// Cancels the pending tick and disconnects all `advanced` listeners.
    /// Subsequent calls do nothing.
    pub fn dispose(&mut self, timers: &SharedTimers) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.enabled = false;
        if let Some(id) = self.pending.take() {
            let _ = timers.stop(id);
        }
        self.advanced.disconnect_all();
        tracing::debug!(target: "sightline::autoplay", "autoplay disposed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::page::MemoryPage;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn page() -> MemoryPage {
        MemoryPage::new(Size::new(1280.0, 720.0))
    }

    // Three 800px pages of content visible 800px at a time.
    fn track() -> MemoryTrack {
        MemoryTrack::new(2400.0, 800.0, 800.0)
    }

    fn pump(
        autoplay: &mut CarouselAutoplay,
        track: &mut MemoryTrack,
        timers: &SharedTimers,
        now: Instant,
    ) -> usize {
        let mut routed = 0;
        for id in timers.process_expired(now) {
            if autoplay.on_timer(id, track, now, timers) {
                routed += 1;
            }
        }
        routed
    }

    #[test]
    fn test_reduced_motion_disables_for_good() {
        let mut page = page();
        page.set_reduced_motion(true);

        let timers = SharedTimers::new();
        let mut autoplay = CarouselAutoplay::new(&page, 3, AutoplayOptions::default());
        assert!(!autoplay.is_enabled());

        // The preference was sampled at construction; clearing it later
        // changes nothing.
        page.set_reduced_motion(false);
        autoplay.start(Instant::now(), &timers);
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_empty_track_disables() {
        let timers = SharedTimers::new();
        let mut autoplay = CarouselAutoplay::new(&page(), 0, AutoplayOptions::default());
        assert!(!autoplay.is_enabled());

        autoplay.start(Instant::now(), &timers);
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_chain_advances_one_step_per_interval() {
        let timers = SharedTimers::new();
        let mut track = track();
        let mut autoplay = CarouselAutoplay::new(&page(), 3, AutoplayOptions::default());

        let start = Instant::now();
        autoplay.start(start, &timers);
        assert_eq!(timers.active_count(), 1);

        let t1 = start + Duration::from_secs(3);
        assert_eq!(pump(&mut autoplay, &mut track, &timers, t1), 1);
        assert_eq!(track.offset(), 800.0);

        let t2 = t1 + Duration::from_secs(3);
        assert_eq!(pump(&mut autoplay, &mut track, &timers, t2), 1);
        assert_eq!(track.offset(), 1600.0);

        // Exactly one tick armed at any moment.
        assert_eq!(timers.active_count(), 1);
    }

    #[test]
    fn test_wraps_to_start_past_the_end() {
        let timers = SharedTimers::new();
        let mut track = track();
        track.set_offset(1600.0);

        let mut autoplay = CarouselAutoplay::new(&page(), 3, AutoplayOptions::default());
        let start = Instant::now();
        autoplay.start(start, &timers);

        pump(&mut autoplay, &mut track, &timers, start + Duration::from_secs(3));
        assert_eq!(track.offset(), 0.0);
    }

    #[test]
    fn test_overshoot_wraps_rather_than_clamps() {
        let timers = SharedTimers::new();
        let mut track = track();
        // 1200 + 800 lands past max_offset 1600; the engine goes home
        // instead of pinning at the end.
        track.set_offset(1200.0);

        let mut autoplay = CarouselAutoplay::new(&page(), 3, AutoplayOptions::default());
        let start = Instant::now();
        autoplay.start(start, &timers);

        pump(&mut autoplay, &mut track, &timers, start + Duration::from_secs(3));
        assert_eq!(track.offset(), 0.0);
    }

    #[test]
    fn test_advanced_reports_each_new_offset() {
        let timers = SharedTimers::new();
        let mut track = track();
        let mut autoplay = CarouselAutoplay::new(&page(), 3, AutoplayOptions::default());

        let offsets = Arc::new(Mutex::new(Vec::new()));
        let offsets_clone = offsets.clone();
        autoplay.advanced.connect(move |offset| {
            offsets_clone.lock().push(*offset);
        });

        let start = Instant::now();
        autoplay.start(start, &timers);
        let mut now = start;
        for _ in 0..4 {
            now += Duration::from_secs(3);
            pump(&mut autoplay, &mut track, &timers, now);
        }

        assert_eq!(*offsets.lock(), vec![800.0, 1600.0, 0.0, 800.0]);
    }

    #[test]
    fn test_pause_cancels_and_resume_rearms() {
        let timers = SharedTimers::new();
        let mut autoplay = CarouselAutoplay::new(&page(), 3, AutoplayOptions::default());

        let start = Instant::now();
        autoplay.start(start, &timers);
        assert_eq!(timers.active_count(), 1);

        autoplay.pause(&timers);
        assert!(autoplay.is_paused());
        assert_eq!(timers.active_count(), 0);

        autoplay.resume(start + Duration::from_secs(1), &timers);
        assert!(!autoplay.is_paused());
        assert_eq!(timers.active_count(), 1);
    }

    #[test]
    fn test_pause_and_resume_are_idempotent() {
        let timers = SharedTimers::new();
        let mut autoplay = CarouselAutoplay::new(&page(), 3, AutoplayOptions::default());

        let start = Instant::now();
        autoplay.start(start, &timers);

        autoplay.pause(&timers);
        autoplay.pause(&timers);
        assert_eq!(timers.active_count(), 0);

        autoplay.resume(start, &timers);
        autoplay.resume(start, &timers);
        assert_eq!(timers.active_count(), 1);
    }

    #[test]
    fn test_resume_on_disabled_engine_stays_idle() {
        let mut page = page();
        page.set_reduced_motion(true);

        let timers = SharedTimers::new();
        let mut autoplay = CarouselAutoplay::new(&page, 3, AutoplayOptions::default());
        autoplay.pause(&timers);
        autoplay.resume(Instant::now(), &timers);

        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_track_events_map_to_pause_and_resume() {
        let timers = SharedTimers::new();
        let mut autoplay = CarouselAutoplay::new(&page(), 3, AutoplayOptions::default());

        let start = Instant::now();
        autoplay.start(start, &timers);

        autoplay.handle_event(TrackEvent::PointerEnter, start, &timers);
        assert!(autoplay.is_paused());

        autoplay.handle_event(TrackEvent::PointerLeave, start, &timers);
        assert!(!autoplay.is_paused());

        autoplay.handle_event(TrackEvent::FocusEnter, start, &timers);
        assert!(autoplay.is_paused());

        autoplay.handle_event(TrackEvent::FocusLeave, start, &timers);
        assert!(!autoplay.is_paused());
        assert_eq!(timers.active_count(), 1);
    }

    #[test]
    fn test_pointer_leave_resumes_despite_focus_inside() {
        let timers = SharedTimers::new();
        let mut autoplay = CarouselAutoplay::new(&page(), 3, AutoplayOptions::default());

        let start = Instant::now();
        autoplay.start(start, &timers);

        autoplay.handle_event(TrackEvent::FocusEnter, start, &timers);
        autoplay.handle_event(TrackEvent::PointerEnter, start, &timers);
        autoplay.handle_event(TrackEvent::PointerLeave, start, &timers);

        // One shared flag: the pointer leaving overrides the focus pause.
        assert!(!autoplay.is_paused());
    }

    #[test]
    fn test_dispose_leaves_no_timers_and_no_listeners() {
        let timers = SharedTimers::new();
        let mut track = track();
        let mut autoplay = CarouselAutoplay::new(&page(), 3, AutoplayOptions::default());
        autoplay.advanced.connect(|_| {});

        let start = Instant::now();
        autoplay.start(start, &timers);
        autoplay.dispose(&timers);

        assert_eq!(timers.active_count(), 0);
        assert_eq!(autoplay.advanced.connection_count(), 0);

        // Disposed engines cannot be restarted.
        autoplay.start(start, &timers);
        assert_eq!(timers.active_count(), 0);
        assert_eq!(
            pump(&mut autoplay, &mut track, &timers, start + Duration::from_secs(3)),
            0
        );

        autoplay.dispose(&timers);
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_foreign_timer_is_not_claimed() {
        let timers = SharedTimers::new();
        let mut track = track();
        let mut autoplay = CarouselAutoplay::new(&page(), 3, AutoplayOptions::default());

        let start = Instant::now();
        autoplay.start(start, &timers);
        let foreign = timers.start_one_shot(start, Duration::from_millis(1));

        assert!(!autoplay.on_timer(foreign, &mut track, start, &timers));
        assert_eq!(track.offset(), 0.0);
    }
}
