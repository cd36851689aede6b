//! Region visibility observation.
//!
//! # Overview
//!
//! A [`RegionObserver`] watches named page regions and reports how much of
//! each one overlaps the viewport. Reports are edge-triggered: a check
//! produces a [`VisibilityEntry`] for a region only when its visibility
//! ratio crosses one of the configured thresholds (or its intersecting state
//! flips) since the previous check. The first check after a region is
//! observed always reports, establishing a baseline.
//!
//! The observer is a pull API. Hosts with a native visibility source can
//! skip it entirely and feed entries straight to
//! [`SectionTracker::process`](crate::tracker::SectionTracker::process);
//! hosts without one call [`check`](RegionObserver::check) after scrolls and
//! resizes.

use crate::events::VisibilityEntry;
use crate::geometry::{Margins, Rect};
use crate::page::PageAccess;

/// Configuration for a [`RegionObserver`].
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    /// Visibility ratios at which crossings are reported, in `0.0..=1.0`.
    pub thresholds: Vec<f32>,
    /// Margins applied to the viewport rectangle before intersection.
    ///
    /// Positive values grow the viewport (regions report early); negative
    /// values shrink it (a region under a fixed header can be excluded by
    /// a negative top margin).
    pub root_margin: Margins,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            thresholds: vec![0.0],
            root_margin: Margins::ZERO,
        }
    }
}

/// Per-region observation state.
#[derive(Debug)]
struct WatchedRegion {
    name: String,
    /// Ratio at the previous check; `None` until first reported.
    last_ratio: Option<f32>,
    /// Intersecting state at the previous check.
    last_intersecting: bool,
}

/// Watches named regions and reports threshold crossings.
#[derive(Debug)]
pub struct RegionObserver {
    options: ObserverOptions,
    watched: Vec<WatchedRegion>,
}

impl RegionObserver {
    /// Create an observer with the given options.
    ///
    /// Thresholds are sanitized: values are clamped to `0.0..=1.0` and an
    /// empty list falls back to `[0.0]`.
    pub fn new(options: ObserverOptions) -> Self {
        let mut options = options;
        if options.thresholds.is_empty() {
            options.thresholds.push(0.0);
        }
        for t in &mut options.thresholds {
            *t = t.clamp(0.0, 1.0);
        }
        Self {
            options,
            watched: Vec::new(),
        }
    }

    /// Start watching a region. Watching the same name twice is a no-op.
    pub fn observe(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.watched.iter().any(|w| w.name == name) {
            return;
        }
        self.watched.push(WatchedRegion {
            name,
            last_ratio: None,
            last_intersecting: false,
        });
    }

    /// Stop watching a region.
    pub fn unobserve(&mut self, name: &str) {
        self.watched.retain(|w| w.name != name);
    }

    /// Stop watching everything.
    pub fn disconnect(&mut self) {
        self.watched.clear();
    }

    /// The number of regions currently watched.
    pub fn watched_count(&self) -> usize {
        self.watched.len()
    }

    /// Recompute visibility for every watched region.
    ///
    /// Returns entries for the regions whose visibility crossed a threshold
    /// since the last check, in watch order. Regions missing from the page
    /// are skipped.
    pub fn check(&mut self, page: &impl PageAccess) -> Vec<VisibilityEntry> {
        let viewport = Rect::new(
            0.0,
            page.scroll_offset(),
            page.viewport_size().width,
            page.viewport_size().height,
        )
        .expand(&self.options.root_margin);

        let mut entries = Vec::new();
        for watched in &mut self.watched {
            let Some(bounds) = page.region_bounds(&watched.name) else {
                continue;
            };

            let intersection = viewport.intersect(&bounds);
            let is_intersecting = intersection.is_some();
            let ratio = match intersection {
                Some(ix) if bounds.area() > 0.0 => (ix.area() / bounds.area()).clamp(0.0, 1.0),
                _ => 0.0,
            };

            if Self::should_report(&self.options.thresholds, watched, is_intersecting, ratio) {
                tracing::trace!(
                    target: "sightline::viewport",
                    region = %watched.name,
                    ratio,
                    is_intersecting,
                    "visibility crossing"
                );
                entries.push(VisibilityEntry {
                    region: watched.name.clone(),
                    is_intersecting,
                    ratio,
                    bounds,
                });
            }

            watched.last_ratio = Some(ratio);
            watched.last_intersecting = is_intersecting;
        }

        entries
    }

    fn should_report(
        thresholds: &[f32],
        watched: &WatchedRegion,
        is_intersecting: bool,
        ratio: f32,
    ) -> bool {
        let Some(last_ratio) = watched.last_ratio else {
            // Baseline report for a freshly observed region.
            return true;
        };

        if is_intersecting != watched.last_intersecting {
            return true;
        }

        thresholds
            .iter()
            .any(|&t| (last_ratio < t && ratio >= t) || (last_ratio >= t && ratio < t))
    }
}
