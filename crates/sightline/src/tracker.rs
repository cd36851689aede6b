//! Active-section tracking for long scrollable pages.
//!
//! # Overview
//!
//! A [`SectionTracker`] watches the page's named regions and decides which
//! one is "active" as the viewport moves, driving things like navigation
//! highlighting. The decision rules, in order:
//!
//! 1. Near the top of the page (scroll offset below
//!    [`TrackerOptions::top_region_scroll_threshold`]) the first declared
//!    region is active unconditionally. The hero region wins while the
//!    header area is on screen, regardless of what else peeks in.
//! 2. Otherwise the intersecting region with the highest visibility ratio
//!    wins. Ties keep the previously active region if it is among the tied,
//!    and fall back to declaration order if not.
//! 3. A check in which nothing intersects changes nothing: the last active
//!    region stays active while the viewport crosses dead zones between
//!    regions.
//!
//! Region names that do not resolve against the page at construction are
//! skipped silently; the tracker operates on the resolved subset.
//!
//! # Example
//!
//! ```
//! use sightline::geometry::{Rect, Size};
//! use sightline::page::{MemoryPage, PageAccess, ScrollBehavior};
//! use sightline::tracker::{SectionTracker, TrackerOptions};
//!
//! let mut page = MemoryPage::new(Size::new(1280.0, 720.0));
//! page.set_content_height(3000.0);
//! page.add_region("hero", Rect::new(0.0, 0.0, 1280.0, 900.0));
//! page.add_region("projects", Rect::new(0.0, 900.0, 1280.0, 1300.0));
//!
//! let mut tracker = SectionTracker::new(&page, &["hero", "projects"], TrackerOptions::default());
//! tracker.active_changed.connect(|section| {
//!     println!("now showing: {:?}", section);
//! });
//!
//! tracker.poll(&page);
//! assert_eq!(tracker.active_section(), Some("hero"));
//!
//! page.scroll_to(1400.0, ScrollBehavior::Auto);
//! tracker.poll(&page);
//! assert_eq!(tracker.active_section(), Some("projects"));
//! ```

use serde::{Deserialize, Serialize};
use sightline_core::Signal;

use crate::events::VisibilityEntry;
use crate::geometry::Margins;
use crate::page::PageAccess;
use crate::viewport::{ObserverOptions, RegionObserver};

/// Default scroll offset below which the first declared region is forced
/// active.
pub const DEFAULT_TOP_REGION_SCROLL_THRESHOLD: f32 = 100.0;

/// Configuration for a [`SectionTracker`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerOptions {
    /// Visibility ratios at which region crossings re-evaluate the active
    /// section.
    pub thresholds: Vec<f32>,
    /// Margins applied to the viewport before visibility checks.
    pub root_margin: Margins,
    /// Scroll offset below which the first declared region is forced active.
    pub top_region_scroll_threshold: f32,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            thresholds: vec![0.0, 0.25, 0.5, 0.75, 1.0],
            root_margin: Margins::ZERO,
            top_region_scroll_threshold: DEFAULT_TOP_REGION_SCROLL_THRESHOLD,
        }
    }
}

/// Tracks which named region is active as the viewport moves.
pub struct SectionTracker {
    /// Resolved region names in declaration order.
    regions: Vec<String>,
    observer: RegionObserver,
    options: TrackerOptions,
    active: Option<String>,
    disposed: bool,
    /// Emitted with the new active section whenever it changes.
    pub active_changed: Signal<Option<String>>,
}

impl SectionTracker {
    /// Create a tracker over the declared regions.
    ///
    /// Each name is resolved against the page; names without a matching
    /// region are dropped with a debug log, never an error. Declaration
    /// order is preserved for the names that resolve, and the first resolved
    /// name is the one forced active near the top of the page.
    pub fn new(page: &impl PageAccess, declared: &[&str], options: TrackerOptions) -> Self {
        let mut regions = Vec::with_capacity(declared.len());
        for name in declared {
            if page.region_bounds(name).is_some() {
                if !regions.iter().any(|r: &String| r == name) {
                    regions.push((*name).to_string());
                }
            } else {
                tracing::debug!(
                    target: "sightline::tracker",
                    region = %name,
                    "declared region not found on page, skipping"
                );
            }
        }

        let mut observer = RegionObserver::new(ObserverOptions {
            thresholds: options.thresholds.clone(),
            root_margin: options.root_margin,
        });
        for name in &regions {
            observer.observe(name.clone());
        }

        Self {
            regions,
            observer,
            options,
            active: None,
            disposed: false,
            active_changed: Signal::new(),
        }
    }

    /// The currently active section, if any.
    ///
    /// `None` until the first evaluation promotes a region.
    pub fn active_section(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The number of declared regions that resolved at construction.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Whether [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Run a visibility check against the page and re-evaluate the active
    /// section from the resulting entries.
    pub fn poll(&mut self, page: &impl PageAccess) {
        if self.disposed {
            return;
        }
        let entries = self.observer.check(page);
        self.process(&entries, page.scroll_offset());
    }

    /// Re-evaluate the active section from an externally produced batch.
    ///
    /// Hosts with a native visibility source call this directly. Entries
    /// naming regions the tracker does not know are ignored, which keeps
    /// the active section inside the declared set no matter what arrives.
    pub fn process(&mut self, entries: &[VisibilityEntry], scroll_offset: f32) {
        if self.disposed {
            return;
        }

        // Near the top of the page the first declared region wins outright.
        if scroll_offset < self.options.top_region_scroll_threshold {
            if let Some(first) = self.regions.first().cloned() {
                self.set_active(Some(first));
            }
            return;
        }

        let candidates: Vec<&VisibilityEntry> = entries
            .iter()
            .filter(|e| e.is_intersecting && self.declared_index(&e.region).is_some())
            .collect();

        // Nothing visible: the previous active section stays.
        if candidates.is_empty() {
            return;
        }

        let mut best_ratio = f32::MIN;
        for entry in &candidates {
            if entry.ratio > best_ratio {
                best_ratio = entry.ratio;
            }
        }

        let tied: Vec<&VisibilityEntry> = candidates
            .iter()
            .copied()
            .filter(|e| (e.ratio - best_ratio).abs() <= f32::EPSILON)
            .collect();

        // NaN ratios fail both comparisons above and leave the tie set
        // empty; such a batch promotes nothing.
        let Some(first_tied) = tied.first().copied() else {
            return;
        };

        // Ties keep the current section when it is among the tied, and fall
        // back to declaration order otherwise.
        let winner = if let Some(current) = self
            .active
            .as_ref()
            .filter(|current| tied.iter().any(|e| &e.region == *current))
        {
            current.clone()
        } else {
            let mut earliest = first_tied;
            let mut earliest_index = self.declared_index(&earliest.region);
            for entry in &tied[1..] {
                let index = self.declared_index(&entry.region);
                if index < earliest_index {
                    earliest = *entry;
                    earliest_index = index;
                }
            }
            earliest.region.clone()
        };

        self.set_active(Some(winner));
    }

    /// Re-evaluate only the top-of-page rule from the live scroll offset.
    ///
    /// Hook this to scroll events: it catches a fast return to the top when
    /// no visibility crossing fires. Past the threshold it does nothing; a
    /// demotion needs visibility data.
    pub fn handle_scroll(&mut self, page: &impl PageAccess) {
        if self.disposed {
            return;
        }
        if page.scroll_offset() < self.options.top_region_scroll_threshold {
            if let Some(first) = self.regions.first().cloned() {
                self.set_active(Some(first));
            }
        }
    }

    /// Stop observing and silence the tracker.
    ///
    /// Idempotent. After disposal every entry point is a no-op and
    /// `active_changed` never fires again; the last active section remains
    /// readable.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.observer.disconnect();
        self.active_changed.disconnect_all();
        tracing::debug!(target: "sightline::tracker", "tracker disposed");
    }

    fn declared_index(&self, name: &str) -> Option<usize> {
        self.regions.iter().position(|r| r == name)
    }

    fn set_active(&mut self, next: Option<String>) {
        if next == self.active {
            return;
        }
        tracing::debug!(
            target: "sightline::tracker",
            from = ?self.active,
            to = ?next,
            "active section changed"
        );
        self.active = next.clone();
        self.active_changed.emit(next);
    }
}

impl Drop for SectionTracker {
    fn drop(&mut self) {
        self.dispose();
    }
}
