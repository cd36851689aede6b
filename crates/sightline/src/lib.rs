//! Sightline - viewport-driven interaction coordination for scrollable pages.
//!
//! Sightline is the headless coordination layer of a scrollable page UI:
//! which section counts as active while the user scrolls, how keyboard
//! focus is held inside an open overlay, when a carousel advances on its
//! own, and where a navigation jump lands a region below a fixed header.
//! It renders nothing and observes nothing by itself. The host owns the
//! real page and drives Sightline with geometry, key events, and a pumped
//! timer wheel, all through the [`PageAccess`] seam.
//!
//! The pieces:
//!
//! - [`tracker::SectionTracker`] decides the active section from region
//!   visibility and the scroll position.
//! - [`focus_trap::FocusTrap`] contains Tab focus inside an overlay and
//!   restores it on close; overlapping overlays share a counted
//!   [`scroll_lock::ScrollLock`].
//! - [`autoplay::CarouselAutoplay`] advances a [`autoplay::TrackSurface`]
//!   on a timer chain, pausing under the pointer.
//! - [`scroll::ScrollCoordinator`] turns region names into scroll targets
//!   compensated for a fixed header.
//! - [`contact::ContactForm`] models the contact submission contract.
//!
//! # Example
//!
//! ```
//! use sightline::geometry::{Rect, Size};
//! use sightline::page::MemoryPage;
//! use sightline::tracker::{SectionTracker, TrackerOptions};
//!
//! let mut page = MemoryPage::new(Size::new(1280.0, 720.0));
//! page.set_content_height(3000.0);
//! page.add_region("hero", Rect::new(0.0, 0.0, 1280.0, 900.0));
//! page.add_region("projects", Rect::new(0.0, 900.0, 1280.0, 1400.0));
//!
//! let mut tracker = SectionTracker::new(
//!     &page,
//!     &["hero", "projects"],
//!     TrackerOptions::default(),
//! );
//! tracker.poll(&page);
//! assert_eq!(tracker.active_section(), Some("hero"));
//! ```

pub mod autoplay;
pub mod contact;
pub mod events;
pub mod focus_trap;
pub mod geometry;
pub mod page;
pub mod scroll;
pub mod scroll_lock;
pub mod tracker;
pub mod viewport;

pub use sightline_core::{
    ConnectionId, CoreError, Result, SharedTimers, Signal, TimerId, TimerKind, Timers,
};

pub use autoplay::{CarouselAutoplay, TrackSurface};
pub use contact::{ContactForm, ContactOutcome, ContactRequest, ContactTransport};
pub use events::{Key, KeyEvent, KeyboardModifiers, TrackEvent, VisibilityEntry};
pub use focus_trap::FocusTrap;
pub use geometry::{Margins, Rect, Size};
pub use page::{ElementId, MemoryPage, PageAccess, ScrollBehavior};
pub use scroll::ScrollCoordinator;
pub use scroll_lock::ScrollLock;
pub use tracker::SectionTracker;
pub use viewport::RegionObserver;
