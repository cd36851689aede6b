//! Programmatic scrolling to named regions.
//!
//! Pages with a fixed header need scroll targets offset upward so the
//! region's top lands below the header instead of underneath it. The
//! coordinator owns that offset and the scroll behavior; resolution failures
//! are silent no-ops so navigation wired to a region that was conditionally
//! removed keeps working for everything else.

use crate::page::{PageAccess, ScrollBehavior};

/// Default height of the fixed header, in page units.
pub const DEFAULT_HEADER_OFFSET: f32 = 80.0;

/// Scrolls the page to named regions, compensating for a fixed header.
#[derive(Debug, Clone, Copy)]
pub struct ScrollCoordinator {
    header_offset: f32,
    behavior: ScrollBehavior,
}

impl Default for ScrollCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollCoordinator {
    /// Create a coordinator with the default header offset and smooth
    /// scrolling.
    pub fn new() -> Self {
        Self {
            header_offset: DEFAULT_HEADER_OFFSET,
            behavior: ScrollBehavior::Smooth,
        }
    }

    /// Use a different header offset.
    pub fn with_header_offset(mut self, offset: f32) -> Self {
        self.header_offset = offset;
        self
    }

    /// Use a different scroll behavior.
    pub fn with_behavior(mut self, behavior: ScrollBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// The configured header offset.
    #[inline]
    pub fn header_offset(&self) -> f32 {
        self.header_offset
    }

    /// Scroll so the named region's top sits just below the fixed header.
    ///
    /// Returns `true` when a scroll was requested. A name that does not
    /// resolve returns `false` and requests nothing. The request itself is
    /// fire-and-forget; there is no completion notification and no retry.
    pub fn scroll_to_region(&self, page: &mut impl PageAccess, name: &str) -> bool {
        let Some(bounds) = page.region_bounds(name) else {
            tracing::debug!(
                target: "sightline::scroll",
                region = %name,
                "scroll target not found, ignoring"
            );
            return false;
        };

        let target = (bounds.top() - self.header_offset).max(0.0);
        tracing::debug!(
            target: "sightline::scroll",
            region = %name,
            target,
            "scrolling to region"
        );
        page.scroll_to(target, self.behavior);
        true
    }
}
