//! Rectangle math for visibility and scrolling.
//!
//! Regions and viewports live in document coordinates: `y` grows downward
//! and is measured from the top of the page content, not the top of the
//! screen. All values are `f32`, matching the fractional positions a layout
//! engine reports.

use serde::{Deserialize, Serialize};

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in page units.
    pub width: f32,
    /// Height in page units.
    pub height: f32,
}

impl Size {
    /// Create a new size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width (non-negative).
    pub width: f32,
    /// Height (non-negative).
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The left edge.
    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    /// The right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// The top edge.
    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    /// The bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// The covered area.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Whether this rectangle covers no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// The overlap between two rectangles.
    ///
    /// Edge-touching rectangles intersect with a zero-area result, matching
    /// how a region peeking exactly at the viewport edge still counts as
    /// visible at ratio zero.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right >= left && bottom >= top {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    /// This rectangle shifted by the given deltas.
    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// This rectangle grown by the given margins.
    ///
    /// Positive margins expand outward; negative margins shrink inward. The
    /// result is clamped to non-negative dimensions.
    pub fn expand(&self, margins: &Margins) -> Rect {
        let width = (self.width + margins.left + margins.right).max(0.0);
        let height = (self.height + margins.top + margins.bottom).max(0.0);
        Rect::new(self.x - margins.left, self.y - margins.top, width, height)
    }
}

/// Per-edge margins, used to grow or shrink the viewport rectangle before
/// visibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    /// Top margin.
    pub top: f32,
    /// Right margin.
    pub right: f32,
    /// Bottom margin.
    pub bottom: f32,
    /// Left margin.
    pub left: f32,
}

impl Margins {
    /// Zero on every edge.
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// The same margin on every edge.
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.area(), 5000.0);
    }

    #[test]
    fn test_intersect_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);

        let ix = a.intersect(&b).unwrap();
        assert_eq!(ix, Rect::new(50.0, 50.0, 50.0, 50.0));
        assert_eq!(ix.area(), 2500.0);
    }

    #[test]
    fn test_intersect_disjoint() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(200.0, 200.0, 10.0, 10.0);
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn test_intersect_touching_edges_is_zero_area() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(0.0, 100.0, 100.0, 50.0);

        let ix = a.intersect(&b).unwrap();
        assert_eq!(ix.height, 0.0);
        assert_eq!(ix.area(), 0.0);
    }

    #[test]
    fn test_intersect_contained() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(25.0, 25.0, 10.0, 10.0);
        assert_eq!(outer.intersect(&inner), Some(inner));
    }

    #[test]
    fn test_expand_with_margins() {
        let r = Rect::new(0.0, 100.0, 200.0, 300.0);
        let expanded = r.expand(&Margins::uniform(10.0));
        assert_eq!(expanded, Rect::new(-10.0, 90.0, 220.0, 320.0));
    }

    #[test]
    fn test_expand_with_negative_margins_shrinks() {
        let r = Rect::new(0.0, 0.0, 200.0, 300.0);
        let shrunk = r.expand(&Margins {
            top: -50.0,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        });
        assert_eq!(shrunk, Rect::new(0.0, 50.0, 200.0, 250.0));
    }

    #[test]
    fn test_expand_clamps_to_zero() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let collapsed = r.expand(&Margins::uniform(-20.0));
        assert_eq!(collapsed.width, 0.0);
        assert_eq!(collapsed.height, 0.0);
    }

    #[test]
    fn test_translate() {
        let r = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(r.translate(-5.0, 15.0), Rect::new(0.0, 20.0, 10.0, 10.0));
    }
}
