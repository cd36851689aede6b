//! The page seam between controllers and the host platform.
//!
//! # Overview
//!
//! Sightline never touches a real document tree. Every controller is generic
//! over [`PageAccess`], a trait describing the handful of page capabilities
//! the coordination layer needs: region geometry by name, vertical scroll
//! state, focus movement, scroll suppression, and the user's motion
//! preference. A host backs the trait with whatever it renders; tests and
//! examples use the in-memory [`MemoryPage`].
//!
//! Elements are referenced by [`ElementId`] and never owned by controllers.
//! An element can disappear from the page at any time (an overlay unmounts,
//! a list re-renders); controllers re-query instead of caching, and treat a
//! missing element as a silent no-op.
//!
//! # Example
//!
//! ```
//! use sightline::page::{MemoryPage, PageAccess, ScrollBehavior};
//! use sightline::geometry::{Rect, Size};
//!
//! let mut page = MemoryPage::new(Size::new(1280.0, 720.0));
//! page.set_content_height(4000.0);
//! page.add_region("hero", Rect::new(0.0, 0.0, 1280.0, 800.0));
//! page.add_region("projects", Rect::new(0.0, 800.0, 1280.0, 1200.0));
//!
//! page.scroll_to(820.0, ScrollBehavior::Smooth);
//! assert_eq!(page.scroll_offset(), 820.0);
//! assert!(page.region_bounds("projects").is_some());
//! assert!(page.region_bounds("blog").is_none());
//! ```

use slotmap::{SlotMap, new_key_type};

use crate::geometry::{Rect, Size};

new_key_type! {
    /// A unique identifier for a focusable or container element on the page.
    pub struct ElementId;
}

/// How a programmatic scroll should move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Jump immediately.
    Auto,
    /// Animate toward the target.
    #[default]
    Smooth,
}

/// Page capabilities required by the coordination controllers.
///
/// Implementations are queried fresh on every use. In particular,
/// [`focusable_elements`](Self::focusable_elements) must reflect the page as
/// it is *now*; the focus trap deliberately re-asks on every key press so
/// that elements appearing or disappearing inside an open overlay are picked
/// up without any invalidation protocol.
pub trait PageAccess {
    /// The bounds of a named region in document coordinates, or `None` if no
    /// such region exists on the page.
    fn region_bounds(&self, name: &str) -> Option<Rect>;

    /// The current vertical scroll offset from the top of the content.
    fn scroll_offset(&self) -> f32;

    /// The size of the visible viewport.
    fn viewport_size(&self) -> Size;

    /// The full height of the page content.
    fn content_height(&self) -> f32;

    /// Request a scroll to the given vertical offset.
    ///
    /// Fire-and-forget: the host may clamp, animate, or coalesce the request.
    fn scroll_to(&mut self, offset: f32, behavior: ScrollBehavior);

    /// The element currently holding keyboard focus, if any.
    fn focused_element(&self) -> Option<ElementId>;

    /// Move keyboard focus.
    ///
    /// `None` clears focus. Returns `false` when the target no longer exists
    /// or cannot take focus; the page state is unchanged in that case.
    fn set_focused_element(&mut self, element: Option<ElementId>) -> bool;

    /// Whether the element is still attached to the page.
    fn element_in_document(&self, element: ElementId) -> bool;

    /// The focusable elements inside `container`, in traversal order.
    fn focusable_elements(&self, container: ElementId) -> Vec<ElementId>;

    /// Suppress or restore page scrolling.
    ///
    /// Controllers never call this directly; they go through
    /// [`ScrollLock`](crate::scroll_lock::ScrollLock) so that overlapping
    /// suppressors compose.
    fn set_scroll_locked(&mut self, locked: bool);

    /// Whether page scrolling is currently suppressed.
    fn is_scroll_locked(&self) -> bool;

    /// Whether the user asked for reduced motion.
    fn prefers_reduced_motion(&self) -> bool;
}

/// Per-element bookkeeping in [`MemoryPage`].
#[derive(Debug, Clone, Copy)]
struct ElementData {
    /// The container this element lives in, if any.
    container: Option<ElementId>,
    /// Whether the element can take keyboard focus.
    focusable: bool,
}

/// An in-memory [`PageAccess`] implementation.
///
/// This is the reference page model used by the test suite and by hosts
/// that drive Sightline from a scripted or headless environment. Regions
/// keep their declaration order; elements keep insertion order, which is
/// the traversal order reported by [`focusable_elements`](PageAccess::focusable_elements).
#[derive(Debug, Default)]
pub struct MemoryPage {
    regions: Vec<(String, Rect)>,
    elements: SlotMap<ElementId, ElementData>,
    /// Insertion order of live elements; traversal order for focus.
    order: Vec<ElementId>,
    viewport: Size,
    content_height: f32,
    scroll_offset: f32,
    focused: Option<ElementId>,
    scroll_locked: bool,
    reduced_motion: bool,
    last_scroll: Option<(f32, ScrollBehavior)>,
}

impl MemoryPage {
    /// Create an empty page with the given viewport size.
    ///
    /// The content height starts equal to the viewport height; grow it with
    /// [`set_content_height`](Self::set_content_height) as regions are added.
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            content_height: viewport.height,
            ..Self::default()
        }
    }

    /// Set the full height of the page content.
    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = height;
    }

    /// Declare a named region with the given document-coordinate bounds.
    ///
    /// Re-declaring an existing name replaces its bounds in place.
    pub fn add_region(&mut self, name: impl Into<String>, bounds: Rect) {
        let name = name.into();
        if let Some(slot) = self.regions.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = bounds;
        } else {
            self.regions.push((name, bounds));
        }
    }

    /// Add a top-level element.
    pub fn add_element(&mut self, focusable: bool) -> ElementId {
        self.insert_element(None, focusable)
    }

    /// Add an element inside a container element.
    pub fn add_element_in(&mut self, container: ElementId, focusable: bool) -> ElementId {
        self.insert_element(Some(container), focusable)
    }

    fn insert_element(&mut self, container: Option<ElementId>, focusable: bool) -> ElementId {
        let id = self.elements.insert(ElementData {
            container,
            focusable,
        });
        self.order.push(id);
        id
    }

    /// Detach an element from the page.
    ///
    /// If the element held focus, focus is cleared, mirroring how a document
    /// drops focus to the body when the active element unmounts.
    pub fn remove_element(&mut self, id: ElementId) {
        if self.elements.remove(id).is_some() {
            self.order.retain(|e| *e != id);
            if self.focused == Some(id) {
                self.focused = None;
            }
        }
    }

    /// Set the user's reduced-motion preference.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    /// The last scroll request made through [`PageAccess::scroll_to`].
    pub fn last_scroll_request(&self) -> Option<(f32, ScrollBehavior)> {
        self.last_scroll
    }

    /// Move focus one step through the page's focusable elements.
    ///
    /// This is the host-default focus step for Tab presses left unaccepted
    /// by controllers: forward wraps from the last element to the first,
    /// backward from the first to the last. Returns `false` when nothing on
    /// the page can take focus.
    pub fn advance_focus(&mut self, forward: bool) -> bool {
        let focusables: Vec<ElementId> = self
            .order
            .iter()
            .copied()
            .filter(|id| self.elements.get(*id).is_some_and(|e| e.focusable))
            .collect();
        if focusables.is_empty() {
            return false;
        }

        let position = self
            .focused
            .and_then(|cur| focusables.iter().position(|id| *id == cur));
        let next = match position {
            Some(pos) if forward => focusables[(pos + 1) % focusables.len()],
            Some(pos) => {
                if pos == 0 {
                    focusables[focusables.len() - 1]
                } else {
                    focusables[pos - 1]
                }
            }
            None if forward => focusables[0],
            None => focusables[focusables.len() - 1],
        };

        self.focused = Some(next);
        true
    }

    fn max_scroll(&self) -> f32 {
        (self.content_height - self.viewport.height).max(0.0)
    }
}

impl PageAccess for MemoryPage {
    fn region_bounds(&self, name: &str) -> Option<Rect> {
        self.regions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, bounds)| *bounds)
    }

    fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn content_height(&self) -> f32 {
        self.content_height
    }

    fn scroll_to(&mut self, offset: f32, behavior: ScrollBehavior) {
        let clamped = offset.clamp(0.0, self.max_scroll());
        self.scroll_offset = clamped;
        self.last_scroll = Some((clamped, behavior));
        tracing::trace!(
            target: "sightline::page",
            offset = clamped,
            ?behavior,
            "scroll request"
        );
    }

    fn focused_element(&self) -> Option<ElementId> {
        self.focused
    }

    fn set_focused_element(&mut self, element: Option<ElementId>) -> bool {
        match element {
            Some(id) => {
                if !self.elements.contains_key(id) {
                    return false;
                }
                // Any attached element can be assigned focus directly, the
                // way a tabindex="-1" node can in a document. `focusable`
                // only governs traversal membership.
                self.focused = Some(id);
                true
            }
            None => {
                self.focused = None;
                true
            }
        }
    }

    fn element_in_document(&self, element: ElementId) -> bool {
        self.elements.contains_key(element)
    }

    fn focusable_elements(&self, container: ElementId) -> Vec<ElementId> {
        self.order
            .iter()
            .copied()
            .filter(|id| {
                self.elements
                    .get(*id)
                    .is_some_and(|e| e.focusable && e.container == Some(container))
            })
            .collect()
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}
