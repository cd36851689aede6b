//! Keyboard focus containment for overlay dialogs.
//!
//! # Overview
//!
//! While an overlay is open, keyboard focus must stay inside it: Tab from
//! the last focusable element wraps to the first, Shift+Tab from the first
//! wraps to the last, Escape asks the overlay to close, and the element
//! focused before opening gets focus back on close. The page behind the
//! overlay also stops scrolling, via a shared [`ScrollLock`].
//!
//! A [`FocusTrap`] intervenes only at the wrap edges. A Tab press in the
//! middle of the overlay is left unaccepted so the host's native focus step
//! runs; the trap accepts an event exactly when it moved focus itself (or
//! asked for a close). The focusable set is re-queried from the page on
//! every key press, so elements mounting or unmounting inside an open
//! overlay need no notification protocol.
//!
//! Initial focus is placed on a delay rather than synchronously: overlays
//! animate in, and focusing mid-transition scrolls half-built layout into
//! view. The trap arms a one-shot timer on open and moves focus when the
//! host pumps it.
//!
//! # Driving the trap
//!
//! The host owns the loop and the close decision:
//!
//! ```
//! use std::time::{Duration, Instant};
//! use sightline_core::SharedTimers;
//! use sightline::focus_trap::{FocusTrap, TrapOptions};
//! use sightline::geometry::Size;
//! use sightline::page::{MemoryPage, PageAccess};
//! use sightline::scroll_lock::ScrollLock;
//!
//! let mut page = MemoryPage::new(Size::new(1280.0, 720.0));
//! let overlay = page.add_element(false);
//! let close_button = page.add_element_in(overlay, true);
//!
//! let timers = SharedTimers::new();
//! let lock = ScrollLock::new();
//! let mut trap = FocusTrap::new(overlay, lock, TrapOptions::default());
//!
//! let now = Instant::now();
//! trap.open(&mut page, now, &timers);
//!
//! // The host pumps timers and routes fired IDs back to the trap.
//! for id in timers.process_expired(now + Duration::from_millis(100)) {
//!     trap.on_timer(id, &mut page);
//! }
//! assert_eq!(page.focused_element(), Some(close_button));
//!
//! trap.close(&mut page, &timers);
//! ```

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use sightline_core::{SharedTimers, Signal, TimerId};

use crate::events::{Key, KeyEvent};
use crate::page::{ElementId, PageAccess};
use crate::scroll_lock::ScrollLock;

/// Default delay before initial focus placement, in milliseconds.
pub const DEFAULT_FOCUS_DELAY_MS: u64 = 100;

/// Configuration for a [`FocusTrap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrapOptions {
    /// Milliseconds between opening and initial focus placement, covering
    /// the overlay's entrance transition.
    pub focus_delay_ms: u64,
}

impl Default for TrapOptions {
    fn default() -> Self {
        Self {
            focus_delay_ms: DEFAULT_FOCUS_DELAY_MS,
        }
    }
}

impl TrapOptions {
    /// The configured focus delay as a [`Duration`].
    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }
}

/// Contains keyboard focus inside an overlay container.
pub struct FocusTrap {
    container: ElementId,
    scroll_lock: ScrollLock,
    options: TrapOptions,
    open: bool,
    /// Element to restore focus to on close.
    restore_to: Option<ElementId>,
    /// One-shot timer armed for initial focus placement.
    pending_focus: Option<TimerId>,
    /// Emitted when Escape asks the overlay to close. The host decides and
    /// calls [`close`](Self::close).
    pub close_requested: Signal<()>,
}

impl FocusTrap {
    /// Create a trap around the given overlay container.
    ///
    /// Everything suppressing scroll on the same page must share clones of
    /// the same [`ScrollLock`].
    pub fn new(container: ElementId, scroll_lock: ScrollLock, options: TrapOptions) -> Self {
        Self {
            container,
            scroll_lock,
            options,
            open: false,
            restore_to: None,
            pending_focus: None,
            close_requested: Signal::new(),
        }
    }

    /// Whether the trap is currently open.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The overlay container this trap guards.
    #[inline]
    pub fn container(&self) -> ElementId {
        self.container
    }

    /// Activate the trap.
    ///
    /// Captures the currently focused element for later restoration, takes
    /// a hold on the scroll lock, and arms the initial-focus delay. Opening
    /// an already open trap changes nothing.
    pub fn open(&mut self, page: &mut impl PageAccess, now: Instant, timers: &SharedTimers) {
        if self.open {
            tracing::trace!(target: "sightline::focus_trap", "already open, ignoring");
            return;
        }
        self.open = true;
        self.restore_to = page.focused_element();
        self.scroll_lock.acquire(page);
        self.pending_focus = Some(timers.start_one_shot(now, self.options.focus_delay()));
        tracing::debug!(
            target: "sightline::focus_trap",
            restore_to = ?self.restore_to,
            "trap opened"
        );
    }

    /// Route a fired timer to the trap.
    ///
    /// Returns `true` when the ID belonged to this trap's pending
    /// initial-focus delay; focus moves to the first focusable element in
    /// the container, or to the container itself when it has none.
    pub fn on_timer(&mut self, id: TimerId, page: &mut impl PageAccess) -> bool {
        if self.pending_focus != Some(id) {
            return false;
        }
        self.pending_focus = None;
        if !self.open {
            return true;
        }

        let target = page
            .focusable_elements(self.container)
            .first()
            .copied()
            .unwrap_or(self.container);
        page.set_focused_element(Some(target));
        tracing::debug!(
            target: "sightline::focus_trap",
            element = ?target,
            "initial focus placed"
        );
        true
    }

    /// Handle a key press while the trap is open.
    ///
    /// - Escape emits [`close_requested`](Self::close_requested) and accepts
    ///   the event.
    /// - Tab and Shift+Tab wrap focus at the container's edges and accept
    ///   the event only when they wrapped; mid-container presses stay
    ///   unaccepted for the host's default focus step.
    /// - With no focusable elements in the container, Tab re-asserts focus
    ///   on the container itself.
    ///
    /// Closed traps ignore everything.
    pub fn handle_key(&mut self, page: &mut impl PageAccess, event: &mut KeyEvent) {
        if !self.open {
            return;
        }

        match event.key {
            Key::Escape => {
                tracing::debug!(target: "sightline::focus_trap", "escape, requesting close");
                self.close_requested.emit(());
                event.base.accept();
            }
            Key::Tab => self.handle_tab(page, event),
            _ => {}
        }
    }

    fn handle_tab(&mut self, page: &mut impl PageAccess, event: &mut KeyEvent) {
        // Fresh query every press; the overlay's contents may have changed.
        let focusables = page.focusable_elements(self.container);
        if focusables.is_empty() {
            page.set_focused_element(Some(self.container));
            event.base.accept();
            return;
        }

        let focused = page.focused_element();
        if event.modifiers.shift {
            if focused == focusables.first().copied() {
                page.set_focused_element(Some(focusables[focusables.len() - 1]));
                event.base.accept();
            }
        } else if focused == focusables.last().copied() {
            page.set_focused_element(Some(focusables[0]));
            event.base.accept();
        }
    }

    /// Deactivate the trap.
    ///
    /// Cancels a still-pending initial-focus delay, gives back the scroll
    /// lock hold, and restores focus to the element captured at open time
    /// if it is still in the document (skipped silently otherwise). Closing
    /// a closed trap changes nothing.
    pub fn close(&mut self, page: &mut impl PageAccess, timers: &SharedTimers) {
        if !self.open {
            tracing::trace!(target: "sightline::focus_trap", "already closed, ignoring");
            return;
        }
        self.open = false;

        if let Some(id) = self.pending_focus.take() {
            let _ = timers.stop(id);
        }
        self.scroll_lock.release(page);

        if let Some(previous) = self.restore_to.take() {
            if page.element_in_document(previous) {
                page.set_focused_element(Some(previous));
                tracing::debug!(
                    target: "sightline::focus_trap",
                    element = ?previous,
                    "focus restored"
                );
            } else {
                tracing::debug!(
                    target: "sightline::focus_trap",
                    element = ?previous,
                    "restore target left the document, skipping"
                );
            }
        }
    }
}
