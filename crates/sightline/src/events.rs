//! Event types consumed by the coordination controllers.
//!
//! Hosts translate their platform's raw input into these small types and
//! feed them to controllers. A controller that handles an event calls
//! [`EventBase::accept`]; the host runs its own default behavior only for
//! events left unaccepted. That split is what lets the focus trap intervene
//! exactly at the wrap edges while ordinary Tab presses keep their native
//! behavior.

use crate::geometry::Rect;

/// Common base data shared by all events.
#[derive(Debug, Clone, Copy)]
pub struct EventBase {
    /// Whether the event has been accepted (handled).
    accepted: bool,
}

impl Default for EventBase {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, suppressing the host's default behavior.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, allowing the host's default behavior.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }
}

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// The keys the coordination layer discriminates.
///
/// Everything else arrives as [`Key::Unknown`] with the host's own key code
/// and passes through controllers untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// The Tab key.
    Tab,
    /// The Escape key.
    Escape,
    /// The Enter/Return key.
    Enter,
    /// The Space bar.
    Space,
    /// Any other key, carrying the host's key code.
    Unknown(u16),
}

/// A key press delivered to controllers.
#[derive(Debug, Clone, Copy)]
pub struct KeyEvent {
    /// Base event data.
    pub base: EventBase,
    /// The pressed key.
    pub key: Key,
    /// Modifiers held during the press.
    pub modifiers: KeyboardModifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    pub fn new(key: Key) -> Self {
        Self::with_modifiers(key, KeyboardModifiers::NONE)
    }

    /// Create a new key event with the given modifiers.
    pub fn with_modifiers(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
        }
    }
}

/// One region's visibility at the time of a check.
///
/// Entries are ephemeral: the observer produces a batch when ratios cross
/// configured thresholds, the tracker consumes it immediately, and nothing
/// retains them.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityEntry {
    /// The watched region's name.
    pub region: String,
    /// Whether any part of the region overlaps the (margin-adjusted) viewport.
    pub is_intersecting: bool,
    /// Visible fraction of the region's area, in `0.0..=1.0`.
    pub ratio: f32,
    /// The region's bounds in document coordinates.
    pub bounds: Rect,
}

/// Pointer and focus crossings on the carousel track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackEvent {
    /// The pointer entered the track.
    PointerEnter,
    /// The pointer left the track.
    PointerLeave,
    /// Keyboard focus entered the track.
    FocusEnter,
    /// Keyboard focus left the track.
    FocusLeave,
}
