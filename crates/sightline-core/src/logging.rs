//! Logging facilities for Sightline.
//!
//! Sightline instruments its controllers with the `tracing` crate. Hosts that
//! want log output install a subscriber themselves:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Host code driving Sightline controllers...
//! }
//! ```
//!
//! The constants below match the `target:` values used at Sightline call
//! sites, so a host can raise or silence individual subsystems with an
//! `EnvFilter` directive such as `sightline::tracker=debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core services target.
    pub const CORE: &str = "sightline_core";
    /// Timer service target.
    pub const TIMER: &str = "sightline_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "sightline_core::signal";
    /// Page model target.
    pub const PAGE: &str = "sightline::page";
    /// Section tracking target.
    pub const TRACKER: &str = "sightline::tracker";
    /// Visibility observation target.
    pub const VIEWPORT: &str = "sightline::viewport";
    /// Programmatic scrolling target.
    pub const SCROLL: &str = "sightline::scroll";
    /// Scroll suppression target.
    pub const SCROLL_LOCK: &str = "sightline::scroll_lock";
    /// Overlay focus management target.
    pub const FOCUS_TRAP: &str = "sightline::focus_trap";
    /// Carousel autoplay target.
    pub const AUTOPLAY: &str = "sightline::autoplay";
    /// Contact contract target.
    pub const CONTACT: &str = "sightline::contact";
}
