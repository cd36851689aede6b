//! Core services for Sightline.
//!
//! This crate provides the foundational components of the Sightline
//! interaction-coordination library:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Timers**: One-shot and repeating timers pumped with explicit instants
//! - **Logging**: `tracing` target constants for per-subsystem filtering
//!
//! Sightline controllers are passive: the host owns the loop, feeds events
//! and instants in, and reacts to signals coming back out. This crate holds
//! the pieces of that contract that are independent of any page model.
//!
//! # Signal/Slot Example
//!
//! ```
//! use sightline_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use sightline_core::SharedTimers;
//! use std::time::{Duration, Instant};
//!
//! let timers = SharedTimers::new();
//! let now = Instant::now();
//!
//! let id = timers.start_one_shot(now, Duration::from_millis(100));
//!
//! // The host pumps expiry from its own loop and routes fired IDs.
//! for fired in timers.process_expired(now + Duration::from_millis(100)) {
//!     assert_eq!(fired, id);
//! }
//! ```

mod error;
pub mod logging;
pub mod signal;
pub mod timer;

pub use error::{CoreError, Result, TimerError};
pub use signal::{ConnectionId, Signal};
pub use timer::{SharedTimers, TimerId, TimerKind, Timers};
