//! Sightline Portfolio Walkthrough
//!
//! Drives every controller through one scripted session against an
//! in-memory page:
//! - section tracking over a scroll script
//! - a contact overlay with focus containment and scroll locking
//! - carousel autoplay with a hover pause
//! - a header-compensated navigation jump
//!
//! Run with: cargo run -p sightline --example portfolio

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use sightline::SharedTimers;
use sightline::autoplay::{AutoplayOptions, CarouselAutoplay, MemoryTrack, TrackSurface};
use sightline::events::{Key, KeyEvent, TrackEvent};
use sightline::focus_trap::{FocusTrap, TrapOptions};
use sightline::geometry::{Rect, Size};
use sightline::page::{MemoryPage, PageAccess, ScrollBehavior};
use sightline::scroll::ScrollCoordinator;
use sightline::scroll_lock::ScrollLock;
use sightline::tracker::{SectionTracker, TrackerOptions};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut page = MemoryPage::new(Size::new(1280.0, 720.0));
    page.set_content_height(4000.0);
    page.add_region("hero", Rect::new(0.0, 0.0, 1280.0, 800.0));
    page.add_region("about", Rect::new(0.0, 800.0, 1280.0, 800.0));
    page.add_region("projects", Rect::new(0.0, 1600.0, 1280.0, 1000.0));
    page.add_region("contact", Rect::new(0.0, 2600.0, 1280.0, 800.0));

    let contact_button = page.add_element(true);
    let modal = page.add_element(false);
    let name_field = page.add_element_in(modal, true);
    let _email_field = page.add_element_in(modal, true);
    let _send_button = page.add_element_in(modal, true);
    page.set_focused_element(Some(contact_button));

    let timers = SharedTimers::new();
    let t0 = Instant::now();

    // --- Section tracking over a scroll script ---------------------------

    let mut tracker = SectionTracker::new(
        &page,
        &["hero", "about", "projects", "contact"],
        TrackerOptions::default(),
    );
    tracker.active_changed.connect(|section: &Option<String>| {
        println!("  active section -> {:?}", section.as_deref());
    });

    println!("scrolling through the page:");
    tracker.poll(&page);
    for offset in [1000.0, 1900.0, 2900.0] {
        page.scroll_to(offset, ScrollBehavior::Auto);
        tracker.handle_scroll(&page);
        tracker.poll(&page);
    }

    // --- Navigation jump under a fixed header ----------------------------

    let nav = ScrollCoordinator::new();
    nav.scroll_to_region(&mut page, "about");
    println!(
        "nav jump to 'about' landed at {:?}",
        page.last_scroll_request()
    );
    tracker.handle_scroll(&page);
    tracker.poll(&page);

    // --- Contact overlay session -----------------------------------------

    println!("opening the contact overlay:");
    let mut trap = FocusTrap::new(modal, ScrollLock::new(), TrapOptions::default());
    let close_requested = Arc::new(Mutex::new(false));
    let sink = close_requested.clone();
    trap.close_requested.connect(move |_| {
        *sink.lock() = true;
    });

    trap.open(&mut page, t0, &timers);
    println!("  page locked: {}", page.is_scroll_locked());
    for id in timers.process_expired(t0 + Duration::from_millis(100)) {
        trap.on_timer(id, &mut page);
    }
    println!(
        "  initial focus on first field: {}",
        page.focused_element() == Some(name_field)
    );

    let mut escape = KeyEvent::new(Key::Escape);
    trap.handle_key(&mut page, &mut escape);
    if *close_requested.lock() {
        trap.close(&mut page, &timers);
    }
    println!(
        "  closed; focus restored to trigger: {}, page locked: {}",
        page.focused_element() == Some(contact_button),
        page.is_scroll_locked()
    );

    // --- Carousel autoplay ------------------------------------------------

    println!("running the project carousel:");
    let mut track = MemoryTrack::new(2000.0, 800.0, 400.0);
    let mut autoplay = CarouselAutoplay::new(&page, 5, AutoplayOptions::default());
    autoplay.advanced.connect(|offset| {
        println!("  carousel advanced to {offset}");
    });

    autoplay.start(t0, &timers);
    let mut now = t0;
    for step in 0..5 {
        now += Duration::from_secs(3);
        for id in timers.process_expired(now) {
            autoplay.on_timer(id, &mut track, now, &timers);
        }
        if step == 2 {
            // A pointer wanders over the track and leaves again.
            autoplay.handle_event(TrackEvent::PointerEnter, now, &timers);
            autoplay.handle_event(TrackEvent::PointerLeave, now, &timers);
        }
    }
    println!("  final offset: {}", track.offset());

    autoplay.dispose(&timers);
    tracker.dispose();
    println!("done; live timers: {}", timers.active_count());
}
