//! Tests for overlay focus containment and shared scroll locking.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use sightline::SharedTimers;
use sightline::events::{Key, KeyEvent, KeyboardModifiers};
use sightline::focus_trap::{FocusTrap, TrapOptions};
use sightline::geometry::Size;
use sightline::page::{MemoryPage, PageAccess};
use sightline::scroll_lock::ScrollLock;

#[test]
fn test_modal_session_cycles_and_restores() {
    let mut page = MemoryPage::new(Size::new(1280.0, 720.0));
    let trigger = page.add_element(true);
    let modal = page.add_element(false);
    let name_field = page.add_element_in(modal, true);
    let email_field = page.add_element_in(modal, true);
    let send_button = page.add_element_in(modal, true);
    page.set_focused_element(Some(trigger));

    let timers = SharedTimers::new();
    let mut trap = FocusTrap::new(modal, ScrollLock::new(), TrapOptions::default());

    let t0 = Instant::now();
    trap.open(&mut page, t0, &timers);
    assert!(page.is_scroll_locked());

    for id in timers.process_expired(t0 + Duration::from_millis(100)) {
        trap.on_timer(id, &mut page);
    }
    assert_eq!(page.focused_element(), Some(name_field));

    // Tab forward through the fields. The trap stays out of the way until
    // the last one, where it wraps instead of letting focus escape.
    let mut tab = KeyEvent::new(Key::Tab);
    trap.handle_key(&mut page, &mut tab);
    assert!(!tab.base.is_accepted());
    page.advance_focus(true);
    assert_eq!(page.focused_element(), Some(email_field));

    page.advance_focus(true);
    assert_eq!(page.focused_element(), Some(send_button));

    let mut tab = KeyEvent::new(Key::Tab);
    trap.handle_key(&mut page, &mut tab);
    assert!(tab.base.is_accepted());
    assert_eq!(page.focused_element(), Some(name_field));

    // And backwards off the first field.
    let mut back = KeyEvent::with_modifiers(Key::Tab, KeyboardModifiers::SHIFT);
    trap.handle_key(&mut page, &mut back);
    assert!(back.base.is_accepted());
    assert_eq!(page.focused_element(), Some(send_button));

    trap.close(&mut page, &timers);
    assert!(!page.is_scroll_locked());
    assert_eq!(page.focused_element(), Some(trigger));
    assert_eq!(timers.active_count(), 0);
}

#[test]
fn test_escape_requests_close_and_host_decides() {
    let mut page = MemoryPage::new(Size::new(1280.0, 720.0));
    let modal = page.add_element(false);
    page.add_element_in(modal, true);

    let timers = SharedTimers::new();
    let mut trap = FocusTrap::new(modal, ScrollLock::new(), TrapOptions::default());
    let t0 = Instant::now();
    trap.open(&mut page, t0, &timers);

    let requested = Arc::new(Mutex::new(false));
    let sink = requested.clone();
    trap.close_requested.connect(move |_| {
        *sink.lock() = true;
    });

    let mut escape = KeyEvent::new(Key::Escape);
    trap.handle_key(&mut page, &mut escape);
    assert!(escape.base.is_accepted());
    assert!(*requested.lock());
    assert!(trap.is_open());

    // The host answers the request.
    trap.close(&mut page, &timers);
    assert!(!trap.is_open());
    assert!(!page.is_scroll_locked());
}

#[test]
fn test_stacked_overlays_share_one_lock() {
    let mut page = MemoryPage::new(Size::new(1280.0, 720.0));
    let trigger = page.add_element(true);
    let modal = page.add_element(false);
    let modal_item = page.add_element_in(modal, true);
    let viewer = page.add_element(false);
    let viewer_item = page.add_element_in(viewer, true);
    page.set_focused_element(Some(trigger));

    let lock = ScrollLock::new();
    let timers = SharedTimers::new();
    let mut modal_trap = FocusTrap::new(modal, lock.clone(), TrapOptions::default());
    let mut viewer_trap = FocusTrap::new(viewer, lock.clone(), TrapOptions::default());

    let t0 = Instant::now();
    modal_trap.open(&mut page, t0, &timers);
    for id in timers.process_expired(t0 + Duration::from_millis(100)) {
        if !modal_trap.on_timer(id, &mut page) {
            viewer_trap.on_timer(id, &mut page);
        }
    }
    assert_eq!(page.focused_element(), Some(modal_item));

    // A certificate viewer opens on top of the modal.
    let t1 = t0 + Duration::from_millis(500);
    viewer_trap.open(&mut page, t1, &timers);
    assert_eq!(lock.depth(), 2);
    for id in timers.process_expired(t1 + Duration::from_millis(100)) {
        if !modal_trap.on_timer(id, &mut page) {
            viewer_trap.on_timer(id, &mut page);
        }
    }
    assert_eq!(page.focused_element(), Some(viewer_item));

    // Closing the top overlay hands focus back to the modal and keeps the
    // page locked for it.
    viewer_trap.close(&mut page, &timers);
    assert!(page.is_scroll_locked());
    assert_eq!(lock.depth(), 1);
    assert_eq!(page.focused_element(), Some(modal_item));

    modal_trap.close(&mut page, &timers);
    assert!(!page.is_scroll_locked());
    assert_eq!(page.focused_element(), Some(trigger));
    assert_eq!(timers.active_count(), 0);
}

#[test]
fn test_overlay_closed_before_its_delay_never_steals_focus() {
    let mut page = MemoryPage::new(Size::new(1280.0, 720.0));
    let trigger = page.add_element(true);
    let modal = page.add_element(false);
    page.add_element_in(modal, true);
    page.set_focused_element(Some(trigger));

    let timers = SharedTimers::new();
    let mut trap = FocusTrap::new(modal, ScrollLock::new(), TrapOptions::default());

    // Open and immediately close, as a double-click on the trigger would.
    let t0 = Instant::now();
    trap.open(&mut page, t0, &timers);
    trap.close(&mut page, &timers);

    assert_eq!(timers.active_count(), 0);
    for id in timers.process_expired(t0 + Duration::from_millis(200)) {
        trap.on_timer(id, &mut page);
    }
    assert_eq!(page.focused_element(), Some(trigger));
    assert!(!page.is_scroll_locked());
}
