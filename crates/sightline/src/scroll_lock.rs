//! Reference-counted scroll suppression.
//!
//! Overlays suppress page scrolling while open. With a bare boolean, two
//! overlapping overlays fight: whichever closes first re-enables scrolling
//! under the one still open. [`ScrollLock`] counts acquisitions instead and
//! touches the page only on the zero boundary, so suppression lasts exactly
//! as long as at least one holder remains.
//!
//! The lock is a cloneable handle. Everything that suppresses scrolling on
//! the same page should share clones of one lock; separate locks would each
//! believe they own the page flag.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::page::PageAccess;

/// A shared, reference-counted scroll suppressor.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    count: Arc<Mutex<u32>>,
}

impl ScrollLock {
    /// Create an unheld lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take one hold on the lock.
    ///
    /// The page's scroll suppression is applied on the transition from zero
    /// to one hold; deeper acquisitions only increment the count.
    pub fn acquire(&self, page: &mut impl PageAccess) {
        let mut count = self.count.lock();
        *count += 1;
        if *count == 1 {
            page.set_scroll_locked(true);
            tracing::debug!(target: "sightline::scroll_lock", "scroll locked");
        } else {
            tracing::trace!(
                target: "sightline::scroll_lock",
                depth = *count,
                "scroll lock deepened"
            );
        }
    }

    /// Give back one hold on the lock.
    ///
    /// The page's scroll suppression is cleared on the transition from one
    /// hold to zero. Releasing an unheld lock is a logged no-op rather than
    /// an underflow.
    pub fn release(&self, page: &mut impl PageAccess) {
        let mut count = self.count.lock();
        if *count == 0 {
            tracing::warn!(
                target: "sightline::scroll_lock",
                "release without matching acquire, ignoring"
            );
            return;
        }
        *count -= 1;
        if *count == 0 {
            page.set_scroll_locked(false);
            tracing::debug!(target: "sightline::scroll_lock", "scroll unlocked");
        }
    }

    /// The number of outstanding holds.
    pub fn depth(&self) -> usize {
        *self.count.lock() as usize
    }

    /// Whether at least one hold is outstanding.
    pub fn is_locked(&self) -> bool {
        *self.count.lock() > 0
    }
}

// Ensure ScrollLock is Send + Sync
static_assertions::assert_impl_all!(ScrollLock: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::page::MemoryPage;

    fn page() -> MemoryPage {
        MemoryPage::new(Size::new(1000.0, 600.0))
    }

    #[test]
    fn test_lock_applies_on_first_acquire_only() {
        let mut page = page();
        let lock = ScrollLock::new();

        lock.acquire(&mut page);
        assert!(page.is_scroll_locked());
        assert_eq!(lock.depth(), 1);

        lock.acquire(&mut page);
        assert!(page.is_scroll_locked());
        assert_eq!(lock.depth(), 2);
    }

    #[test]
    fn test_unlock_waits_for_last_release() {
        let mut page = page();
        let lock = ScrollLock::new();

        lock.acquire(&mut page);
        lock.acquire(&mut page);

        lock.release(&mut page);
        assert!(page.is_scroll_locked());
        assert!(lock.is_locked());

        lock.release(&mut page);
        assert!(!page.is_scroll_locked());
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_release_without_acquire_saturates() {
        let mut page = page();
        let lock = ScrollLock::new();

        lock.release(&mut page);
        assert_eq!(lock.depth(), 0);
        assert!(!page.is_scroll_locked());

        // A later acquire still behaves as the first.
        lock.acquire(&mut page);
        assert!(page.is_scroll_locked());
        assert_eq!(lock.depth(), 1);
    }

    #[test]
    fn test_cloned_handles_share_the_count() {
        let mut page = page();
        let lock = ScrollLock::new();
        let other = lock.clone();

        lock.acquire(&mut page);
        other.acquire(&mut page);
        assert_eq!(lock.depth(), 2);

        lock.release(&mut page);
        other.release(&mut page);
        assert!(!page.is_scroll_locked());
        assert_eq!(other.depth(), 0);
    }
}
