//! The document scroll root and its scroll lock
//!
//! `ScrollRoot` is the page-level scrolling container behind every overlay.
//! Its `Overflow` decides whether scroll input moves the page. Overlays take a
//! [`ScrollLock`] while they are shown; dropping the lock puts the overflow
//! back to its default, so a lock can never outlive its holder.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

/// Scroll capability of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    /// Scroll input moves the document (default)
    #[default]
    Auto,
    /// Scroll input is ignored
    Hidden,
}

#[derive(Debug, Default)]
struct ScrollState {
    overflow: Overflow,
    offset: usize,
    content_len: usize,
    viewport: usize,
}

impl ScrollState {
    fn max_offset(&self) -> usize {
        self.content_len.saturating_sub(self.viewport)
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}

/// Shared handle to the document's scrolling container
///
/// Cloning yields another handle to the same container.
#[derive(Debug, Clone, Default)]
pub struct ScrollRoot {
    state: Rc<RefCell<ScrollState>>,
}

impl ScrollRoot {
    /// Create a scroll root over `content_len` rows
    pub fn new(content_len: usize) -> Self {
        Self {
            state: Rc::new(RefCell::new(ScrollState {
                content_len,
                ..ScrollState::default()
            })),
        }
    }

    pub fn overflow(&self) -> Overflow {
        self.state.borrow().overflow
    }

    /// Whether scrolling is currently suppressed
    pub fn is_locked(&self) -> bool {
        self.overflow() == Overflow::Hidden
    }

    /// First visible row
    pub fn offset(&self) -> usize {
        self.state.borrow().offset
    }

    pub fn content_len(&self) -> usize {
        self.state.borrow().content_len
    }

    /// Visible rows as of the last layout
    pub fn viewport(&self) -> usize {
        self.state.borrow().viewport
    }

    pub fn max_offset(&self) -> usize {
        self.state.borrow().max_offset()
    }

    /// Update the number of content rows, clamping the offset
    pub fn set_content_len(&self, content_len: usize) {
        let mut state = self.state.borrow_mut();
        state.content_len = content_len;
        state.clamp();
    }

    /// Update the number of visible rows, clamping the offset
    ///
    /// Called on every render; allowed while locked since it reflects layout,
    /// not user scrolling.
    pub fn set_viewport(&self, rows: usize) {
        let mut state = self.state.borrow_mut();
        state.viewport = rows;
        state.clamp();
    }

    /// Scroll by `delta` rows (positive = down)
    ///
    /// Returns `true` if the offset moved. Always `false` while locked.
    pub fn scroll_by(&self, delta: isize) -> bool {
        let mut state = self.state.borrow_mut();
        if state.overflow == Overflow::Hidden {
            return false;
        }
        let target = state
            .offset
            .saturating_add_signed(delta)
            .min(state.max_offset());
        if target == state.offset {
            return false;
        }
        state.offset = target;
        true
    }

    /// Jump to an absolute offset. Returns `true` if the offset moved.
    pub fn scroll_to(&self, offset: usize) -> bool {
        let current = self.offset() as isize;
        self.scroll_by(offset as isize - current)
    }

    /// Suppress scrolling until the returned lock is dropped
    #[must_use = "the scroll lock is released as soon as it is dropped"]
    pub fn lock(&self) -> ScrollLock {
        self.state.borrow_mut().overflow = Overflow::Hidden;
        debug!("Document scroll locked");
        ScrollLock { root: self.clone() }
    }

    fn restore(&self) {
        self.state.borrow_mut().overflow = Overflow::default();
        debug!("Document scroll restored");
    }
}

/// Holds the document's overflow at `Hidden`; restores the default on drop
#[derive(Debug)]
pub struct ScrollLock {
    root: ScrollRoot,
}

impl ScrollLock {
    /// Release the lock now
    pub fn release(self) {}
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.root.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_with_viewport(content_len: usize, viewport: usize) -> ScrollRoot {
        let root = ScrollRoot::new(content_len);
        root.set_viewport(viewport);
        root
    }

    #[test]
    fn test_scroll_clamps_to_content() {
        let root = root_with_viewport(30, 10);

        assert!(root.scroll_by(5));
        assert_eq!(root.offset(), 5);

        assert!(root.scroll_by(100));
        assert_eq!(root.offset(), 20);

        assert!(!root.scroll_by(1));
        assert!(root.scroll_by(-100));
        assert_eq!(root.offset(), 0);
    }

    #[test]
    fn test_lock_blocks_scrolling() {
        let root = root_with_viewport(30, 10);
        let lock = root.lock();

        assert!(root.is_locked());
        assert!(!root.scroll_by(3));
        assert_eq!(root.offset(), 0);

        lock.release();
        assert!(!root.is_locked());
        assert!(root.scroll_by(3));
    }

    #[test]
    fn test_lock_released_on_drop() {
        let root = root_with_viewport(30, 10);
        {
            let _lock = root.lock();
            assert_eq!(root.overflow(), Overflow::Hidden);
        }
        assert_eq!(root.overflow(), Overflow::Auto);
    }

    #[test]
    fn test_clones_share_state() {
        let root = root_with_viewport(30, 10);
        let other = root.clone();

        let _lock = other.lock();
        assert!(root.is_locked());
    }

    #[test]
    fn test_viewport_shrink_keeps_offset_valid() {
        let root = root_with_viewport(30, 10);
        root.scroll_to(20);
        root.set_content_len(25);
        assert_eq!(root.offset(), 15);
    }
}
