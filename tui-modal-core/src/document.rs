//! The host page environment shared by overlays

use crate::listeners::KeyListeners;
use crate::scroll::ScrollRoot;

/// Page-level resources: the scroll root and the global key listeners
///
/// Cheap to clone; every clone refers to the same page. Owned by the runtime
/// and handed to components that need to acquire page-level resources.
pub struct Document<A> {
    scroll: ScrollRoot,
    keys: KeyListeners<A>,
}

impl<A> Clone for Document<A> {
    fn clone(&self) -> Self {
        Self {
            scroll: self.scroll.clone(),
            keys: self.keys.clone(),
        }
    }
}

impl<A> Default for Document<A> {
    fn default() -> Self {
        Self {
            scroll: ScrollRoot::default(),
            keys: KeyListeners::default(),
        }
    }
}

impl<A> std::fmt::Debug for Document<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("scroll", &self.scroll)
            .field("keys", &self.keys)
            .finish()
    }
}

impl<A> Document<A> {
    /// Create a document whose body is `content_len` rows tall
    pub fn new(content_len: usize) -> Self {
        Self {
            scroll: ScrollRoot::new(content_len),
            keys: KeyListeners::default(),
        }
    }

    pub fn scroll(&self) -> &ScrollRoot {
        &self.scroll
    }

    pub fn keys(&self) -> &KeyListeners<A> {
        &self.keys
    }
}
