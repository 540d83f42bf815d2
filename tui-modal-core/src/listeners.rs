//! Global key listeners
//!
//! The runtime offers every key press to the registered listeners before the
//! application maps it, much like window-level keyboard listeners. A listener
//! stays registered exactly as long as its [`ListenerHandle`] is alive.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crossterm::event::KeyEvent;
use tracing::debug;

/// Identifies a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Maps a key press to an optional action
pub type KeyHandler<A> = Box<dyn Fn(&KeyEvent) -> Option<A>>;

struct Registry<A> {
    next_id: u64,
    handlers: Vec<(ListenerId, KeyHandler<A>)>,
}

impl<A> Registry<A> {
    fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(existing, _)| *existing != id);
        before != self.handlers.len()
    }
}

/// Registry of global key listeners
///
/// Cloning yields another handle to the same registry. Handlers must not
/// register or remove listeners while they run; they only map a key to an
/// optional action.
pub struct KeyListeners<A> {
    registry: Rc<RefCell<Registry<A>>>,
}

impl<A> Clone for KeyListeners<A> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<A> Default for KeyListeners<A> {
    fn default() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }
}

impl<A> fmt::Debug for KeyListeners<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyListeners")
            .field("listeners", &self.len())
            .finish()
    }
}

impl<A: 'static> KeyListeners<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; it stays attached until the handle is dropped
    #[must_use = "the listener is removed as soon as the handle is dropped"]
    pub fn listen<F>(&self, handler: F) -> ListenerHandle<A>
    where
        F: Fn(&KeyEvent) -> Option<A> + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.handlers.push((id, Box::new(handler)));
        debug!(listener = id.0, total = registry.handlers.len(), "Key listener attached");

        ListenerHandle {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Offer a key to every listener, in registration order
    pub fn dispatch(&self, key: &KeyEvent) -> Vec<A> {
        self.registry
            .borrow()
            .handlers
            .iter()
            .filter_map(|(_, handler)| handler(key))
            .collect()
    }

    /// Whether a listener is still registered
    pub fn contains(&self, id: ListenerId) -> bool {
        self.registry
            .borrow()
            .handlers
            .iter()
            .any(|(existing, _)| *existing == id)
    }
}

impl<A> KeyListeners<A> {
    pub fn len(&self) -> usize {
        self.registry.borrow().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keeps a listener registered; detaches it on drop
pub struct ListenerHandle<A> {
    id: ListenerId,
    registry: Weak<RefCell<Registry<A>>>,
}

impl<A> ListenerHandle<A> {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Detach the listener now
    pub fn detach(self) {}
}

impl<A> fmt::Debug for ListenerHandle<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerHandle").field("id", &self.id).finish()
    }
}

impl<A> Drop for ListenerHandle<A> {
    fn drop(&mut self) {
        // Registry already gone: nothing left to detach from.
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.borrow_mut();
        if registry.remove(self.id) {
            debug!(
                listener = self.id.0,
                total = registry.handlers.len(),
                "Key listener detached"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{char_key, key};
    use crossterm::event::KeyCode;

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Close,
        Other(char),
    }

    fn escape_listener(listeners: &KeyListeners<TestAction>) -> ListenerHandle<TestAction> {
        listeners.listen(|key| (key.code == KeyCode::Esc).then_some(TestAction::Close))
    }

    #[test]
    fn test_listen_and_dispatch() {
        let listeners = KeyListeners::new();
        let _handle = escape_listener(&listeners);

        assert_eq!(listeners.dispatch(&key("esc")), vec![TestAction::Close]);
        assert!(listeners.dispatch(&char_key('a')).is_empty());
    }

    #[test]
    fn test_drop_detaches() {
        let listeners = KeyListeners::new();
        let handle = escape_listener(&listeners);
        let id = handle.id();
        assert!(listeners.contains(id));

        drop(handle);

        assert!(!listeners.contains(id));
        assert!(listeners.is_empty());
        assert!(listeners.dispatch(&key("esc")).is_empty());
    }

    #[test]
    fn test_detach_only_removes_own_listener() {
        let listeners = KeyListeners::new();
        let escape = escape_listener(&listeners);
        let _chars = listeners.listen(|key| match key.code {
            KeyCode::Char(c) => Some(TestAction::Other(c)),
            _ => None,
        });

        escape.detach();

        assert_eq!(listeners.len(), 1);
        assert_eq!(
            listeners.dispatch(&char_key('z')),
            vec![TestAction::Other('z')]
        );
    }

    #[test]
    fn test_handle_outliving_registry() {
        let listeners = KeyListeners::new();
        let handle = escape_listener(&listeners);
        drop(listeners);
        drop(handle);
    }

    #[test]
    fn test_ids_are_unique() {
        let listeners = KeyListeners::<TestAction>::new();
        let a = escape_listener(&listeners);
        let b = escape_listener(&listeners);
        assert_ne!(a.id(), b.id());
    }
}
