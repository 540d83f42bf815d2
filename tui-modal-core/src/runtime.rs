//! The event loop: terminal input in, actions through the store, frames out
//!
//! Key presses are offered to the [`Document`]'s listeners before the
//! application's own mapping, the way window-level listeners see a key before
//! page handlers do.

use std::io;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::document::Document;
use crate::event::EventKind;
use crate::input::{spawn_event_poller, PollerConfig};
use crate::store::{Middleware, NoopMiddleware, Reducer, Store};
use crate::Action;

/// What handling one event produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    pub actions: Vec<A>,
    /// Redraw even if no action changes the state
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    pub fn ignored() -> Self {
        Self::from_actions(None)
    }

    /// Redraw without dispatching anything (e.g. the page scrolled)
    pub fn needs_render() -> Self {
        Self::ignored().with_render()
    }

    pub fn action(action: A) -> Self {
        Self::from_actions(Some(action))
    }

    /// Collect a `Component::handle_event` result
    pub fn from_actions(actions: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            needs_render: false,
        }
    }

    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }

    /// Append `other`'s actions after this outcome's
    pub fn merge(mut self, other: EventOutcome<A>) -> Self {
        self.actions.extend(other.actions);
        self.needs_render |= other.needs_render;
        self
    }

    pub fn is_ignored(&self) -> bool {
        self.actions.is_empty() && !self.needs_render
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<Option<A>> for EventOutcome<A> {
    fn from(action: Option<A>) -> Self {
        Self::from_actions(action)
    }
}

/// Owns the store, the document and the action queue
pub struct DispatchRuntime<S, A: Action, M = NoopMiddleware> {
    store: Store<S, A, M>,
    document: Document<A>,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    poller: PollerConfig,
    dirty: bool,
}

impl<S, A: Action> DispatchRuntime<S, A> {
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self::from_store(Store::new(state, reducer))
    }
}

impl<S, A: Action, M: Middleware<A>> DispatchRuntime<S, A, M> {
    pub fn from_store(store: Store<S, A, M>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store,
            document: Document::default(),
            action_tx,
            action_rx,
            poller: PollerConfig::default(),
            dirty: true,
        }
    }

    /// Share `document` with the views that borrow from it
    pub fn with_document(mut self, document: Document<A>) -> Self {
        self.document = document;
        self
    }

    pub fn with_event_poller(mut self, config: PollerConfig) -> Self {
        self.poller = config;
        self
    }

    /// Queue an action for the next loop iteration
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    pub fn action_tx(&self) -> mpsc::UnboundedSender<A> {
        self.action_tx.clone()
    }

    pub fn state(&self) -> &S {
        self.store.state()
    }

    pub fn document(&self) -> &Document<A> {
        &self.document
    }

    /// Key listeners first, then the application's `map_event`
    pub fn route_event<R>(
        &self,
        event: &EventKind,
        map_event: impl FnOnce(&EventKind, &S, &Document<A>) -> R,
    ) -> EventOutcome<A>
    where
        R: Into<EventOutcome<A>>,
    {
        let listened = match event.key_press() {
            Some(key) => EventOutcome::from_actions(self.document.keys().dispatch(key)),
            None => EventOutcome::ignored(),
        };
        listened.merge(map_event(event, self.store.state(), &self.document).into())
    }

    /// Apply one action now; a change schedules a render
    pub fn dispatch(&mut self, action: A) -> bool {
        let changed = self.store.dispatch(action);
        self.dirty |= changed;
        changed
    }

    /// Run until `should_quit` accepts an action or input ends
    pub async fn run<B, FRender, FEvent, FQuit, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S, &Document<A>),
        FEvent: FnMut(&EventKind, &S, &Document<A>) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let _poller = spawn_event_poller(event_tx, self.poller, cancel.clone());

        loop {
            if std::mem::take(&mut self.dirty) {
                let state = self.store.state();
                let document = &self.document;
                terminal.draw(|frame| {
                    let area = frame.area();
                    render(frame, area, state, document);
                })?;
            }

            tokio::select! {
                Some(event) = event_rx.recv() => {
                    let outcome = self.route_event(&event, &mut map_event);
                    self.dirty |= outcome.needs_render;
                    for action in outcome.actions {
                        self.enqueue(action);
                    }
                }
                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        break;
                    }
                    self.dispatch(action);
                }
                else => break,
            }
        }

        cancel.cancel();
        Ok(())
    }
}
