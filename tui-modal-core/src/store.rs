//! State container: a reducer plus optional middleware around each dispatch

use std::marker::PhantomData;

use crate::Action;

/// Applies an action to the state
///
/// Returns `true` when the state changed, which is what schedules a render.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// Observes every dispatch
///
/// `before` runs ahead of the reducer, `after` once it returns.
pub trait Middleware<A: Action> {
    fn before(&mut self, _action: &A) {}

    fn after(&mut self, action: &A, changed: bool);
}

/// Middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn after(&mut self, _action: &A, _changed: bool) {}
}

/// Logs dispatched actions at `debug`
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn after(&mut self, action: &A, changed: bool) {
        tracing::debug!(action = action.name(), changed, "Dispatched");
    }
}

/// Owns the application state; every change goes through [`Store::dispatch`]
///
/// ```ignore
/// fn reducer(state: &mut AppState, action: AppAction) -> bool {
///     let open = matches!(action, AppAction::ModalOpen);
///     std::mem::replace(&mut state.modal_open, open) != open
/// }
///
/// let mut store = Store::new(AppState::default(), reducer)
///     .with_middleware(LoggingMiddleware::new());
/// assert!(store.dispatch(AppAction::ModalOpen));
/// assert!(!store.dispatch(AppAction::ModalOpen));
/// ```
pub struct Store<S, A: Action, M = NoopMiddleware> {
    state: S,
    reducer: Reducer<S, A>,
    middleware: M,
    _action: PhantomData<A>,
}

impl<S, A: Action> Store<S, A> {
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self {
            state,
            reducer,
            middleware: NoopMiddleware,
            _action: PhantomData,
        }
    }
}

impl<S, A: Action, M: Middleware<A>> Store<S, A, M> {
    /// Replace the middleware
    pub fn with_middleware<N: Middleware<A>>(self, middleware: N) -> Store<S, A, N> {
        Store {
            state: self.state,
            reducer: self.reducer,
            middleware,
            _action: PhantomData,
        }
    }

    /// Run `action` through the middleware and the reducer
    pub fn dispatch(&mut self, action: A) -> bool {
        self.middleware.before(&action);
        let changed = (self.reducer)(&mut self.state, action.clone());
        self.middleware.after(&action, changed);
        changed
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Bypasses the reducer and the middleware
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}
