//! Component trait for pure UI elements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI element that renders from props and reports intent through actions
///
/// Rules:
/// 1. Props carry everything the component reads (visibility, title, callbacks)
/// 2. `handle_event` returns actions and never mutates application state
/// 3. `render` draws from props plus internal UI state (last layout, open session)
///
/// A component may keep UI-only state in `&mut self`, e.g. the rects it drew
/// last frame so that a later mouse press can be hit-tested against them.
///
/// # Example
///
/// ```ignore
/// use tui_modal::{Component, EventKind, Frame, Rect};
///
/// struct TriggerButton;
///
/// struct TriggerProps {
///     label: &'static str,
///     on_press: fn() -> AppAction,
/// }
///
/// impl Component<AppAction> for TriggerButton {
///     type Props<'a> = TriggerProps;
///
///     fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> impl IntoIterator<Item = AppAction> {
///         match event {
///             EventKind::Key(key) if key.code == KeyCode::Enter => Some((props.on_press)()),
///             _ => None,
///         }
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         frame.render_widget(Paragraph::new(props.label), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions to dispatch
    ///
    /// Returns any `IntoIterator<Item = A>`: `None`, `Some(action)`, or a `Vec`.
    /// The default implementation returns no actions.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
