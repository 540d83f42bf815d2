//! Test utilities for tui-modal applications
//!
//! - [`key`], [`char_key`], [`ctrl_key`]: build `KeyEvent`s (`key("esc")`)
//! - [`mouse_down`], [`scroll`]: build pointer events at a cell
//! - [`RenderHarness`]: render into a `TestBackend` and read the result back
//! - [`TestHarness`]: state plus an action channel for handler tests
//! - `assert_emitted!` and friends for checking emitted actions
//!
//! # Example
//!
//! ```ignore
//! use tui_modal::testing::*;
//!
//! let mut render = RenderHarness::new(60, 20);
//! let output = render.render_to_string_plain(|frame| {
//!     modal.render(frame, frame.area(), props);
//! });
//! assert!(output.contains("Confirm"));
//! ```

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use crate::event::EventKind;
use crate::keymap::parse_key_string;
use crate::{Action, ActionCategory};

/// Create a `KeyEvent` from a key string.
///
/// # Examples
///
/// ```
/// use tui_modal_core::testing::key;
/// use crossterm::event::{KeyCode, KeyModifiers};
///
/// assert_eq!(key("esc").code, KeyCode::Esc);
///
/// let k = key("ctrl+c");
/// assert_eq!(k.code, KeyCode::Char('c'));
/// assert!(k.modifiers.contains(KeyModifiers::CONTROL));
/// ```
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Create a `KeyEvent` for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    press(KeyCode::Char(c), KeyModifiers::empty())
}

/// Create a `KeyEvent` for a character with Ctrl modifier.
pub fn ctrl_key(c: char) -> KeyEvent {
    press(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Wrap a key string into an `EventKind::Key`.
pub fn key_event(s: &str) -> EventKind {
    EventKind::Key(key(s))
}

/// Left-button press at a cell.
pub fn mouse_down(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// Left-button press at a cell, as an `EventKind`.
pub fn click(column: u16, row: u16) -> EventKind {
    EventKind::Mouse(mouse_down(column, row))
}

/// Wheel scroll at a cell (positive delta = down).
pub fn scroll(column: u16, row: u16, delta: isize) -> EventKind {
    EventKind::Scroll { column, row, delta }
}

/// Convert a buffer to text, one line per row, trailing spaces trimmed.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    buffer_rect_to_string_plain(buffer, buffer.area)
}

/// Convert part of a buffer to text, one line per row, trailing spaces trimmed.
pub fn buffer_rect_to_string_plain(buffer: &Buffer, area: Rect) -> String {
    let area = area.intersection(buffer.area);
    (area.y..area.bottom())
        .map(|y| {
            let line: String = (area.x..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders into an in-memory terminal for assertions on the output.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with the given terminal size.
    ///
    /// # Panics
    ///
    /// Never in practice; `TestBackend` construction is infallible.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("TestBackend is infallible");
        Self { terminal }
    }

    /// Draw one frame and return the resulting buffer.
    pub fn render<F>(&mut self, draw: F) -> &Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal
            .draw(draw)
            .expect("drawing to TestBackend is infallible");
        self.terminal.backend().buffer()
    }

    /// Draw one frame and return it as plain text.
    pub fn render_to_string_plain<F>(&mut self, draw: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        buffer_to_string_plain(self.render(draw))
    }

    /// Buffer from the last draw.
    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }
}

/// State plus an action channel for exercising handlers.
///
/// # Example
///
/// ```ignore
/// let mut harness = TestHarness::<AppState, Action>::new(AppState::default());
/// harness.emit(Action::ModalOpen);
/// let actions = harness.drain_emitted();
/// assert_emitted!(actions, Action::ModalOpen);
/// ```
pub struct TestHarness<S, A: Action> {
    /// The application state under test
    pub state: S,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    /// Clone of the action sender for passing to handlers.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Emit every action produced by a handler.
    pub fn emit_all(&self, actions: impl IntoIterator<Item = A>) {
        for action in actions {
            self.emit(action);
        }
    }

    /// Drain all emitted actions from the channel.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S, A: ActionCategory> TestHarness<S, A> {
    /// Drain emitted actions of one category; others stay queued.
    pub fn drain_category(&mut self, category: &str) -> Vec<A> {
        let (matching, rest): (Vec<A>, Vec<A>) = self
            .drain_emitted()
            .into_iter()
            .partition(|action| action.category() == Some(category));
        for action in rest {
            let _ = self.tx.send(action);
        }
        matching
    }
}

/// Assert that an action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Count actions matching a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_key_special() {
        assert_eq!(key("esc").code, KeyCode::Esc);
        assert_eq!(key("enter").code, KeyCode::Enter);
        assert_eq!(key("shift+tab").code, KeyCode::BackTab);
    }

    #[test]
    fn test_ctrl_key() {
        let k = ctrl_key('c');
        assert_eq!(k.code, KeyCode::Char('c'));
        assert!(k.modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn test_render_harness_plain_output() {
        let mut render = RenderHarness::new(20, 3);
        let output = render.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("hello\nworld"), frame.area());
        });
        assert_eq!(output, "hello\nworld\n");
    }

    #[test]
    fn test_buffer_rect_clipped_to_buffer() {
        let mut render = RenderHarness::new(10, 2);
        let buffer = render.render(|frame| {
            frame.render_widget(Paragraph::new("abcdef"), frame.area());
        });
        let text = buffer_rect_to_string_plain(buffer, Rect::new(2, 0, 50, 1));
        assert_eq!(text, "cdef");
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        ModalOpen,
        ModalClose,
        Quit,
    }

    impl crate::Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::ModalOpen => "ModalOpen",
                TestAction::ModalClose => "ModalClose",
                TestAction::Quit => "Quit",
            }
        }
    }

    impl crate::ActionCategory for TestAction {
        fn category(&self) -> Option<&'static str> {
            match self {
                TestAction::ModalOpen | TestAction::ModalClose => Some("modal"),
                TestAction::Quit => None,
            }
        }
    }

    #[test]
    fn test_harness_emit_and_drain() {
        let mut harness = TestHarness::<(), TestAction>::new(());

        harness.emit_all([TestAction::ModalOpen, TestAction::Quit]);

        let actions = harness.drain_emitted();
        assert_eq!(actions, vec![TestAction::ModalOpen, TestAction::Quit]);
        assert!(harness.drain_emitted().is_empty());
    }

    #[test]
    fn test_drain_category_keeps_others() {
        let mut harness = TestHarness::<(), TestAction>::new(());
        harness.emit_all([
            TestAction::ModalOpen,
            TestAction::Quit,
            TestAction::ModalClose,
        ]);

        let modal = harness.drain_category("modal");
        assert_eq!(modal, vec![TestAction::ModalOpen, TestAction::ModalClose]);
        assert_eq!(harness.drain_emitted(), vec![TestAction::Quit]);
    }

    #[test]
    fn test_assert_macros() {
        let actions = vec![TestAction::ModalOpen, TestAction::ModalClose];

        assert_emitted!(actions, TestAction::ModalOpen);
        assert_not_emitted!(actions, TestAction::Quit);
        assert_eq!(count_emitted!(actions, TestAction::ModalClose), 1);
    }
}
