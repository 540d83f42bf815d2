//! Event types delivered to components and key listeners

use crossterm::event::{KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

/// Coarse event classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Keyboard events
    Key,
    /// Mouse press/release/drag events
    Mouse,
    /// Scroll wheel events
    Scroll,
    /// Terminal resize events
    Resize,
}

/// The event payload
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse event (wheel events are split out into `Scroll`)
    Mouse(MouseEvent),
    /// Scroll event with position and delta (positive = down)
    Scroll { column: u16, row: u16, delta: isize },
    /// Terminal resize
    Resize(u16, u16),
}

impl EventKind {
    /// Get the event type for this event kind
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::Key(_) => EventType::Key,
            EventKind::Mouse(_) => EventType::Mouse,
            EventKind::Scroll { .. } => EventType::Scroll,
            EventKind::Resize(_, _) => EventType::Resize,
        }
    }

    /// The key event, if this is a key press (releases and repeats are skipped)
    pub fn key_press(&self) -> Option<&KeyEvent> {
        match self {
            EventKind::Key(key) if key.kind == KeyEventKind::Press => Some(key),
            _ => None,
        }
    }

    /// Position of a left-button press
    pub fn left_press(&self) -> Option<(u16, u16)> {
        match self {
            EventKind::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some((*column, *row)),
            _ => None,
        }
    }
}
