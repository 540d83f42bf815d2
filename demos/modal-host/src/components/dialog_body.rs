//! Dialog content: a message and a Close button

use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};
use tui_modal_components::ModalContent;

pub const CLOSE_LABEL: &str = " Close ";

/// Message plus a Close button on the last row
#[derive(Debug, Clone)]
pub struct DialogBody {
    message: Text<'static>,
    hovered: bool,
}

impl DialogBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Text::styled(message.into(), Style::default().fg(Color::Gray)),
            hovered: false,
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Set the pointer-over state; returns `true` if it changed
    pub fn set_hovered(&mut self, hovered: bool) -> bool {
        let changed = self.hovered != hovered;
        self.hovered = hovered;
        changed
    }

    /// Rect of the Close button inside the content `area`
    pub fn close_button(area: Rect) -> Option<Rect> {
        if area.height == 0 || area.width == 0 {
            return None;
        }
        Some(Rect {
            y: area.bottom() - 1,
            height: 1,
            width: (CLOSE_LABEL.len() as u16).min(area.width),
            ..area
        })
    }

    /// Whether (`column`, `row`) is on the Close button of content `area`
    pub fn close_button_hit(area: Rect, column: u16, row: u16) -> bool {
        Self::close_button(area).is_some_and(|button| button.contains(Position::new(column, row)))
    }
}

impl ModalContent for DialogBody {
    fn height(&self, width: u16) -> u16 {
        // message, blank row, button row
        ModalContent::height(&self.message, width).saturating_add(2)
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        let Some(button) = Self::close_button(area) else {
            return;
        };
        let message_area = Rect {
            height: area.height.saturating_sub(2),
            ..area
        };
        self.message.render_content(frame, message_area);

        // The button is the dialog's only control and always has focus
        let mut style = Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD);
        if self.hovered {
            style = style.bg(Color::LightRed).add_modifier(Modifier::UNDERLINED);
        }
        frame.render_widget(Line::from(Span::styled(CLOSE_LABEL, style)), button);
    }
}
