//! The page behind the dialog: a heading, the trigger button, and a long
//! scrollable body

use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use tui_modal::{Component, EventKind, ScrollRoot};

pub const TRIGGER_LABEL: &str = " Open dialog ";

pub struct PageProps<'a, A> {
    pub lines: &'a [String],
    /// The document scroll root; its offset picks the first visible line
    pub scroll: &'a ScrollRoot,
    /// Draw the trigger as active (the page has input)
    pub is_focused: bool,
    pub on_open: fn() -> A,
}

impl<A> Clone for PageProps<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for PageProps<'_, A> {}

/// Page view; remembers where it drew the trigger for mouse hit-testing
#[derive(Default)]
pub struct PageView {
    trigger: Option<Rect>,
}

impl PageView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the trigger button was drawn last frame
    pub fn trigger_area(&self) -> Option<Rect> {
        self.trigger
    }
}

impl<A> Component<A> for PageView {
    type Props<'a> = PageProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        let Some((column, row)) = event.left_press() else {
            return None;
        };
        match self.trigger {
            Some(trigger) if trigger.contains(Position::new(column, row)) => {
                Some((props.on_open)())
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [heading_area, trigger_row, _, body_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Line::from(" tui-modal demo".bold())),
            heading_area,
        );

        let trigger_style = if props.is_focused {
            Style::default().fg(Color::White).bg(Color::Blue).bold()
        } else {
            Style::default().fg(Color::Gray).bg(Color::DarkGray)
        };
        let trigger = Rect {
            x: trigger_row.x + 1,
            width: (TRIGGER_LABEL.len() as u16).min(trigger_row.width.saturating_sub(1)),
            ..trigger_row
        };
        frame.render_widget(
            Paragraph::new(Span::styled(TRIGGER_LABEL, trigger_style)),
            trigger,
        );
        self.trigger = Some(trigger);

        let scroll = props.scroll;
        scroll.set_content_len(props.lines.len());
        scroll.set_viewport(body_area.height as usize);

        let visible: Vec<Line> = props
            .lines
            .iter()
            .skip(scroll.offset())
            .take(body_area.height as usize)
            .map(|line| Line::from(format!(" {line}")))
            .collect();
        frame.render_widget(Paragraph::new(visible), body_area);

        if scroll.max_offset() > 0 {
            let mut state = ScrollbarState::new(scroll.max_offset()).position(scroll.offset());
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                body_area,
                &mut state,
            );
        }
    }
}

/// Lines of the background document
pub fn page_lines(count: usize) -> Vec<String> {
    (1..=count)
        .map(|i| format!("{i:>4}  Background content that scrolls while no dialog is open."))
        .collect()
}
