use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_modal::{format_key_for_display, Keymap};

use super::Component;
use crate::action::Action;
use crate::config::KeyContext;

pub struct HelpBar;

pub struct HelpBarProps<'a> {
    pub keymap: &'a Keymap<KeyContext>,
    pub context: KeyContext,
}

impl HelpBar {
    /// (key, label) pairs shown for a context
    pub fn entries(
        keymap: &Keymap<KeyContext>,
        context: KeyContext,
    ) -> Vec<(String, &'static str)> {
        let commands: &[(&str, &'static str)] = match context {
            KeyContext::Page => &[
                ("open", "open dialog"),
                ("scroll_down", "scroll"),
                ("quit", "quit"),
            ],
            KeyContext::Dialog => &[("close", "close"), ("force_quit", "quit")],
        };

        let mut entries = Vec::new();
        if context == KeyContext::Dialog {
            entries.push(("Esc".to_string(), "close"));
        }
        entries.extend(commands.iter().filter_map(|(command, label)| {
            keymap
                .first_key(command, context)
                .map(|key| (format_key_for_display(key), *label))
        }));
        entries
    }
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let mut spans = Vec::new();
        for (key, label) in Self::entries(props.keymap, props.context) {
            spans.push(Span::styled(
                format!(" {key}"),
                Style::default().fg(Color::Cyan).bold(),
            ));
            spans.push(Span::styled(
                format!(" {label} "),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
