//! The host view: page, help bar and dialog composed over one document
//!
//! Event routing:
//! - Escape reaches the dialog's own key listener before this module sees it
//! - while the dialog is open, keys resolve in the `Dialog` context and mouse
//!   input goes to the dialog (backdrop click, Close button)
//! - otherwise keys resolve in the `Page` context and mouse input goes to the
//!   page (trigger button)
//! - scroll input always reaches the document; the dialog's lock refuses it

use crossterm::event::MouseEventKind;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};
use tui_modal::{Document, EventKind, EventOutcome, Keymap, ScrollRoot};
use tui_modal_components::{Modal, ModalProps, ModalStyle};

use crate::action::Action;
use crate::components::{
    page_lines, Component, DialogBody, HelpBar, HelpBarProps, PageProps, PageView,
};
use crate::config::{HostConfig, KeyContext};
use crate::state::AppState;

/// Rows moved per mouse wheel notch
const WHEEL_STEP: isize = 3;

fn open_modal() -> Action {
    Action::ModalOpen
}

fn close_modal() -> Action {
    Action::ModalClose
}

pub struct HostUi {
    document: Document<Action>,
    keymap: Keymap<KeyContext>,
    title: Option<String>,
    lines: Vec<String>,
    body: DialogBody,
    page: PageView,
    help: HelpBar,
    modal: Modal<Action>,
}

impl HostUi {
    pub fn new(document: Document<Action>, config: &HostConfig, keymap: Keymap<KeyContext>) -> Self {
        let style = ModalStyle {
            dim_factor: config.dim,
            ..ModalStyle::default()
        };
        let lines = page_lines(config.lines);
        document.scroll().set_content_len(lines.len());

        Self {
            modal: Modal::new(document.clone()).with_style(style),
            document,
            keymap,
            title: config.title.clone(),
            lines,
            body: DialogBody::new(config.message.clone()),
            page: PageView::new(),
            help: HelpBar,
        }
    }

    pub fn document(&self) -> &Document<Action> {
        &self.document
    }

    pub fn modal(&self) -> &Modal<Action> {
        &self.modal
    }

    pub fn page(&self) -> &PageView {
        &self.page
    }

    pub fn body(&self) -> &DialogBody {
        &self.body
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let [page_area, help_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        let page_props = PageProps {
            lines: &self.lines,
            scroll: self.document.scroll(),
            is_focused: !state.modal_open,
            on_open: open_modal,
        };
        self.page.render(frame, page_area, page_props);

        let help_props = HelpBarProps {
            keymap: &self.keymap,
            context: KeyContext::for_state(state.modal_open),
        };
        self.help.render(frame, help_area, help_props);

        if !state.modal_open {
            self.body.set_hovered(false);
        }
        let modal_props = ModalProps {
            is_open: state.modal_open,
            title: self.title.as_deref(),
            content: &self.body,
            on_close: close_modal,
        };
        self.modal.render(frame, area, modal_props);
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        match event {
            EventKind::Resize(width, height) => {
                EventOutcome::action(Action::UiTerminalResize(*width, *height)).with_render()
            }
            EventKind::Scroll { delta, .. } => {
                scrolled(self.document.scroll().scroll_by(delta * WHEEL_STEP))
            }
            EventKind::Mouse(_) if state.modal_open => self.dialog_mouse(event, state),
            EventKind::Mouse(_) => {
                let props = PageProps {
                    lines: &self.lines,
                    scroll: self.document.scroll(),
                    is_focused: true,
                    on_open: open_modal,
                };
                EventOutcome::from_actions(self.page.handle_event(event, props))
            }
            EventKind::Key(_) => {
                let Some(key) = event.key_press() else {
                    return EventOutcome::ignored();
                };
                let context = KeyContext::for_state(state.modal_open);
                match self.keymap.command_for(key, context) {
                    Some(command) => run_command(command, self.document.scroll()),
                    None => EventOutcome::ignored(),
                }
            }
        }
    }

    fn dialog_mouse(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        let EventKind::Mouse(mouse) = event else {
            return EventOutcome::ignored();
        };
        let on_button = self
            .modal
            .content_area()
            .is_some_and(|area| DialogBody::close_button_hit(area, mouse.column, mouse.row));

        match mouse.kind {
            MouseEventKind::Moved => {
                if self.body.set_hovered(on_button) {
                    EventOutcome::needs_render()
                } else {
                    EventOutcome::ignored()
                }
            }
            _ if on_button && event.left_press().is_some() => {
                EventOutcome::action(Action::ModalClose)
            }
            _ => {
                let props = ModalProps {
                    is_open: state.modal_open,
                    title: self.title.as_deref(),
                    content: &self.body,
                    on_close: close_modal,
                };
                EventOutcome::from_actions(self.modal.handle_event(event, props))
            }
        }
    }
}

fn scrolled(moved: bool) -> EventOutcome<Action> {
    if moved {
        EventOutcome::needs_render()
    } else {
        EventOutcome::ignored()
    }
}

fn run_command(command: &str, scroll: &ScrollRoot) -> EventOutcome<Action> {
    let page = scroll.viewport().max(1) as isize;
    match command {
        "open" => EventOutcome::action(Action::ModalOpen),
        "close" => EventOutcome::action(Action::ModalClose),
        "quit" | "force_quit" => EventOutcome::action(Action::Quit),
        "scroll_down" => scrolled(scroll.scroll_by(1)),
        "scroll_up" => scrolled(scroll.scroll_by(-1)),
        "page_down" => scrolled(scroll.scroll_by(page)),
        "page_up" => scrolled(scroll.scroll_by(-page)),
        "top" => scrolled(scroll.scroll_to(0)),
        "bottom" => scrolled(scroll.scroll_to(scroll.max_offset())),
        other => {
            tracing::debug!(command = other, "Unhandled command");
            EventOutcome::ignored()
        }
    }
}
