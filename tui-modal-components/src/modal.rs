//! Dismissible dialog overlay
//!
//! The host decides whether the dialog is open; [`Modal`] turns that flag into
//! a two-state machine. Entering the visible state locks the document scroll
//! and attaches an Escape key listener; leaving it (or tearing the modal down)
//! gives both back. While visible the dialog dims the page, draws a bordered
//! panel with an optional title, and closes when the dimmed backdrop itself is
//! clicked.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Padding, Paragraph, Wrap},
    Frame,
};
use tracing::info;
use tui_modal_core::{Component, Document, EventKind, ListenerHandle, ScrollLock};

use crate::backdrop::{dim_area, drop_shadow, fill};

/// Identifier of the title element the dialog is labelled by
pub const TITLE_ID: &str = "modal-title";

/// Body of a dialog
///
/// The modal sizes its panel from [`ModalContent::height`] and then hands the
/// remaining inner area to [`ModalContent::render_content`].
pub trait ModalContent {
    /// Rows needed when laid out `width` columns wide
    fn height(&self, width: u16) -> u16;

    fn render_content(&self, frame: &mut Frame, area: Rect);
}

/// No content; renders an empty region
impl ModalContent for () {
    fn height(&self, _width: u16) -> u16 {
        0
    }

    fn render_content(&self, _frame: &mut Frame, _area: Rect) {}
}

/// Word-wrapped text
impl ModalContent for Text<'_> {
    fn height(&self, width: u16) -> u16 {
        let rows = wrapped(self.clone()).line_count(width.max(1));
        rows.min(u16::MAX as usize) as u16
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(wrapped(self.clone()), area);
    }
}

/// Measured and drawn with the same wrapping so no row is lost
fn wrapped(text: Text<'_>) -> Paragraph<'_> {
    Paragraph::new(text).wrap(Wrap { trim: false })
}

/// Props for [`Modal`]
pub struct ModalProps<'a, A> {
    /// Whether the dialog should be showing
    pub is_open: bool,
    /// Heading shown above the content
    pub title: Option<&'a str>,
    /// Body rendered inside the panel
    pub content: &'a dyn ModalContent,
    /// Action requesting the host to close the dialog
    pub on_close: fn() -> A,
}

impl<A> Clone for ModalProps<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for ModalProps<'_, A> {}

/// A change of visibility observed by [`Modal::sync`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened,
    Closed,
}

/// What a pointer press landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTarget {
    /// The dimmed backdrop itself
    Overlay,
    /// The panel or anything drawn inside it
    Panel,
}

/// Accessibility role reported for the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Dialog,
}

/// Accessibility description of a visible dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSemantics {
    pub role: Role,
    /// The rest of the page is inert while the dialog shows
    pub modal: bool,
    /// Element naming the dialog, when a title is present
    pub labelled_by: Option<&'static str>,
    /// Whether the panel is hidden from assistive technology
    pub panel_hidden: bool,
}

/// Rects of the last rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalLayout {
    /// The full area covered by the backdrop
    pub overlay: Rect,
    /// The bordered panel
    pub panel: Rect,
    /// Title row, when a title is present
    pub title: Option<Rect>,
    /// Area handed to the content
    pub content: Rect,
}

/// Configuration for modal appearance
#[derive(Debug, Clone)]
pub struct ModalStyle {
    /// Dim factor for the backdrop (0.0 = no dim, 1.0 = black)
    pub dim_factor: f32,
    /// Panel fill
    pub bg_color: Color,
    pub border_color: Color,
    pub title_style: Style,
    /// Drop shadow color, `None` for no shadow
    pub shadow: Option<Color>,
    /// Widest the panel gets
    pub max_width: u16,
    /// Columns kept free on each side on narrow terminals
    pub margin_x: u16,
    /// Terminal width from which `padding_wide` applies
    pub wide_breakpoint: u16,
    pub padding_narrow: Padding,
    pub padding_wide: Padding,
}

impl Default for ModalStyle {
    fn default() -> Self {
        Self {
            dim_factor: 0.5,
            bg_color: Color::Rgb(30, 32, 42),
            border_color: Color::Rgb(120, 124, 140),
            title_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            shadow: Some(Color::Black),
            max_width: 56,
            margin_x: 2,
            wide_breakpoint: 80,
            padding_narrow: Padding::symmetric(3, 1),
            padding_wide: Padding::symmetric(4, 2),
        }
    }
}

impl ModalStyle {
    /// Create a style with a panel background color
    pub fn with_bg(bg_color: Color) -> Self {
        Self {
            bg_color,
            ..Default::default()
        }
    }

    /// Padding for a terminal `width` columns wide
    pub fn padding_for(&self, width: u16) -> Padding {
        if width >= self.wide_breakpoint {
            self.padding_wide
        } else {
            self.padding_narrow
        }
    }
}

/// Resources held while the dialog is visible
struct Session<A> {
    _scroll_lock: ScrollLock,
    _escape: ListenerHandle<A>,
    has_title: bool,
}

/// Dialog view bound to a [`Document`]
///
/// Call [`Component::render`] every frame with the host's props; the modal
/// follows `props.is_open` on its own. Dropping the modal releases anything it
/// holds on the document.
pub struct Modal<A> {
    document: Document<A>,
    style: ModalStyle,
    session: Option<Session<A>>,
    layout: Option<ModalLayout>,
}

impl<A: 'static> Modal<A> {
    pub fn new(document: Document<A>) -> Self {
        Self {
            document,
            style: ModalStyle::default(),
            session: None,
            layout: None,
        }
    }

    pub fn with_style(mut self, style: ModalStyle) -> Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> &ModalStyle {
        &self.style
    }

    pub fn is_visible(&self) -> bool {
        self.session.is_some()
    }

    /// Bring the modal's state in line with the host's flag
    ///
    /// Returns the transition taken, if any. Repeated calls with the same flag
    /// do nothing.
    pub fn sync(
        &mut self,
        is_open: bool,
        title: Option<&str>,
        on_close: fn() -> A,
    ) -> Option<Transition> {
        match (is_open, self.session.is_some()) {
            (true, true) => {
                if let Some(session) = self.session.as_mut() {
                    session.has_title = title.is_some();
                }
                None
            }
            (true, false) => {
                let scroll_lock = self.document.scroll().lock();
                let escape = self
                    .document
                    .keys()
                    .listen(move |key| (key.code == KeyCode::Esc).then(on_close));
                self.session = Some(Session {
                    _scroll_lock: scroll_lock,
                    _escape: escape,
                    has_title: title.is_some(),
                });
                info!(title = title.unwrap_or_default(), "Modal opened");
                Some(Transition::Opened)
            }
            (false, true) => {
                self.session = None;
                self.layout = None;
                info!(title = title.unwrap_or_default(), "Modal closed");
                Some(Transition::Closed)
            }
            (false, false) => {
                self.layout = None;
                None
            }
        }
    }

    /// Release the scroll lock and key listener regardless of the flag
    pub fn teardown(&mut self) {
        self.session = None;
        self.layout = None;
    }

    /// Resolve what a press at (`column`, `row`) lands on
    ///
    /// `None` while hidden, before the first render, or outside the backdrop.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<ModalTarget> {
        let layout = self.layout.as_ref()?;
        let position = Position::new(column, row);
        if layout.panel.contains(position) {
            Some(ModalTarget::Panel)
        } else if layout.overlay.contains(position) {
            Some(ModalTarget::Overlay)
        } else {
            None
        }
    }

    pub fn layout(&self) -> Option<&ModalLayout> {
        self.layout.as_ref()
    }

    /// Area the content was rendered into last frame
    pub fn content_area(&self) -> Option<Rect> {
        self.layout.map(|layout| layout.content)
    }

    pub fn semantics(&self) -> Option<DialogSemantics> {
        self.session.as_ref().map(|session| DialogSemantics {
            role: Role::Dialog,
            modal: true,
            labelled_by: session.has_title.then_some(TITLE_ID),
            panel_hidden: false,
        })
    }
}

impl<A> std::fmt::Debug for Modal<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modal")
            .field("visible", &self.session.is_some())
            .field("style", &self.style)
            .field("layout", &self.layout)
            .finish()
    }
}

impl<A: 'static> Component<A> for Modal<A> {
    type Props<'a> = ModalProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_open || !self.is_visible() {
            return None;
        }
        let Some((column, row)) = event.left_press() else {
            return None;
        };
        match self.hit_test(column, row) {
            Some(ModalTarget::Overlay) => Some((props.on_close)()),
            Some(ModalTarget::Panel) | None => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.sync(props.is_open, props.title, props.on_close);
        if !self.is_visible() {
            return;
        }

        let layout = compute_layout(&self.style, area, props.title.is_some(), props.content);
        let style = &self.style;

        dim_area(frame.buffer_mut(), layout.overlay, style.dim_factor);
        if let Some(shadow) = style.shadow {
            drop_shadow(frame.buffer_mut(), layout.panel, layout.overlay, shadow);
        }

        fill(frame.buffer_mut(), layout.panel, style.bg_color);
        let block = Block::bordered()
            .border_style(Style::default().fg(style.border_color))
            .style(Style::default().bg(style.bg_color))
            .padding(style.padding_for(area.width));
        frame.render_widget(block, layout.panel);

        if let (Some(title), Some(title_area)) = (props.title, layout.title) {
            frame.render_widget(
                Paragraph::new(Line::styled(title, style.title_style)),
                title_area,
            );
        }
        props.content.render_content(frame, layout.content);

        self.layout = Some(layout);
    }
}

fn compute_layout(
    style: &ModalStyle,
    area: Rect,
    has_title: bool,
    content: &dyn ModalContent,
) -> ModalLayout {
    let padding = style.padding_for(area.width);
    let width = style
        .max_width
        .min(area.width.saturating_sub(style.margin_x.saturating_mul(2)));
    let inner_width = width
        .saturating_sub(2)
        .saturating_sub(padding.left + padding.right);
    // title line plus a blank separator row
    let title_rows = if has_title { 2 } else { 0 };
    let height = content
        .height(inner_width)
        .saturating_add(title_rows)
        .saturating_add(2 + padding.top + padding.bottom);

    let panel = centered_rect(width, height, area);
    let inner = Block::bordered().padding(padding).inner(panel);
    let title = (has_title && inner.height > 0).then(|| Rect { height: 1, ..inner });
    let skip = title_rows.min(inner.height);
    let content = Rect {
        y: inner.y + skip,
        height: inner.height - skip,
        ..inner
    };

    ModalLayout {
        overlay: area,
        panel,
        title,
        content,
    }
}

/// Calculate a centered rectangle within an area
///
/// Leaves at least one free row and column for the drop shadow.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(1));
    let height = height.min(area.height.saturating_sub(1));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;
    use tui_modal_core::testing::{click, key, RenderHarness};
    use tui_modal_core::{Action, Overflow};

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Close,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            "Close"
        }
    }

    fn close() -> TestAction {
        TestAction::Close
    }

    fn props<'a>(
        is_open: bool,
        title: Option<&'a str>,
        content: &'a dyn ModalContent,
    ) -> ModalProps<'a, TestAction> {
        ModalProps {
            is_open,
            title,
            content,
            on_close: close,
        }
    }

    fn render(
        harness: &mut RenderHarness,
        modal: &mut Modal<TestAction>,
        props: ModalProps<'_, TestAction>,
    ) -> String {
        harness.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("Background content"), frame.area());
            modal.render(frame, frame.area(), props);
        })
    }

    #[test]
    fn test_hidden_renders_nothing() {
        let document = Document::new(100);
        let mut modal = Modal::new(document.clone());
        let mut harness = RenderHarness::new(60, 20);
        let body = Text::from("Are you sure?");

        let output = render(&mut harness, &mut modal, props(false, Some("Confirm"), &body));

        assert!(output.starts_with("Background content"));
        assert!(!output.contains("Confirm"));
        assert!(!output.contains("Are you sure?"));
        assert!(modal.layout().is_none());
        assert_eq!(document.scroll().overflow(), Overflow::Auto);
        assert!(document.keys().is_empty());
        assert_eq!(modal.semantics(), None);
    }

    #[test]
    fn test_open_renders_title_and_content() {
        let document = Document::new(100);
        let mut modal = Modal::new(document.clone());
        let mut harness = RenderHarness::new(60, 20);
        let body = Text::from("Are you sure?");

        let output = render(&mut harness, &mut modal, props(true, Some("Confirm"), &body));

        assert!(output.contains("Confirm"));
        assert!(output.contains("Are you sure?"));
        assert!(modal.is_visible());
        assert!(document.scroll().is_locked());
        assert_eq!(document.keys().len(), 1);
    }

    #[test]
    fn test_sync_logs_once_per_flip() {
        let document = Document::<TestAction>::new(10);
        let mut modal = Modal::new(document.clone());

        assert_eq!(modal.sync(false, None, close), None);
        assert_eq!(modal.sync(true, None, close), Some(Transition::Opened));
        assert_eq!(modal.sync(true, None, close), None);
        assert_eq!(document.keys().len(), 1);
        assert_eq!(modal.sync(false, None, close), Some(Transition::Closed));
        assert_eq!(modal.sync(false, None, close), None);
        assert_eq!(modal.sync(true, None, close), Some(Transition::Opened));
    }

    #[test]
    fn test_close_releases_scroll_and_listener() {
        let document = Document::<TestAction>::new(10);
        let mut modal = Modal::new(document.clone());

        modal.sync(true, Some("Confirm"), close);
        assert_eq!(document.scroll().overflow(), Overflow::Hidden);

        modal.sync(false, Some("Confirm"), close);
        assert_eq!(document.scroll().overflow(), Overflow::Auto);
        assert!(document.keys().is_empty());
        assert!(document.keys().dispatch(&key("esc")).is_empty());
    }

    #[test]
    fn test_escape_listener_requests_close() {
        let document = Document::<TestAction>::new(10);
        let mut modal = Modal::new(document.clone());
        modal.sync(true, None, close);

        assert_eq!(document.keys().dispatch(&key("esc")), vec![TestAction::Close]);
        assert!(document.keys().dispatch(&key("enter")).is_empty());
        assert!(document.keys().dispatch(&key("x")).is_empty());
    }

    #[test]
    fn test_overlay_click_closes_panel_click_does_not() {
        let document = Document::new(10);
        let mut modal = Modal::new(document);
        let mut harness = RenderHarness::new(60, 20);
        let body = Text::from("Body");
        let open = props(true, Some("Title"), &body);

        render(&mut harness, &mut modal, open);
        let layout = *modal.layout().expect("rendered");

        let on_overlay = modal
            .handle_event(&click(0, 0), open)
            .into_iter()
            .collect::<Vec<_>>();
        assert_eq!(on_overlay, vec![TestAction::Close]);

        let inside = click(layout.content.x, layout.content.y);
        let on_panel = modal.handle_event(&inside, open).into_iter().count();
        assert_eq!(on_panel, 0);

        let border = click(layout.panel.x, layout.panel.y);
        assert_eq!(
            modal.hit_test(layout.panel.x, layout.panel.y),
            Some(ModalTarget::Panel)
        );
        assert_eq!(modal.handle_event(&border, open).into_iter().count(), 0);
    }

    #[test]
    fn test_click_ignored_before_render_and_while_hidden() {
        let document = Document::new(10);
        let mut modal = Modal::new(document);
        let body = ();

        let hidden = props(false, None, &body);
        assert_eq!(modal.handle_event(&click(0, 0), hidden).into_iter().count(), 0);

        // visible but never rendered: no hit-test areas yet
        modal.sync(true, None, close);
        let open = props(true, None, &body);
        assert_eq!(modal.hit_test(0, 0), None);
        assert_eq!(modal.handle_event(&click(0, 0), open).into_iter().count(), 0);
    }

    #[test]
    fn test_teardown_releases_regardless_of_flag() {
        let document = Document::<TestAction>::new(10);
        let mut modal = Modal::new(document.clone());
        modal.sync(true, None, close);

        modal.teardown();

        assert!(!modal.is_visible());
        assert!(!document.scroll().is_locked());
        assert!(document.keys().is_empty());
        // the host flag still says open: next sync opens again
        assert_eq!(modal.sync(true, None, close), Some(Transition::Opened));
    }

    #[test]
    fn test_drop_releases() {
        let document = Document::<TestAction>::new(10);
        let mut modal = Modal::new(document.clone());
        modal.sync(true, None, close);

        drop(modal);

        assert!(!document.scroll().is_locked());
        assert!(document.keys().is_empty());
    }

    #[test]
    fn test_semantics_follow_title() {
        let mut modal = Modal::new(Document::<TestAction>::new(10));

        modal.sync(true, Some("Confirm"), close);
        assert_eq!(
            modal.semantics(),
            Some(DialogSemantics {
                role: Role::Dialog,
                modal: true,
                labelled_by: Some(TITLE_ID),
                panel_hidden: false,
            })
        );

        modal.sync(true, None, close);
        assert_eq!(modal.semantics().and_then(|s| s.labelled_by), None);
    }

    #[test]
    fn test_panel_width_is_responsive() {
        let style = ModalStyle::default();

        let narrow = compute_layout(&style, Rect::new(0, 0, 40, 30), false, &());
        assert_eq!(narrow.panel.width, 36);
        assert_eq!(narrow.panel.x, 2);

        let wide = compute_layout(&style, Rect::new(0, 0, 120, 30), false, &());
        assert_eq!(wide.panel.width, 56);
        assert_eq!(wide.panel.x, 32);
    }

    #[test]
    fn test_padding_grows_on_wide_terminals() {
        let style = ModalStyle::default();
        let narrow = compute_layout(&style, Rect::new(0, 0, 60, 30), true, &());
        let wide = compute_layout(&style, Rect::new(0, 0, 100, 30), true, &());

        // border + padding on the left of the content
        assert_eq!(narrow.content.x - narrow.panel.x, 1 + 3);
        assert_eq!(wide.content.x - wide.panel.x, 1 + 4);
        assert_eq!(narrow.title.map(|t| t.y), Some(narrow.panel.y + 1 + 1));
    }

    #[test]
    fn test_text_height_wraps_at_words() {
        let text = Text::from("aaaaaa bbbbbb cccccc");
        assert_eq!(ModalContent::height(&text, 10), 3);
        assert_eq!(ModalContent::height(&text, 40), 1);

        let lines = Text::from(vec![Line::from("abc"), Line::from("")]);
        assert_eq!(ModalContent::height(&lines, 20), 2);
    }

    #[test]
    fn test_wrapped_content_is_fully_drawn() {
        let document = Document::new(10);
        let style = ModalStyle {
            max_width: 18,
            ..ModalStyle::default()
        };
        let mut modal = Modal::new(document).with_style(style);
        let mut harness = RenderHarness::new(60, 30);
        let body = Text::from("aaaaaa bbbbbb cccccc");

        let output = render(&mut harness, &mut modal, props(true, None, &body));

        let content = modal.content_area().unwrap();
        assert_eq!(content.width, 10);
        assert_eq!(content.height, 3);
        assert!(output.contains("aaaaaa"));
        assert!(output.contains("bbbbbb"));
        assert!(output.contains("cccccc"));
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        let centered = centered_rect(40, 10, area);

        assert_eq!(centered, Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let centered = centered_rect(100, 50, Rect::new(0, 0, 30, 10));

        assert_eq!(centered.width, 29);
        assert_eq!(centered.height, 9);
    }
}
