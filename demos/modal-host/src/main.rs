//! modal-host - a terminal page that opens a dismissible dialog
//!
//! Event flow:
//! 1. Raw terminal event -> Escape listener (while the dialog shows) and the
//!    host's `map_event` -> actions
//! 2. Actions dispatched to the store (logged by `LoggingMiddleware`)
//! 3. If state changed, re-render; the dialog follows `modal_open` on render
//!
//! # Usage
//!
//! ```sh
//! cargo run -p modal-host
//! cargo run -p modal-host -- --title "Confirm" --message "Really?" --dim 0.7
//! cargo run -p modal-host -- --keymap my-keys.json
//! ```

use std::cell::RefCell;
use std::io;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tui_modal::{DispatchRuntime, Document, Keymap, LoggingMiddleware, Store};

use modal_host::action::Action;
use modal_host::config::{default_keymap, load_keymap, Args, HostConfig, KeyContext};
use modal_host::host::HostUi;
use modal_host::logging;
use modal_host::reducer::reducer;
use modal_host::state::AppState;

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    // Load keymap overrides before entering TUI mode
    let keymap = match args.keymap.as_deref() {
        Some(path) => match load_keymap(path) {
            Ok(keymap) => keymap,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => default_keymap(),
    };

    let logging = logging::init(args.log_dir.clone());
    if let Some(guard) = &logging {
        tracing::debug!(log_dir = %guard.log_dir().display(), "Logging to file");
    }

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, HostConfig::from(&args), keymap).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: HostConfig,
    keymap: Keymap<KeyContext>,
) -> io::Result<()> {
    let size = terminal.size()?;
    let store = Store::new(AppState::new((size.width, size.height)), reducer)
        .with_middleware(LoggingMiddleware::new());

    let document = Document::new(config.lines);
    let mut runtime = DispatchRuntime::from_store(store).with_document(document.clone());

    let ui = RefCell::new(HostUi::new(document, &config, keymap));

    tracing::info!(title = ?config.title, lines = config.lines, "modal-host started");

    runtime
        .run(
            terminal,
            |frame, area, state, _document| ui.borrow_mut().render(frame, area, state),
            |event, state, _document| ui.borrow_mut().map_event(event, state),
            |action| matches!(action, Action::Quit),
        )
        .await
}
