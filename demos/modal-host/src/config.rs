//! Command line arguments and key bindings

use std::path::{Path, PathBuf};

use clap::Parser;
use tui_modal::Keymap;

/// Terminal page hosting a dismissible dialog
#[derive(Parser, Debug, Clone)]
#[command(name = "modal-host")]
#[command(about = "A terminal page that opens a dismissible dialog")]
pub struct Args {
    /// Dialog title (pass an empty string for an untitled dialog)
    #[arg(long, short, default_value = "Modal open")]
    pub title: String,

    /// Dialog body text
    #[arg(
        long,
        short,
        default_value = "The content of this dialog is supplied by the page that opens it."
    )]
    pub message: String,

    /// Backdrop dim factor, 0.0 (none) to 1.0 (black)
    #[arg(long, default_value_t = 0.5)]
    pub dim: f32,

    /// JSON file with key binding overrides
    #[arg(long, short)]
    pub keymap: Option<PathBuf>,

    /// Directory for log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Number of lines in the background page
    #[arg(long, default_value_t = 120)]
    pub lines: usize,
}

/// What the host view shows
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub title: Option<String>,
    pub message: String,
    pub dim: f32,
    pub lines: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: Some("Modal open".to_string()),
            message: "The content of this dialog is supplied by the page that opens it."
                .to_string(),
            dim: 0.5,
            lines: 120,
        }
    }
}

impl From<&Args> for HostConfig {
    fn from(args: &Args) -> Self {
        Self {
            title: Some(args.title.clone()).filter(|title| !title.is_empty()),
            message: args.message.clone(),
            dim: args.dim.clamp(0.0, 1.0),
            lines: args.lines,
        }
    }
}

/// Key binding contexts
#[derive(tui_modal::BindingContext, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum KeyContext {
    /// The page, no dialog showing
    Page,
    /// The dialog is showing
    Dialog,
}

impl KeyContext {
    pub fn for_state(modal_open: bool) -> Self {
        if modal_open {
            KeyContext::Dialog
        } else {
            KeyContext::Page
        }
    }
}

/// Built-in bindings
///
/// Scrolling is bound globally so that it is attempted (and refused by the
/// scroll lock) while the dialog is showing. Escape is not bound here: the
/// dialog listens for it on its own while visible.
pub fn default_keymap() -> Keymap<KeyContext> {
    let mut keymap = Keymap::new();

    keymap.bind_global("force_quit", &["ctrl+c"]);
    keymap.bind_global("scroll_down", &["j", "down"]);
    keymap.bind_global("scroll_up", &["k", "up"]);
    keymap.bind_global("page_down", &["pagedown", "ctrl+d"]);
    keymap.bind_global("page_up", &["pageup", "ctrl+u"]);
    keymap.bind_global("top", &["home", "g"]);
    keymap.bind_global("bottom", &["end"]);

    keymap.bind(KeyContext::Page, "open", &["o", "enter", "space"]);
    keymap.bind(KeyContext::Page, "quit", &["q"]);

    keymap.bind(KeyContext::Dialog, "close", &["enter"]);

    keymap
}

/// Errors loading configuration files
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid keymap in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load user bindings from a JSON file and lay them over the defaults
pub fn load_keymap(path: &Path) -> Result<Keymap<KeyContext>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let user: Keymap<KeyContext> =
        serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(path = %path.display(), "Loaded keymap overrides");
    Ok(Keymap::merge(default_keymap(), user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tui_modal::testing::{char_key, ctrl_key, key};
    use tui_modal::BindingContext;

    #[test]
    fn test_context_names() {
        assert_eq!(KeyContext::Page.name(), "page");
        assert_eq!(KeyContext::from_name("dialog"), Some(KeyContext::Dialog));
        assert_eq!(KeyContext::for_state(true), KeyContext::Dialog);
    }

    #[test]
    fn test_enter_opens_on_page_and_closes_in_dialog() {
        let keymap = default_keymap();

        assert_eq!(keymap.command_for(&key("enter"), KeyContext::Page), Some("open"));
        assert_eq!(keymap.command_for(&key("enter"), KeyContext::Dialog), Some("close"));
    }

    #[test]
    fn test_q_quits_only_on_page() {
        let keymap = default_keymap();

        assert_eq!(keymap.command_for(&char_key('q'), KeyContext::Page), Some("quit"));
        assert_eq!(keymap.command_for(&char_key('q'), KeyContext::Dialog), None);
        assert_eq!(
            keymap.command_for(&ctrl_key('c'), KeyContext::Dialog),
            Some("force_quit")
        );
    }

    #[test]
    fn test_escape_is_left_to_the_dialog() {
        let keymap = default_keymap();
        assert_eq!(keymap.command_for(&key("esc"), KeyContext::Page), None);
        assert_eq!(keymap.command_for(&key("esc"), KeyContext::Dialog), None);
    }

    #[test]
    fn test_load_keymap_merges_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "page": {{ "open": ["x"] }}, "dialog": {{ "close": ["c"] }} }}"#)
            .unwrap();

        let keymap = load_keymap(file.path()).unwrap();

        assert_eq!(keymap.command_for(&char_key('x'), KeyContext::Page), Some("open"));
        assert_eq!(keymap.command_for(&char_key('o'), KeyContext::Page), None);
        assert_eq!(keymap.command_for(&char_key('c'), KeyContext::Dialog), Some("close"));
        assert_eq!(keymap.command_for(&char_key('q'), KeyContext::Page), Some("quit"));
    }

    #[test]
    fn test_load_keymap_errors() {
        let missing = load_keymap(Path::new("/nonexistent/keymap.json"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let invalid = load_keymap(file.path());
        assert!(matches!(invalid, Err(ConfigError::Json { .. })));
        assert!(invalid.unwrap_err().to_string().starts_with("invalid keymap in"));
    }

    #[test]
    fn test_args_to_config() {
        let args = Args::try_parse_from(["modal-host", "--title", "", "--dim", "3"]).unwrap();
        let config = HostConfig::from(&args);

        assert_eq!(config.title, None);
        assert_eq!(config.dim, 1.0);
        assert_eq!(config.lines, 120);

        let defaults = HostConfig::from(&Args::try_parse_from(["modal-host"]).unwrap());
        assert_eq!(defaults, HostConfig::default());
    }
}
