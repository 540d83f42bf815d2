//! Context-aware key maps loaded from strings like `"ctrl+c"` or `"esc"`

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::hash::Hash;

/// A keymap context, e.g. "page" vs "dialog"
///
/// Use `#[derive(BindingContext)]` from `tui-modal-macros` to implement this
/// for a unit-variant enum; names are the snake_case variant names.
pub trait BindingContext: Clone + Copy + Eq + Hash {
    /// Context name as used in keymap files
    fn name(&self) -> &'static str;

    /// Parse a context from its name
    fn from_name(name: &str) -> Option<Self>;

    /// All contexts
    fn all() -> &'static [Self];
}

type Bindings = HashMap<String, Vec<String>>;

/// Command → key strings, globally and per context
///
/// Context bindings win over global ones. Serialized as a map whose keys are
/// `"global"` plus context names:
///
/// ```json
/// { "global": { "quit": ["q"] }, "dialog": { "close": ["enter"] } }
/// ```
#[derive(Debug, Clone)]
pub struct Keymap<C: BindingContext> {
    global: Bindings,
    contexts: HashMap<C, Bindings>,
}

impl<C: BindingContext> Default for Keymap<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: BindingContext> Serialize for Keymap<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(1 + self.contexts.len()))?;
        map.serialize_entry("global", &self.global)?;
        for (context, bindings) in &self.contexts {
            map.serialize_entry(context.name(), bindings)?;
        }
        map.end()
    }
}

impl<'de, C: BindingContext> Deserialize<'de> for Keymap<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: HashMap<String, Bindings> = HashMap::deserialize(deserializer)?;

        let mut keymap = Keymap::new();
        for (name, bindings) in raw {
            if name == "global" {
                keymap.global = bindings;
            } else if let Some(context) = C::from_name(&name) {
                keymap.contexts.insert(context, bindings);
            }
            // unknown contexts are skipped
        }
        Ok(keymap)
    }
}

impl<C: BindingContext> Keymap<C> {
    pub fn new() -> Self {
        Self {
            global: HashMap::new(),
            contexts: HashMap::new(),
        }
    }

    /// Bind a command in every context
    pub fn bind_global(&mut self, command: impl Into<String>, keys: &[&str]) {
        self.global.insert(command.into(), to_owned_keys(keys));
    }

    /// Bind a command in one context
    pub fn bind(&mut self, context: C, command: impl Into<String>, keys: &[&str]) {
        self.contexts
            .entry(context)
            .or_default()
            .insert(command.into(), to_owned_keys(keys));
    }

    pub fn global_bindings(&self) -> &HashMap<String, Vec<String>> {
        &self.global
    }

    pub fn context_bindings(&self, context: C) -> Option<&HashMap<String, Vec<String>>> {
        self.contexts.get(&context)
    }

    /// Command bound to `key` in `context`, falling back to global bindings
    pub fn command_for(&self, key: &KeyEvent, context: C) -> Option<&str> {
        self.contexts
            .get(&context)
            .and_then(|bindings| find_command(key, bindings))
            .or_else(|| find_command(key, &self.global))
    }

    /// First key string bound to `command` in `context` (or globally)
    pub fn first_key(&self, command: &str, context: C) -> Option<&str> {
        self.contexts
            .get(&context)
            .and_then(|bindings| bindings.get(command))
            .and_then(|keys| keys.first())
            .or_else(|| self.global.get(command).and_then(|keys| keys.first()))
            .map(String::as_str)
    }

    /// Overlay user bindings on top of defaults, command by command
    pub fn merge(mut defaults: Self, user: Self) -> Self {
        defaults.global.extend(user.global);
        for (context, bindings) in user.contexts {
            defaults.contexts.entry(context).or_default().extend(bindings);
        }
        defaults
    }
}

fn to_owned_keys(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

fn find_command<'a>(key: &KeyEvent, bindings: &'a Bindings) -> Option<&'a str> {
    bindings
        .iter()
        .find(|(_, keys)| {
            keys.iter()
                .filter_map(|k| parse_key_string(k))
                .any(|bound| keys_match(&bound, key))
        })
        .map(|(command, _)| command.as_str())
}

/// Compare code and modifiers; character keys compare case-insensitively
fn keys_match(bound: &KeyEvent, pressed: &KeyEvent) -> bool {
    let codes_match = match (bound.code, pressed.code) {
        (KeyCode::Char(a), KeyCode::Char(b)) => a.to_lowercase().eq(b.to_lowercase()),
        (a, b) => a == b,
    };
    codes_match && bound.modifiers == pressed.modifiers
}

/// Parse a key string like "q", "esc", "ctrl+c", "shift+tab" into a KeyEvent
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();
    if key_str.is_empty() {
        return None;
    }

    let press = |code, modifiers| KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    };

    if key_str == "shift+tab" || key_str == "backtab" {
        return Some(press(KeyCode::BackTab, KeyModifiers::SHIFT));
    }

    let (modifier_part, key_part) = match key_str.rsplit_once('+') {
        // "+" on its own or "ctrl++" binds the plus key
        Some((mods, "")) => (mods.trim_end_matches('+'), "+"),
        Some((mods, key)) => (mods, key),
        None => ("", key_str.as_str()),
    };

    let mut modifiers = KeyModifiers::empty();
    for part in modifier_part.split('+').map(str::trim) {
        match part {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => {}
        }
    }

    let code = match key_part.trim() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
        c if c.chars().count() == 1 => KeyCode::Char(c.chars().next()?),
        _ => return None,
    };

    Some(press(code, modifiers))
}

/// Format a key string for display ("ctrl+c" -> "^C", "esc" -> "Esc", "q" -> "Q")
pub fn format_key_for_display(key_str: &str) -> String {
    let Some(key) = parse_key_string(key_str) else {
        return key_str.to_string();
    };

    let mut out = String::new();
    if key.code == KeyCode::BackTab {
        return "Shift+Tab".to_string();
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        out.push('^');
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        out.push_str("Alt+");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        out.push_str("Shift+");
    }

    let name = match key.code {
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Insert => "Ins".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_uppercase().to_string(),
        other => format!("{other:?}"),
    };
    out.push_str(&name);
    out
}
