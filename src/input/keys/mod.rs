pub mod sequence;
mod encode;
mod parser;

use crossterm::event::{KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers};
use std::fmt;

pub use encode::{KeyEncoder, symbol};
pub use parser::parse_key_sequence;

/// Raw key name reported for a dead key that has not been composed yet.
pub const DEAD_KEY: &str = "Dead";

/// Raw key names that only ever arrive as modifiers pressed on their own.
const LONE_MODIFIERS: [&str; 5] = ["Alt", "Shift", "Control", "Meta", "CapsLock"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Ctrl,
    Alt,
    Shift,
    Cmd,
    Enter,
    Escape,
    Space,
    Tab,
    Backspace,
    Delete,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl NamedKey {
    pub const ALL: [NamedKey; 14] = [
        NamedKey::Ctrl,
        NamedKey::Alt,
        NamedKey::Shift,
        NamedKey::Cmd,
        NamedKey::Enter,
        NamedKey::Escape,
        NamedKey::Space,
        NamedKey::Tab,
        NamedKey::Backspace,
        NamedKey::Delete,
        NamedKey::ArrowUp,
        NamedKey::ArrowDown,
        NamedKey::ArrowLeft,
        NamedKey::ArrowRight,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NamedKey::Ctrl => "Ctrl",
            NamedKey::Alt => "Alt",
            NamedKey::Shift => "Shift",
            NamedKey::Cmd => "Cmd",
            NamedKey::Enter => "Enter",
            NamedKey::Escape => "Escape",
            NamedKey::Space => "Space",
            NamedKey::Tab => "Tab",
            NamedKey::Backspace => "Backspace",
            NamedKey::Delete => "Delete",
            NamedKey::ArrowUp => "ArrowUp",
            NamedKey::ArrowDown => "ArrowDown",
            NamedKey::ArrowLeft => "ArrowLeft",
            NamedKey::ArrowRight => "ArrowRight",
        }
    }

    /// Canonical names only, as produced by the normalizer.
    pub fn from_canonical(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    /// Canonical names plus the aliases accepted in curriculum files.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "Control" => NamedKey::Ctrl,
            "Option" => NamedKey::Alt,
            "Meta" | "Command" => NamedKey::Cmd,
            "Return" => NamedKey::Enter,
            "Esc" => NamedKey::Escape,
            "Up" => NamedKey::ArrowUp,
            "Down" => NamedKey::ArrowDown,
            "Left" => NamedKey::ArrowLeft,
            "Right" => NamedKey::ArrowRight,
            other => return Self::from_canonical(other),
        };
        Some(key)
    }

    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            NamedKey::Ctrl | NamedKey::Alt | NamedKey::Shift | NamedKey::Cmd
        )
    }
}

/// Logical key token: what an expected sequence is made of and what the
/// normalizer turns a raw key press into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyToken {
    Char(char),
    Named(NamedKey),
    // Host keys outside the closed set; never equal to an expected token.
    Unresolved(String),
}

impl KeyToken {
    pub fn from_char(c: char) -> Self {
        if c == ' ' {
            KeyToken::Named(NamedKey::Space)
        } else {
            KeyToken::Char(c)
        }
    }

    /// Builds a token from an already renamed raw key name.
    pub fn from_raw(key: &str) -> Self {
        let mut chars = key.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_char(c);
        }
        match NamedKey::from_canonical(key) {
            Some(named) => KeyToken::Named(named),
            None => KeyToken::Unresolved(key.to_string()),
        }
    }

    /// Strict parse used for curriculum data.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut chars = text.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Self::from_char(c));
        }
        NamedKey::from_name(text)
            .map(KeyToken::Named)
            .ok_or_else(|| anyhow::anyhow!("Unknown key name: '{}'", text))
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            KeyToken::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn is_named(&self, named: NamedKey) -> bool {
        *self == KeyToken::Named(named)
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Char(c) => write!(f, "{}", c),
            KeyToken::Named(named) => f.write_str(named.name()),
            KeyToken::Unresolved(name) => f.write_str(name),
        }
    }
}

/// One key press as the host reports it: the produced key name, the
/// physical key position and the modifiers held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub key: String,
    pub code: String,
    pub modifiers: KeyModifiers,
}

impl RawKeyEvent {
    pub fn new(key: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            code: code.into(),
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CONTROL)
    }

    pub fn alt(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }

    pub fn shift(&self) -> bool {
        self.modifiers.contains(KeyModifiers::SHIFT)
    }

    pub fn meta(&self) -> bool {
        self.modifiers
            .intersects(KeyModifiers::SUPER | KeyModifiers::META)
    }

    pub fn is_lone_modifier(&self) -> bool {
        LONE_MODIFIERS.contains(&self.key.as_str())
    }

    /// Converts a terminal key event. Releases, repeats and modifier-only
    /// presses are dropped here so they never reach the tutor.
    pub fn from_crossterm(event: &CrosstermKeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        let mut modifiers = event.modifiers;
        let (key, code) = match event.code {
            KeyCode::Char(c) => (c.to_string(), physical_code(c)),
            KeyCode::Enter => named("Enter"),
            KeyCode::Esc => named("Escape"),
            KeyCode::Tab => named("Tab"),
            KeyCode::BackTab => {
                modifiers |= KeyModifiers::SHIFT;
                named("Tab")
            }
            KeyCode::Backspace => named("Backspace"),
            KeyCode::Delete => named("Delete"),
            KeyCode::Up => named("ArrowUp"),
            KeyCode::Down => named("ArrowDown"),
            KeyCode::Left => named("ArrowLeft"),
            KeyCode::Right => named("ArrowRight"),
            KeyCode::Home => named("Home"),
            KeyCode::End => named("End"),
            KeyCode::PageUp => named("PageUp"),
            KeyCode::PageDown => named("PageDown"),
            KeyCode::Insert => named("Insert"),
            KeyCode::F(n) => named(&format!("F{}", n)),
            KeyCode::Modifier(_) | KeyCode::CapsLock => return None,
            _ => named("Unidentified"),
        };
        Some(Self {
            key,
            code,
            modifiers,
        })
    }
}

fn named(name: &str) -> (String, String) {
    (name.to_string(), name.to_string())
}

// Terminals only report the produced character, so the physical position is
// guessed from a US ANSI layout.
fn physical_code(c: char) -> String {
    if c.is_ascii_alphabetic() {
        return format!("Key{}", c.to_ascii_uppercase());
    }
    if c.is_ascii_digit() {
        return format!("Digit{}", c);
    }
    let code = match c {
        ' ' => "Space",
        '!' => "Digit1",
        '@' => "Digit2",
        '#' => "Digit3",
        '$' => "Digit4",
        '%' => "Digit5",
        '^' => "Digit6",
        '&' => "Digit7",
        '*' => "Digit8",
        '(' => "Digit9",
        ')' => "Digit0",
        ',' | '<' => "Comma",
        '.' | '>' => "Period",
        '/' | '?' => "Slash",
        ';' | ':' => "Semicolon",
        '\'' | '"' => "Quote",
        '[' | '{' => "BracketLeft",
        ']' | '}' => "BracketRight",
        '\\' | '|' => "Backslash",
        '-' | '_' => "Minus",
        '=' | '+' => "Equal",
        '`' | '~' => "Backquote",
        _ => "Unidentified",
    };
    code.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_token_from_raw() {
        assert_eq!(KeyToken::from_raw("g"), KeyToken::Char('g'));
        assert_eq!(KeyToken::from_raw(" "), KeyToken::Named(NamedKey::Space));
        assert_eq!(KeyToken::from_raw("Enter"), KeyToken::Named(NamedKey::Enter));
        assert_eq!(KeyToken::from_raw("ç"), KeyToken::Char('ç'));
        assert_eq!(
            KeyToken::from_raw("Home"),
            KeyToken::Unresolved("Home".to_string())
        );
        // Aliases are a curriculum convenience, not a host name.
        assert_eq!(
            KeyToken::from_raw("Esc"),
            KeyToken::Unresolved("Esc".to_string())
        );
    }

    #[test]
    fn test_token_parse_aliases() {
        assert_eq!(KeyToken::parse("Control").unwrap(), KeyToken::Named(NamedKey::Ctrl));
        assert_eq!(KeyToken::parse("Esc").unwrap(), KeyToken::Named(NamedKey::Escape));
        assert_eq!(KeyToken::parse("Return").unwrap(), KeyToken::Named(NamedKey::Enter));
        assert_eq!(KeyToken::parse("G").unwrap(), KeyToken::Char('G'));
        assert!(KeyToken::parse("Hyper").is_err());
        assert!(KeyToken::parse("").is_err());
    }

    #[test]
    fn test_token_display() {
        assert_eq!(KeyToken::Char('$').to_string(), "$");
        assert_eq!(KeyToken::Named(NamedKey::ArrowUp).to_string(), "ArrowUp");
    }

    #[test]
    fn test_from_crossterm_char_with_ctrl() {
        let event = press(KeyCode::Char('d'), KeyModifiers::CONTROL);
        let raw = RawKeyEvent::from_crossterm(&event).unwrap();
        assert_eq!(raw.key, "d");
        assert_eq!(raw.code, "KeyD");
        assert!(raw.ctrl());
        assert!(!raw.shift());
    }

    #[test]
    fn test_from_crossterm_named_keys() {
        let raw = RawKeyEvent::from_crossterm(&press(KeyCode::Esc, KeyModifiers::NONE)).unwrap();
        assert_eq!(raw.key, "Escape");
        let raw = RawKeyEvent::from_crossterm(&press(KeyCode::Up, KeyModifiers::NONE)).unwrap();
        assert_eq!(raw.key, "ArrowUp");
        let raw =
            RawKeyEvent::from_crossterm(&press(KeyCode::BackTab, KeyModifiers::NONE)).unwrap();
        assert_eq!(raw.key, "Tab");
        assert!(raw.shift());
    }

    #[test]
    fn test_from_crossterm_drops_modifiers_and_releases() {
        let caps = press(KeyCode::CapsLock, KeyModifiers::NONE);
        assert!(RawKeyEvent::from_crossterm(&caps).is_none());

        let mut release = press(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(RawKeyEvent::from_crossterm(&release).is_none());
    }

    #[test]
    fn test_physical_code_guess() {
        assert_eq!(physical_code('$'), "Digit4");
        assert_eq!(physical_code(':'), "Semicolon");
        assert_eq!(physical_code('G'), "KeyG");
        assert_eq!(physical_code('ş'), "Unidentified");
    }

    #[test]
    fn test_lone_modifier() {
        assert!(RawKeyEvent::new("Shift", "ShiftLeft").is_lone_modifier());
        assert!(RawKeyEvent::new("CapsLock", "CapsLock").is_lone_modifier());
        assert!(!RawKeyEvent::new("a", "KeyA").is_lone_modifier());
    }
}
