//! Keyboard layout tables consumed by the key normalizer.
//!
//! Everything layout specific lives here as plain data so another layout can
//! be loaded from a TOML file without touching the matching logic:
//!
//! - `dead_keys`: which physical key (plus shift/alt) produces which character
//!   when the host only reports an uncomposed dead key.
//! - `accents`: precomposed vowels that are decomposed back to the plain
//!   letter when the expected sequence contains `accent_trigger`.
//! - `physical_labels`: cap labels for physical codes, used for the combo
//!   display.
//! - `hints`: which caps to press for a character on this layout.

use anyhow::{Context, Result, bail};
use crossterm::event::KeyModifiers;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::input::keys::{KeyToken, symbol};

pub const TURKISH_MAC: &str = "turkish-mac";
pub const US: &str = "us";

const DEFAULT_ACCENT_TRIGGER: char = '`';

fn default_accent_trigger() -> char {
    DEFAULT_ACCENT_TRIGGER
}

/// A physical key that the host reports as `Dead` on this layout.
///
/// `shift` and `alt` are only checked when set; an absent flag accepts the
/// modifier either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadKeyRule {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<bool>,
    pub produces: char,
}

impl DeadKeyRule {
    fn new(code: &str, shift: Option<bool>, alt: Option<bool>, produces: char) -> Self {
        Self {
            code: code.to_string(),
            shift,
            alt,
            produces,
        }
    }

    fn matches(&self, code: &str, modifiers: KeyModifiers) -> bool {
        let held = |wanted: Option<bool>, modifier| {
            wanted.is_none_or(|wanted| wanted == modifiers.contains(modifier))
        };
        self.code == code
            && held(self.shift, KeyModifiers::SHIFT)
            && held(self.alt, KeyModifiers::ALT)
    }

    /// Modifiers that satisfy this rule.
    pub fn modifiers(&self) -> KeyModifiers {
        let mut modifiers = KeyModifiers::NONE;
        if self.shift == Some(true) {
            modifiers |= KeyModifiers::SHIFT;
        }
        if self.alt == Some(true) {
            modifiers |= KeyModifiers::ALT;
        }
        modifiers
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyboardLayout {
    pub name: String,
    #[serde(default)]
    pub dead_keys: Vec<DeadKeyRule>,
    #[serde(default = "default_accent_trigger")]
    pub accent_trigger: char,
    #[serde(default)]
    pub accents: HashMap<char, char>,
    #[serde(default)]
    pub physical_labels: HashMap<String, String>,
    #[serde(default)]
    pub hints: HashMap<char, Vec<String>>,
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        Self::turkish_mac()
    }
}

fn labels(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(code, label)| (code.to_string(), label.to_string()))
        .collect()
}

// Caps are written space separated: `('|', "⌥ ⇧ 7")`.
fn hints(pairs: &[(char, &str)]) -> HashMap<char, Vec<String>> {
    pairs
        .iter()
        .map(|(c, caps)| (*c, caps.split_whitespace().map(str::to_string).collect()))
        .collect()
}

impl KeyboardLayout {
    /// macOS Turkish-QWERTY-PC.
    pub fn turkish_mac() -> Self {
        Self {
            name: TURKISH_MAC.to_string(),
            dead_keys: vec![
                DeadKeyRule::new("Digit3", Some(true), None, '^'),
                DeadKeyRule::new("Backslash", None, Some(true), '`'),
            ],
            accent_trigger: DEFAULT_ACCENT_TRIGGER,
            accents: [('à', 'a'), ('è', 'e'), ('ì', 'i'), ('ò', 'o'), ('ù', 'u')]
                .into_iter()
                .collect(),
            physical_labels: labels(&[
                ("Comma", ","),
                ("Period", "."),
                ("Slash", "/"),
                ("Backslash", ","),
                ("BracketLeft", "ğ"),
                ("BracketRight", "ü"),
                ("Semicolon", "ş"),
                ("Quote", "i"),
                ("Minus", "-"),
                ("Equal", "*"),
                ("IntlBackslash", "<"),
            ]),
            hints: hints(&[
                ('$', "⌥ 4"),
                ('#', "⌥ 3"),
                ('@', "⌥ q"),
                ('[', "⌥ 8"),
                (']', "⌥ 9"),
                ('{', "⌥ 7"),
                ('}', "⌥ 0"),
                ('\\', "⌥ 7"),
                ('|', "⌥ ⇧ 7"),
                ('~', "⌥ n"),
                ('`', "⌥ ,"),
                ('!', "⇧ 1"),
                ('\'', "⇧ 2"),
                ('^', "⇧ 3"),
                ('+', "⇧ 4"),
                ('%', "⇧ 5"),
                ('&', "⇧ 6"),
                ('/', "⇧ 7"),
                ('(', "⇧ 8"),
                (')', "⇧ 9"),
                ('=', "⇧ 0"),
                ('?', "⇧ *"),
                ('_', "⇧ -"),
                (':', "⇧ ."),
                (';', "⇧ ,"),
                ('>', "⇧ <"),
                ('<', "<"),
            ]),
        }
    }

    /// US ANSI: no dead keys, shifted symbols only.
    pub fn us() -> Self {
        Self {
            name: US.to_string(),
            dead_keys: Vec::new(),
            accent_trigger: DEFAULT_ACCENT_TRIGGER,
            accents: HashMap::new(),
            physical_labels: labels(&[
                ("Comma", ","),
                ("Period", "."),
                ("Slash", "/"),
                ("Semicolon", ";"),
                ("Quote", "'"),
                ("BracketLeft", "["),
                ("BracketRight", "]"),
                ("Backslash", "\\"),
                ("Minus", "-"),
                ("Equal", "="),
                ("Backquote", "`"),
            ]),
            hints: hints(&[
                ('!', "⇧ 1"),
                ('@', "⇧ 2"),
                ('#', "⇧ 3"),
                ('$', "⇧ 4"),
                ('%', "⇧ 5"),
                ('^', "⇧ 6"),
                ('&', "⇧ 7"),
                ('*', "⇧ 8"),
                ('(', "⇧ 9"),
                (')', "⇧ 0"),
                ('_', "⇧ -"),
                ('+', "⇧ ="),
                ('{', "⇧ ["),
                ('}', "⇧ ]"),
                ('|', "⇧ \\"),
                (':', "⇧ ;"),
                ('"', "⇧ '"),
                ('<', "⇧ ,"),
                ('>', "⇧ ."),
                ('?', "⇧ /"),
                ('~', "⇧ `"),
            ]),
        }
    }

    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            TURKISH_MAC => Some(Self::turkish_mac()),
            US => Some(Self::us()),
            _ => None,
        }
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let string = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file {}", path.display()))?;
        let layout = Self::from_toml(&string)
            .with_context(|| format!("Invalid layout file {}", path.display()))?;
        Ok(layout)
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        let layout: Self = toml::from_str(source)?;
        for rule in &layout.dead_keys {
            if rule.code.is_empty() {
                bail!("Dead key rule producing '{}' has no physical code", rule.produces);
            }
        }
        Ok(layout)
    }

    pub fn resolve_dead_key(&self, code: &str, modifiers: KeyModifiers) -> Option<char> {
        self.dead_keys
            .iter()
            .find(|rule| rule.matches(code, modifiers))
            .map(|rule| rule.produces)
    }

    /// The dead key rule that produces `c`, if this layout has one.
    pub fn dead_key_for(&self, c: char) -> Option<&DeadKeyRule> {
        self.dead_keys.iter().find(|rule| rule.produces == c)
    }

    pub fn decompose_accent(&self, c: char) -> Option<char> {
        self.accents.get(&c).copied()
    }

    /// Label printed on the physical key, e.g. `Digit4` → `4`, `KeyA` → `a`.
    pub fn physical_label(&self, code: &str) -> String {
        if let Some(digit) = code.strip_prefix("Digit") {
            return digit.to_string();
        }
        if let Some(letter) = code.strip_prefix("Key") {
            return letter.to_lowercase();
        }
        self.physical_labels
            .get(code)
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }

    /// Caps to press for a token on this layout.
    pub fn hint_for(&self, token: &KeyToken) -> Vec<String> {
        if let KeyToken::Char(c) = token {
            if let Some(caps) = self.hints.get(c) {
                return caps.clone();
            }
            if c.is_ascii_uppercase() {
                return vec!["⇧".to_string(), c.to_string()];
            }
        }
        vec![symbol(token)]
    }
}
