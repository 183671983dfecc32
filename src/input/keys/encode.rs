use anyhow::{Result, anyhow};
use crate::input::keys::{KeyToken, NamedKey};
use crate::input::keys::sequence::KeySequence;

pub trait KeyEncoder {
    fn encode(&self) -> Result<String>;
}

// Inside `<...>`: the bare name, with the angle brackets escaped.
fn inner(token: &KeyToken) -> Result<String> {
    match token {
        KeyToken::Char('<') => Ok("lt".to_string()),
        KeyToken::Char('>') => Ok("gt".to_string()),
        KeyToken::Char(c) => Ok(c.to_string()),
        KeyToken::Named(named) => Ok(named.name().to_string()),
        KeyToken::Unresolved(name) => Err(anyhow!("Unsupported key: {}", name)),
    }
}

fn modifier_prefix(named: NamedKey) -> Option<&'static str> {
    match named {
        NamedKey::Ctrl => Some("C"),
        NamedKey::Alt => Some("A"),
        NamedKey::Shift => Some("S"),
        NamedKey::Cmd => Some("D"),
        _ => None,
    }
}

impl KeyEncoder for KeyToken {
    fn encode(&self) -> Result<String> {
        let encoded = match self {
            KeyToken::Char(c) if *c != '<' => c.to_string(),
            _ => format!("<{}>", inner(self)?),
        };
        Ok(encoded)
    }
}

impl KeyEncoder for KeySequence {
    fn encode(&self) -> Result<String> {
        let mut encoded = String::new();
        let mut keys = self.keys.iter().peekable();
        while let Some(key) = keys.next() {
            let prefix = match key {
                KeyToken::Named(named) => modifier_prefix(*named),
                _ => None,
            };
            // A modifier followed by its key folds back into one chord.
            let chord = match (prefix, keys.peek()) {
                (Some(prefix), Some(next)) if !is_modifier(next) => Some((prefix, *next)),
                _ => None,
            };
            match chord {
                Some((prefix, next)) => {
                    encoded.push_str(&format!("<{}-{}>", prefix, inner(next)?));
                    keys.next();
                }
                None => encoded.push_str(&key.encode()?),
            }
        }
        Ok(encoded)
    }
}

fn is_modifier(token: &KeyToken) -> bool {
    matches!(token, KeyToken::Named(named) if named.is_modifier())
}

/// Key cap label shown to the user.
pub fn symbol(token: &KeyToken) -> String {
    let label = match token {
        KeyToken::Named(NamedKey::Ctrl) => "⌃",
        KeyToken::Named(NamedKey::Alt) => "⌥",
        KeyToken::Named(NamedKey::Shift) => "⇧",
        KeyToken::Named(NamedKey::Cmd) => "⌘",
        KeyToken::Named(NamedKey::Enter) => "↵",
        KeyToken::Named(NamedKey::Escape) => "esc",
        KeyToken::Named(NamedKey::Space) => "␣",
        KeyToken::Named(NamedKey::Tab) => "⇥",
        KeyToken::Named(NamedKey::Backspace) => "⌫",
        KeyToken::Named(NamedKey::Delete) => "⌦",
        KeyToken::Named(NamedKey::ArrowUp) => "↑",
        KeyToken::Named(NamedKey::ArrowDown) => "↓",
        KeyToken::Named(NamedKey::ArrowLeft) => "←",
        KeyToken::Named(NamedKey::ArrowRight) => "→",
        other => return other.to_string(),
    };
    label.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keys::parse_key_sequence;

    fn sequence(notation: &str) -> KeySequence {
        KeySequence::from_keys(parse_key_sequence(notation).unwrap())
    }

    #[test]
    fn test_encode_token() {
        assert_eq!(KeyToken::Char('g').encode().unwrap(), "g");
        assert_eq!(KeyToken::Char('<').encode().unwrap(), "<lt>");
        assert_eq!(KeyToken::Named(NamedKey::Enter).encode().unwrap(), "<Enter>");
        assert!(KeyToken::Unresolved("F5".into()).encode().is_err());
    }

    #[test]
    fn test_encode_sequence_folds_chords() {
        assert_eq!(sequence("<C-d>").encode().unwrap(), "<C-d>");
        assert_eq!(sequence(":wq<Enter>").encode().unwrap(), ":wq<Enter>");
        assert_eq!(sequence("<<").encode().unwrap(), "<lt><lt>");
        assert_eq!(sequence("<C-gt>").encode().unwrap(), "<C-gt>");
    }

    #[test]
    fn test_encode_trailing_modifier() {
        let keys = KeySequence::from_keys(vec![KeyToken::Named(NamedKey::Ctrl)]);
        assert_eq!(keys.encode().unwrap(), "<Ctrl>");
    }

    #[test]
    fn test_symbol() {
        assert_eq!(symbol(&KeyToken::Named(NamedKey::Ctrl)), "⌃");
        assert_eq!(symbol(&KeyToken::Named(NamedKey::Escape)), "esc");
        assert_eq!(symbol(&KeyToken::Char('w')), "w");
    }
}
