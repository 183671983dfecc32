use serde::{Deserialize, Serialize, Serializer};
use crate::input::keys::{KeyEncoder, KeyToken, parse_key_sequence};

/// Ordered expected keys of one curriculum item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeySequence {
    pub keys: Vec<KeyToken>,
}

impl KeySequence {
    pub fn from_keys(keys: Vec<KeyToken>) -> Self {
        Self { keys }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn get(&self, index: usize) -> Option<&KeyToken> {
        self.keys.get(index)
    }

    pub fn contains(&self, token: &KeyToken) -> bool {
        self.keys.contains(token)
    }
}

impl Serialize for KeySequence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let string = self.encode()
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&string)
    }
}

// Either `keys = ":w<Enter>"` or `keys = [":", "w", "Enter"]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SequenceRepr {
    Notation(String),
    Tokens(Vec<String>),
}

impl<'de> Deserialize<'de> for KeySequence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let keys = match SequenceRepr::deserialize(deserializer)? {
            SequenceRepr::Notation(notation) => {
                parse_key_sequence(&notation).map_err(serde::de::Error::custom)?
            }
            SequenceRepr::Tokens(tokens) => tokens
                .iter()
                .map(|token| KeyToken::parse(token))
                .collect::<anyhow::Result<Vec<_>>>()
                .map_err(serde::de::Error::custom)?,
        };
        Ok(KeySequence::from_keys(keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keys::NamedKey;

    #[derive(Deserialize)]
    struct Holder {
        keys: KeySequence,
    }

    #[test]
    fn test_deserialize_token_list() {
        let holder: Holder = toml::from_str(r#"keys = ["Ctrl", "d"]"#).unwrap();
        assert_eq!(
            holder.keys.keys,
            vec![KeyToken::Named(NamedKey::Ctrl), KeyToken::Char('d')]
        );
    }

    #[test]
    fn test_deserialize_notation() {
        let holder: Holder = toml::from_str(r#"keys = ":q!<Enter>""#).unwrap();
        assert_eq!(holder.keys.len(), 4);
        assert_eq!(holder.keys.get(3), Some(&KeyToken::Named(NamedKey::Enter)));
    }

    #[test]
    fn test_deserialize_rejects_unknown_token() {
        let result: Result<Holder, _> = toml::from_str(r#"keys = ["Ctrl", "Hyper"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_as_notation() {
        let keys = KeySequence::from_keys(vec![
            KeyToken::Named(NamedKey::Ctrl),
            KeyToken::Char('r'),
        ]);
        assert_eq!(keys.encode().unwrap(), "<C-r>");
    }

    #[test]
    fn test_contains() {
        let keys = KeySequence::from_keys(vec![KeyToken::Char('`'), KeyToken::Char('a')]);
        assert!(keys.contains(&KeyToken::Char('`')));
        assert!(!keys.contains(&KeyToken::Char('b')));
    }
}
