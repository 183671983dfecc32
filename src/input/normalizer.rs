use crate::input::keys::sequence::KeySequence;
use crate::input::keys::{DEAD_KEY, KeyToken, RawKeyEvent};
use crate::input::layout::KeyboardLayout;

/// Result of normalizing one raw key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedKey {
    pub token: KeyToken,
    /// Held modifiers plus the physical key label, e.g. `Option + 4`.
    /// Display only; the matcher never looks at it.
    pub combo: String,
}

/// Turns raw key presses into logical key tokens using a keyboard layout.
#[derive(Debug, Clone, Default)]
pub struct KeyNormalizer {
    layout: KeyboardLayout,
}

fn rename(key: &str) -> &str {
    match key {
        "Control" => "Ctrl",
        " " => "Space",
        other => other,
    }
}

impl KeyNormalizer {
    pub fn new(layout: KeyboardLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }

    /// `expected` is only consulted for accent decomposition: when it holds
    /// the layout's accent trigger, a composed vowel such as `à` counts as
    /// the plain letter the user meant to type after the trigger.
    pub fn normalize(&self, event: &RawKeyEvent, expected: &KeySequence) -> NormalizedKey {
        let mut key = rename(&event.key).to_string();

        if key == DEAD_KEY {
            if let Some(produced) = self.layout.resolve_dead_key(&event.code, event.modifiers) {
                key = produced.to_string();
            }
        }

        let mut token = KeyToken::from_raw(&key);

        if expected.contains(&KeyToken::Char(self.layout.accent_trigger)) {
            if let Some(plain) = token
                .as_char()
                .and_then(|c| self.layout.decompose_accent(c))
            {
                token = KeyToken::Char(plain);
            }
        }

        NormalizedKey {
            token,
            combo: self.combo(event),
        }
    }

    /// Terminals compose a dead key with the next letter and only report the
    /// result, e.g. `à` for Option+, then `a`. When the trigger is the key
    /// expected at `position`, the swallowed dead key press is put back in
    /// front of the composed one.
    pub fn split_composed(
        &self,
        event: RawKeyEvent,
        expected: &KeySequence,
        position: usize,
    ) -> Vec<RawKeyEvent> {
        let trigger = self.layout.accent_trigger;
        if expected.get(position) != Some(&KeyToken::Char(trigger)) {
            return vec![event];
        }
        let mut chars = event.key.chars();
        let composed = match (chars.next(), chars.next()) {
            (Some(c), None) => self.layout.decompose_accent(c).is_some(),
            _ => false,
        };
        match self.layout.dead_key_for(trigger) {
            Some(rule) if composed => {
                let dead = RawKeyEvent::new(DEAD_KEY, rule.code.clone())
                    .with_modifiers(rule.modifiers());
                vec![dead, event]
            }
            _ => vec![event],
        }
    }

    pub fn combo(&self, event: &RawKeyEvent) -> String {
        let mut parts = Vec::new();
        if event.ctrl() {
            parts.push("Ctrl".to_string());
        }
        if event.alt() {
            parts.push("Option".to_string());
        }
        if event.shift() {
            parts.push("Shift".to_string());
        }
        if event.meta() {
            parts.push("Cmd".to_string());
        }
        parts.push(self.layout.physical_label(&event.code));
        parts.join(" + ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keys::{NamedKey, parse_key_sequence};
    use crossterm::event::KeyModifiers;

    fn expected(notation: &str) -> KeySequence {
        KeySequence::from_keys(parse_key_sequence(notation).unwrap())
    }

    fn normalizer() -> KeyNormalizer {
        KeyNormalizer::new(KeyboardLayout::turkish_mac())
    }

    #[test]
    fn test_renames_control_and_space() {
        let normalizer = normalizer();
        let ctrl = RawKeyEvent::new("Control", "ControlLeft");
        assert_eq!(
            normalizer.normalize(&ctrl, &expected("x")).token,
            KeyToken::Named(NamedKey::Ctrl)
        );
        let space = RawKeyEvent::new(" ", "Space");
        assert_eq!(
            normalizer.normalize(&space, &expected("x")).token,
            KeyToken::Named(NamedKey::Space)
        );
    }

    #[test]
    fn test_printable_keys_keep_case() {
        let normalizer = normalizer();
        let upper = RawKeyEvent::new("G", "KeyG").with_modifiers(KeyModifiers::SHIFT);
        assert_eq!(normalizer.normalize(&upper, &expected("G")).token, KeyToken::Char('G'));
    }

    #[test]
    fn test_dead_key_resolution() {
        let normalizer = normalizer();
        let caret = RawKeyEvent::new("Dead", "Digit3").with_modifiers(KeyModifiers::SHIFT);
        assert_eq!(normalizer.normalize(&caret, &expected("^")).token, KeyToken::Char('^'));

        let backtick = RawKeyEvent::new("Dead", "Backslash").with_modifiers(KeyModifiers::ALT);
        assert_eq!(
            normalizer.normalize(&backtick, &expected("`a")).token,
            KeyToken::Char('`')
        );
    }

    #[test]
    fn test_unknown_dead_key_stays_unresolved() {
        let normalizer = normalizer();
        let dead = RawKeyEvent::new("Dead", "BracketLeft");
        assert_eq!(
            normalizer.normalize(&dead, &expected("^")).token,
            KeyToken::Unresolved("Dead".to_string())
        );
    }

    #[test]
    fn test_accent_decomposed_only_with_backtick_expected() {
        let normalizer = normalizer();
        let composed = RawKeyEvent::new("à", "KeyA");
        assert_eq!(
            normalizer.normalize(&composed, &expected("`a")).token,
            KeyToken::Char('a')
        );
        assert_eq!(
            normalizer.normalize(&composed, &expected("a")).token,
            KeyToken::Char('à')
        );
    }

    #[test]
    fn test_us_layout_has_no_accents() {
        let normalizer = KeyNormalizer::new(KeyboardLayout::us());
        let composed = RawKeyEvent::new("à", "KeyA");
        assert_eq!(
            normalizer.normalize(&composed, &expected("`a")).token,
            KeyToken::Char('à')
        );
    }

    #[test]
    fn test_combo_lists_modifiers_and_physical_key() {
        let normalizer = normalizer();
        let dollar = RawKeyEvent::new("$", "Digit4").with_modifiers(KeyModifiers::ALT);
        assert_eq!(normalizer.normalize(&dollar, &expected("$")).combo, "Option + 4");

        let chord = RawKeyEvent::new("d", "KeyD")
            .with_modifiers(KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert_eq!(normalizer.combo(&chord), "Ctrl + Shift + d");

        let colon = RawKeyEvent::new(":", "Period").with_modifiers(KeyModifiers::SHIFT);
        assert_eq!(normalizer.combo(&colon), "Shift + .");

        let escape = RawKeyEvent::new("Escape", "Escape");
        assert_eq!(normalizer.combo(&escape), "Escape");
    }

    #[test]
    fn test_split_composed_vowel() {
        let normalizer = normalizer();
        let expected = expected("`a");
        let composed = RawKeyEvent::new("à", "KeyA");

        let split = normalizer.split_composed(composed.clone(), &expected, 0);
        assert_eq!(split.len(), 2);
        assert_eq!(split[0].key, DEAD_KEY);
        assert_eq!(split[0].code, "Backslash");
        assert!(split[0].alt());
        assert_eq!(split[1], composed);

        // The trigger was already typed: nothing to put back.
        assert_eq!(normalizer.split_composed(composed.clone(), &expected, 1), vec![composed]);
    }

    #[test]
    fn test_split_leaves_other_keys_alone() {
        let normalizer = normalizer();
        let plain = RawKeyEvent::new("a", "KeyA");
        assert_eq!(normalizer.split_composed(plain.clone(), &expected("`a"), 0), vec![plain]);

        let composed = RawKeyEvent::new("à", "KeyA");
        assert_eq!(
            normalizer.split_composed(composed.clone(), &expected("xa"), 0),
            vec![composed.clone()]
        );
        let us = KeyNormalizer::new(KeyboardLayout::us());
        assert_eq!(us.split_composed(composed.clone(), &expected("`a"), 0), vec![composed]);
    }
}
