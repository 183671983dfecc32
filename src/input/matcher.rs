use crossterm::event::KeyModifiers;

use crate::input::keys::sequence::KeySequence;
use crate::input::keys::{KeyToken, NamedKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    NoMatch,
    /// Number of expected positions the key press satisfied (1, or 2 for a
    /// collapsed `Ctrl` chord); the sequence is not finished yet.
    Advance(usize),
    /// The last expected position was just satisfied.
    Complete,
}

pub fn keys_match(pressed: &KeyToken, expected: &KeyToken) -> bool {
    if pressed == expected {
        return true;
    }
    if let (Some(p), Some(e)) = (pressed.as_char(), expected.as_char()) {
        if e.is_ascii_alphabetic() && p.to_ascii_lowercase() == e.to_ascii_lowercase() {
            // Vim commands are case-distinct: `g` and `G` are different keys.
            return pressed == expected;
        }
    }
    false
}

/// Judges one normalized key press against the expected sequence after
/// `consumed` positions have already been satisfied.
///
/// When the current position is `Ctrl` and the key arrived with control held,
/// a press matching the following position satisfies both at once: Ctrl+d is
/// one terminal event, not two.
pub fn match_key(
    token: &KeyToken,
    expected: &KeySequence,
    consumed: usize,
    modifiers: KeyModifiers,
) -> MatchOutcome {
    let Some(current) = expected.get(consumed) else {
        return MatchOutcome::NoMatch;
    };

    let chord = current.is_named(NamedKey::Ctrl)
        && modifiers.contains(KeyModifiers::CONTROL)
        && expected
            .get(consumed + 1)
            .is_some_and(|next| keys_match(token, next));

    let satisfied = if chord {
        2
    } else if keys_match(token, current) {
        1
    } else {
        return MatchOutcome::NoMatch;
    };

    if consumed + satisfied == expected.len() {
        MatchOutcome::Complete
    } else {
        MatchOutcome::Advance(satisfied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keys::parse_key_sequence;

    fn expected(notation: &str) -> KeySequence {
        KeySequence::from_keys(parse_key_sequence(notation).unwrap())
    }

    fn char_key(c: char) -> KeyToken {
        KeyToken::Char(c)
    }

    #[test]
    fn test_exact_match_advances() {
        let keys = expected("dd");
        assert_eq!(
            match_key(&char_key('d'), &keys, 0, KeyModifiers::NONE),
            MatchOutcome::Advance(1)
        );
        assert_eq!(
            match_key(&char_key('d'), &keys, 1, KeyModifiers::NONE),
            MatchOutcome::Complete
        );
    }

    #[test]
    fn test_mismatch_after_progress() {
        let keys = expected("gg");
        assert_eq!(
            match_key(&char_key('g'), &keys, 0, KeyModifiers::NONE),
            MatchOutcome::Advance(1)
        );
        assert_eq!(
            match_key(&char_key('x'), &keys, 1, KeyModifiers::NONE),
            MatchOutcome::NoMatch
        );
    }

    #[test]
    fn test_case_is_significant() {
        let keys = expected("G");
        assert_eq!(
            match_key(&char_key('g'), &keys, 0, KeyModifiers::NONE),
            MatchOutcome::NoMatch
        );
        assert_eq!(
            match_key(&char_key('G'), &keys, 0, KeyModifiers::SHIFT),
            MatchOutcome::Complete
        );
        assert!(!keys_match(&char_key('G'), &char_key('g')));
    }

    #[test]
    fn test_command_line_sequence() {
        let keys = expected(":wq<Enter>");
        let presses = [
            char_key(':'),
            char_key('w'),
            char_key('q'),
            KeyToken::Named(NamedKey::Enter),
        ];
        let outcomes: Vec<_> = presses
            .iter()
            .enumerate()
            .map(|(consumed, token)| match_key(token, &keys, consumed, KeyModifiers::NONE))
            .collect();
        assert_eq!(
            outcomes,
            vec![
                MatchOutcome::Advance(1),
                MatchOutcome::Advance(1),
                MatchOutcome::Advance(1),
                MatchOutcome::Complete
            ]
        );
    }

    #[test]
    fn test_ctrl_chord_collapses_in_one_event() {
        let keys = expected("<C-d>");
        assert_eq!(
            match_key(&char_key('d'), &keys, 0, KeyModifiers::CONTROL),
            MatchOutcome::Complete
        );
        let keys = expected("<C-r>");
        assert_eq!(
            match_key(&char_key('r'), &keys, 0, KeyModifiers::CONTROL),
            MatchOutcome::Complete
        );
    }

    #[test]
    fn test_ctrl_chord_followed_by_more_keys() {
        let keys = KeySequence::from_keys(vec![
            KeyToken::Named(NamedKey::Ctrl),
            char_key('w'),
            char_key('j'),
        ]);
        assert_eq!(
            match_key(&char_key('w'), &keys, 0, KeyModifiers::CONTROL),
            MatchOutcome::Advance(2)
        );
        assert_eq!(
            match_key(&char_key('j'), &keys, 2, KeyModifiers::NONE),
            MatchOutcome::Complete
        );
    }

    #[test]
    fn test_ctrl_chord_requires_control_held() {
        let keys = expected("<C-d>");
        assert_eq!(
            match_key(&char_key('d'), &keys, 0, KeyModifiers::NONE),
            MatchOutcome::NoMatch
        );
    }

    #[test]
    fn test_ctrl_chord_with_wrong_letter() {
        let keys = expected("<C-d>");
        assert_eq!(
            match_key(&char_key('u'), &keys, 0, KeyModifiers::CONTROL),
            MatchOutcome::NoMatch
        );
    }

    #[test]
    fn test_ctrl_not_at_current_position_is_not_collapsed() {
        // `d` then `Ctrl`: control held on the first key does not skip ahead.
        let keys = KeySequence::from_keys(vec![
            char_key('d'),
            KeyToken::Named(NamedKey::Ctrl),
            char_key('d'),
        ]);
        assert_eq!(
            match_key(&char_key('d'), &keys, 0, KeyModifiers::CONTROL),
            MatchOutcome::Advance(1)
        );
        assert_eq!(
            match_key(&char_key('d'), &keys, 1, KeyModifiers::NONE),
            MatchOutcome::NoMatch
        );
    }

    #[test]
    fn test_unresolved_never_matches() {
        let keys = expected("^");
        let dead = KeyToken::Unresolved("Dead".to_string());
        assert_eq!(
            match_key(&dead, &keys, 0, KeyModifiers::SHIFT),
            MatchOutcome::NoMatch
        );
    }

    #[test]
    fn test_out_of_range_progress() {
        let keys = expected("x");
        assert_eq!(
            match_key(&char_key('x'), &keys, 1, KeyModifiers::NONE),
            MatchOutcome::NoMatch
        );
    }
}
