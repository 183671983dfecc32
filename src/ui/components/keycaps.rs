use crossterm::style::Colors;

use crate::tutor::Status;
use crate::ui::components::{KEYCAP_ROW, MARGIN};
use crate::ui::render_buffer::RenderBuffer;
use crate::ui::theme::Style;
use crate::ui::{Bounds, Drawable, RenderContext};

const CAP_SEPARATOR: &str = " + ";
const GROUP_SEPARATOR: &str = "  →  ";

/// The caps to press for every expected key, colored by progress.
pub struct KeyCaps;

impl KeyCaps {
    fn colors(&self, position: usize, context: &RenderContext) -> Colors {
        let snapshot = context.snapshot;
        let caps = &context.theme.colors.keycap;
        if position < snapshot.consumed_keys().len() {
            caps.done
        } else if snapshot.status == Status::Error {
            caps.failed
        } else if position == snapshot.consumed && snapshot.listening {
            caps.current
        } else {
            caps.pending
        }
    }
}

impl Drawable for KeyCaps {
    fn draw(&self, buffer: &mut RenderBuffer, context: &RenderContext) -> anyhow::Result<()> {
        self.clear(buffer, context)?;
        let separator = context.theme.muted_style();
        let mut col = MARGIN;

        for (position, token) in context.snapshot.item.keys.keys.iter().enumerate() {
            if position > 0 {
                col = buffer.set_text(KEYCAP_ROW, col, GROUP_SEPARATOR, &separator);
            }
            let style = Style::from(self.colors(position, context)).bold();
            for (i, cap) in context.layout.hint_for(token).iter().enumerate() {
                if i > 0 {
                    col = buffer.set_text(KEYCAP_ROW, col, CAP_SEPARATOR, &separator);
                }
                col = buffer.set_text(KEYCAP_ROW, col, &format!(" {} ", cap), &style);
            }
        }
        Ok(())
    }

    fn bounds(&self, buffer: &RenderBuffer, _context: &RenderContext) -> Bounds {
        Bounds {
            start_row: KEYCAP_ROW,
            start_col: 0,
            width: buffer.width,
            height: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::tests::{Fixture, char_key};

    fn background(buffer: &RenderBuffer, col: usize) -> Option<crossterm::style::Color> {
        buffer.cell(KEYCAP_ROW, col).and_then(|cell| cell.style.background)
    }

    #[test]
    fn test_caps_use_layout_hints() {
        let fixture = Fixture::new(&["$G"]);
        let buffer = fixture.draw(&KeyCaps, 60, 8);
        assert_eq!(
            buffer.row_text(KEYCAP_ROW).trim_end(),
            "   ⌥  +  4   →   ⇧  +  G"
        );
    }

    #[test]
    fn test_named_keys_use_symbols() {
        let fixture = Fixture::new(&["<C-r>:w<Enter>"]);
        let buffer = fixture.draw(&KeyCaps, 60, 8);
        let row = buffer.row_text(KEYCAP_ROW);
        assert!(row.contains(" ⌃ "));
        assert!(row.contains(" ↵ "));
    }

    #[test]
    fn test_progress_colors() {
        let mut fixture = Fixture::new(&["dd"]);
        let caps = fixture.theme.colors.keycap.clone();
        let buffer = fixture.draw(&KeyCaps, 40, 8);
        assert_eq!(background(&buffer, MARGIN), caps.current.background);

        fixture.press(char_key('d'));
        let buffer = fixture.draw(&KeyCaps, 40, 8);
        assert_eq!(background(&buffer, MARGIN), caps.done.background);
        let second = MARGIN + 3 + GROUP_SEPARATOR.chars().count();
        assert_eq!(background(&buffer, second), caps.current.background);

        fixture.press(char_key('x'));
        let buffer = fixture.draw(&KeyCaps, 40, 8);
        assert_eq!(background(&buffer, second), caps.failed.background);
    }
}
