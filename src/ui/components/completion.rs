use crate::ui::components::TASK_ROW;
use crate::ui::render_buffer::RenderBuffer;
use crate::ui::{Bounds, Drawable, RenderContext};

/// Shown in place of the task once the whole curriculum is done.
pub struct Completion;

impl Drawable for Completion {
    fn draw(&self, buffer: &mut RenderBuffer, context: &RenderContext) -> anyhow::Result<()> {
        self.clear(buffer, context)?;
        let Bounds {
            start_row, width, ..
        } = self.bounds(buffer, context);
        let snapshot = context.snapshot;
        let theme = context.theme;

        let lines = [
            ("🎉 Well done!".to_string(), theme.success_style().bold()),
            (
                format!("All {} items completed", snapshot.total),
                theme.base_style(),
            ),
            (
                format!("Best streak: {}", snapshot.best_streak),
                theme.accent_style(),
            ),
            ("Press F5 to start over".to_string(), theme.muted_style()),
        ];
        for (offset, (text, style)) in lines.iter().enumerate() {
            let col = width.saturating_sub(text.chars().count()) / 2;
            buffer.set_text(start_row + offset * 2, col, text, style);
        }
        Ok(())
    }

    fn bounds(&self, buffer: &RenderBuffer, _context: &RenderContext) -> Bounds {
        Bounds {
            start_row: TASK_ROW,
            start_col: 0,
            width: buffer.width,
            height: buffer.height.saturating_sub(TASK_ROW + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::tests::{Fixture, char_key};

    #[test]
    fn test_completion_summary() {
        let mut fixture = Fixture::new(&["x"]);
        let response = fixture.press(char_key('x'));
        fixture.apply(response);
        assert!(fixture.session.is_all_completed());
        let buffer = fixture.draw(&Completion, 40, 14);
        assert_eq!(buffer.row_text(TASK_ROW + 2).trim(), "All 1 items completed");
        assert_eq!(buffer.row_text(TASK_ROW + 4).trim(), "Best streak: 1");
    }
}
