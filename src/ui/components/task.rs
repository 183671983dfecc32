use crate::ui::components::{HINT_ROW, MARGIN, TASK_ROW};
use crate::ui::render_buffer::RenderBuffer;
use crate::ui::{Bounds, Drawable, RenderContext};

/// Task description and, when toggled on, the hint.
pub struct Task;

impl Drawable for Task {
    fn draw(&self, buffer: &mut RenderBuffer, context: &RenderContext) -> anyhow::Result<()> {
        self.clear(buffer, context)?;
        let item = &context.snapshot.item;
        let theme = context.theme;

        buffer.set_text(TASK_ROW, MARGIN, &item.description, &theme.base_style().bold());

        let (hint, style) = match &item.hint {
            Some(hint) if context.snapshot.hint_visible => {
                (format!("Hint: {}", hint), theme.accent_style().italic())
            }
            Some(_) => ("F1 shows a hint".to_string(), theme.muted_style()),
            None => return Ok(()),
        };
        buffer.set_text(HINT_ROW, MARGIN, &hint, &style);
        Ok(())
    }

    fn bounds(&self, buffer: &RenderBuffer, _context: &RenderContext) -> Bounds {
        Bounds {
            start_row: TASK_ROW,
            start_col: 0,
            width: buffer.width,
            height: HINT_ROW - TASK_ROW + 1,
        }
    }
}
