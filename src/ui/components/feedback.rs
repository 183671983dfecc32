use crate::tutor::Status;
use crate::ui::components::{COMBO_ROW, MARGIN, STATUS_ROW};
use crate::ui::render_buffer::RenderBuffer;
use crate::ui::{Bounds, Drawable, RenderContext};

/// Status message and the last key combination pressed.
pub struct Feedback;

impl Drawable for Feedback {
    fn draw(&self, buffer: &mut RenderBuffer, context: &RenderContext) -> anyhow::Result<()> {
        self.clear(buffer, context)?;
        let snapshot = context.snapshot;
        let theme = context.theme;

        if let Some(message) = snapshot.feedback() {
            let (text, style) = match snapshot.status {
                Status::Success => (format!("✓ {}", message), theme.success_style().bold()),
                Status::Error => (format!("✗ {}", message), theme.error_style().bold()),
                Status::Waiting => (message, theme.muted_style()),
            };
            buffer.set_text(STATUS_ROW, MARGIN, &text, &style);
        }

        if let (Some(combo), Some(token)) = (&snapshot.last_combo, &snapshot.last_token) {
            let col = buffer.set_text(COMBO_ROW, MARGIN, "Last pressed: ", &theme.muted_style());
            let col = buffer.set_text(
                COMBO_ROW,
                col,
                combo,
                &crate::ui::theme::Style::from(theme.colors.warning),
            );
            buffer.set_text(
                COMBO_ROW,
                col,
                &format!(" = \"{}\"", token),
                &theme.success_style(),
            );
        }
        Ok(())
    }

    fn bounds(&self, buffer: &RenderBuffer, _context: &RenderContext) -> Bounds {
        Bounds {
            start_row: STATUS_ROW,
            start_col: 0,
            width: buffer.width,
            height: COMBO_ROW - STATUS_ROW + 1,
        }
    }
}
