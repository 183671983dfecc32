use crate::ui::components::MARGIN;
use crate::ui::render_buffer::RenderBuffer;
use crate::ui::{Bounds, Drawable, RenderContext};

const HELP: &str = "F1 hint · F2 go to · F5 reset · PgUp/PgDn previous/next · F10 quit";

/// Help line, or the go-to prompt while it is open.
pub struct Footer;

impl Drawable for Footer {
    fn draw(&self, buffer: &mut RenderBuffer, context: &RenderContext) -> anyhow::Result<()> {
        self.clear(buffer, context)?;
        let Bounds { start_row, .. } = self.bounds(buffer, context);
        match context.prompt {
            Some(digits) => {
                let text = format!(
                    "Go to item (1-{}): {}_   Enter jump · Esc cancel",
                    context.snapshot.total, digits
                );
                buffer.set_text(start_row, MARGIN, &text, &context.theme.accent_style());
            }
            None => {
                buffer.set_text(start_row, MARGIN, HELP, &context.theme.muted_style());
            }
        }
        Ok(())
    }

    fn bounds(&self, buffer: &RenderBuffer, _context: &RenderContext) -> Bounds {
        Bounds {
            start_row: buffer.height.saturating_sub(1),
            start_col: 0,
            width: buffer.width,
            height: 1,
        }
    }
}
