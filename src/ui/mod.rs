use crate::ui::render_buffer::RenderBuffer;
use context::RenderContext;

pub(crate) mod components;
pub mod compositor;
pub mod context;
pub mod render_buffer;
pub mod theme;

pub struct Bounds {
    pub start_row: usize,
    pub start_col: usize,
    pub width: usize,
    pub height: usize,
}

pub trait Drawable {
    fn draw(&self, buffer: &mut RenderBuffer, context: &RenderContext) -> anyhow::Result<()>;
    fn bounds(&self, buffer: &RenderBuffer, context: &RenderContext) -> Bounds;

    fn clear(&self, buffer: &mut RenderBuffer, context: &RenderContext) -> anyhow::Result<()> {
        let Bounds {
            start_row,
            start_col,
            width,
            height,
        } = self.bounds(buffer, context);

        let style = context.theme.base_style();
        for row in start_row..start_row + height {
            buffer.fill_row(row, start_col, width, &style);
        }

        Ok(())
    }
}
