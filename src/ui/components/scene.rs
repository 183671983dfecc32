use crate::curriculum::{EditorMode, Scene};
use crate::ui::components::{MARGIN, SCENE_ROW};
use crate::ui::render_buffer::RenderBuffer;
use crate::ui::theme::Style;
use crate::ui::{Bounds, Drawable, RenderContext};

/// Editor preview of a level: the scene's start state, switching to its
/// end state while the success dwell runs.
pub struct ScenePreview;

impl ScenePreview {
    fn draw_text(
        &self,
        buffer: &mut RenderBuffer,
        context: &RenderContext,
        scene: &Scene,
        after: bool,
        bounds: &Bounds,
    ) {
        let colors = &context.theme.colors.scene;
        let text_style = Style::from(colors.text);
        let cursor_style = Style::from(colors.cursor);
        let highlight_style = Style::from(colors.highlight);

        let cursor = scene.cursor(after);
        let highlight = scene.highlight(after);
        let last_row = bounds.start_row + bounds.height;

        // Offsets count the newline that ends each line.
        let mut offset = 0;
        for (line_index, line) in scene.text(after).split('\n').enumerate() {
            let row = bounds.start_row + line_index;
            if row >= last_row {
                break;
            }
            buffer.fill_row(row, MARGIN, bounds.width, &text_style);
            let mut col = MARGIN;
            for c in line.chars().chain(std::iter::once(' ')) {
                let style = if offset == cursor {
                    &cursor_style
                } else if highlight.is_some_and(|(start, end)| offset >= start && offset < end) {
                    &highlight_style
                } else {
                    &text_style
                };
                buffer.set_cell(row, col, c, style);
                col += 1;
                offset += 1;
            }
        }
    }
}

impl Drawable for ScenePreview {
    fn draw(&self, buffer: &mut RenderBuffer, context: &RenderContext) -> anyhow::Result<()> {
        self.clear(buffer, context)?;
        let Some(scene) = context.snapshot.scene() else {
            return Ok(());
        };
        let bounds = self.bounds(buffer, context);
        let after = context.snapshot.show_after();
        let theme = context.theme;

        let label = if after { "After" } else { "Before" };
        let col = buffer.set_text(bounds.start_row, MARGIN, label, &theme.muted_style());
        buffer.set_text(
            bounds.start_row,
            col + 2,
            &format!("cursor {}", scene.cursor(after)),
            &theme.accent_style(),
        );

        let mode = scene.mode(after);
        let command_line = scene.command_line.as_deref().filter(|_| after);
        // Text area, then the mode line and the command line.
        let text_bounds = Bounds {
            start_row: bounds.start_row + 1,
            start_col: MARGIN,
            width: bounds.width.saturating_sub(MARGIN * 2),
            height: bounds.height.saturating_sub(3),
        };
        self.draw_text(buffer, context, scene, after, &text_bounds);

        let status_row = text_bounds.start_row + text_bounds.height;
        buffer.set_text(
            status_row,
            MARGIN,
            &format!(" {} ", mode.label()),
            &Style::from(theme.colors.scene.mode).bold(),
        );
        if let Some(command) = command_line {
            buffer.set_text(status_row + 1, MARGIN, command, &theme.base_style());
        } else if mode == EditorMode::Insert {
            buffer.set_text(status_row + 1, MARGIN, "-- INSERT --", &theme.muted_style());
        }
        Ok(())
    }

    fn bounds(&self, buffer: &RenderBuffer, _context: &RenderContext) -> Bounds {
        Bounds {
            start_row: SCENE_ROW,
            start_col: 0,
            width: buffer.width,
            height: buffer.height.saturating_sub(SCENE_ROW + 1),
        }
    }
}
