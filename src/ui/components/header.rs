use crate::ui::components::{HEADER_ROW, MARGIN, PROGRESS_ROW};
use crate::ui::render_buffer::RenderBuffer;
use crate::ui::theme::Style;
use crate::ui::{Bounds, Drawable, RenderContext};

/// Title, position, streak and the progress bar.
pub struct Header;

impl Drawable for Header {
    fn draw(&self, buffer: &mut RenderBuffer, context: &RenderContext) -> anyhow::Result<()> {
        self.clear(buffer, context)?;
        let Bounds { width, .. } = self.bounds(buffer, context);
        let snapshot = context.snapshot;
        let theme = context.theme;

        let title = format!(" {} ", flow_title(context));
        let mut col = buffer.set_text(HEADER_ROW, 0, &title, &theme.accent_style().bold());
        let item = &snapshot.item;
        col = buffer.set_text(
            HEADER_ROW,
            col + 1,
            &format!("{} · {}", item.category, item.difficulty),
            &theme.muted_style(),
        );

        let position = if snapshot.all_completed {
            format!("{} / {}", snapshot.total, snapshot.total)
        } else {
            format!("{} / {}", snapshot.index + 1, snapshot.total)
        };
        let right = format!(
            "{}   streak {} (best {}) ",
            position, snapshot.streak, snapshot.best_streak
        );
        let right_len = right.chars().count();
        if width > right_len && width - right_len > col {
            buffer.set_text(HEADER_ROW, width - right_len, &right, &theme.base_style());
        }

        let bar_width = width.saturating_sub(MARGIN * 2);
        let filled = ((snapshot.progress() * bar_width as f64).round() as usize).min(bar_width);
        let bar = Style::from(theme.colors.progress);
        let empty = Style {
            foreground: theme.colors.progress.background,
            ..theme.base_style()
        };
        for offset in 0..bar_width {
            let (c, style) = if offset < filled {
                ('█', &bar)
            } else {
                ('░', &empty)
            };
            buffer.set_cell(PROGRESS_ROW, MARGIN + offset, c, style);
        }

        Ok(())
    }

    fn bounds(&self, buffer: &RenderBuffer, _context: &RenderContext) -> Bounds {
        Bounds {
            start_row: HEADER_ROW,
            start_col: 0,
            width: buffer.width,
            height: PROGRESS_ROW - HEADER_ROW + 1,
        }
    }
}

fn flow_title(context: &RenderContext) -> &'static str {
    match context.flow {
        crate::tutor::Flow::Exercise => "VIM SHORTCUTS",
        crate::tutor::Flow::Level => "VIM LEVELS",
    }
}
