use super::theme::Style;
use anyhow::Result;
use crossterm::{QueueableCommand, cursor, style};
use std::fmt::{Debug, Write as DebugWrite};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub c: char,
    pub style: Style,
}

#[derive(Debug, Clone)]
pub struct Change<'a> {
    pub x: usize,
    pub y: usize,
    pub cell: &'a Cell,
}

impl Change<'_> {
    pub(super) fn flush<W: Write>(&self, writer: &mut W, base: &Style) -> Result<()> {
        let style = self.cell.style.to_content_style(base);
        let content = style::StyledContent::new(style, self.cell.c);
        writer
            .queue(cursor::MoveTo(self.x as u16, self.y as u16))?
            .queue(style::Print(content))?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct RenderBuffer {
    pub(super) cells: Vec<Cell>,
    pub(super) width: usize,
    pub(super) height: usize,
}

impl Debug for RenderBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RenderBuffer\n")?;
        for row in 0..self.height {
            for cell in self.row(row) {
                let format = if cell.c == ' ' { '·' } else { cell.c };
                f.write_char(format)?;
            }
            f.write_str("\n")?
        }
        Ok(())
    }
}

impl RenderBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let cells = vec![
            Cell {
                c: ' ',
                style: Style::default(),
            };
            width * height
        ];
        Self {
            cells,
            width,
            height,
        }
    }

    pub fn set_cell(&mut self, row: usize, col: usize, c: char, style: &Style) {
        if col >= self.width || row >= self.height {
            return;
        }
        if let Some(current) = self.cells.get_mut(row * self.width + col) {
            *current = Cell {
                c,
                style: style.clone(),
            };
        }
    }

    /// Writes `text` from `col`, clipped at the right edge. Returns the column
    /// after the last character written.
    pub fn set_text(&mut self, row: usize, col: usize, text: &str, style: &Style) -> usize {
        let mut next = col;
        for c in text.chars() {
            if next >= self.width {
                break;
            }
            self.set_cell(row, next, c, style);
            next += 1;
        }
        next
    }

    pub fn fill_row(&mut self, row: usize, col: usize, width: usize, style: &Style) {
        for offset in 0..width {
            self.set_cell(row, col + offset, ' ', style);
        }
    }

    pub fn diff(&self, other: &Self) -> Vec<Change<'_>> {
        let mut changes = Vec::new();
        for (pos, cell) in self.cells.iter().enumerate() {
            if other.cells.get(pos) != Some(cell) {
                let x = pos % self.width;
                let y = pos / self.width;
                changes.push(Change { x, y, cell });
            }
        }
        changes
    }

    pub(super) fn flush<W: Write>(&self, writer: &mut W, base: &Style) -> Result<()> {
        writer.queue(cursor::MoveTo(0, 0))?;
        for cell in self.cells.iter() {
            let style = cell.style.to_content_style(base);
            let content = style::StyledContent::new(style, cell.c);
            writer.queue(style::Print(content))?;
        }
        Ok(())
    }

    fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    #[cfg(test)]
    pub fn row_text(&self, row: usize) -> String {
        if row >= self.height {
            return String::new();
        }
        self.row(row).iter().map(|cell| cell.c).collect()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if col >= self.width {
            return None;
        }
        self.cells.get(row * self.width + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_clips() {
        let mut buffer = RenderBuffer::new(5, 2);
        let end = buffer.set_text(0, 2, "hello", &Style::default());
        assert_eq!(end, 5);
        assert_eq!(buffer.row_text(0), "  hel");
        assert_eq!(buffer.row_text(1), "     ");
        buffer.set_text(5, 0, "x", &Style::default());
        assert_eq!(buffer.row_text(5), "");
    }

    #[test]
    fn test_diff_reports_changed_cells() {
        let previous = RenderBuffer::new(4, 2);
        let mut current = previous.clone();
        current.set_cell(1, 2, '⌃', &Style::default());
        let changes = current.diff(&previous);
        assert_eq!(changes.len(), 1);
        assert_eq!((changes[0].x, changes[0].y), (2, 1));
        assert_eq!(changes[0].cell.c, '⌃');
    }

    #[test]
    fn test_flush_writes_every_cell() {
        let mut buffer = RenderBuffer::new(3, 1);
        buffer.set_text(0, 0, "abc", &Style::default());
        let mut out = Vec::new();
        buffer.flush(&mut out, &Style::default()).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains('a') && written.contains('c'));
    }
}
