use super::color::Color;
use std::ops::Range;
use unicode_width::UnicodeWidthChar;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cell {
    Empty,
    Glyph { ch: char, color: Color },
    /// The right half of a double-width glyph.
    Continuation,
}

/// A fixed-size grid of coloured characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        Self { width, height, cells: vec![Cell::Empty; usize::from(width) * usize::from(height)] }
    }

    pub(crate) fn width(&self) -> u16 {
        self.width
    }

    pub(crate) fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, column: i32, row: i32) -> Option<usize> {
        let column = u16::try_from(column).ok().filter(|c| *c < self.width)?;
        let row = u16::try_from(row).ok().filter(|r| *r < self.height)?;
        Some(usize::from(row) * usize::from(self.width) + usize::from(column))
    }

    /// Write `text` starting at `(column, row)`. Anything outside the canvas is dropped.
    pub(crate) fn put_str(&mut self, column: i32, row: i32, text: &str, color: Color) {
        self.put_str_clipped(column, row, text, color, i32::MIN..i32::MAX);
    }

    /// Like [`Canvas::put_str`], but glyphs that do not fit entirely within `columns` are dropped
    /// as well.
    pub(crate) fn put_str_clipped(&mut self, column: i32, row: i32, text: &str, color: Color, columns: Range<i32>) {
        let mut column = column;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0) as i32;
            if width == 0 {
                continue;
            }
            let inside = columns.start <= column && column.saturating_add(width) <= columns.end;
            if inside && !ch.is_whitespace() {
                if let Some(index) = self.index(column, row) {
                    self.cells[index] = Cell::Glyph { ch, color };
                }
                for extra in 1..width {
                    if let Some(index) = self.index(column + extra, row) {
                        self.cells[index] = Cell::Continuation;
                    }
                }
            }
            column += width;
        }
    }

    pub(crate) fn row(&self, row: u16) -> &[Cell] {
        let start = usize::from(row) * usize::from(self.width);
        self.cells.get(start..start + usize::from(self.width)).unwrap_or(&[])
    }

    /// The canvas as plain text, one line per row, trailing spaces removed.
    pub(crate) fn to_plain_text(&self) -> String {
        let mut lines: Vec<String> = (0..self.height)
            .map(|row| {
                let line: String = self
                    .row(row)
                    .iter()
                    .filter_map(|cell| match cell {
                        Cell::Empty => Some(' '),
                        Cell::Glyph { ch, .. } => Some(*ch),
                        Cell::Continuation => None,
                    })
                    .collect();
                line.trim_end().to_string()
            })
            .collect();
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = Color::new(255, 255, 255);

    #[test]
    fn clips_outside_writes() {
        let mut canvas = Canvas::new(4, 2);
        canvas.put_str(-2, 0, "abcdef", WHITE);
        canvas.put_str(0, 5, "zzz", WHITE);
        canvas.put_str(0, -1, "zzz", WHITE);
        assert_eq!(canvas.to_plain_text(), "cdef");
    }

    #[test]
    fn clipped_writes_stay_in_columns() {
        let mut canvas = Canvas::new(8, 1);
        canvas.put_str(0, 0, "ab", WHITE);
        canvas.put_str_clipped(0, 0, "xxxxxxxx", WHITE, 3..6);
        assert_eq!(canvas.to_plain_text(), "ab xxx");
    }

    #[test]
    fn clipping_drops_straddling_wide_glyphs() {
        let mut canvas = Canvas::new(6, 1);
        canvas.put_str_clipped(0, 0, "日本x", WHITE, 1..5);
        assert_eq!(canvas.row(0)[0], Cell::Empty);
        assert_eq!(canvas.row(0)[1], Cell::Empty);
        assert_eq!(canvas.to_plain_text(), "  本x");
    }

    #[test]
    fn spaces_do_not_overwrite() {
        let mut canvas = Canvas::new(5, 1);
        canvas.put_str(0, 0, "xxxxx", WHITE);
        canvas.put_str(0, 0, "a b", WHITE);
        assert_eq!(canvas.to_plain_text(), "axbxx");
    }

    #[test]
    fn wide_glyphs_take_two_cells() {
        let mut canvas = Canvas::new(6, 1);
        canvas.put_str(0, 0, "日本x", WHITE);
        assert_eq!(canvas.row(0)[1], Cell::Continuation);
        assert_eq!(canvas.to_plain_text(), "日本x");
    }

    #[test]
    fn drops_trailing_blank_rows() {
        let mut canvas = Canvas::new(3, 3);
        canvas.put_str(1, 0, "a", WHITE);
        assert_eq!(canvas.to_plain_text(), " a");
    }
}
