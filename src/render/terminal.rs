use super::canvas::{Canvas, Cell};
use super::color::Color;
use crossterm::{
    cursor, queue,
    style::{self, Print},
    terminal::{self, ClearType},
};
use std::io::{self, Write};

/// Owns the terminal while the page is shown: raw mode, alternate screen, hidden cursor.
///
/// Everything is restored when the guard is dropped, including on error paths.
pub(crate) struct TerminalGuard<W: Write> {
    writer: W,
    restored: bool,
}

impl<W: Write> TerminalGuard<W> {
    pub(crate) fn acquire(mut writer: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = crossterm::execute!(writer, terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self { writer, restored: false })
    }

    pub(crate) fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Draw the rows `[scroll, scroll + height)` of `canvas` over a `background` fill.
    pub(crate) fn draw(&mut self, canvas: &Canvas, scroll: u16, height: u16, background: Color) -> io::Result<()> {
        let background = style::Color::from(background);
        queue!(self.writer, style::SetBackgroundColor(background), terminal::Clear(ClearType::All))?;
        for screen_row in 0..height {
            let Some(row) = scroll.checked_add(screen_row).filter(|row| *row < canvas.height()) else {
                break;
            };
            queue!(self.writer, cursor::MoveTo(0, screen_row))?;
            let mut current = None;
            for cell in canvas.row(row) {
                match cell {
                    Cell::Empty => queue!(self.writer, Print(' '))?,
                    Cell::Glyph { ch, color } => {
                        if current != Some(*color) {
                            queue!(self.writer, style::SetForegroundColor((*color).into()))?;
                            current = Some(*color);
                        }
                        queue!(self.writer, Print(ch))?;
                    }
                    Cell::Continuation => {}
                }
            }
        }
        self.writer.flush()
    }

    pub(crate) fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        crossterm::execute!(self.writer, style::ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("failed to restore terminal: {e}");
        }
    }
}
