//! A [`DisplayDevice`] backed by the controlling terminal.
//!
//! Opening a [`TerminalDisplay`] switches the terminal into raw mode on the
//! alternate screen with the cursor hidden; dropping it puts everything back.
//! Cell updates are queued and only written out on [`DisplayDevice::flush`].

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::colors::{Cell, Color};
use crate::display::DisplayDevice;
use crate::error::Result;
use crate::screen::SessionGuard;

/// The terminal color used for a palette entry.
pub fn terminal_color(color: Color) -> style::Color {
    match color {
        Color::Black => style::Color::Black,
        Color::Blue => style::Color::DarkBlue,
        Color::Green => style::Color::DarkGreen,
        Color::Cyan => style::Color::DarkCyan,
        Color::Red => style::Color::DarkRed,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Yellow => style::Color::DarkYellow,
        Color::White => style::Color::Grey,
    }
}

pub struct TerminalDisplay {
    out: Stdout,
    // Colors last sent, so runs of same-colored cells skip the escape codes.
    colors: Option<(Color, Color)>,
    _session: SessionGuard,
}

impl TerminalDisplay {
    /// Takes over the terminal. Fails if another display session is open.
    pub fn open() -> Result<Self> {
        let session = SessionGuard::acquire()?;
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        if let Err(err) = execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(err.into());
        }
        log::debug!("terminal display opened");

        Ok(Self {
            out,
            colors: None,
            _session: session,
        })
    }

    fn move_to(&mut self, row: usize, col: usize) -> Result<bool> {
        let (Ok(row), Ok(col)) = (u16::try_from(row), u16::try_from(col)) else {
            return Ok(false);
        };
        queue!(self.out, cursor::MoveTo(col, row))?;
        Ok(true)
    }
}

impl DisplayDevice for TerminalDisplay {
    fn size(&self) -> Result<(usize, usize)> {
        let (cols, rows) = terminal::size()?;
        Ok((rows as usize, cols as usize))
    }

    fn set_cell(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        if !self.move_to(row, col)? {
            return Ok(());
        }
        if self.colors != Some((cell.fg, cell.bg)) {
            queue!(
                self.out,
                SetForegroundColor(terminal_color(cell.fg)),
                SetBackgroundColor(terminal_color(cell.bg))
            )?;
            self.colors = Some((cell.fg, cell.bg));
        }
        queue!(self.out, Print(cell.glyph))?;
        Ok(())
    }

    fn clear_cell(&mut self, row: usize, col: usize) -> Result<()> {
        if !self.move_to(row, col)? {
            return Ok(());
        }
        if self.colors.is_some() {
            queue!(self.out, ResetColor)?;
            self.colors = None;
        }
        queue!(self.out, Print(' '))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let restored = execute!(
            self.out,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )
        .and_then(|()| terminal::disable_raw_mode());
        if let Err(err) = restored {
            log::warn!("failed to restore terminal: {err}");
        }
        log::debug!("terminal display closed");
    }
}
