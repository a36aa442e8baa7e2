//! Shared test utilities and fixtures
//!
//! A vt100-backed terminal so tests can read the card the way a user's
//! terminal would show it.

#![allow(dead_code)]

use std::io;

use crossterm::{
    Command, cursor, style,
    terminal::{Clear, ClearType as TermClear},
};
use ratatui::{
    Terminal,
    backend::{Backend, ClearType, WindowSize},
    buffer::Cell,
    layout::{Position, Size},
};

use cupid_engine::{App, AppSettings};

/// Ratatui backend that feeds escape sequences into a vt100 parser.
pub struct ScreenBackend {
    parser: vt100::Parser,
    width: u16,
    height: u16,
}

impl ScreenBackend {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            parser: vt100::Parser::new(height, width, 0),
            width,
            height,
        }
    }

    /// Screen contents, one line per row.
    pub fn contents(&self) -> String {
        self.parser.screen().contents()
    }

    fn process(&mut self, command: impl Command) {
        let mut buf = String::new();
        let _ = command.write_ansi(&mut buf);
        self.parser.process(buf.as_bytes());
    }
}

impl Backend for ScreenBackend {
    type Error = io::Error;

    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = (u16, u16, &'a Cell)>,
    {
        let mut buf = String::new();
        let mut last_pos: Option<(u16, u16)> = None;

        for (x, y, cell) in content {
            if last_pos != Some((x, y)) {
                let _ = cursor::MoveTo(x, y).write_ansi(&mut buf);
            }
            let _ = style::Print(cell.symbol()).write_ansi(&mut buf);
            last_pos = Some((x + 1, y));
        }

        self.parser.process(buf.as_bytes());
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn get_cursor_position(&mut self) -> io::Result<Position> {
        let (row, column) = self.parser.screen().cursor_position();
        Ok(Position::new(column, row))
    }

    fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
        let position = position.into();
        self.process(cursor::MoveTo(position.x, position.y));
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.process(Clear(TermClear::All));
        Ok(())
    }

    fn clear_region(&mut self, _clear_type: ClearType) -> io::Result<()> {
        self.clear()
    }

    fn size(&self) -> io::Result<Size> {
        Ok(Size::new(self.width, self.height))
    }

    fn window_size(&mut self) -> io::Result<WindowSize> {
        Ok(WindowSize {
            columns_rows: Size::new(self.width, self.height),
            pixels: Size::new(self.width * 8, self.height * 16),
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Draw one frame of `app` and return what the terminal shows.
pub fn screen(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(ScreenBackend::new(width, height)).expect("terminal");
    terminal
        .draw(|frame| cupid_tui::draw(frame, app))
        .expect("draw");
    terminal.backend().contents()
}

pub fn app(shared: Option<&str>) -> App {
    App::new(AppSettings::defaults().expect("default settings"), shared)
}
