/// Terminal output for the countdown: cursor control, colours and the cursor guard
use std::io::{self, Write};
use std::ops::{Deref, DerefMut};

use crossterm::cursor::{Hide, RestorePosition, SavePosition, Show};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::{execute, queue};

/// Cursor and colour operations the countdown needs from a terminal.
pub trait Terminal {
    fn hide_cursor(&mut self) -> io::Result<()>;
    fn show_cursor(&mut self) -> io::Result<()>;
    fn save_cursor_position(&mut self) -> io::Result<()>;
    fn restore_cursor_position(&mut self) -> io::Result<()>;
    /// Writes `text` in `color`, resetting the colour afterwards.
    fn write_colored(&mut self, text: &str, color: Color) -> io::Result<()>;
}

/// [`Terminal`] backed by any writer, normally stdout.
#[derive(Debug)]
pub struct CrosstermTerminal<W: Write> {
    out: W,
}

impl<W: Write> CrosstermTerminal<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Terminal for CrosstermTerminal<W> {
    fn hide_cursor(&mut self) -> io::Result<()> {
        execute!(self.out, Hide)
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        execute!(self.out, Show)
    }

    fn save_cursor_position(&mut self) -> io::Result<()> {
        execute!(self.out, SavePosition)
    }

    fn restore_cursor_position(&mut self) -> io::Result<()> {
        execute!(self.out, RestorePosition)
    }

    fn write_colored(&mut self, text: &str, color: Color) -> io::Result<()> {
        queue!(self.out, SetForegroundColor(color), Print(text), ResetColor)?;
        self.out.flush()
    }
}

/// Shows the cursor without going through a [`Terminal`] value. Used from the
/// signal handler thread, which owns no terminal of its own.
pub fn force_show_cursor() {
    let _ = execute!(io::stdout(), Show);
}

/// Parses a colour identifier: `#rrggbb`, `#rgb`, an ANSI palette index
/// (`0`..=`255`) or a crossterm colour name such as `red` or `dark_grey`.
pub fn parse_color(spec: &str) -> Option<Color> {
    let spec = spec.trim();
    if let Some(hex) = spec.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Ok(index) = spec.parse::<u8>() {
        return Some(Color::AnsiValue(index));
    }
    Color::try_from(spec).ok()
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb {
            r: channel(&hex[0..2])?,
            g: channel(&hex[2..4])?,
            b: channel(&hex[4..6])?,
        }),
        3 => {
            let short = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
            Some(Color::Rgb {
                r: short(0)?,
                g: short(1)?,
                b: short(2)?,
            })
        }
        _ => None,
    }
}

/// Hides the cursor for its lifetime and shows it again on drop, including
/// when the owner unwinds.
pub struct CursorGuard<'a, T: Terminal> {
    terminal: &'a mut T,
}

impl<'a, T: Terminal> CursorGuard<'a, T> {
    pub fn hide(terminal: &'a mut T) -> Self {
        if let Err(err) = terminal.hide_cursor() {
            tracing::debug!(%err, "hide cursor failed");
        }
        Self { terminal }
    }
}

impl<T: Terminal> Deref for CursorGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.terminal
    }
}

impl<T: Terminal> DerefMut for CursorGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.terminal
    }
}

impl<T: Terminal> Drop for CursorGuard<'_, T> {
    fn drop(&mut self) {
        if let Err(err) = self.terminal.show_cursor() {
            tracing::debug!(%err, "show cursor failed");
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{Op, RecordingTerminal};
    use super::*;
    use std::panic::{self, AssertUnwindSafe};

    #[test]
    fn parses_hex_colors() {
        assert_eq!(
            parse_color("#ff0000"),
            Some(Color::Rgb { r: 255, g: 0, b: 0 })
        );
        assert_eq!(
            parse_color("#0A80fF"),
            Some(Color::Rgb { r: 10, g: 128, b: 255 })
        );
        assert_eq!(
            parse_color("#f80"),
            Some(Color::Rgb { r: 255, g: 136, b: 0 })
        );
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#gg0000"), None);
        assert_eq!(parse_color("#"), None);
    }

    #[test]
    fn parses_palette_indexes_and_names() {
        assert_eq!(parse_color("196"), Some(Color::AnsiValue(196)));
        assert_eq!(parse_color("0"), Some(Color::AnsiValue(0)));
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("dark_grey"), Some(Color::DarkGrey));
        assert_eq!(parse_color("256"), None);
        assert_eq!(parse_color("chartreuse-ish"), None);
    }

    #[test]
    fn cursor_visibility_sequences() {
        let mut term = CrosstermTerminal::new(Vec::new());
        term.hide_cursor().unwrap();
        term.show_cursor().unwrap();
        let out = String::from_utf8(term.into_inner()).unwrap();
        assert_eq!(out, "\x1b[?25l\x1b[?25h");
    }

    #[test]
    fn colored_text_is_reset() {
        let mut term = CrosstermTerminal::new(Vec::new());
        term.write_colored("01:30", Color::Rgb { r: 255, g: 0, b: 0 })
            .unwrap();
        let out = String::from_utf8(term.into_inner()).unwrap();
        assert!(out.contains("38;2;255;0;0"), "{out:?}");
        assert!(out.contains("01:30"));
        assert!(out.ends_with("\x1b[0m"), "{out:?}");
    }

    #[test]
    fn guard_shows_cursor_on_drop() {
        let mut term = RecordingTerminal::default();
        {
            let mut guard = CursorGuard::hide(&mut term);
            guard.save_cursor_position().unwrap();
        }
        assert_eq!(term.ops, [Op::Hide, Op::Save, Op::Show]);
    }

    #[test]
    fn guard_shows_cursor_when_unwinding() {
        let mut term = RecordingTerminal::default();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = CursorGuard::hide(&mut term);
            panic!("render blew up");
        }));
        assert!(result.is_err());
        assert_eq!(term.ops, [Op::Hide, Op::Show]);
    }
}
