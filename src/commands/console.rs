//! Line-based console I/O for the interactive menu.
//!
//! Generic over reader/writer so menus can be driven from scripted input.

use colored::*;
use std::io::{self, BufRead, Write};

pub struct Console<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Print a prompt and read one trimmed line. `None` at end of input.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD, so the line
    /// fails to match anything downstream instead of ending the session.
    pub fn prompt(&mut self, label: ColoredString) -> io::Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        if matches!(line, std::borrow::Cow::Owned(_)) {
            tracing::debug!(bytes = raw.len(), "console line was not valid UTF-8");
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn heading(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "\t{}", format!("=== {} ===", text).blue().bold())
    }

    pub fn line(&mut self, text: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    pub fn success(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", format!("✅ {}", text).green())
    }

    pub fn error(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", format!("⚠️ {}", text).red())
    }

    pub fn into_output(self) -> W {
        self.out
    }
}
