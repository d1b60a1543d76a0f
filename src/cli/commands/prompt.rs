//! Password prompt without echo.

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, BufRead, IsTerminal, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyStep {
    Continue,
    Done,
    Cancelled,
}

/// Read a secret after printing `prompt` to stderr.
///
/// A terminal stdin is switched to raw mode so typed characters are not
/// echoed. Piped stdin is read as one line.
pub fn read_hidden(prompt: &str) -> Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", prompt)?;
    stderr.flush()?;

    if !io::stdin().is_terminal() {
        return read_line(io::stdin().lock());
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let result = read_keys();
    let restored = disable_raw_mode().context("Failed to restore terminal");
    writeln!(stderr)?;

    let secret = result?;
    restored?;
    Ok(secret)
}

fn read_keys() -> Result<String> {
    let mut secret = String::new();
    loop {
        if let Event::Key(key) = event::read()? {
            match apply_key(&mut secret, key) {
                KeyStep::Continue => {}
                KeyStep::Done => return Ok(secret),
                KeyStep::Cancelled => bail!("Password entry cancelled"),
            }
        }
    }
}

fn apply_key(secret: &mut String, key: KeyEvent) -> KeyStep {
    if key.kind == KeyEventKind::Release {
        return KeyStep::Continue;
    }

    match key.code {
        KeyCode::Enter => KeyStep::Done,
        KeyCode::Esc => KeyStep::Cancelled,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyStep::Cancelled,
        KeyCode::Backspace => {
            secret.pop();
            KeyStep::Continue
        }
        KeyCode::Char(c) => {
            secret.push(c);
            KeyStep::Continue
        }
        _ => KeyStep::Continue,
    }
}

fn read_line<R: BufRead>(mut reader: R) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
