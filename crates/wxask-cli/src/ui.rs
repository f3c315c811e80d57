//! Prompt input and banner

use colored::*;
use crossterm::{
    cursor::MoveToColumn,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    queue,
    terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode},
};
use std::io::{self, BufRead, Write};
use wxask_core::Result;

pub const PROMPT: &str = "> ";

/// Source of user prompts.
///
/// `Ok(None)` means the user is done: end of input or an interrupt.
pub trait PromptReader {
    fn read_prompt(&mut self) -> Result<Option<String>>;
}

/// Reads one line per prompt from any buffered reader (piped stdin, tests)
pub struct LineReader<R> {
    inner: R,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: BufRead> PromptReader for LineReader<R> {
    /// Invalid UTF-8 is replaced rather than treated as an error.
    fn read_prompt(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        if self.inner.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
    }
}

/// Raw-mode line editor with history navigation.
///
/// Ctrl+C, Esc, and Ctrl+D on an empty line end the session.
#[derive(Default)]
pub struct TerminalReader {
    history: Vec<String>,
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

impl TerminalReader {
    pub fn new() -> Self {
        Self::default()
    }

    fn redraw(input: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        queue!(stdout, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        write!(stdout, "{}{}", PROMPT.green().bold(), input)?;
        stdout.flush()
    }
}

impl PromptReader for TerminalReader {
    fn read_prompt(&mut self) -> Result<Option<String>> {
        let _raw = RawModeGuard::enable()?;
        let mut input = String::new();
        let mut history_index: Option<usize> = None;

        Self::redraw(&input)?;

        loop {
            let Event::Key(key_event) = event::read()? else {
                continue;
            };
            if key_event.kind != KeyEventKind::Press {
                continue;
            }

            let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
            match key_event.code {
                KeyCode::Char('c') if ctrl => {
                    print!("\r\n");
                    return Ok(None);
                }
                KeyCode::Char('d') if ctrl && input.is_empty() => {
                    print!("\r\n");
                    return Ok(None);
                }
                KeyCode::Esc => {
                    print!("\r\n");
                    return Ok(None);
                }
                KeyCode::Enter => {
                    print!("\r\n");
                    let line = input.trim().to_string();
                    if !line.is_empty() {
                        self.history.push(line.clone());
                    }
                    return Ok(Some(line));
                }
                KeyCode::Char(c) if !ctrl => {
                    input.push(c);
                    Self::redraw(&input)?;
                }
                KeyCode::Backspace => {
                    input.pop();
                    Self::redraw(&input)?;
                }
                KeyCode::Up if !self.history.is_empty() => {
                    let new_index = match history_index {
                        None => self.history.len() - 1,
                        Some(idx) => idx.saturating_sub(1),
                    };
                    history_index = Some(new_index);
                    input = self.history[new_index].clone();
                    Self::redraw(&input)?;
                }
                KeyCode::Down => {
                    if let Some(idx) = history_index {
                        if idx + 1 < self.history.len() {
                            history_index = Some(idx + 1);
                            input = self.history[idx + 1].clone();
                        } else {
                            history_index = None;
                            input.clear();
                        }
                        Self::redraw(&input)?;
                    }
                }
                _ => {}
            }
        }
    }
}

/// Display the startup banner
pub fn display_banner(provider: &str, model: &str) {
    println!();
    println!("{}", "wxask".blue().bold());
    println!("{}", format!("Provider: {} • Model: {}", provider, model).dimmed());
    println!();
}
