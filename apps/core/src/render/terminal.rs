//! Terminal painter.

use colored::Colorize;
use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing::warn;

use super::escape;
use super::projection::{Bubble, SidebarView, TranscriptView};
use super::{date_time, time_of_day, ChatView, PENDING_TEXT};

/// The REPL's input field: text the next prompt starts with.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer(Arc<Mutex<String>>);

impl InputBuffer {
    pub fn set(&self, text: &str) {
        let mut guard = self.0.lock().unwrap_or_else(|p| p.into_inner());
        guard.clear();
        guard.push_str(text);
    }

    /// Returns the current contents and empties the field.
    pub fn take(&self) -> String {
        let mut guard = self.0.lock().unwrap_or_else(|p| p.into_inner());
        std::mem::take(&mut *guard)
    }
}

/// Paints on a line-oriented terminal.
///
/// A terminal cannot redraw what already scrolled by, so the transcript is
/// painted incrementally: only bubbles past the last painted one are printed,
/// and a shrinking transcript (after a clear) starts over.
pub struct TerminalView<W: Write + Send + 'static = io::Stdout> {
    out: W,
    input: InputBuffer,
    painted: usize,
    tip_shown: bool,
    /// The pending indicator is on screen, without a trailing newline.
    pending: bool,
    /// Question already echoed by `show_pending`, skipped once when the transcript catches up.
    echoed: Option<String>,
}

impl TerminalView<io::Stdout> {
    pub fn stdout(input: InputBuffer) -> Self {
        Self::new(io::stdout(), input)
    }
}

impl<W: Write + Send + 'static> TerminalView<W> {
    pub fn new(out: W, input: InputBuffer) -> Self {
        Self {
            out,
            input,
            painted: 0,
            tip_shown: false,
            pending: false,
            echoed: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl std::fmt::Display) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!("Failed to write to terminal: {}", e);
        }
    }

    fn paint_bubble(&mut self, bubble: &Bubble) {
        match bubble {
            Bubble::Question { text, .. } => {
                let text = escape::terminal(text);
                self.line(format!("{} {}", "Q:".green().bold(), text.green()));
            }
            Bubble::Answer {
                text,
                tag,
                created_at,
                ..
            } => {
                let text = escape::terminal(text);
                self.line(format!("{} {}", "A:".bright_blue().bold(), text.bright_blue()));
                self.line(
                    format!("   Tag: {} • {}", tag, time_of_day(created_at)).bright_black(),
                );
            }
        }
    }
}

impl<W: Write + Send + 'static> ChatView for TerminalView<W> {
    fn show_pending(&mut self, question: &str) {
        let text = escape::terminal(question).into_owned();
        self.line(format!("{} {}", "Q:".green().bold(), text.green()));
        let indicator = format!("   {}", PENDING_TEXT).bright_black().italic();
        if let Err(e) = write!(self.out, "{}", indicator).and_then(|_| self.out.flush()) {
            warn!("Failed to write to terminal: {}", e);
        }
        self.pending = true;
        self.echoed = Some(question.to_string());
    }

    fn clear_pending(&mut self) {
        if !std::mem::take(&mut self.pending) {
            return;
        }
        // Erase the indicator line in place; the next line reuses it.
        if let Err(e) = queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))
            .and_then(|_| self.out.flush())
        {
            warn!("Failed to clear pending indicator: {}", e);
        }
    }

    fn show_error(&mut self, message: &str) {
        let text = escape::terminal(message).into_owned();
        self.line(format!("{} {}", "A:".red().bold(), text.red()));
        self.echoed = None;
    }

    fn render_transcript(&mut self, view: &TranscriptView) {
        if view.bubbles.is_empty() {
            if self.painted > 0 || !self.tip_shown {
                if let Some(tip) = view.tip {
                    self.line(tip.bright_black());
                }
                self.tip_shown = true;
            }
            self.painted = 0;
            return;
        }

        let start = if view.bubbles.len() < self.painted {
            0
        } else {
            self.painted
        };
        let mut echoed = self.echoed.take();
        for bubble in &view.bubbles[start..] {
            if let Bubble::Question { text, .. } = bubble {
                if echoed.as_deref() == Some(text.as_str()) {
                    echoed = None;
                    continue;
                }
            }
            self.paint_bubble(bubble);
        }
        self.painted = view.bubbles.len();
        let _ = self.out.flush();
    }

    fn render_sidebar(&mut self, view: &SidebarView) {
        self.line(format!("── History ({}) ──", view.filter).magenta().bold());
        if let Some(placeholder) = view.placeholder {
            self.line(format!("   {}", placeholder).bright_black());
            return;
        }
        let rows: Vec<String> = view
            .items
            .iter()
            .map(|item| {
                format!(
                    "   #{} [{}] Q: {} · {}",
                    item.id,
                    item.tag,
                    escape::terminal(&item.question),
                    date_time(&item.created_at)
                )
            })
            .collect();
        for row in rows {
            self.line(row.magenta());
        }
        let _ = self.out.flush();
    }

    fn set_input(&mut self, text: &str) {
        self.input.set(text);
    }

    fn notify(&mut self, message: &str) {
        let text = escape::terminal(message).into_owned();
        self.line(format!("ℹ {}", text).yellow());
    }
}
