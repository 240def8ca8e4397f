//! The editor side of the bridge
//!
//! Operations never reach for a global "current editor"; they receive an
//! [`EditorHost`] and call into it. A Neovim remote plugin, the terminal front end
//! in [`terminal`], and the fake host used in tests all implement the same trait.

pub mod terminal;

use crate::commands::PluginCommand;
use crate::model::diagnostics::{DiagnosticIssue, SignKind};
use crate::model::location::Location;
use std::io;

/// Cursor position in the editor's convention: 1-based line, 0-based byte column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

impl CursorPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Cursor position of a 1-based rc location
    pub fn from_location(location: &Location) -> Self {
        Self {
            line: location.line,
            column: location.column.saturating_sub(1),
        }
    }
}

/// One entry of the quickfix list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickfixEntry {
    pub filename: String,
    pub line: usize,
    pub column: usize,
    pub text: String,
    /// `E` or `W` for diagnostics, `None` for plain locations
    pub kind: Option<char>,
    /// Error number shown by the editor
    pub nr: Option<usize>,
}

impl From<&Location> for QuickfixEntry {
    fn from(location: &Location) -> Self {
        Self {
            filename: location.filename.clone(),
            line: location.line,
            column: location.column,
            text: location.text.clone(),
            kind: None,
            nr: None,
        }
    }
}

impl QuickfixEntry {
    pub fn from_issue(filename: &str, issue: &DiagnosticIssue) -> Self {
        Self {
            filename: filename.to_string(),
            line: issue.line,
            column: issue.column,
            text: issue.message.clone(),
            kind: Some(issue.severity.quickfix_type()),
            nr: Some(issue.index),
        }
    }

    /// `file:line:col: text`, the format vim's default errorformat understands
    pub fn to_errorformat_line(&self) -> String {
        match self.kind {
            Some('E') => format!(
                "{}:{}:{}: error: {}",
                self.filename, self.line, self.column, self.text
            ),
            Some(_) => format!(
                "{}:{}:{}: warning: {}",
                self.filename, self.line, self.column, self.text
            ),
            None => format!(
                "{}:{}:{}: {}",
                self.filename, self.line, self.column, self.text
            ),
        }
    }
}

/// Capabilities the plugin needs from the editor
pub trait EditorHost {
    /// Full path of the current buffer
    fn buffer_name(&self) -> String;

    /// Lines of the current buffer, without line terminators
    fn buffer_lines(&self) -> Vec<String>;

    fn cursor(&self) -> CursorPosition;

    fn set_cursor(&mut self, position: CursorPosition) -> io::Result<()>;

    /// Open `path` (or switch to it when already loaded) and make it current
    fn open_file(&mut self, path: &str) -> io::Result<()>;

    /// Replace the word under the cursor with `text` (vim's `ciw`)
    fn replace_word_at_cursor(&mut self, text: &str) -> io::Result<()>;

    /// Write the current buffer to disk
    fn save_buffer(&mut self) -> io::Result<()>;

    /// Ask the user to pick one of `choices`. Choices mark their accelerator key
    /// with `&`. Returns the 1-based index of the chosen entry, or 0 when the
    /// prompt was dismissed.
    fn confirm(&mut self, message: &str, choices: &[&str]) -> io::Result<usize>;

    /// Ask the user for a line of text
    fn input(&mut self, prompt: &str) -> io::Result<String>;

    /// Replace the quickfix list and open its window
    fn show_quickfix(&mut self, entries: &[QuickfixEntry]) -> io::Result<()>;

    fn close_quickfix(&mut self) -> io::Result<()>;

    fn define_sign(&mut self, kind: SignKind) -> io::Result<()>;

    fn place_sign(&mut self, id: usize, line: usize, kind: SignKind, file: &str)
        -> io::Result<()>;

    fn unplace_all_signs(&mut self) -> io::Result<()>;

    /// Bind `keys` to run `command`
    fn map_key(&mut self, keys: &str, command: PluginCommand) -> io::Result<()>;

    /// Install the rc-backed completion function for insert mode
    fn register_completion(&mut self) -> io::Result<()>;

    /// Show an informational message
    fn write_message(&mut self, text: &str);

    /// Show an error message
    fn write_error(&mut self, text: &str);
}
