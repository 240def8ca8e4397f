//! Line-oriented editor host for running operations from a shell
//!
//! Files are loaded into memory on demand and written back when the operation
//! saves them. Quickfix lists are printed in errorformat, prompts are answered
//! from a queue of preset answers first and then from stdin.

use super::{CursorPosition, EditorHost, QuickfixEntry};
use crate::commands::PluginCommand;
use crate::model::diagnostics::SignKind;
use crate::primitives::word_navigation::word_range_at;
use std::collections::{HashMap, VecDeque};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// A gutter sign placed by an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedSign {
    pub id: usize,
    pub line: usize,
    pub kind: SignKind,
    pub file: String,
}

struct FileBuffer {
    lines: Vec<String>,
    /// Terminator of the first line, reused for every line on save
    line_ending: &'static str,
    trailing_newline: bool,
    modified: bool,
}

impl FileBuffer {
    fn load(path: &str) -> io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let line_ending = match contents.find('\n') {
            Some(index) if contents[..index].ends_with('\r') => "\r\n",
            _ => "\n",
        };
        Ok(Self {
            lines: contents.lines().map(str::to_string).collect(),
            line_ending,
            trailing_newline: contents.ends_with('\n'),
            modified: false,
        })
    }

    fn contents(&self) -> String {
        let mut contents = self.lines.join(self.line_ending);
        if self.trailing_newline {
            contents.push_str(self.line_ending);
        }
        contents
    }
}

pub struct TerminalHost {
    buffers: HashMap<String, FileBuffer>,
    current: Option<String>,
    cursor: CursorPosition,
    answers: VecDeque<String>,
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
    errors: Box<dyn Write>,
    quickfix: Vec<QuickfixEntry>,
    defined_signs: Vec<SignKind>,
    signs: Vec<PlacedSign>,
    mappings: Vec<(String, PluginCommand)>,
    completion_registered: bool,
}

impl TerminalHost {
    /// Host wired to the process's stdin, stdout and stderr
    pub fn new() -> Self {
        Self::with_io(
            Box::new(io::BufReader::new(io::stdin())),
            Box::new(io::stdout()),
            Box::new(io::stderr()),
        )
    }

    pub fn with_io(
        input: Box<dyn BufRead>,
        output: Box<dyn Write>,
        errors: Box<dyn Write>,
    ) -> Self {
        Self {
            buffers: HashMap::new(),
            current: None,
            cursor: CursorPosition::new(1, 0),
            answers: VecDeque::new(),
            input,
            output,
            errors,
            quickfix: Vec::new(),
            defined_signs: Vec::new(),
            signs: Vec::new(),
            mappings: Vec::new(),
            completion_registered: false,
        }
    }

    /// Open `path` and put the cursor at `cursor`
    pub fn open_at(&mut self, path: &str, cursor: CursorPosition) -> io::Result<()> {
        self.open_file(path)?;
        self.cursor = cursor;
        Ok(())
    }

    /// Queue an answer for the next `confirm` or `input` prompt
    pub fn queue_answer(&mut self, answer: impl Into<String>) {
        self.answers.push_back(answer.into());
    }

    pub fn quickfix(&self) -> &[QuickfixEntry] {
        &self.quickfix
    }

    pub fn signs(&self) -> &[PlacedSign] {
        &self.signs
    }

    pub fn defined_signs(&self) -> &[SignKind] {
        &self.defined_signs
    }

    pub fn mappings(&self) -> &[(String, PluginCommand)] {
        &self.mappings
    }

    pub fn completion_registered(&self) -> bool {
        self.completion_registered
    }

    /// In-memory contents of a loaded buffer
    pub fn buffer_text(&self, path: &str) -> Option<String> {
        self.buffers.get(path).map(FileBuffer::contents)
    }

    /// Whether a loaded buffer has edits that were not written yet
    pub fn is_modified(&self, path: &str) -> bool {
        self.buffers.get(path).is_some_and(|b| b.modified)
    }

    fn current_buffer_mut(&mut self) -> io::Result<&mut FileBuffer> {
        let name = self
            .current
            .as_deref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no buffer is open"))?;
        self.buffers
            .get_mut(name)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "current buffer not loaded"))
    }

    fn next_answer(&mut self) -> io::Result<Option<String>> {
        if let Some(answer) = self.answers.pop_front() {
            return Ok(Some(answer));
        }
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl Default for TerminalHost {
    fn default() -> Self {
        Self::new()
    }
}

/// `&Yes` becomes `[Y]es`
fn render_choice(choice: &str) -> String {
    match choice.find('&') {
        Some(index) if index + 1 < choice.len() => {
            let (before, rest) = choice.split_at(index);
            let mut chars = rest[1..].chars();
            let key = chars.next().unwrap_or_default();
            format!("{before}[{key}]{}", chars.as_str())
        }
        _ => choice.replace('&', ""),
    }
}

fn accelerator(choice: &str) -> Option<char> {
    let index = choice.find('&')?;
    choice[index + 1..].chars().next()
}

/// Resolve a typed answer to a 1-based choice: either the number or the
/// accelerator key. Anything else dismisses the prompt.
fn match_choice(answer: &str, choices: &[&str]) -> usize {
    let answer = answer.trim();
    if let Ok(number) = answer.parse::<usize>() {
        return if (1..=choices.len()).contains(&number) {
            number
        } else {
            0
        };
    }

    let mut chars = answer.chars();
    let (Some(key), None) = (chars.next(), chars.next()) else {
        return 0;
    };
    choices
        .iter()
        .position(|choice| accelerator(choice).is_some_and(|a| a.eq_ignore_ascii_case(&key)))
        .map_or(0, |i| i + 1)
}

impl EditorHost for TerminalHost {
    fn buffer_name(&self) -> String {
        self.current.clone().unwrap_or_default()
    }

    fn buffer_lines(&self) -> Vec<String> {
        self.current
            .as_deref()
            .and_then(|name| self.buffers.get(name))
            .map(|b| b.lines.clone())
            .unwrap_or_default()
    }

    fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    fn set_cursor(&mut self, position: CursorPosition) -> io::Result<()> {
        self.cursor = position;
        Ok(())
    }

    fn open_file(&mut self, path: &str) -> io::Result<()> {
        if !self.buffers.contains_key(path) {
            tracing::debug!("Loading {}", path);
            let buffer = FileBuffer::load(path)?;
            self.buffers.insert(path.to_string(), buffer);
        }
        self.current = Some(path.to_string());
        self.cursor = CursorPosition::new(1, 0);
        Ok(())
    }

    fn replace_word_at_cursor(&mut self, text: &str) -> io::Result<()> {
        let cursor = self.cursor;
        let buffer = self.current_buffer_mut()?;
        let line = cursor
            .line
            .checked_sub(1)
            .and_then(|i| buffer.lines.get_mut(i))
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("line {} is outside the buffer", cursor.line),
                )
            })?;

        match word_range_at(line, cursor.column) {
            Some(range) => line.replace_range(range, text),
            None => {
                // Not on a word: insert at the cursor like `ciw` on whitespace would
                let mut column = cursor.column.min(line.len());
                while !line.is_char_boundary(column) {
                    column -= 1;
                }
                line.insert_str(column, text);
            }
        }
        buffer.modified = true;
        Ok(())
    }

    fn save_buffer(&mut self) -> io::Result<()> {
        let Some(name) = self.current.clone() else {
            return Ok(());
        };
        let buffer = self.current_buffer_mut()?;
        if buffer.modified {
            std::fs::write(Path::new(&name), buffer.contents())?;
            buffer.modified = false;
            tracing::debug!("Wrote {}", name);
        }
        Ok(())
    }

    fn confirm(&mut self, message: &str, choices: &[&str]) -> io::Result<usize> {
        let rendered: Vec<String> = choices.iter().map(|c| render_choice(c)).collect();
        write!(self.output, "{}\n{}: ", message, rendered.join(", "))?;
        self.output.flush()?;

        let choice = match self.next_answer()? {
            Some(answer) => match_choice(&answer, choices),
            None => 0,
        };
        writeln!(self.output)?;
        Ok(choice)
    }

    fn input(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let answer = self.next_answer()?.unwrap_or_default();
        writeln!(self.output)?;
        Ok(answer)
    }

    fn show_quickfix(&mut self, entries: &[QuickfixEntry]) -> io::Result<()> {
        self.quickfix = entries.to_vec();
        for entry in entries {
            writeln!(self.output, "{}", entry.to_errorformat_line())?;
        }
        self.output.flush()
    }

    fn close_quickfix(&mut self) -> io::Result<()> {
        self.quickfix.clear();
        Ok(())
    }

    fn define_sign(&mut self, kind: SignKind) -> io::Result<()> {
        if !self.defined_signs.contains(&kind) {
            tracing::debug!(
                "Defining sign {} text={} texthl={}",
                kind.name(),
                kind.text(),
                kind.highlight()
            );
            self.defined_signs.push(kind);
        }
        Ok(())
    }

    fn place_sign(
        &mut self,
        id: usize,
        line: usize,
        kind: SignKind,
        file: &str,
    ) -> io::Result<()> {
        if !self.defined_signs.contains(&kind) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("sign '{}' is not defined", kind.name()),
            ));
        }
        self.signs.push(PlacedSign {
            id,
            line,
            kind,
            file: file.to_string(),
        });
        Ok(())
    }

    fn unplace_all_signs(&mut self) -> io::Result<()> {
        self.signs.clear();
        Ok(())
    }

    fn map_key(&mut self, keys: &str, command: PluginCommand) -> io::Result<()> {
        self.mappings.push((keys.to_string(), command));
        Ok(())
    }

    fn register_completion(&mut self) -> io::Result<()> {
        self.completion_registered = true;
        Ok(())
    }

    fn write_message(&mut self, text: &str) {
        let _ = self.output.write_all(text.as_bytes());
        if !text.ends_with('\n') {
            let _ = self.output.write_all(b"\n");
        }
        let _ = self.output.flush();
    }

    fn write_error(&mut self, text: &str) {
        let _ = writeln!(self.errors, "{}", text.trim_end());
        let _ = self.errors.flush();
    }
}
