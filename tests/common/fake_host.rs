//! In-memory editor host that records every call made into it

use rtags_bridge::commands::PluginCommand;
use rtags_bridge::host::{CursorPosition, EditorHost, QuickfixEntry};
use rtags_bridge::model::diagnostics::SignKind;
use rtags_bridge::primitives::word_navigation::word_range_at;
use std::collections::{HashMap, VecDeque};
use std::io;

/// Calls observed by [`FakeHost`], in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Open(String),
    Replace {
        file: String,
        line: usize,
        column: usize,
        text: String,
    },
    Save(String),
    Confirm(String),
    Input(String),
    ShowQuickfix(Vec<QuickfixEntry>),
    CloseQuickfix,
    DefineSign(SignKind),
    PlaceSign {
        id: usize,
        line: usize,
        kind: SignKind,
        file: String,
    },
    UnplaceAllSigns,
    MapKey(String, PluginCommand),
    RegisterCompletion,
}

#[derive(Debug, Default)]
pub struct FakeHost {
    pub buffers: HashMap<String, Vec<String>>,
    pub current: String,
    pub cursor: CursorPosition,
    pub confirm_answers: VecDeque<usize>,
    pub inputs: VecDeque<String>,
    pub events: Vec<HostEvent>,
    pub messages: Vec<String>,
    pub errors: Vec<String>,
}

impl FakeHost {
    /// Host with one buffer open at `cursor`
    pub fn with_buffer(name: &str, text: &str, cursor: CursorPosition) -> Self {
        let mut host = Self::default();
        host.add_buffer(name, text);
        host.current = name.to_string();
        host.cursor = cursor;
        host
    }

    pub fn add_buffer(&mut self, name: &str, text: &str) {
        self.buffers
            .insert(name.to_string(), text.lines().map(str::to_string).collect());
    }

    pub fn text(&self, name: &str) -> String {
        self.buffers[name].join("\n")
    }

    pub fn saves(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Save(file) => Some(file.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_quickfix(&self) -> Option<&[QuickfixEntry]> {
        self.events.iter().rev().find_map(|e| match e {
            HostEvent::ShowQuickfix(entries) => Some(entries.as_slice()),
            _ => None,
        })
    }
}

impl EditorHost for FakeHost {
    fn buffer_name(&self) -> String {
        self.current.clone()
    }

    fn buffer_lines(&self) -> Vec<String> {
        self.buffers.get(&self.current).cloned().unwrap_or_default()
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
            return Err(io::Error::new(io::ErrorKind::NotFound, path.to_string()));
        }
        self.events.push(HostEvent::Open(path.to_string()));
        self.current = path.to_string();
        Ok(())
    }

    fn replace_word_at_cursor(&mut self, text: &str) -> io::Result<()> {
        let cursor = self.cursor;
        self.events.push(HostEvent::Replace {
            file: self.current.clone(),
            line: cursor.line,
            column: cursor.column,
            text: text.to_string(),
        });
        let lines = self
            .buffers
            .get_mut(&self.current)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no buffer"))?;
        let line = lines
            .get_mut(cursor.line - 1)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "line out of range"))?;
        let range = word_range_at(line, cursor.column).unwrap_or(cursor.column..cursor.column);
        line.replace_range(range, text);
        Ok(())
    }

    fn save_buffer(&mut self) -> io::Result<()> {
        self.events.push(HostEvent::Save(self.current.clone()));
        Ok(())
    }

    fn confirm(&mut self, message: &str, _choices: &[&str]) -> io::Result<usize> {
        self.events.push(HostEvent::Confirm(message.to_string()));
        Ok(self.confirm_answers.pop_front().unwrap_or(0))
    }

    fn input(&mut self, prompt: &str) -> io::Result<String> {
        self.events.push(HostEvent::Input(prompt.to_string()));
        Ok(self.inputs.pop_front().unwrap_or_default())
    }

    fn show_quickfix(&mut self, entries: &[QuickfixEntry]) -> io::Result<()> {
        self.events.push(HostEvent::ShowQuickfix(entries.to_vec()));
        Ok(())
    }

    fn close_quickfix(&mut self) -> io::Result<()> {
        self.events.push(HostEvent::CloseQuickfix);
        Ok(())
    }

    fn define_sign(&mut self, kind: SignKind) -> io::Result<()> {
        self.events.push(HostEvent::DefineSign(kind));
        Ok(())
    }

    fn place_sign(
        &mut self,
        id: usize,
        line: usize,
        kind: SignKind,
        file: &str,
    ) -> io::Result<()> {
        self.events.push(HostEvent::PlaceSign {
            id,
            line,
            kind,
            file: file.to_string(),
        });
        Ok(())
    }

    fn unplace_all_signs(&mut self) -> io::Result<()> {
        self.events.push(HostEvent::UnplaceAllSigns);
        Ok(())
    }

    fn map_key(&mut self, keys: &str, command: PluginCommand) -> io::Result<()> {
        self.events.push(HostEvent::MapKey(keys.to_string(), command));
        Ok(())
    }

    fn register_completion(&mut self) -> io::Result<()> {
        self.events.push(HostEvent::RegisterCompletion);
        Ok(())
    }

    fn write_message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn write_error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }
}
