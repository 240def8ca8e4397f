//! The editor's completion function
//!
//! Completion is a two-phase protocol. The editor first asks where the word being
//! completed starts, then removes the typed base from the buffer and asks for
//! candidates with the cursor sitting at that start column.

use super::RtagsPlugin;
use crate::error::Result;
use crate::host::EditorHost;
use crate::model::completion::{
    completion_start, parse_completion_response, CompletionRequest, CompletionResult,
};
use crate::services::rc::RcRunner;

impl<R: RcRunner> RtagsPlugin<R> {
    /// First phase: 0-based column where the word before the cursor starts
    pub fn complete_find_start(&self, host: &dyn EditorHost) -> usize {
        let cursor = host.cursor();
        let lines = host.buffer_lines();
        match lines.get(cursor.line.saturating_sub(1)) {
            Some(line) => completion_start(line, cursor.column),
            None => cursor.column,
        }
    }

    /// Second phase: candidates for `base` at the cursor, computed against the
    /// unsaved buffer contents.
    pub fn complete(&self, host: &dyn EditorHost, base: &str) -> Result<CompletionResult> {
        let request = self.completion_request(host, base);
        let args = request.to_args();
        let stdout = self.runner.run_checked(&args, Some(&request.content))?;
        let items = parse_completion_response(&stdout)?;
        tracing::debug!(
            "{} completions for {:?} at {}:{}",
            items.len(),
            base,
            request.line,
            request.rc_column()
        );
        Ok(CompletionResult::new(&items))
    }

    pub fn completion_request(&self, host: &dyn EditorHost, base: &str) -> CompletionRequest {
        let cursor = host.cursor();
        CompletionRequest {
            filename: host.buffer_name(),
            line: cursor.line,
            cursor_column: cursor.column,
            base: base.to_string(),
            content: host.buffer_lines().join("\n"),
        }
    }
}
