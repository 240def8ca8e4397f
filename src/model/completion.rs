//! Code completion results from `rc --synchronous-completions --json`

use crate::error::MalformedOutput;
use crate::primitives::word_navigation::find_word_start;
use serde::{Deserialize, Serialize};

/// Category of a completion candidate, shown as a one-letter kind in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    Function,
    Method,
    Variable,
    Macro,
    Enum,
    Type,
    Other,
}

impl CompletionKind {
    /// Map a clang cursor kind as reported by rc
    pub fn from_rtags_kind(kind: &str) -> Self {
        match kind {
            "FunctionDecl" | "FunctionTemplate" => Self::Function,
            "CXXMethod" | "CXXConstructor" => Self::Method,
            "VarDecl" | "FieldDecl" => Self::Variable,
            "macro definition" => Self::Macro,
            "EnumDecl" => Self::Enum,
            "TypedefDecl" | "StructDecl" | "EnumConstantDecl" => Self::Type,
            _ => Self::Other,
        }
    }

    /// Menu kind code. Unknown kinds get an empty code rather than an error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Function => "f",
            Self::Method => "m",
            Self::Variable => "v",
            Self::Macro => "d",
            Self::Enum => "e",
            Self::Type => "t",
            Self::Other => "",
        }
    }
}

/// A completion candidate as rc reports it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawCompletion {
    pub kind: String,
    #[serde(rename = "completion")]
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    completions: Vec<RawCompletion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionKind,
}

impl CompletionItem {
    pub fn kind_code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn to_menu_item(&self) -> MenuItem {
        MenuItem {
            word: self.label.clone(),
            menu: self.label.clone(),
            kind: self.kind_code().to_string(),
        }
    }
}

/// Entry of the editor's completion popup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub word: String,
    pub menu: String,
    pub kind: String,
}

/// What the completion function hands back to the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionResult {
    pub words: Vec<MenuItem>,
    /// Always "always": rc results depend on the typed prefix, so the popup must
    /// ask again on every keystroke.
    pub refresh: &'static str,
}

impl CompletionResult {
    pub fn new(items: &[CompletionItem]) -> Self {
        Self {
            words: items.iter().map(CompletionItem::to_menu_item).collect(),
            refresh: "always",
        }
    }
}

pub fn map_completions(raw: &[RawCompletion]) -> Vec<CompletionItem> {
    raw.iter()
        .map(|c| CompletionItem {
            label: c.text.clone(),
            kind: CompletionKind::from_rtags_kind(&c.kind),
        })
        .collect()
}

pub fn parse_completion_response(stdout: &str) -> Result<Vec<CompletionItem>, MalformedOutput> {
    let response: CompletionResponse = serde_json::from_str(stdout)?;
    Ok(map_completions(&response.completions))
}

/// Column where the word being completed starts.
///
/// `cursor_column` is the 0-based byte column of the cursor; the word is the run of
/// identifier characters immediately before it.
pub fn completion_start(line: &str, cursor_column: usize) -> usize {
    find_word_start(line, cursor_column)
}

/// Everything rc needs to complete at a position in an unsaved buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub filename: String,
    /// 1-based line of the cursor
    pub line: usize,
    /// 0-based byte column of the cursor, with the typed base already removed
    pub cursor_column: usize,
    /// Prefix typed so far
    pub base: String,
    /// Whole buffer contents, sent to rc on stdin
    pub content: String,
}

impl CompletionRequest {
    /// 1-based column rc completes at: the end of the typed base
    pub fn rc_column(&self) -> usize {
        self.cursor_column + self.base.len() + 1
    }

    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "--synchronous-completions".to_string(),
            "-l".to_string(),
            format!("{}:{}:{}", self.filename, self.line, self.rc_column()),
            format!("--unsaved-file={}:{}", self.filename, self.content.len()),
            "--json".to_string(),
        ];
        if !self.base.is_empty() {
            args.push("--code-complete-prefix".to_string());
            args.push(self.base.clone());
        }
        args
    }
}
