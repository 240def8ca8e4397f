//! Diagnostics from `rc --diagnose FILE --synchronous-diagnostics --json`
//!
//! rc answers with `{"checkStyle": {"<file>": [issue, ...]}}` where the issue list
//! may be `null` when the file is clean. Each issue has a `type` (`error`,
//! `warning`, `fixit` or `skipped`), a message, and a 1-based line and column.

use crate::error::MalformedOutput;
use serde::Deserialize;
use serde_json::Value;

/// Everything up to and including this marker is noise added by clang
const ISSUE_MARKER: &str = " Issue: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Single letter type used by quickfix lists
    pub fn quickfix_type(&self) -> char {
        match self {
            Severity::Error => 'E',
            Severity::Warning => 'W',
        }
    }
}

/// Gutter sign used to mark a diagnostic line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignKind {
    Error,
    Warning,
    FixIt,
}

impl SignKind {
    pub const ALL: [SignKind; 3] = [SignKind::FixIt, SignKind::Warning, SignKind::Error];

    fn from_issue_type(kind: &str) -> Self {
        match kind {
            "error" => SignKind::Error,
            "fixit" => SignKind::FixIt,
            _ => SignKind::Warning,
        }
    }

    /// Sign name as registered with the editor
    pub fn name(&self) -> &'static str {
        match self {
            SignKind::Error => "error",
            SignKind::Warning => "warning",
            SignKind::FixIt => "fixit",
        }
    }

    /// Text drawn in the gutter
    pub fn text(&self) -> &'static str {
        match self {
            SignKind::Error => "E",
            SignKind::Warning => "W",
            SignKind::FixIt => "F",
        }
    }

    /// Highlight group for the sign text
    pub fn highlight(&self) -> &'static str {
        match self {
            SignKind::Error => "Error",
            SignKind::Warning => "Warning",
            SignKind::FixIt => "FixIt",
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    message: String,
    line: usize,
    column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticIssue {
    /// 1-based position of the issue in rc's list; also the id of its gutter sign
    pub index: usize,
    pub line: usize,
    pub column: usize,
    pub severity: Severity,
    pub sign: SignKind,
    pub message: String,
}

/// Issues reported for the single file that was diagnosed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiagnostics {
    pub filename: String,
    pub issues: Vec<DiagnosticIssue>,
}

fn strip_issue_prefix(message: &str) -> &str {
    match message.find(ISSUE_MARKER) {
        Some(index) => &message[index + ISSUE_MARKER.len()..],
        None => message,
    }
}

/// Map the `checkStyle` object of a diagnose response.
///
/// The object must name exactly one file. `skipped` entries are dropped; indices
/// of the remaining issues keep their position in rc's list.
pub fn map_diagnostics(check_style: &Value) -> Result<FileDiagnostics, MalformedOutput> {
    let files = check_style.as_object().ok_or_else(|| {
        MalformedOutput::UnexpectedShape("checkStyle is not an object".to_string())
    })?;

    let (filename, issues) = match files.iter().next() {
        Some(entry) if files.len() == 1 => entry,
        _ => {
            return Err(MalformedOutput::UnexpectedShape(format!(
                "expected diagnostics for exactly one file, got {}",
                files.len()
            )))
        }
    };

    let raw: Vec<RawIssue> = match issues {
        Value::Null => Vec::new(),
        other => serde_json::from_value(other.clone())?,
    };

    let issues = raw
        .into_iter()
        .enumerate()
        .filter(|(_, issue)| issue.kind != "skipped")
        .map(|(i, issue)| DiagnosticIssue {
            index: i + 1,
            line: issue.line,
            column: issue.column,
            severity: if issue.kind == "error" {
                Severity::Error
            } else {
                Severity::Warning
            },
            sign: SignKind::from_issue_type(&issue.kind),
            message: strip_issue_prefix(&issue.message).to_string(),
        })
        .collect();

    Ok(FileDiagnostics {
        filename: filename.clone(),
        issues,
    })
}

/// Parse the full stdout of a diagnose request.
pub fn parse_diagnose_output(stdout: &str) -> Result<FileDiagnostics, MalformedOutput> {
    let response: Value = serde_json::from_str(stdout)?;
    let check_style = response.get("checkStyle").ok_or_else(|| {
        MalformedOutput::UnexpectedShape("missing checkStyle field".to_string())
    })?;
    map_diagnostics(check_style)
}
