use super::RtagsPlugin;
use crate::error::{MalformedOutput, Result};
use crate::host::{EditorHost, QuickfixEntry};
use crate::model::diagnostics::{parse_diagnose_output, FileDiagnostics, SignKind};
use crate::services::rc::RcRunner;

impl<R: RcRunner> RtagsPlugin<R> {
    /// Save the current buffer, ask rc for its diagnostics and show them as
    /// gutter signs plus a quickfix list.
    pub fn diagnose(&self, host: &mut dyn EditorHost) -> Result<()> {
        host.unplace_all_signs()?;
        host.save_buffer()?;

        // rc has no blocking variant of --diagnose that waits for the reindex
        // triggered by the save, so give the daemon a moment first.
        let settle = self.config.diagnose_settle_delay();
        if !settle.is_zero() {
            std::thread::sleep(settle);
        }

        let diagnostics = self.file_diagnostics(host)?;
        if diagnostics.issues.is_empty() {
            tracing::debug!("No diagnostics for {}", diagnostics.filename);
            host.close_quickfix()?;
            return Ok(());
        }

        for kind in SignKind::ALL {
            host.define_sign(kind)?;
        }

        let mut entries = Vec::with_capacity(diagnostics.issues.len());
        for issue in &diagnostics.issues {
            host.place_sign(issue.index, issue.line, issue.sign, &diagnostics.filename)?;
            entries.push(QuickfixEntry::from_issue(&diagnostics.filename, issue));
        }
        tracing::debug!(
            "Placed {} diagnostic signs in {}",
            entries.len(),
            diagnostics.filename
        );
        host.show_quickfix(&entries)?;
        Ok(())
    }

    /// Diagnostics for the current buffer, without touching signs or the quickfix list
    pub fn file_diagnostics(&self, host: &dyn EditorHost) -> Result<FileDiagnostics> {
        let buffer_name = host.buffer_name();
        let args: Vec<String> = vec![
            "--diagnose".to_string(),
            buffer_name.clone(),
            "--synchronous-diagnostics".to_string(),
            "--json".to_string(),
        ];
        let stdout = self.runner.run_checked(&args, None)?;
        let diagnostics = parse_diagnose_output(&stdout)?;

        if diagnostics.filename != buffer_name {
            return Err(MalformedOutput::UnexpectedShape(format!(
                "diagnostics are for {}, expected {}",
                diagnostics.filename, buffer_name
            ))
            .into());
        }
        Ok(diagnostics)
    }
}
