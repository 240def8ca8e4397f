use super::RtagsPlugin;
use crate::error::Result;
use crate::host::EditorHost;
use crate::services::rc::RcRunner;

impl<R: RcRunner> RtagsPlugin<R> {
    /// Print rc's description of the symbol under the cursor
    pub fn symbol_info(&self, host: &mut dyn EditorHost) -> Result<()> {
        let location = self.current_location(host);
        let args = self.location_args(&["-U", &location]);
        let output = self.runner.run(&args, None)?;
        if !output.success() {
            // rc reports lookup failures on stdout
            host.write_error(&output.stdout);
            return Ok(());
        }
        host.write_message(strip_location_header(&output.stdout));
        Ok(())
    }

    /// Projects known to the daemon, in rc's order
    pub fn projects(&self) -> Result<Vec<String>> {
        let stdout = self.runner.run_checked(&["-w".to_string()], None)?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Print the numbered project list and switch to the project the user picks
    pub fn list_projects(&self, host: &mut dyn EditorHost) -> Result<()> {
        let projects = self.projects()?;
        let listing: String = projects
            .iter()
            .enumerate()
            .map(|(i, project)| format!("{}: {}\n", i + 1, project))
            .collect();
        host.write_message(&listing);

        let answer = host.input("Project number: ")?;
        let Ok(number) = answer.trim().parse::<usize>() else {
            return Ok(());
        };
        if number == 0 || number > projects.len() {
            tracing::debug!("Project number {} out of range", number);
            return Ok(());
        }
        self.runner
            .run_checked(&["-w".to_string(), number.to_string()], None)?;
        tracing::debug!("Switched to project {}", projects[number - 1]);
        Ok(())
    }
}

/// rc's symbol info starts with a line naming the location and echoing its
/// source line; everything from that line's newline on is the description.
fn strip_location_header(stdout: &str) -> &str {
    match stdout.find('\n') {
        Some(index) => &stdout[index..],
        None => "",
    }
}
