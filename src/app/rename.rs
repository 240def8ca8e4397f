//! Multi-file rename driven by rc's reference listing
//!
//! rc reports every occurrence of the symbol (`-r LOC -e --rename --json`). The
//! occurrences are reversed so that within a file later positions are edited
//! first and earlier edits cannot shift the columns of pending ones. Files are
//! then processed one at a time, each behind a confirmation prompt.

use super::RtagsPlugin;
use crate::error::{Result, RtagsError};
use crate::host::EditorHost;
use crate::model::location::{parse_location_listing, Location};
use crate::services::rc::RcRunner;
use std::collections::HashMap;

/// Choices offered for each file, in prompt order
pub const RENAME_CHOICES: [&str; 4] = ["&Yes", "Yes to &All", "&No", "&Cancel"];

/// One occurrence to rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEdit {
    pub filename: String,
    pub location: Location,
}

impl RenameEdit {
    /// Edits for `locations` in application order (reverse discovery order)
    pub fn from_locations(locations: Vec<Location>) -> Vec<RenameEdit> {
        locations
            .into_iter()
            .rev()
            .map(|location| RenameEdit {
                filename: location.filename.clone(),
                location,
            })
            .collect()
    }
}

/// Answer to "Rename in FILE?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameChoice {
    /// Rename in this file
    Yes,
    /// Rename in this file and every remaining file without asking again
    YesToAll,
    /// Skip this file
    No,
    /// Stop the whole rename
    Cancel,
}

impl RenameChoice {
    /// Map a 1-based answer to [`RENAME_CHOICES`]. A dismissed prompt (0) or any
    /// out-of-range answer counts as Cancel.
    pub fn from_prompt_answer(answer: usize) -> Self {
        match answer {
            1 => RenameChoice::Yes,
            2 => RenameChoice::YesToAll,
            3 => RenameChoice::No,
            _ => RenameChoice::Cancel,
        }
    }
}

/// Edits for one file, in application order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup<'a> {
    pub filename: &'a str,
    pub edits: Vec<&'a RenameEdit>,
}

/// Group edits by file. Files keep the order in which they first appear and
/// edits keep their relative order inside each file.
pub fn group_by_file(edits: &[RenameEdit]) -> Vec<FileGroup<'_>> {
    let mut groups: Vec<FileGroup<'_>> = Vec::new();
    let mut index_by_file: HashMap<&str, usize> = HashMap::new();

    for edit in edits {
        let index = *index_by_file
            .entry(edit.filename.as_str())
            .or_insert_with(|| {
                groups.push(FileGroup {
                    filename: edit.filename.as_str(),
                    edits: Vec::new(),
                });
                groups.len() - 1
            });
        groups[index].edits.push(edit);
    }

    groups
}

/// The editor-facing side of a rename
pub trait RenameDriver {
    fn confirm(&mut self, filename: &str) -> Result<RenameChoice>;
    fn apply_edit(&mut self, location: &Location, new_name: &str) -> Result<()>;
    fn save(&mut self) -> Result<()>;
}

/// Summary of a finished rename
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameOutcome {
    pub files_renamed: usize,
    pub files_skipped: usize,
    pub edits_applied: usize,
    pub cancelled: bool,
}

/// Apply `edits` file by file, asking `driver` before each file.
///
/// Each applied file is saved once after its last edit. Cancel saves once more
/// (flushing whatever the editor still holds) and stops without looking at the
/// remaining files. An error from the driver aborts immediately.
pub fn coordinate_rename(
    edits: &[RenameEdit],
    new_name: &str,
    driver: &mut dyn RenameDriver,
) -> Result<RenameOutcome> {
    let mut outcome = RenameOutcome::default();
    let mut apply_to_all = false;

    for group in group_by_file(edits) {
        if !apply_to_all {
            match driver.confirm(group.filename)? {
                RenameChoice::Yes => {}
                RenameChoice::YesToAll => apply_to_all = true,
                RenameChoice::No => {
                    tracing::debug!("Skipping rename in {}", group.filename);
                    outcome.files_skipped += 1;
                    continue;
                }
                RenameChoice::Cancel => {
                    tracing::debug!("Rename cancelled at {}", group.filename);
                    driver.save()?;
                    outcome.cancelled = true;
                    return Ok(outcome);
                }
            }
        }

        for edit in &group.edits {
            driver.apply_edit(&edit.location, new_name)?;
            outcome.edits_applied += 1;
        }
        driver.save()?;
        outcome.files_renamed += 1;
    }

    Ok(outcome)
}

/// Drives a rename through the editor host
struct HostRenameDriver<'a, R: RcRunner> {
    plugin: &'a RtagsPlugin<R>,
    host: &'a mut dyn EditorHost,
}

impl<R: RcRunner> RenameDriver for HostRenameDriver<'_, R> {
    fn confirm(&mut self, filename: &str) -> Result<RenameChoice> {
        let answer = self
            .host
            .confirm(&format!("Rename in {filename}"), &RENAME_CHOICES)?;
        Ok(RenameChoice::from_prompt_answer(answer))
    }

    fn apply_edit(&mut self, location: &Location, new_name: &str) -> Result<()> {
        self.plugin.jump_to_location(self.host, location)?;
        self.host.replace_word_at_cursor(new_name)?;
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.host.save_buffer().map_err(RtagsError::from)
    }
}

impl<R: RcRunner> RtagsPlugin<R> {
    /// Occurrences of the symbol under the cursor, in application order
    pub fn rename_edits(&self, host: &dyn EditorHost) -> Result<Vec<RenameEdit>> {
        let location = self.current_location(host);
        let args = self.location_args(&["-r", &location, "-e", "--rename", "--json"]);
        let stdout = self.runner.run_checked(&args, None)?;
        let locations = parse_location_listing(&stdout)?;
        Ok(RenameEdit::from_locations(locations))
    }

    /// Prompt for a new name and rename the symbol under the cursor everywhere.
    pub fn rename_symbol(&self, host: &mut dyn EditorHost) -> Result<RenameOutcome> {
        let new_name = host.input("New name: ")?;
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Ok(RenameOutcome::default());
        }

        let edits = self.rename_edits(host)?;
        host.save_buffer()?;
        if edits.is_empty() {
            return Ok(RenameOutcome::default());
        }

        let outcome = coordinate_rename(
            &edits,
            new_name,
            &mut HostRenameDriver { plugin: self, host },
        )?;
        tracing::info!(
            "Renamed {} occurrences in {} files to {}{}",
            outcome.edits_applied,
            outcome.files_renamed,
            new_name,
            if outcome.cancelled { " (cancelled)" } else { "" }
        );
        Ok(outcome)
    }
}
