//! The plugin facade
//!
//! `RtagsPlugin` owns the configuration and an rc runner. Each operation lives in
//! its own file as a separate `impl` block and receives the editor host it acts
//! on:
//! - navigation: references, virtuals, definitions, parents, class hierarchy
//! - diagnose: diagnostics into signs and the quickfix list
//! - rename: multi-file rename with per-file confirmation
//! - completion: the insert-mode completion function
//! - projects: symbol info and project switching

mod completion;
mod diagnose;
mod navigation;
mod projects;
pub mod rename;

use crate::commands::{key_mappings, PluginCommand};
use crate::config::Config;
use crate::error::Result;
use crate::host::{CursorPosition, EditorHost, QuickfixEntry};
use crate::model::location::Location;
use crate::services::rc::{RcClient, RcRunner};

pub struct RtagsPlugin<R: RcRunner = RcClient> {
    config: Config,
    runner: R,
}

impl RtagsPlugin<RcClient> {
    /// Plugin talking to the rc binary named in `config`
    pub fn from_config(config: Config) -> Result<Self> {
        let runner = RcClient::new(config.rc_command.clone(), config.rc_timeout())?;
        Ok(Self::new(config, runner))
    }
}

impl<R: RcRunner> RtagsPlugin<R> {
    pub fn new(config: Config, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Register key mappings and the completion function with the editor.
    pub fn init_mappings(&self, host: &mut dyn EditorHost) -> Result<()> {
        for mapping in key_mappings(&self.config) {
            host.map_key(&mapping.keys, mapping.command)?;
        }
        if self.config.completion.enabled {
            host.register_completion()?;
        }
        tracing::debug!("Registered {} key mappings", PluginCommand::ALL.len());
        Ok(())
    }

    /// Run `command`, reporting failures to the user through the host.
    pub fn dispatch(&self, command: PluginCommand, host: &mut dyn EditorHost) -> Result<()> {
        tracing::debug!("Running command {}", command);
        let result = self.execute(command, host);
        if let Err(e) = &result {
            tracing::warn!("Command {} failed: {}", command, e);
            host.write_error(&e.to_string());
        }
        result
    }

    /// Run `command` and return its error instead of showing it
    pub fn execute(&self, command: PluginCommand, host: &mut dyn EditorHost) -> Result<()> {
        match command {
            PluginCommand::SymbolInfo => self.symbol_info(host),
            PluginCommand::FindSubclasses => self.find_subclasses(host),
            PluginCommand::FindSuperclasses => self.find_superclasses(host),
            PluginCommand::Diagnose => self.diagnose(host),
            PluginCommand::FollowLocation => self.follow_location(host),
            PluginCommand::ListProjects => self.list_projects(host),
            PluginCommand::FindReferences => self.find_references(host),
            PluginCommand::FindReferencesByName => self.find_references_by_name(host),
            PluginCommand::JumpToParent => self.jump_to_parent(host),
            PluginCommand::FindVirtuals => self.find_virtuals(host),
            PluginCommand::RenameSymbol => self.rename_symbol(host).map(|_| ()),
        }
    }

    /// `file:line:col` of the cursor in rc's 1-based convention
    fn current_location(&self, host: &dyn EditorHost) -> String {
        let cursor = host.cursor();
        format!(
            "{}:{}:{}",
            host.buffer_name(),
            cursor.line,
            cursor.column + 1
        )
    }

    /// Build an argument vector, prefixed with `--absolute-path` when configured
    fn location_args(&self, args: &[&str]) -> Vec<String> {
        let mut result = Vec::with_capacity(args.len() + 1);
        if self.config.absolute_paths {
            result.push("--absolute-path".to_string());
        }
        result.extend(args.iter().map(|a| a.to_string()));
        result
    }

    /// Show `locations` in the quickfix list; an empty result leaves it untouched.
    fn show_locations(&self, host: &mut dyn EditorHost, locations: &[Location]) -> Result<()> {
        tracing::debug!("Showing {} locations", locations.len());
        if locations.is_empty() {
            return Ok(());
        }
        let entries: Vec<QuickfixEntry> = locations.iter().map(QuickfixEntry::from).collect();
        host.show_quickfix(&entries)?;
        Ok(())
    }

    /// Move the cursor to `location`, switching buffers if needed.
    fn jump_to_location(&self, host: &mut dyn EditorHost, location: &Location) -> Result<()> {
        if location.filename != host.buffer_name() {
            host.open_file(&location.filename)?;
        }
        host.set_cursor(CursorPosition::from_location(location))?;
        Ok(())
    }
}
