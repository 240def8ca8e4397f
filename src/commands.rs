//! Command table: every plugin operation with its name, description and default keys

use crate::config::Config;

/// Operations the plugin exposes to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginCommand {
    SymbolInfo,
    FindSubclasses,
    FindSuperclasses,
    Diagnose,
    FollowLocation,
    ListProjects,
    FindReferences,
    FindReferencesByName,
    JumpToParent,
    FindVirtuals,
    RenameSymbol,
}

impl PluginCommand {
    pub const ALL: [PluginCommand; 11] = [
        PluginCommand::SymbolInfo,
        PluginCommand::FindSubclasses,
        PluginCommand::FindSuperclasses,
        PluginCommand::Diagnose,
        PluginCommand::FollowLocation,
        PluginCommand::ListProjects,
        PluginCommand::FindReferences,
        PluginCommand::FindReferencesByName,
        PluginCommand::JumpToParent,
        PluginCommand::FindVirtuals,
        PluginCommand::RenameSymbol,
    ];

    /// Stable snake_case name (used in config files and on the command line)
    pub fn name(&self) -> &'static str {
        match self {
            Self::SymbolInfo => "symbol_info",
            Self::FindSubclasses => "find_subclasses",
            Self::FindSuperclasses => "find_superclasses",
            Self::Diagnose => "diagnose",
            Self::FollowLocation => "follow_location",
            Self::ListProjects => "list_projects",
            Self::FindReferences => "find_references",
            Self::FindReferencesByName => "find_references_by_name",
            Self::JumpToParent => "jump_to_parent",
            Self::FindVirtuals => "find_virtuals",
            Self::RenameSymbol => "rename_symbol",
        }
    }

    /// Parse a command from its snake_case name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }

    /// Keys (after the leader) bound to the command by default
    pub fn default_keys(&self) -> &'static str {
        match self {
            Self::SymbolInfo => "ri",
            Self::FindSubclasses => "rc",
            Self::FindSuperclasses => "rC",
            Self::Diagnose => "rd",
            Self::FollowLocation => "rj",
            Self::ListProjects => "rl",
            Self::FindReferences => "rf",
            Self::FindReferencesByName => "rn",
            Self::JumpToParent => "rp",
            Self::FindVirtuals => "rv",
            Self::RenameSymbol => "rw",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::SymbolInfo => "Show information about the symbol under the cursor",
            Self::FindSubclasses => "List subclasses of the class under the cursor",
            Self::FindSuperclasses => "List superclasses of the class under the cursor",
            Self::Diagnose => "Save the buffer and show its diagnostics",
            Self::FollowLocation => "Jump to the definition of the symbol under the cursor",
            Self::ListProjects => "List indexed projects and switch the current one",
            Self::FindReferences => "List references to the symbol under the cursor",
            Self::FindReferencesByName => "List references to a symbol by name",
            Self::JumpToParent => "Jump to the enclosing scope of the cursor",
            Self::FindVirtuals => "List overrides of the virtual method under the cursor",
            Self::RenameSymbol => "Rename the symbol under the cursor in all files",
        }
    }
}

impl std::fmt::Display for PluginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A key sequence bound to a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMapping {
    /// Full key sequence including the leader
    pub keys: String,
    pub command: PluginCommand,
}

/// Resolve the key mappings for all commands, applying config overrides.
pub fn key_mappings(config: &Config) -> Vec<KeyMapping> {
    PluginCommand::ALL
        .into_iter()
        .map(|command| {
            let keys = config
                .keybindings
                .get(command.name())
                .map(String::as_str)
                .unwrap_or_else(|| command.default_keys());
            KeyMapping {
                keys: format!("{}{}", config.leader, keys),
                command,
            }
        })
        .collect()
}

/// Human readable table of the key mappings, one command per line
pub fn format_key_mappings(mappings: &[KeyMapping]) -> String {
    let width = mappings.iter().map(|m| m.keys.len()).max().unwrap_or(0);
    mappings
        .iter()
        .map(|m| {
            format!(
                "{:width$}  {:24} {}\n",
                m.keys,
                m.command.name(),
                m.command.description(),
                width = width
            )
        })
        .collect()
}
