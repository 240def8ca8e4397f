use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// rc executable to run (resolved through PATH when not absolute)
    #[serde(default = "default_rc_command")]
    pub rc_command: String,

    /// Kill rc and report a timeout after this many milliseconds (0 waits forever)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Ask rc for absolute paths in location listings
    #[serde(default = "default_true")]
    pub absolute_paths: bool,

    /// Delay between saving the buffer and asking rc for diagnostics, giving the
    /// daemon time to pick up the change
    #[serde(default = "default_diagnose_settle_ms")]
    pub diagnose_settle_ms: u64,

    /// Leader key prefixed to every key mapping
    #[serde(default = "default_leader")]
    pub leader: String,

    /// Per-command key overrides, e.g. `{"find_references": "gr"}`
    #[serde(default)]
    pub keybindings: HashMap<String, String>,

    /// Code completion settings
    #[serde(default)]
    pub completion: CompletionConfig,
}

/// Code completion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CompletionConfig {
    /// Register the rc-backed completion function with the editor
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_rc_command() -> String {
    "rc".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_diagnose_settle_ms() -> u64 {
    1_500
}

fn default_leader() -> String {
    ",".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rc_command: default_rc_command(),
            timeout_ms: default_timeout_ms(),
            absolute_paths: true,
            diagnose_settle_ms: default_diagnose_settle_ms(),
            leader: default_leader(),
            keybindings: HashMap::new(),
            completion: CompletionConfig::default(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Config file name inside the config directory
    pub const FILENAME: &'static str = "config.json";

    /// Get the default config file path
    pub fn default_config_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|d| d.join("rtags-bridge").join(Self::FILENAME))
    }

    /// Load configuration from the default location, falling back to defaults if not found
    pub fn load_or_default() -> Self {
        if let Some(config_path) = Self::default_config_path() {
            if config_path.exists() {
                match Self::load_from_file(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(
                            "Failed to load config from {}: {}, using defaults",
                            config_path.display(),
                            e
                        );
                    }
                }
            }
        }
        Self::default()
    }

    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }
        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.rc_command.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "rc_command must not be empty".to_string(),
            ));
        }
        for (command, keys) in &self.keybindings {
            if crate::commands::PluginCommand::from_name(command).is_none() {
                return Err(ConfigError::ValidationError(format!(
                    "unknown command '{command}' in keybindings"
                )));
            }
            if keys.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "empty key sequence for '{command}'"
                )));
            }
        }
        Ok(())
    }

    /// Timeout for a single rc invocation, `None` when disabled
    pub fn rc_timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    pub fn diagnose_settle_delay(&self) -> Duration {
        Duration::from_millis(self.diagnose_settle_ms)
    }

    /// JSON Schema of the config file, for editors that validate settings
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
