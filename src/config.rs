//! Typed run options and optional config-file defaults.
//!
//! Options are resolved in three layers: built-in defaults, an optional TOML
//! configuration file, and finally `key=value` command-line tokens. A bare
//! key is shorthand for `move=true`; value-typed keys require a value.
//!
//! # Configuration File Format
//!
//! ```toml
//! [defaults]
//! move = false
//! path = "/home/user/inbox"
//! time = "modified"
//! format = "yyyy-mm-dd"
//! display = "yyyy-mm-dd hh:MM:ss"
//! prefer = "min"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while resolving options.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the explicitly requested path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// IO error while reading configuration.
    IoError(String),
    /// A recognized key was given a value it cannot take.
    InvalidValue { key: String, value: String },
    /// A value-typed key was passed without a value.
    MissingValue { key: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value '{}' for option '{}'", value, key)
            }
            ConfigError::MissingValue { key } => {
                write!(f, "Option '{}' requires a value ({}=...)", key, key)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Which timestamp family drives the bucket name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeBasis {
    Created,
    #[default]
    Modified,
}

impl TimeBasis {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "created" => Some(Self::Created),
            "modified" => Some(Self::Modified),
            _ => None,
        }
    }
}

/// Which bound of an entry's timestamp range is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Prefer {
    #[default]
    Min,
    Max,
}

impl Prefer {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "min" => Some(Self::Min),
            "max" => Some(Self::Max),
            _ => None,
        }
    }
}

/// Resolved run options: the six recognized settings with typed defaults.
#[derive(Debug, Clone)]
pub struct Options {
    /// When false, run in preview mode and never touch the filesystem.
    pub move_files: bool,
    /// Directory to scan and organize.
    pub path: PathBuf,
    /// Timestamp family used for bucket names.
    pub time: TimeBasis,
    /// Bucket name date pattern (dateformat-style tokens).
    pub format: String,
    /// Date pattern for the Created/Modified report columns.
    pub display: String,
    /// Which bound of the timestamp range to use.
    pub prefer: Prefer,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            move_files: false,
            path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            time: TimeBasis::default(),
            format: "yyyy-mm-dd".to_string(),
            display: "yyyy-mm-dd hh:MM:ss".to_string(),
            prefer: Prefer::default(),
        }
    }
}

/// Option defaults as they appear in a configuration file. Every field is
/// optional; absent fields keep their built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub defaults: ConfigDefaults,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigDefaults {
    #[serde(rename = "move", default)]
    pub move_files: Option<bool>,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub prefer: Option<String>,
}

impl ConfigFile {
    /// Load configuration defaults, with fallback to built-ins.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.organizr.toml` in the current directory
    /// 3. Look for `~/.config/organizr/config.toml` in the home directory
    /// 4. Fall back to empty defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but
    /// cannot be read, or if a found file contains invalid TOML.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(".organizr.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("organizr")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }
}

impl Options {
    /// Resolves options from the configuration file chain (see
    /// [`ConfigFile::load`]) layered over the built-in defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = ConfigFile::load(config_path)?;
        let mut options = Self::default();
        options.apply_defaults(file.defaults)?;
        Ok(options)
    }

    fn apply_defaults(&mut self, defaults: ConfigDefaults) -> Result<(), ConfigError> {
        if let Some(move_files) = defaults.move_files {
            self.move_files = move_files;
        }
        if let Some(path) = defaults.path {
            self.path = path;
        }
        if let Some(time) = defaults.time {
            self.time = TimeBasis::parse(&time).ok_or(ConfigError::InvalidValue {
                key: "time".to_string(),
                value: time,
            })?;
        }
        if let Some(format) = defaults.format {
            self.format = format;
        }
        if let Some(display) = defaults.display {
            self.display = display;
        }
        if let Some(prefer) = defaults.prefer {
            self.prefer = Prefer::parse(&prefer).ok_or(ConfigError::InvalidValue {
                key: "prefer".to_string(),
                value: prefer,
            })?;
        }
        Ok(())
    }

    /// Applies `key=value` (or bare `key`) command-line tokens on top of the
    /// current options.
    ///
    /// Returns the list of unrecognized keys so the caller can warn about
    /// them; they are otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns an error when a recognized key is given an invalid value, or
    /// when a value-typed key is passed bare.
    pub fn apply_args<I>(&mut self, args: I) -> Result<Vec<String>, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut unknown = Vec::new();

        for arg in args {
            let (key, value) = match arg.split_once('=') {
                Some((key, value)) => (key.to_string(), Some(value.to_string())),
                None => (arg, None),
            };

            match key.as_str() {
                "move" => {
                    self.move_files = match value.as_deref() {
                        None | Some("true") => true,
                        Some("false") => false,
                        Some(other) => {
                            return Err(ConfigError::InvalidValue {
                                key,
                                value: other.to_string(),
                            });
                        }
                    };
                }
                "path" => {
                    let value = value.ok_or(ConfigError::MissingValue { key })?;
                    self.path = PathBuf::from(value);
                }
                "time" => {
                    let value = value.ok_or_else(|| ConfigError::MissingValue {
                        key: "time".to_string(),
                    })?;
                    self.time =
                        TimeBasis::parse(&value).ok_or(ConfigError::InvalidValue { key, value })?;
                }
                "format" => {
                    self.format = value.ok_or(ConfigError::MissingValue { key })?;
                }
                "display" => {
                    self.display = value.ok_or(ConfigError::MissingValue { key })?;
                }
                "prefer" => {
                    let value = value.ok_or_else(|| ConfigError::MissingValue {
                        key: "prefer".to_string(),
                    })?;
                    self.prefer =
                        Prefer::parse(&value).ok_or(ConfigError::InvalidValue { key, value })?;
                }
                _ => unknown.push(key),
            }
        }

        Ok(unknown)
    }
}
