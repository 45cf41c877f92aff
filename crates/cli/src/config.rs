//! Application configuration
//!
//! Configuration is assembled in layers, lowest priority first:
//!
//! 1. built-in defaults (`AppConfig::default()`)
//! 2. a TOML configuration file (`config.toml` unless told otherwise)
//! 3. `PYMODULE_*` environment variables
//! 4. command-line options
//!
//! File and environment layers are applied as TOML tables merged with
//! [`deep_update`], so a layer only overrides the keys it names.
//!
//! # Example
//!
//! ```toml
//! [logging]
//! verbose = true
//!
//! [parameters]
//! param1 = 10
//! ```

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Configuration file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

pub const ENV_PARAM1: &str = "PYMODULE_PARAM1";
pub const ENV_PARAM2: &str = "PYMODULE_PARAM2";
pub const ENV_INPUT_FILE: &str = "PYMODULE_INPUT_FILE";
pub const ENV_OUTPUT_FILE: &str = "PYMODULE_OUTPUT_FILE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDescription {
    pub text: String,
    #[serde(rename = "content-type")]
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub template_name: String,
    pub template_version: String,
    pub template_description: TemplateDescription,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        TemplateConfig {
            template_name: "pymodule".to_string(),
            template_version: "3.4.1".to_string(),
            template_description: TemplateDescription {
                text: "Template with CLI interface, configuration options in a file, logger and unit tests"
                    .to_string(),
                content_type: "text/plain".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: bool,
    /// Print version information instead of running
    pub version_option: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParametersConfig {
    pub param1: i64,
    pub param2: i64,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        ParametersConfig {
            param1: 1,
            param2: 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionalsConfig {
    pub input_file: String,
    pub output_file: String,
}

/// The complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub template: TemplateConfig,
    pub logging: LoggingConfig,
    pub parameters: ParametersConfig,
    pub positionals: PositionalsConfig,
}

// Shape a configuration file may take. `template` is fixed and therefore
// absent; unknown keys anywhere are rejected.

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(dead_code)]
struct FileSchema {
    logging: Option<LoggingSchema>,
    parameters: Option<ParametersSchema>,
    positionals: Option<PositionalsSchema>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(dead_code)]
struct LoggingSchema {
    verbose: Option<bool>,
    version_option: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(dead_code)]
struct ParametersSchema {
    param1: Option<i64>,
    param2: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(dead_code)]
struct PositionalsSchema {
    input_file: Option<String>,
    output_file: Option<String>,
}

/// Error loading one configuration layer
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// A layer has keys or value types the configuration does not allow
    Schema { origin: String, reason: String },
    /// An environment variable holds an unusable value
    Env {
        var: String,
        value: String,
        reason: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(
                f,
                "Failed to read configuration file '{}': {}",
                path.display(),
                source
            ),
            ConfigError::Parse { path, source } => write!(
                f,
                "Failed to parse TOML file '{}'. Invalid TOML syntax: {}",
                path.display(),
                source
            ),
            ConfigError::Schema { origin, reason } => {
                write!(f, "Configuration validation error in {}: {}", origin, reason)
            }
            ConfigError::Env { var, value, reason } => {
                write!(f, "Invalid value '{}' for {}: {}", value, var, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Recursively merge `overlay` into `base`.
///
/// Where both sides hold a table the tables are merged; any other value in
/// `overlay` replaces the one in `base`. Keys only in `overlay` are added.
pub fn deep_update(base: &mut toml::Table, overlay: &toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(overlay_table) = value {
            if let Some(toml::Value::Table(base_table)) = base.get_mut(key) {
                deep_update(base_table, overlay_table);
                continue;
            }
        }
        base.insert(key.clone(), value.clone());
    }
}

/// Command-line options
#[derive(Debug, Default, Parser)]
#[command(name = "pymodule")]
#[command(about = "Run the cmodulea demo with layered configuration", long_about = None)]
#[command(
    after_help = "Priority: (lowest) defaults -> config file -> environment variables -> CLI options (highest)"
)]
pub struct CliOptions {
    /// Name of the configuration file, default is 'config.toml'
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Do not use a configuration file (only defaults & options)
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,

    /// Show version information of the module
    #[arg(short = 'v')]
    pub version_option: bool,

    /// Enable verbose mode
    #[arg(long, conflicts_with = "no_verbose")]
    pub verbose: bool,

    /// Disable verbose mode
    #[arg(long)]
    pub no_verbose: bool,

    /// Parameter1
    #[arg(long, help_heading = "Options")]
    pub param1: Option<i64>,

    /// Parameter2
    #[arg(long, help_heading = "Options")]
    pub param2: Option<i64>,

    /// Input file
    #[arg(help_heading = "Parameters")]
    pub input_file: Option<String>,

    /// Output file
    #[arg(help_heading = "Parameters")]
    pub output_file: Option<String>,
}

/// Where the file layer comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No `--config` given; the default file is optional
    Default(PathBuf),
    /// `--config PATH`; the file must exist
    Explicit(PathBuf),
    /// `--no-config`
    Disabled,
}

impl CliOptions {
    /// `Some(true)` for `--verbose`, `Some(false)` for `--no-verbose`
    pub fn verbosity(&self) -> Option<bool> {
        if self.verbose {
            Some(true)
        } else if self.no_verbose {
            Some(false)
        } else {
            None
        }
    }

    pub fn config_source(&self) -> ConfigSource {
        if self.no_config {
            return ConfigSource::Disabled;
        }
        match &self.config {
            // An empty name skips the file, as `--no-config` does
            Some(path) if path.is_empty() => ConfigSource::Disabled,
            Some(path) => ConfigSource::Explicit(PathBuf::from(path)),
            None => ConfigSource::Default(PathBuf::from(DEFAULT_CONFIG_FILE)),
        }
    }
}

/// Configuration under construction
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub config: AppConfig,
}

impl Config {
    /// Start from the built-in defaults
    pub fn new() -> Self {
        Config::default()
    }

    /// Merge a TOML overlay into the current configuration
    fn apply_overlay(&mut self, overlay: &toml::Table) -> Result<(), String> {
        let mut table = match toml::Value::try_from(&self.config) {
            Ok(toml::Value::Table(table)) => table,
            Ok(_) => return Err("configuration did not serialize to a table".to_string()),
            Err(e) => return Err(e.to_string()),
        };
        deep_update(&mut table, overlay);
        self.config = toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| e.to_string())?;
        Ok(())
    }

    /// Parse and validate configuration file contents
    pub fn parse_config_file(path: &Path, content: &str) -> Result<toml::Table, ConfigError> {
        let table: toml::Table = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::Value::Table(table.clone())
            .try_into::<FileSchema>()
            .map_err(|e| ConfigError::Schema {
                origin: path.display().to_string(),
                reason: e.message().to_string(),
            })?;

        Ok(table)
    }

    /// Apply the file layer. Returns the table read from the file, if any.
    pub fn load_config_file(
        &mut self,
        source: &ConfigSource,
    ) -> Result<Option<toml::Table>, ConfigError> {
        let path = match source {
            ConfigSource::Disabled => return Ok(None),
            ConfigSource::Default(path) => {
                warn!("CFG: Using default '{}'", path.display());
                if !path.exists() {
                    warn!("CFG: '{}' not found, continuing with defaults", path.display());
                    return Ok(None);
                }
                path
            }
            ConfigSource::Explicit(path) => path,
        };

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        let table = Self::parse_config_file(path, &content)?;

        self.apply_overlay(&table)
            .map_err(|reason| ConfigError::Schema {
                origin: path.display().to_string(),
                reason,
            })?;
        debug!("CFG: loaded '{}'", path.display());

        Ok(Some(table))
    }

    /// Apply the environment layer from the process environment
    pub fn load_config_env(&mut self) -> Result<(), ConfigError> {
        self.load_config_env_from(|var| std::env::var(var).ok())
    }

    /// Apply the environment layer using `lookup` to read variables
    pub fn load_config_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut parameters = toml::Table::new();
        for (key, var) in [("param1", ENV_PARAM1), ("param2", ENV_PARAM2)] {
            if let Some(raw) = lookup(var) {
                let value: i64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::Env {
                        var: var.to_string(),
                        value: raw.clone(),
                        reason: e.to_string(),
                    }
                })?;
                parameters.insert(key.to_string(), toml::Value::Integer(value));
            }
        }

        let mut positionals = toml::Table::new();
        for (key, var) in [("input_file", ENV_INPUT_FILE), ("output_file", ENV_OUTPUT_FILE)] {
            if let Some(raw) = lookup(var) {
                positionals.insert(key.to_string(), toml::Value::String(raw));
            }
        }

        let mut overlay = toml::Table::new();
        if !parameters.is_empty() {
            overlay.insert("parameters".to_string(), toml::Value::Table(parameters));
        }
        if !positionals.is_empty() {
            overlay.insert("positionals".to_string(), toml::Value::Table(positionals));
        }
        if overlay.is_empty() {
            return Ok(());
        }

        self.apply_overlay(&overlay)
            .map_err(|reason| ConfigError::Schema {
                origin: "environment".to_string(),
                reason,
            })
    }

    /// Apply the command-line layer. Only options actually given override.
    pub fn merge_cli_options(&mut self, cli: &CliOptions) -> &AppConfig {
        if cli.version_option {
            self.config.logging.version_option = true;
        }
        if let Some(verbose) = cli.verbosity() {
            self.config.logging.verbose = verbose;
        }
        if let Some(param1) = cli.param1 {
            self.config.parameters.param1 = param1;
        }
        if let Some(param2) = cli.param2 {
            self.config.parameters.param2 = param2;
        }
        if let Some(input_file) = &cli.input_file {
            self.config.positionals.input_file = input_file.clone();
        }
        if let Some(output_file) = &cli.output_file {
            self.config.positionals.output_file = output_file.clone();
        }
        &self.config
    }
}

/// Build the final configuration from all layers.
///
/// When `-v` is given nothing else is loaded: the caller only needs to know
/// that version information was requested.
pub fn get_app_configuration(cli: &CliOptions) -> Result<Config, ConfigError> {
    let mut config = Config::new();

    if cli.version_option {
        config.config.logging.version_option = true;
        return Ok(config);
    }

    config
        .load_config_file(&cli.config_source())
        .inspect_err(|e| info!("Error with loading configuration file. Giving up.\n{}", e))?;

    config
        .load_config_env()
        .inspect_err(|e| info!("Error with loading environment variables. Giving up.\n{}", e))?;

    config.merge_cli_options(cli);

    Ok(config)
}
