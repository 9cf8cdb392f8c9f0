//! Converter configuration
//!
//! Defaults for scaffolded projects, cut settings, the canvas coordinate
//! mapping, and output formatting. Loaded from TOML; every section and key
//! is optional and falls back to [`DEFAULT_CONFIG`].

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// The built-in configuration, printed by `--print-config`
pub const DEFAULT_CONFIG: &str = r#"# Root attributes of newly scaffolded projects
[project]
app_version = "1.4.00"
device_name = "No Machine"

# Cut setting created for a cut index the project does not define yet
[cut_setting]
max_power = 20
max_power2 = 20
speed = 100
priority = 0

# Canvas export: canvas height in pixels and pixels per millimetre
[canvas]
height = 600
scale = 3

[output]
pretty_print = true
"#;

/// Complete converter configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub project: ProjectDefaults,
    pub cut_setting: CutSettingDefaults,
    pub canvas: CanvasSettings,
    pub output: OutputSettings,
}

/// Root attributes for newly created project documents
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectDefaults {
    pub app_version: String,
    pub device_name: String,
}

impl Default for ProjectDefaults {
    fn default() -> Self {
        Self {
            app_version: "1.4.00".to_string(),
            device_name: "No Machine".to_string(),
        }
    }
}

/// Values for a newly created `CutSetting`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CutSettingDefaults {
    pub max_power: f64,
    pub max_power2: f64,
    pub speed: f64,
    pub priority: u32,
}

impl Default for CutSettingDefaults {
    fn default() -> Self {
        Self {
            max_power: 20.0,
            max_power2: 20.0,
            speed: 100.0,
            priority: 0,
        }
    }
}

/// Mapping from editor canvas pixels to project millimetres
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Canvas height in pixels; the y axis is flipped around it
    pub height: f64,
    /// Canvas pixels per project unit
    pub scale: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            height: 600.0,
            scale: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Indent nested elements in written XML
    pub pretty_print: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { pretty_print: true }
    }
}

impl ConvertConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set whether written XML is indented
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.output.pretty_print = pretty;
        self
    }

    /// Set the application version written on scaffolded projects
    pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
        self.project.app_version = version.into();
        self
    }
}
