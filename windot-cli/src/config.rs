//! Configuration handling for the WinDot CLI
//!
//! Values come from windot.toml (or `--config`); command line flags override them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use windot_render::Color;

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub plot: PlotConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub indel: IndelConfig,
    #[serde(default)]
    pub alignment: AlignmentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Positions compared per grid coordinate
    #[serde(default = "default_window")]
    pub window: usize,

    /// Equal positions required within a window
    #[serde(default = "default_threshold")]
    pub threshold: usize,

    /// Draw axes and tics
    #[serde(default = "default_true")]
    pub with_axes: bool,

    /// Marker size in content units
    #[serde(default = "default_dot_size")]
    pub dot_size: i64,

    /// Content-to-device multiplier
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Title the plot with the sequence identifiers
    #[serde(default = "default_true")]
    pub show_names: bool,

    /// Fill of primary markers
    #[serde(default = "default_primary_color")]
    pub primary_color: String,

    /// Fill and outline of markers on gap rows
    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,

    #[serde(default = "default_background")]
    pub background: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// PostScript page size relative to the canvas
    #[serde(default = "default_ps_scale")]
    pub ps_scale: f64,

    /// Stamp PostScript output with its creation time
    #[serde(default)]
    pub timestamp: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndelConfig {
    /// Shortest gap run reported
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    #[serde(default = "default_gap_char")]
    pub gap_char: char,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlignmentConfig {
    /// Treat input records as already aligned
    #[serde(default)]
    pub prealigned: bool,
}

fn default_window() -> usize { 11 }
fn default_threshold() -> usize { 7 }
fn default_true() -> bool { true }
fn default_dot_size() -> i64 { 1 }
fn default_scale() -> f64 { 1.0 }
fn default_primary_color() -> String { "#000000".to_string() }
fn default_secondary_color() -> String { "#ff0000".to_string() }
fn default_background() -> String { "#ffffff".to_string() }
fn default_ps_scale() -> f64 { 0.6 }
fn default_min_length() -> usize { 1 }
fn default_gap_char() -> char { '-' }

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            threshold: default_threshold(),
            with_axes: true,
            dot_size: default_dot_size(),
            scale: default_scale(),
            show_names: true,
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
            background: default_background(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            ps_scale: default_ps_scale(),
            timestamp: false,
        }
    }
}

impl Default for IndelConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            gap_char: default_gap_char(),
        }
    }
}

impl PlotConfig {
    pub fn primary_color(&self) -> CliResult<Color> {
        parse_color("primary_color", &self.primary_color)
    }

    pub fn secondary_color(&self) -> CliResult<Color> {
        parse_color("secondary_color", &self.secondary_color)
    }

    pub fn background(&self) -> CliResult<Color> {
        parse_color("background", &self.background)
    }
}

impl IndelConfig {
    pub fn gap_byte(&self) -> CliResult<u8> {
        if self.gap_char.is_ascii() {
            Ok(self.gap_char as u8)
        } else {
            Err(CliError::config(format!(
                "indel.gap_char must be an ASCII character, got '{}'",
                self.gap_char
            )))
        }
    }
}

fn parse_color(key: &str, value: &str) -> CliResult<Color> {
    Color::from_hex(value).ok_or_else(|| CliError::config(format!("invalid colour '{}' for plot.{}", value, key)))
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from("windot.toml");
                if default_path.exists() {
                    log::info!("Loading configuration from: windot.toml");
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::file_not_found(path.to_path_buf()).into());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content).map_err(CliError::from)?;
        Ok(config)
    }

    /// Catch bad values before any command runs
    pub fn validate(&self) -> CliResult<()> {
        self.plot.primary_color()?;
        self.plot.secondary_color()?;
        self.plot.background()?;
        self.indel.gap_byte()?;
        if !self.plot.scale.is_finite() || self.plot.scale <= 0.0 {
            return Err(CliError::config(format!("plot.scale must be greater than 0, got {}", self.plot.scale)));
        }
        if !self.output.ps_scale.is_finite() || self.output.ps_scale <= 0.0 {
            return Err(CliError::config(format!(
                "output.ps_scale must be greater than 0, got {}",
                self.output.ps_scale
            )));
        }
        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(CliError::from)?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> CliResult<String> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }
}
