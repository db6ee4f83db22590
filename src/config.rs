//! # Configuration
//!
//! Settings for the command-line tool, loaded from an optional TOML file.
//! Every field has a default, so an empty file (or no file) is valid.
//!
//! ```toml
//! [image]
//! channels = 3        # omit to keep each image's own channel count
//!
//! [output]
//! suffix = "_encoded"
//!
//! [logging]
//! level = "info"
//! ```

use std::fs;
use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StegoError};
use crate::naming::DEFAULT_SUFFIX;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
///
/// # Errors
/// - [`StegoError::Io`] if the file cannot be read
/// - [`StegoError::Config`] if the TOML does not parse into `T`
///
/// # Example
/// ```ignore
/// let config: StegoConfig = load_config("config/stego.toml")?;
/// ```
pub fn load_config<T, P>(path: P) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| StegoError::Config(e.to_string()))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    pub image: ImageConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// How images are turned into pixel grids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Channel values per pixel: 1 (grey), 2 (grey+alpha), 3 (RGB) or 4 (RGBA).
    /// `None` keeps the channel count of the image being read.
    pub channels: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Appended to the input stem to name the encoded file
    pub suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of error, warn, info, debug, trace (or off)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.level
            .parse()
            .map_err(|_| StegoError::Config(format!("unknown log level {:?}", self.level)))
    }
}

impl StegoConfig {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    /// - Anything [`load_config`] returns
    /// - Whatever [`StegoConfig::validate`] rejects
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: StegoConfig = load_config(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the tool cannot act on.
    pub fn validate(&self) -> Result<()> {
        if let Some(channels) = self.image.channels {
            if !(1..=4).contains(&channels) {
                return Err(StegoError::UnsupportedChannels(channels));
            }
        }
        if self.output.suffix.is_empty() {
            return Err(StegoError::Config(
                "output suffix must not be empty".to_string(),
            ));
        }
        self.logging.level_filter()?;
        Ok(())
    }
}
