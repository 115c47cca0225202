//! User configuration, read from a YAML file.
//!
//! ```yaml
//! min-length: 12
//! max-length: 30
//! default-length: 16
//! classes: [uppercase, lowercase, digits]
//! index-rounding: floor
//! ```

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::charset::{CharacterClass, ClassSelection};
use crate::password_generation::IndexRounding;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    #[serde(default = "Config::default_min_length")]
    pub min_length: usize,
    #[serde(default = "Config::default_max_length")]
    pub max_length: usize,
    #[serde(default = "Config::default_default_length")]
    pub default_length: usize,
    /// Classes enabled when the user doesn't pick any explicitly.
    #[serde(default = "Config::default_classes")]
    pub classes: Vec<CharacterClass>,
    #[serde(default)]
    pub index_rounding: IndexRounding,
}

/// The inclusive range a requested length is clamped into, and where it starts out.
///
/// Always satisfies `1 <= min <= default <= max`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LengthLimits {
    min: usize,
    max: usize,
    default: usize,
}

impl LengthLimits {
    pub fn new(min: usize, default: usize, max: usize) -> Result<LengthLimits, ConfigError> {
        if min == 0 {
            return Err(ConfigErrorRepr::ZeroMinLength.into());
        }
        if !(min <= default && default <= max) {
            return Err(ConfigErrorRepr::BadLengthRange { min, default, max }.into());
        }
        Ok(LengthLimits { min, max, default })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn default_length(&self) -> usize {
        self.default
    }

    pub fn clamp(&self, len: usize) -> usize {
        len.clamp(self.min, self.max)
    }
}

impl Default for LengthLimits {
    fn default() -> Self {
        LengthLimits {
            min: Config::default_min_length(),
            max: Config::default_max_length(),
            default: Config::default_default_length(),
        }
    }
}

impl Config {
    fn default_min_length() -> usize {
        12
    }

    fn default_max_length() -> usize {
        30
    }

    fn default_default_length() -> usize {
        12
    }

    fn default_classes() -> Vec<CharacterClass> {
        CharacterClass::ALL.to_vec()
    }

    /// Parse a config file. The result is not yet validated.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigErrorRepr::Io {
                path: path.to_owned(),
                source,
            })?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Config, ConfigError> {
        Ok(serde_yaml::from_str(contents).map_err(ConfigErrorRepr::Parse)?)
    }

    /// Load and validate the configuration.
    ///
    /// An explicit `path` must exist. Otherwise the file in the default location is read if there
    /// is one, and the built-in defaults are used if not.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let config = match path {
            Some(p) => {
                tracing::debug!(path = %p.display(), "loading config");
                Self::from_yaml_file(p)?
            }
            None => match default_config_path() {
                Some(p) if p.is_file() => {
                    tracing::debug!(path = %p.display(), "loading config from default location");
                    Self::from_yaml_file(p)?
                }
                _ => {
                    tracing::debug!("no config file; using defaults");
                    Config::default()
                }
            },
        };
        config.validated()
    }

    /// Check the invariants serde can't express.
    pub fn validated(self) -> Result<Config, ConfigError> {
        self.length_limits()?;
        Ok(self)
    }

    /// Fails if the configured lengths don't form a valid range.
    pub fn length_limits(&self) -> Result<LengthLimits, ConfigError> {
        LengthLimits::new(self.min_length, self.default_length, self.max_length)
    }

    pub fn selection(&self) -> ClassSelection {
        self.classes.iter().copied().collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_length: Self::default_min_length(),
            max_length: Self::default_max_length(),
            default_length: Self::default_default_length(),
            classes: Self::default_classes(),
            index_rounding: IndexRounding::default(),
        }
    }
}

/// `$HOME/.passgen/config.yaml`, or `None` if `HOME` isn't set.
pub fn default_config_path() -> Option<PathBuf> {
    let home = env::var_os("HOME")?;
    let mut p = PathBuf::from(home);
    p.push(".passgen");
    p.push("config.yaml");
    Some(p)
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ConfigError(ConfigErrorRepr);

impl From<ConfigErrorRepr> for ConfigError {
    fn from(err: ConfigErrorRepr) -> ConfigError {
        ConfigError(err)
    }
}

#[derive(Debug, thiserror::Error)]
enum ConfigErrorRepr {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config: {0}")]
    Parse(#[source] serde_yaml::Error),
    #[error("min-length must be at least 1")]
    ZeroMinLength,
    #[error(
        "lengths must satisfy min-length <= default-length <= max-length (got {min}, {default}, \
         {max})"
    )]
    BadLengthRange {
        min: usize,
        default: usize,
        max: usize,
    },
}
