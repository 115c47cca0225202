use serde::{Deserialize, Serialize};

pub mod charset;
pub mod config;
pub mod password_generation;
mod state;
pub mod strength;

pub use charset::{CharacterClass, ClassSelection};
pub use config::{Config, ConfigError, LengthLimits};
pub use password_generation::{Alphabet, IndexRounding, RngSource, UniformSource};
pub use state::{Clipboard, Controller, CopyError, Event, GeneratorState, Notifier};
pub use strength::StrengthScore;

/// A generated password.
///
/// The `Debug` impl is opaque, so a password never ends up in a log line by accident.
#[derive(Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters (not bytes) in the password.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raised when a password is requested without any character class enabled.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select at least one option.")]
    NoClassSelected,
}
