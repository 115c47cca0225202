//! The fixed character classes a password alphabet is assembled from.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

static UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
static LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
static DIGITS: &str = "0123456789";
/// Every printable ASCII punctuation character.
static SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Digit,
    Symbol,
}

impl CharacterClass {
    /// All classes, in the order their members appear in an alphabet.
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Digit,
        CharacterClass::Symbol,
    ];

    const NAMES: &'static [&'static str] = &["uppercase", "lowercase", "digits", "symbols"];

    /// The characters belonging to this class.
    pub fn members(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Digit => DIGITS,
            CharacterClass::Symbol => SYMBOLS,
        }
    }

    /// The name used in configuration files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => "uppercase",
            CharacterClass::Lowercase => "lowercase",
            CharacterClass::Digit => "digits",
            CharacterClass::Symbol => "symbols",
        }
    }

    /// A human-readable label, as shown next to a checkbox.
    pub fn label(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => "Include Uppercase Letters",
            CharacterClass::Lowercase => "Include Lowercase Letters",
            CharacterClass::Digit => "Include Numbers",
            CharacterClass::Symbol => "Include Symbols",
        }
    }
}

/// Free-function form of [`CharacterClass::members`].
pub fn members_of(class: CharacterClass) -> &'static str {
    class.members()
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown character class {0:?}; expected one of uppercase, lowercase, digits, symbols")]
pub struct UnknownClass(String);

impl FromStr for CharacterClass {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CharacterClass::ALL
            .into_iter()
            .find(|class| class.name() == s)
            .ok_or_else(|| UnknownClass(s.to_owned()))
    }
}

impl Serialize for CharacterClass {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for CharacterClass {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|_| de::Error::unknown_variant(&raw, CharacterClass::NAMES))
    }
}

/// Which character classes are enabled: one independent flag per class.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ClassSelection {
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl ClassSelection {
    pub fn all() -> ClassSelection {
        ClassSelection {
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
        }
    }

    pub fn contains(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Uppercase => self.uppercase,
            CharacterClass::Lowercase => self.lowercase,
            CharacterClass::Digit => self.digits,
            CharacterClass::Symbol => self.symbols,
        }
    }

    pub fn with(mut self, class: CharacterClass, enabled: bool) -> ClassSelection {
        let flag = match class {
            CharacterClass::Uppercase => &mut self.uppercase,
            CharacterClass::Lowercase => &mut self.lowercase,
            CharacterClass::Digit => &mut self.digits,
            CharacterClass::Symbol => &mut self.symbols,
        };
        *flag = enabled;
        self
    }

    /// The enabled classes, in canonical order.
    pub fn classes(&self) -> impl Iterator<Item = CharacterClass> + '_ {
        CharacterClass::ALL
            .into_iter()
            .filter(move |class| self.contains(*class))
    }

    pub fn count(&self) -> usize {
        self.classes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

impl FromIterator<CharacterClass> for ClassSelection {
    fn from_iter<I: IntoIterator<Item = CharacterClass>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ClassSelection::default(), |sel, class| sel.with(class, true))
    }
}
