//! Interned identifiers for type names and type parameters.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

/// Key of an interned string.
pub type Word = Spur;

/// Process-wide table shared by every registry, so equal names compare equal
/// across registries.
static NAMES: OnceLock<ThreadedRodeo> = OnceLock::new();

fn names() -> &'static ThreadedRodeo {
    NAMES.get_or_init(ThreadedRodeo::new)
}

pub fn intern(text: &str) -> Word {
    names().get_or_intern(text)
}

/// Text of a key returned by [`intern`].
pub fn resolve(word: Word) -> &'static str {
    names().resolve(&word)
}

/// An interned identifier.
///
/// Used both as the nominal identity of a type (`List`, `i32`, `Outer`) and as
/// the name of a type parameter (`T`). Comparing and hashing a `Name` never
/// touches the underlying text.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Name(Word);

impl Name {
    pub fn new(text: &str) -> Self {
        Name(intern(text))
    }

    pub fn as_str(&self) -> &'static str {
        resolve(self.0)
    }

    pub fn word(&self) -> Word {
        self.0
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Name::new(text)
    }
}

impl From<String> for Name {
    fn from(text: String) -> Self {
        Name::new(&text)
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.as_str())
    }
}

impl Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Ok(Name::new(&text))
    }
}
