//! Identifier management using string interning for efficient string storage and comparison
//!
//! This module provides the [`Id`] type used for every node and edge identifier.
//! Node identifiers are derived deterministically from the DTO, so the same
//! input always produces the same set of [`Id`]s.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Efficient identifier type using string interning
///
/// # Examples
///
/// ```
/// use usegraph_core::identifier::Id;
///
/// let module = Id::new("module-7");
/// let scoped = Id::scoped("module", 7);
/// assert_eq!(module, scoped);
/// assert_eq!(scoped, "module-7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    pub fn new(name: &str) -> Self {
        let symbol = interner().get_or_intern(name);
        Self(symbol)
    }

    /// Creates an `Id` of the form `<kind>-<raw>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use usegraph_core::identifier::Id;
    ///
    /// assert_eq!(Id::scoped("subgraph", 3), "subgraph-3");
    /// ```
    pub fn scoped(kind: &str, raw: impl fmt::Display) -> Self {
        Self::new(&format!("{kind}-{raw}"))
    }

    /// Runs `f` with the string form of this identifier without allocating.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        let value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        f(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Resolve into an owned string so the lock is released before writing.
        let value = self.with_str(str::to_owned);
        write!(f, "{value}")
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.with_str(str::to_owned);
        serializer.serialize_str(&value)
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// # Examples
    ///
    /// ```
    /// use usegraph_core::identifier::Id;
    ///
    /// let id: Id = "container-1:2".into();
    /// assert_eq!(id, "container-1:2");
    /// ```
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.with_str(|value| value == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
