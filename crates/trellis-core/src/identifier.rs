//! Element identifiers backed by a process-wide string interner.
//!
//! Element ids are compared and hashed constantly (store lookups, event
//! filtering, neighbor resolution), so they are interned once and passed around
//! as a `Copy` symbol. See [`Id`].

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for element identifiers.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned identifier of a node or an edge.
///
/// Two ids are equal exactly when their strings are equal. The same id may be
/// used by a node and by an edge at the same time; the group decides which
/// namespace an id lives in.
///
/// # Examples
///
/// ```
/// use trellis_core::identifier::Id;
///
/// let a = Id::new("a");
/// let generated = Id::generated("n", 3);
///
/// assert_eq!(a, "a");
/// assert_eq!(generated, "n3");
/// assert_eq!(generated.to_string(), "n3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from its string form.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates the automatic id `prefix` followed by `counter`, e.g. `e12`.
    pub fn generated(prefix: &str, counter: u64) -> Self {
        Self::new(&format!("{prefix}{counter}"))
    }

    /// Runs `f` with the string form of this id.
    ///
    /// The interner is released before `f` runs, so `f` may create or compare
    /// other ids.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let name = interner()
            .resolve(self.0)
            .map(str::to_owned)
            .unwrap_or_default();
        f(&name)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|name| f.write_str(name))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Id {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.to_string()
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "a"`
    fn eq(&self, other: &str) -> bool {
        self.with_str(|name| name == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
