//! String interner for identifier storage.
//!
//! Provides O(1) interning and lookup. The interner is the one piece of
//! state that compilation units may share, so access goes through a
//! `parking_lot::RwLock`.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    /// More strings than a `Name` can address.
    #[error("interner exceeded capacity: {count} strings, max is {max}", max = u32::MAX)]
    Overflow { count: usize },
}

/// Storage behind the lock.
struct InternTable {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name::raw`.
    strings: Vec<&'static str>,
}

impl InternTable {
    fn with_empty() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, Name::EMPTY.raw());
        InternTable {
            map,
            strings: vec![empty],
        }
    }
}

/// String interner.
///
/// Interned strings are leaked and live for the rest of the process, which
/// is what lets [`lookup`](Self::lookup) hand out `&'static str`.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned.
    pub fn new() -> Self {
        StringInterner {
            table: RwLock::new(InternTable::with_empty()),
        }
    }

    /// Try to intern a string, returning its Name or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        // Fast path: check if already interned
        if let Some(&raw) = self.table.read().map.get(s) {
            return Ok(Name::from_raw(raw));
        }

        let mut guard = self.table.write();

        // Double-check after acquiring write lock
        if let Some(&raw) = guard.map.get(s) {
            return Ok(Name::from_raw(raw));
        }

        let raw = u32::try_from(guard.strings.len()).map_err(|_| InternError::Overflow {
            count: guard.strings.len(),
        })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, raw);

        Ok(Name::from_raw(raw))
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if the interner exceeds capacity. Use `try_intern` for
    /// fallible interning.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Look up the string for a Name.
    ///
    /// Names that did not come from this interner resolve to `""`.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.get(name).unwrap_or("")
    }

    /// Look up the string for a Name, if this interner produced it.
    pub fn get(&self, name: Name) -> Option<&'static str> {
        self.table.read().strings.get(name.raw() as usize).copied()
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Check if the interner only holds the empty string.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
