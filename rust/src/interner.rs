//! Case-insensitive station name interning.
//!
//! Converts station names to dense integer IDs so the scheduler can work on
//! plain vectors instead of string-keyed maps.

use rustc_hash::FxHashMap;

/// Interned station ID (index into the graph's station vector).
pub type StationId = u32;

/// Maps station names to dense IDs, comparing names case-insensitively.
///
/// The first spelling interned for a name is the one `resolve` returns.
#[derive(Debug, Clone)]
pub struct StationInterner {
    to_int: FxHashMap<String, StationId>,
    from_int: Vec<String>,
}

/// Normalized lookup key for a station name.
fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

impl StationInterner {
    /// Create a new interner with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_int: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_int: Vec::with_capacity(capacity),
        }
    }

    /// Intern a name, returning its ID and whether it was newly added.
    pub fn intern(&mut self, name: &str) -> (StationId, bool) {
        let key = fold(name);
        if let Some(&id) = self.to_int.get(&key) {
            return (id, false);
        }
        let id = self.from_int.len() as StationId;
        self.from_int.push(name.trim().to_string());
        self.to_int.insert(key, id);
        (id, true)
    }

    /// Get the ID for a name, ignoring case and surrounding whitespace.
    #[inline]
    pub fn get(&self, name: &str) -> Option<StationId> {
        self.to_int.get(&fold(name)).copied()
    }

    /// Get the stored spelling for an ID.
    #[inline]
    pub fn resolve(&self, id: StationId) -> Option<&str> {
        self.from_int.get(id as usize).map(|s| s.as_str())
    }

    /// Number of interned names.
    pub fn len(&self) -> usize {
        self.from_int.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.from_int.is_empty()
    }
}

impl Default for StationInterner {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
