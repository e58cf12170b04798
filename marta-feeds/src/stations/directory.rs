//! Shared, self-extending station directory.

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::StationName;

use super::names::DEFAULT_STATIONS;

/// Thread-safe list of canonical station names.
///
/// Cloning is cheap and every clone sees the same list, so one directory
/// can be handed to many clients or query sessions. Names are only ever
/// appended, and [`register`](Self::register) checks and inserts under a
/// single write lock, so concurrent registrations of the same new name
/// add it exactly once.
#[derive(Debug, Clone)]
pub struct StationDirectory {
    inner: Arc<RwLock<Vec<StationName>>>,
}

impl StationDirectory {
    /// Create a directory seeded with [`DEFAULT_STATIONS`].
    pub fn new() -> Self {
        Self::from_names(DEFAULT_STATIONS)
    }

    /// Create a directory with the given names, in order.
    ///
    /// Names are upper-cased; duplicates after the first are dropped.
    pub fn from_names<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut list: Vec<StationName> = Vec::new();
        for name in names {
            let name = StationName::new(name);
            if !list.contains(&name) {
                list.push(name);
            }
        }

        Self {
            inner: Arc::new(RwLock::new(list)),
        }
    }

    /// Create an empty directory.
    pub fn empty() -> Self {
        Self::from_names(std::iter::empty::<&str>())
    }

    /// Whether `name` (in any casing) is a known canonical name.
    pub fn contains(&self, name: &str) -> bool {
        let wanted = StationName::new(name);
        self.read().contains(&wanted)
    }

    /// Resolve a partial name to the first canonical name containing it.
    ///
    /// Matching is a case-insensitive substring test in directory order;
    /// the first hit wins, not the closest.
    ///
    /// # Examples
    ///
    /// ```
    /// use marta_feeds::StationDirectory;
    ///
    /// let directory = StationDirectory::new();
    /// let name = directory.resolve("peachtree").unwrap();
    /// assert_eq!(name.as_str(), "PEACHTREE CENTER STATION");
    ///
    /// assert!(directory.resolve("springfield").is_none());
    /// ```
    pub fn resolve(&self, partial: &str) -> Option<StationName> {
        self.read()
            .iter()
            .find(|name| name.contains_fragment(partial))
            .cloned()
    }

    /// Append `name` if it is not already known.
    ///
    /// Returns `true` if the name was added by this call.
    pub fn register(&self, name: &str) -> bool {
        let name = StationName::new(name);
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if guard.contains(&name) {
            return false;
        }
        guard.push(name);
        true
    }

    /// Get the number of known stations.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// A copy of the current names, in directory order.
    pub fn names(&self) -> Vec<StationName> {
        self.read().clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<StationName>> {
        // Names are append-only, so a poisoned list is still consistent.
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StationDirectory {
    fn default() -> Self {
        Self::new()
    }
}
