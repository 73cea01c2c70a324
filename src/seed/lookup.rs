//! In-memory country lookup by team name or FIFA code.

use crate::domain::Country;
use std::collections::{HashMap, HashSet};

/// Maps both the name and the FIFA code of every known country to its row.
///
/// Later insertions win, so overlaying this run's countries on top of the
/// stored ones makes the freshest row the one that matches resolve to.
#[derive(Debug, Clone, Default)]
pub struct CountryLookup {
    by_key: HashMap<String, Country>,
}

impl CountryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_countries(countries: impl IntoIterator<Item = Country>) -> Self {
        let mut lookup = Self::new();
        lookup.extend(countries);
        lookup
    }

    pub fn insert(&mut self, country: Country) {
        self.by_key.insert(country.fifa_code.clone(), country.clone());
        self.by_key.insert(country.name.clone(), country);
    }

    pub fn extend(&mut self, countries: impl IntoIterator<Item = Country>) {
        for country in countries {
            self.insert(country);
        }
    }

    /// Resolve a team reference (name or code).
    pub fn resolve(&self, key: &str) -> Option<&Country> {
        self.by_key.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Number of distinct countries reachable through the lookup.
    pub fn len(&self) -> usize {
        self.by_key
            .values()
            .map(|c| c.id)
            .collect::<HashSet<_>>()
            .len()
    }
}
