//! Named predicates that policy documents may refer to.

use abac_types::Predicate;
use std::collections::BTreeMap;

/// Lookup table from predicate name to [`Predicate`].
#[derive(Debug, Clone, Default)]
pub struct PredicateCatalog {
    predicates: BTreeMap<&'static str, Predicate>,
}

impl PredicateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `predicate` under its own name, replacing any predicate
    /// registered under the same name.
    pub fn with(mut self, predicate: Predicate) -> Self {
        self.insert(predicate);
        self
    }

    pub fn insert(&mut self, predicate: Predicate) {
        self.predicates.insert(predicate.name(), predicate);
    }

    pub fn get(&self, name: &str) -> Option<&Predicate> {
        self.predicates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.predicates.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.values()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl FromIterator<Predicate> for PredicateCatalog {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for predicate in iter {
            catalog.insert(predicate);
        }
        catalog
    }
}
