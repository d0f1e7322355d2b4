// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;
use viewstate_core::{Result, Role, ViewStateError};

/// Immutable snapshot of the latest value of every role in an aggregation.
///
/// Entries keep the order in which roles were registered. A composite is only ever
/// built once every role has a value, so lookups of a registered role always succeed.
/// Clones share storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeValue<V> {
    entries: Arc<[(Role, V)]>,
}

impl<V> CompositeValue<V> {
    pub fn new(entries: Vec<(Role, V)>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Latest value of `role`, if the role is part of this composite.
    pub fn get(&self, role: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(name, _)| name.as_str() == role)
            .map(|(_, value)| value)
    }

    /// Like [`get`](Self::get), but reports a missing role as an error.
    ///
    /// # Errors
    ///
    /// Returns `ViewStateError::UnknownRole` if `role` is not part of this composite.
    pub fn require(&self, role: &str) -> Result<&V> {
        self.get(role)
            .ok_or_else(|| ViewStateError::unknown_role(role))
    }

    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.entries.iter().map(|(role, _)| role)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Role, &V)> {
        self.entries.iter().map(|(role, value)| (role, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a secondary object (a form model, a view model...) from this snapshot.
    ///
    /// `f` should be pure: equal composites must derive equal objects.
    pub fn derive<D, F>(&self, f: F) -> D
    where
        F: FnOnce(&Self) -> D,
    {
        f(self)
    }
}

#[cfg(feature = "serde")]
impl<V: serde::Serialize> serde::Serialize for CompositeValue<V> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (role, value) in self.entries.iter() {
            map.serialize_entry(role.as_str(), value)?;
        }
        map.end()
    }
}
