// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::CompositeValue;
use viewstate_core::Role;

/// Latest value per producer slot, indexed by registration position.
#[derive(Debug, Clone)]
pub(crate) struct LatestSnapshot<V> {
    slots: Vec<Option<V>>,
    populated: usize,
}

impl<V> LatestSnapshot<V> {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(size).collect(),
            populated: 0,
        }
    }

    /// Stores `value` as the latest of slot `index`, replacing the previous one.
    pub(crate) fn record(&mut self, index: usize, value: V) {
        if self.slots[index].replace(value).is_none() {
            self.populated += 1;
        }
    }

    pub(crate) fn has_value(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(Option::is_some)
    }

    pub(crate) fn is_complete(&self) -> bool {
        !self.slots.is_empty() && self.populated == self.slots.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.populated = 0;
    }
}

impl<V: Clone> LatestSnapshot<V> {
    /// Builds a composite from the current values, or `None` while any slot is empty.
    pub(crate) fn composite(&self, roles: &[Role]) -> Option<CompositeValue<V>> {
        if !self.is_complete() {
            return None;
        }

        let entries = roles
            .iter()
            .cloned()
            .zip(self.slots.iter().flatten().cloned())
            .collect();
        Some(CompositeValue::new(entries))
    }
}
