// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The set of active category values.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::dataset::Dataset;

/// The categories the user currently wants to see.
///
/// An empty selection hides every categorized record. Records without a category are not
/// subject to selection at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    active: HashSet<i64>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects every distinct category present in `dataset` (the state after a load).
    pub fn all_of(dataset: &Dataset) -> Self {
        dataset.categories().into_iter().collect()
    }

    /// Returns `true` if `category` is active.
    pub fn contains(&self, category: i64) -> bool {
        self.active.contains(&category)
    }

    /// Activates `category`. Returns `true` if it was not active before.
    pub fn insert(&mut self, category: i64) -> bool {
        self.active.insert(category)
    }

    /// Deactivates `category`. Returns `true` if it was active before.
    pub fn remove(&mut self, category: i64) -> bool {
        self.active.remove(&category)
    }

    /// Sets whether `category` is active.
    pub fn set(&mut self, category: i64, on: bool) {
        if on {
            self.active.insert(category);
        } else {
            self.active.remove(&category);
        }
    }

    /// Flips `category` and returns its new state.
    pub fn toggle(&mut self, category: i64) -> bool {
        if self.active.remove(&category) {
            false
        } else {
            self.active.insert(category);
            true
        }
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Returns the number of active categories.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Returns the active categories in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = i64> {
        let mut v: Vec<i64> = self.active.iter().copied().collect();
        v.sort_unstable();
        v.into_iter()
    }
}

impl FromIterator<i64> for Selection {
    fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
        Self {
            active: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::Record;

    #[test]
    fn all_of_selects_every_category() {
        let ds = Dataset::new(vec![
            Record::new(1.0, 1.0).with_category(0),
            Record::new(1.0, 1.0).with_category(2),
            Record::new(1.0, 1.0),
        ]);
        let sel = Selection::all_of(&ds);
        assert_eq!(sel.iter().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut sel: Selection = [1, 2].into_iter().collect();
        assert!(!sel.toggle(1));
        assert!(!sel.contains(1));
        assert!(sel.toggle(1));
        assert!(sel.contains(1));
        sel.set(2, false);
        assert_eq!(sel.len(), 1);
    }
}
