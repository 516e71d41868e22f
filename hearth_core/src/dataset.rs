// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Datasets: ordered sequences of uniformly shaped records.

extern crate alloc;

use alloc::vec::Vec;

use crate::record::{Field, FieldLabels, Record};

/// An ordered sequence of [`Record`]s plus the labels of its numeric dimensions.
///
/// Insertion order is irrelevant for scatter charts. Line and bar charts need time order; the
/// geometry builder sorts defensively, so a dataset never has to be pre-sorted.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Dataset {
    records: Vec<Record>,
    /// Dimension labels used by tooltips and axis titles.
    #[cfg_attr(feature = "serde", serde(default))]
    pub labels: FieldLabels,
}

impl Dataset {
    /// Creates a dataset, assigning each record its load index as a stable key.
    pub fn new(records: impl IntoIterator<Item = Record>) -> Self {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(i, r)| r.with_key(i as u64))
            .collect();
        Self {
            records,
            labels: FieldLabels::default(),
        }
    }

    /// Creates a dataset from records whose keys are already assigned.
    ///
    /// Transforms use this so derived datasets keep the identity of their source rows.
    pub fn from_parts(records: Vec<Record>, labels: FieldLabels) -> Self {
        Self { records, labels }
    }

    /// Sets the dimension labels.
    pub fn with_labels(mut self, labels: FieldLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Reassigns keys from load order.
    ///
    /// Deserialized datasets carry no keys; call this once after decoding.
    pub fn rekeyed(mut self) -> Self {
        for (i, r) in self.records.iter_mut().enumerate() {
            r.key = i as u64;
        }
        self
    }

    /// Returns the records in order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the records in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Distinct category values in first-seen order.
    pub fn categories(&self) -> Vec<i64> {
        distinct(self.records.iter().filter_map(|r| r.category))
    }

    /// Distinct time values in first-seen order.
    pub fn times(&self) -> Vec<i64> {
        distinct(self.records.iter().filter_map(|r| r.time))
    }

    /// Returns `(min, max)` of a field over records where it is present and finite.
    pub fn extent(&self, field: Field) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in self.records.iter().filter_map(|r| r.number(field)) {
            min = min.min(v);
            max = max.max(v);
        }
        if min.is_finite() && max.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }

    /// Returns `true` if records with a time are in non-decreasing time order.
    pub fn is_sorted_by_time(&self) -> bool {
        let times: Vec<i64> = self.records.iter().filter_map(|r| r.time).collect();
        times.windows(2).all(|w| w[0] <= w[1])
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = core::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn distinct(values: impl Iterator<Item = i64>) -> Vec<i64> {
    let mut seen = hashbrown::HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn categories_keep_first_seen_order() {
        let ds = Dataset::new(vec![
            Record::new(1.0, 1.0).with_category(2),
            Record::new(2.0, 2.0).with_category(0),
            Record::new(3.0, 3.0).with_category(2),
            Record::new(4.0, 4.0).with_category(1),
        ]);
        assert_eq!(ds.categories(), vec![2, 0, 1]);
    }

    #[test]
    fn new_assigns_load_order_keys() {
        let ds = Dataset::new(vec![Record::new(1.0, 1.0), Record::new(2.0, 2.0)]);
        let keys: Vec<u64> = ds.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![0, 1]);
    }

    #[test]
    fn extent_skips_missing_values() {
        let ds = Dataset::new(vec![
            Record::new(2.0, 100.0),
            Record {
                target: None,
                ..Record::new(9.0, 0.0)
            },
            Record::new(5.0, 200.0),
        ]);
        assert_eq!(ds.extent(Field::Target), Some((100.0, 200.0)));
        assert_eq!(ds.extent(Field::Compare), Some((2.0, 9.0)));
        assert_eq!(ds.extent(Field::Time), None);
    }

    #[test]
    fn time_order_detection() {
        let sorted = Dataset::new(vec![Record::at_time(2016, 1.0), Record::at_time(2017, 1.0)]);
        let unsorted = Dataset::new(vec![Record::at_time(2018, 1.0), Record::at_time(2016, 1.0)]);
        assert!(sorted.is_sorted_by_time());
        assert!(!unsorted.is_sorted_by_time());
    }
}
