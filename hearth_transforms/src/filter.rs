// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row filters.

extern crate alloc;

use alloc::vec::Vec;

use hearth_core::{Dataset, Record, Selection};

use crate::TransformError;

/// Keeps the records whose category is in `selection`.
///
/// Order and keys are preserved. Records without a category are not subject to selection and
/// always pass. Applying the same selection twice yields the same dataset.
pub fn filter_by_selection(dataset: &Dataset, selection: &Selection) -> Dataset {
    retain(dataset, |r| r.category.is_none_or(|c| selection.contains(c)))
}

/// An inclusive range of years.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeRange {
    /// First year kept.
    pub start: i64,
    /// Last year kept.
    pub end: i64,
}

impl TimeRange {
    /// Creates a range, rejecting `start > end`.
    pub fn new(start: i64, end: i64) -> Result<Self, TransformError> {
        if start > end {
            return Err(TransformError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns `true` if `year` lies in the range.
    pub fn contains(&self, year: i64) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

/// Keeps the records whose year lies in `range`. Records without a year are dropped.
pub fn filter_time_range(dataset: &Dataset, range: TimeRange) -> Dataset {
    retain(dataset, |r| r.time.is_some_and(|t| range.contains(t)))
}

fn retain(dataset: &Dataset, keep: impl Fn(&Record) -> bool) -> Dataset {
    let records: Vec<Record> = dataset.iter().filter(|r| keep(r)).copied().collect();
    Dataset::from_parts(records, dataset.labels.clone())
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn clustered() -> Dataset {
        Dataset::new(vec![
            Record::new(1.0, 10.0).with_category(0),
            Record::new(2.0, 20.0).with_category(1),
            Record::new(3.0, 30.0),
            Record::new(4.0, 40.0).with_category(0),
        ])
    }

    #[test]
    fn selection_keeps_order_and_keys() {
        let ds = clustered();
        let sel: Selection = [0].into_iter().collect();
        let out = filter_by_selection(&ds, &sel);
        let keys: Vec<u64> = out.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![0, 2, 3]);
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn selection_filter_is_idempotent() {
        let ds = clustered();
        let sel: Selection = [1].into_iter().collect();
        let once = filter_by_selection(&ds, &sel);
        let twice = filter_by_selection(&once, &sel);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_selection_keeps_only_uncategorized() {
        let out = filter_by_selection(&clustered(), &Selection::new());
        assert_eq!(out.len(), 1);
        assert_eq!(out.records()[0].category, None);
    }

    #[test]
    fn time_range_is_inclusive() {
        let ds = Dataset::new(vec![
            Record::at_time(2015, 1.0),
            Record::at_time(2016, 1.0),
            Record::at_time(2018, 1.0),
            Record::at_time(2019, 1.0),
            Record::new(1.0, 1.0),
        ]);
        let range = TimeRange::new(2016, 2018).unwrap();
        let out = filter_time_range(&ds, range);
        let years: Vec<i64> = out.iter().filter_map(|r| r.time).collect();
        assert_eq!(years, vec![2016, 2018]);
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert_eq!(
            TimeRange::new(2020, 2016),
            Err(TransformError::InvalidRange {
                start: 2020,
                end: 2016
            })
        );
    }
}
