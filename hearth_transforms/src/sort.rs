// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time ordering.

extern crate alloc;

use alloc::vec::Vec;

use hearth_core::{Dataset, Record};

/// Stable sort by year; records without a year go last in their original order.
pub fn sort_by_time(dataset: &Dataset) -> Dataset {
    let mut records: Vec<Record> = dataset.records().to_vec();
    records.sort_by_key(|r| (r.time.is_none(), r.time.unwrap_or(0)));
    Dataset::from_parts(records, dataset.labels.clone())
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn sorts_stably_with_missing_last() {
        let ds = Dataset::new(vec![
            Record::at_time(2018, 1.0),
            Record::new(0.0, 9.0),
            Record::at_time(2016, 2.0),
            Record::at_time(2018, 3.0),
        ]);
        let out = sort_by_time(&ds);
        let keys: Vec<u64> = out.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![2, 0, 3, 1]);
        assert!(out.is_sorted_by_time());
    }
}
