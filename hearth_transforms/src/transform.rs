// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform IR.

use hearth_core::{Dataset, Selection};

use crate::aggregate::{AggregateOp, bucket_by_time_with};
use crate::filter::{TimeRange, filter_by_selection, filter_time_range};
use crate::sort::sort_by_time;

/// A dataset transform.
#[derive(Clone, Debug, PartialEq)]
pub enum Transform {
    /// Keep records whose category is selected (uncategorized records pass).
    Select(Selection),
    /// Keep records whose year lies in a range.
    Years(TimeRange),
    /// Stable sort by year.
    SortByTime,
    /// Collapse to one record per year.
    BucketByTime(AggregateOp),
}

impl Transform {
    /// Runs this transform, returning a new dataset.
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        match self {
            Self::Select(selection) => filter_by_selection(dataset, selection),
            Self::Years(range) => filter_time_range(dataset, *range),
            Self::SortByTime => sort_by_time(dataset),
            Self::BucketByTime(op) => bucket_by_time_with(dataset, *op),
        }
    }
}

/// Runs `transforms` in order. An empty list returns a copy of the input.
pub fn apply_all(dataset: &Dataset, transforms: &[Transform]) -> Dataset {
    let mut current = dataset.clone();
    for t in transforms {
        current = t.apply(&current);
    }
    tracing::debug!(
        input = dataset.len(),
        output = current.len(),
        steps = transforms.len(),
        "applied transforms"
    );
    current
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::vec;
    use alloc::vec::Vec;

    use hearth_core::Record;

    use super::*;

    #[test]
    fn pipeline_filters_sorts_and_buckets() {
        let ds = Dataset::new(vec![
            Record::at_time(2019, 9.0),
            Record::at_time(2017, 2.0),
            Record::at_time(2016, 1.0),
            Record::at_time(2017, 4.0),
        ]);
        let out = apply_all(
            &ds,
            &[
                Transform::Years(TimeRange::new(2016, 2018).unwrap()),
                Transform::SortByTime,
                Transform::BucketByTime(AggregateOp::Mean),
            ],
        );
        let rows: Vec<(i64, f64)> = out
            .iter()
            .map(|r| (r.time.unwrap(), r.target.unwrap()))
            .collect();
        assert_eq!(rows, vec![(2016, 1.0), (2017, 3.0)]);
    }
}
