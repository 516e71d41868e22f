// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouping and aggregation.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;
use hearth_core::{Dataset, Field, Record};

/// Aggregation operation applied to the target values of a group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AggregateOp {
    /// Count rows.
    Count,
    /// Sum values (skips missing).
    Sum,
    /// Minimum value (skips missing).
    Min,
    /// Maximum value (skips missing).
    Max,
    /// Mean value (skips missing).
    #[default]
    Mean,
}

impl AggregateOp {
    /// Applies the operation to a group's values.
    ///
    /// Returns `None` when the group has no values, except for [`Count`](Self::Count).
    pub fn apply(self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return matches!(self, Self::Count).then_some(0.0);
        }
        let n = values.len() as f64;
        Some(match self {
            Self::Count => n,
            Self::Sum => values.iter().sum(),
            Self::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::Mean => values.iter().sum::<f64>() / n,
        })
    }
}

/// One record per distinct year holding the mean target, in first-seen order.
///
/// Each output record keeps the key of the first record of its year. Records without a year
/// are dropped.
pub fn bucket_by_time(dataset: &Dataset) -> Dataset {
    bucket_by_time_with(dataset, AggregateOp::Mean)
}

/// Like [`bucket_by_time`], aggregating targets with `op`.
pub fn bucket_by_time_with(dataset: &Dataset, op: AggregateOp) -> Dataset {
    let mut order: Vec<i64> = Vec::new();
    let mut groups: HashMap<i64, (u64, Vec<f64>)> = HashMap::new();
    for r in dataset {
        let Some(time) = r.time else { continue };
        let group = groups.entry(time).or_insert_with(|| {
            order.push(time);
            (r.key, Vec::new())
        });
        if let Some(v) = r.number(Field::Target) {
            group.1.push(v);
        }
    }

    let records = order
        .into_iter()
        .filter_map(|time| {
            let (key, values) = groups.remove(&time)?;
            Some(Record {
                key,
                target: op.apply(&values),
                time: Some(time),
                ..Record::default()
            })
        })
        .collect();
    Dataset::from_parts(records, dataset.labels.clone())
}

/// Per-cluster statistics shown alongside a clustering scatter chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterSummary {
    /// Cluster label.
    pub category: i64,
    /// Number of records in the cluster.
    pub count: usize,
    /// Mean target (price), if any record has one.
    pub mean_target: Option<f64>,
    /// Mean compare dimension, if any record has one.
    pub mean_compare: Option<f64>,
}

/// Summarizes each cluster of `dataset`, ordered by ascending label.
///
/// Uncategorized records are ignored.
pub fn summarize_clusters(dataset: &Dataset) -> Vec<ClusterSummary> {
    let mut groups: HashMap<i64, (usize, Vec<f64>, Vec<f64>)> = HashMap::new();
    for r in dataset {
        let Some(category) = r.category else { continue };
        let (count, targets, compares) = groups.entry(category).or_default();
        *count += 1;
        targets.extend(r.number(Field::Target));
        compares.extend(r.number(Field::Compare));
    }

    let mut out: Vec<ClusterSummary> = groups
        .into_iter()
        .map(|(category, (count, targets, compares))| ClusterSummary {
            category,
            count,
            mean_target: AggregateOp::Mean.apply(&targets),
            mean_compare: AggregateOp::Mean.apply(&compares),
        })
        .collect();
    out.sort_by_key(|s| s.category);
    out
}
