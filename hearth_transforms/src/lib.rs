// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dataset transforms for the Hearth chart engine.
//!
//! Every transform is a pure `&Dataset -> Dataset` function:
//! - the source dataset is never mutated, and
//! - surviving records keep their `key`, so marks derived from them keep a stable identity.
//!
//! [`Transform`] wraps the individual operations in a small IR so a view can describe its data
//! pipeline as a list and run it with [`apply_all`].

#![no_std]

extern crate alloc;

mod aggregate;
mod error;
mod filter;
mod prediction;
mod sort;
mod transform;

pub use aggregate::{AggregateOp, ClusterSummary, bucket_by_time, bucket_by_time_with, summarize_clusters};
pub use error::TransformError;
pub use filter::{TimeRange, filter_by_selection, filter_time_range};
pub use prediction::merge_prediction;
pub use sort::sort_by_time;
pub use transform::{Transform, apply_all};
