// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform errors.

/// Errors returned by fallible transforms.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// A year range whose start lies after its end.
    #[error("invalid year range {start}..={end}")]
    InvalidRange {
        /// First year.
        start: i64,
        /// Last year.
        end: i64,
    },
    /// A predicted value that is NaN or infinite.
    #[error("predicted price is not finite: {0}")]
    NonFinitePrediction(f64),
}
