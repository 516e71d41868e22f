// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors and warnings shared across the engine.

extern crate alloc;

use alloc::string::String;

use crate::record::Field;

/// Errors produced by a render pass.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The filtered dataset has no usable values for a scaled field.
    ///
    /// Recoverable: callers skip rendering and show a neutral state.
    #[error("dataset has no renderable records")]
    EmptyDataset,
    /// The layout leaves no room to plot. This is a programming error and propagates.
    #[error("invalid layout: {0}")]
    InvalidLayout(&'static str),
}

/// A record that was skipped because it lacks a field the chart needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("record {key} is missing field `{field}`")]
pub struct MissingFieldWarning {
    /// Key of the skipped record.
    pub key: u64,
    /// The first missing field.
    pub field: Field,
}

/// A failed dataset fetch, reported by the boundary that performs network calls.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("fetch failed: {message}")]
pub struct FetchFailure {
    /// Human-readable cause.
    pub message: String,
}

impl FetchFailure {
    /// Creates a failure with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use super::*;

    #[test]
    fn warning_names_the_field() {
        let w = MissingFieldWarning {
            key: 4,
            field: Field::Compare,
        };
        assert_eq!(w.to_string(), "record 4 is missing field `compareDimension`");
    }
}
