// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Records: one row of a fetched dataset.

extern crate alloc;

use alloc::string::String;

/// The fields the engine reads from a [`Record`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// The numeric dimension compared against price (rooms, distance, population, ...).
    Compare,
    /// The numeric target dimension (normalized price).
    Target,
    /// The integer cluster label.
    Category,
    /// The integer year.
    Time,
}

impl Field {
    /// Returns the boundary (JSON) name of this field.
    pub fn name(self) -> &'static str {
        match self {
            Self::Compare => "compareDimension",
            Self::Target => "target",
            Self::Category => "category",
            Self::Time => "time",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single field value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// A continuous numeric value.
    Number(f64),
    /// A categorical value (cluster label or year).
    Category(i64),
}

impl Value {
    /// Returns this value as a float, suitable for continuous scales.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Number(v) => v,
            Self::Category(v) => v as f64,
        }
    }
}

/// One row of a dataset.
///
/// Records map [`Field`]s to [`Value`]s. Every field is optional at the boundary; a chart that
/// needs a missing field skips the record and reports a
/// [`MissingFieldWarning`](crate::MissingFieldWarning). Non-finite numbers are treated as
/// missing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Record {
    /// Stable identity of the record within its dataset (the load index).
    #[cfg_attr(feature = "serde", serde(skip))]
    pub key: u64,
    /// Compare dimension.
    pub compare_dimension: Option<f64>,
    /// Target dimension (price).
    pub target: Option<f64>,
    /// Cluster label.
    pub category: Option<i64>,
    /// Year.
    pub time: Option<i64>,
}

impl Record {
    /// Creates a record with the compare and target dimensions set.
    pub fn new(compare_dimension: f64, target: f64) -> Self {
        Self {
            compare_dimension: Some(compare_dimension),
            target: Some(target),
            ..Self::default()
        }
    }

    /// Creates a time-series record (`year`, `price`).
    pub fn at_time(time: i64, target: f64) -> Self {
        Self {
            target: Some(target),
            time: Some(time),
            ..Self::default()
        }
    }

    /// Sets the cluster label.
    pub fn with_category(mut self, category: i64) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the year.
    pub fn with_time(mut self, time: i64) -> Self {
        self.time = Some(time);
        self
    }

    /// Sets the stable key.
    pub fn with_key(mut self, key: u64) -> Self {
        self.key = key;
        self
    }

    /// Looks up a field.
    pub fn get(&self, field: Field) -> Option<Value> {
        match field {
            Field::Compare => self
                .compare_dimension
                .filter(|v| v.is_finite())
                .map(Value::Number),
            Field::Target => self.target.filter(|v| v.is_finite()).map(Value::Number),
            Field::Category => self.category.map(Value::Category),
            Field::Time => self.time.map(Value::Category),
        }
    }

    /// Looks up a field as a finite float.
    pub fn number(&self, field: Field) -> Option<f64> {
        self.get(field).map(Value::as_f64)
    }

    /// Returns the first of `fields` that is missing, if any.
    pub fn first_missing(&self, fields: &[Field]) -> Option<Field> {
        fields.iter().copied().find(|&f| self.get(f).is_none())
    }
}

/// Human-readable names for the numeric dimensions of a dataset.
///
/// The clustering service echoes the full name of the compared column (for example
/// `"Distance"`); tooltips and axis titles use these labels.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FieldLabels {
    /// Label of the compare dimension.
    pub compare: String,
    /// Label of the target dimension.
    pub target: String,
}

impl Default for FieldLabels {
    fn default() -> Self {
        Self {
            compare: String::from("Value"),
            target: String::from("Price"),
        }
    }
}

impl FieldLabels {
    /// Creates a label pair.
    pub fn new(compare: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            compare: compare.into(),
            target: target.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_numbers_read_as_missing() {
        let r = Record {
            compare_dimension: Some(f64::NAN),
            target: Some(f64::INFINITY),
            ..Record::default()
        };
        assert_eq!(r.get(Field::Compare), None);
        assert_eq!(r.get(Field::Target), None);
        assert_eq!(r.first_missing(&[Field::Compare, Field::Target]), Some(Field::Compare));
    }

    #[test]
    fn time_reads_as_a_number() {
        let r = Record::at_time(2017, 0.5);
        assert_eq!(r.number(Field::Time), Some(2017.0));
        assert_eq!(r.first_missing(&[Field::Time, Field::Target]), None);
        assert_eq!(r.first_missing(&[Field::Compare]), Some(Field::Compare));
    }
}
