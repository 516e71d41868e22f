// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Extending a price history with model predictions.

extern crate alloc;

use alloc::vec::Vec;

use hearth_core::{Dataset, Record};

use crate::TransformError;
use crate::filter::TimeRange;

/// Appends one record per year of `years` carrying `predicted_price`.
///
/// The prediction service returns a single price for the whole forecast window, so every
/// appended year shares it. New records get keys after the largest history key. The history
/// itself is copied unchanged.
pub fn merge_prediction(
    history: &Dataset,
    predicted_price: f64,
    years: TimeRange,
) -> Result<Dataset, TransformError> {
    if !predicted_price.is_finite() {
        return Err(TransformError::NonFinitePrediction(predicted_price));
    }
    let mut next_key = history.iter().map(|r| r.key + 1).max().unwrap_or(0);
    let mut records: Vec<Record> = history.records().to_vec();
    for year in years.start..=years.end {
        records.push(Record::at_time(year, predicted_price).with_key(next_key));
        next_key += 1;
    }
    tracing::debug!(
        history = history.len(),
        appended = records.len() - history.len(),
        "merged prediction"
    );
    Ok(Dataset::from_parts(records, history.labels.clone()))
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn appends_forecast_years_after_history() {
        let history = Dataset::new(vec![
            Record::at_time(2016, 0.40),
            Record::at_time(2017, 0.45),
            Record::at_time(2018, 0.50),
        ]);
        let merged =
            merge_prediction(&history, 0.55, TimeRange::new(2019, 2020).unwrap()).unwrap();
        let rows: Vec<(u64, i64, f64)> = merged
            .iter()
            .map(|r| (r.key, r.time.unwrap(), r.target.unwrap()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (0, 2016, 0.40),
                (1, 2017, 0.45),
                (2, 2018, 0.50),
                (3, 2019, 0.55),
                (4, 2020, 0.55),
            ]
        );
    }

    #[test]
    fn rejects_non_finite_prediction() {
        let history = Dataset::default();
        let err = merge_prediction(&history, f64::NAN, TimeRange::new(2019, 2020).unwrap());
        assert!(matches!(err, Err(TransformError::NonFinitePrediction(_))));
    }
}
