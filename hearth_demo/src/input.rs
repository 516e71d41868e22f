// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON inputs accepted by the demo.
//!
//! Three dataset shapes are understood:
//! - a clustering response `{"data": [{"Price": .., "<column>": .., "ClusterLabel": ..}],
//!   "selected_column": "<column>"}`,
//! - a serialized [`Dataset`] `{"records": [..], "labels": {..}}`,
//! - a bare array of records `[{"compareDimension": .., "target": .., "time": ..}]`.

use std::fs;
use std::path::Path;

use anyhow::{Context as _, bail};
use hearth_core::{Dataset, FieldLabels, Record};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    Cluster(ClusterResponse),
    Dataset(Dataset),
    Records(Vec<Record>),
}

#[derive(Debug, Deserialize)]
struct ClusterResponse {
    data: Vec<Map<String, Value>>,
    selected_column: String,
}

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    predicted_price: f64,
}

/// Reads a dataset from `path`.
pub(crate) fn load_dataset(path: &Path) -> anyhow::Result<Dataset> {
    let json =
        fs::read_to_string(path).with_context(|| format!("read dataset '{}'", path.display()))?;
    parse_dataset(&json).with_context(|| format!("parse dataset '{}'", path.display()))
}

/// Reads a `{"predicted_price": ..}` response from `path`.
pub(crate) fn load_prediction(path: &Path) -> anyhow::Result<f64> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("read prediction '{}'", path.display()))?;
    parse_prediction(&json).with_context(|| format!("parse prediction '{}'", path.display()))
}

fn parse_dataset(json: &str) -> anyhow::Result<Dataset> {
    let dataset = match serde_json::from_str::<DatasetFile>(json)? {
        DatasetFile::Cluster(response) => from_cluster_response(response),
        DatasetFile::Dataset(dataset) => dataset.rekeyed(),
        DatasetFile::Records(records) => Dataset::new(records),
    };
    tracing::debug!(
        records = dataset.len(),
        categories = dataset.categories().len(),
        "loaded dataset"
    );
    Ok(dataset)
}

fn parse_prediction(json: &str) -> anyhow::Result<f64> {
    let response: PredictionResponse = serde_json::from_str(json)?;
    if !response.predicted_price.is_finite() {
        bail!("predicted price is not finite");
    }
    Ok(response.predicted_price)
}

fn from_cluster_response(response: ClusterResponse) -> Dataset {
    let column = response.selected_column;
    let records = response.data.iter().map(|row| Record {
        compare_dimension: row.get(&column).and_then(Value::as_f64),
        target: row.get("Price").and_then(Value::as_f64),
        category: row.get("ClusterLabel").and_then(Value::as_i64),
        ..Record::default()
    });
    Dataset::new(records).with_labels(FieldLabels::new(column, "Price"))
}

#[cfg(test)]
mod tests {
    use hearth_core::Field;

    use super::*;

    #[test]
    fn cluster_response_uses_the_selected_column() {
        let ds = parse_dataset(
            r#"{
                "data": [
                    {"Price": 1.5, "Distance from CBD": 4.0, "ClusterLabel": 0},
                    {"Price": 2.5, "Distance from CBD": null, "ClusterLabel": -1}
                ],
                "selected_column": "Distance from CBD",
                "cluster_summary": []
            }"#,
        )
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.labels.compare, "Distance from CBD");
        assert_eq!(ds.records()[0].number(Field::Compare), Some(4.0));
        assert_eq!(ds.records()[1].compare_dimension, None);
        assert_eq!(ds.categories(), vec![0, -1]);
        assert_eq!(ds.records()[1].key, 1);
    }

    #[test]
    fn serialized_dataset_is_rekeyed() {
        let ds = parse_dataset(
            r#"{"records": [{"target": 0.4, "time": 2016}, {"target": 0.5, "time": 2017}],
                "labels": {"compare": "Year", "target": "Normalized Price"}}"#,
        )
        .unwrap();
        assert_eq!(ds.labels.target, "Normalized Price");
        let keys: Vec<u64> = ds.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![0, 1]);
    }

    #[test]
    fn bare_records() {
        let ds = parse_dataset(r#"[{"compareDimension": 2, "target": 100, "category": 0}]"#)
            .unwrap();
        assert_eq!(ds.records()[0], Record::new(2.0, 100.0).with_category(0));
    }

    #[test]
    fn prediction_response() {
        assert_eq!(parse_prediction(r#"{"predicted_price": 0.61}"#).unwrap(), 0.61);
        assert!(parse_prediction(r#"{"price": 1}"#).is_err());
        assert!(parse_dataset("42").is_err());
    }
}
