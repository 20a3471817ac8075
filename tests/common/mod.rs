//! Common test utilities for pure Rust ID3 integration tests.
#![allow(dead_code)]

use id3_rust::*;
use rand::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// The eight-row example: label, A, B
pub fn create_sample_dataset() -> Dataset {
    Dataset::from_rows(
        vec!["label", "A", "B"],
        &[
            vec![0, 1, 1],
            vec![1, 0, 0],
            vec![1, 2, 1],
            vec![1, 1, 1],
            vec![1, 1, 1],
            vec![1, 2, 0],
            vec![0, 0, 0],
            vec![0, 0, 1],
        ],
    )
    .unwrap()
}

/// Random categorical dataset with a `label` column first.
///
/// The label is a function of the first two features, flipped with
/// probability `noise`.
pub fn create_random_dataset(
    num_rows: usize,
    num_features: usize,
    cardinality: u32,
    noise: f64,
    seed: u64,
) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut columns = vec!["label".to_string()];
    columns.extend((0..num_features).map(|j| format!("f{}", j)));

    let rows: Vec<Vec<u32>> = (0..num_rows)
        .map(|_| {
            let features: Vec<u32> = (0..num_features)
                .map(|_| rng.gen_range(0..cardinality))
                .collect();
            let first = features.first().copied().unwrap_or(0);
            let second = features.get(1).copied().unwrap_or(0);
            let mut label = u32::from(first > second);
            if rng.gen_bool(noise) {
                label = 1 - label;
            }

            let mut row = vec![label];
            row.extend(features);
            row
        })
        .collect();

    Dataset::from_rows(columns, &rows).unwrap()
}

/// Feature names of the raw car evaluation fixture
pub fn car_feature_names() -> Vec<String> {
    ["buying", "maint", "doors", "persons", "lug_boot", "safety"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Raw rows in the car evaluation layout: class first, then features
pub fn car_raw_lines(num_rows: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let levels = ["vhigh", "high", "med", "low"];
    let doors = ["2", "3", "4", "5more"];
    let persons = ["2", "4", "more"];
    let boots = ["small", "med", "big"];
    let safety = ["low", "med", "high"];

    (0..num_rows)
        .map(|_| {
            let buying = *levels.choose(&mut rng).unwrap();
            let maint = *levels.choose(&mut rng).unwrap();
            let person = *persons.choose(&mut rng).unwrap();
            let safe = *safety.choose(&mut rng).unwrap();
            let class = if person == "2" || safe == "low" {
                "unacc"
            } else if buying == "vhigh" && maint == "vhigh" {
                "unacc"
            } else if safe == "high" {
                "good"
            } else {
                "acc"
            };
            format!(
                "{},{},{},{},{},{},{}",
                class,
                buying,
                maint,
                doors.choose(&mut rng).unwrap(),
                person,
                boots.choose(&mut rng).unwrap(),
                safe
            )
        })
        .collect()
}

/// Write `lines` to `dir/name` and return the path
pub fn write_lines(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n") + "\n").unwrap();
    path
}

/// Assert that every training row is predicted with the label of the leaf
/// reached by following its split values from the root.
pub fn assert_structural_round_trip(tree: &DecisionTree, dataset: &Dataset) {
    let output = tree.predict_with_rows(dataset).unwrap();
    assert_eq!(output.len(), dataset.num_rows());

    for (i, &row) in output.row_indices.iter().enumerate() {
        let mut node = tree.root().unwrap();
        while let Some(feature) = node.split_feature() {
            let column = dataset.column_index(feature).unwrap();
            node = node.child_for(dataset.value(row, column)).unwrap();
        }
        assert_eq!(Some(output.predictions[i]), node.label());
    }
}
