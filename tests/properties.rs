//! Property-based tests for information gain, splitting and the engine.

use approx::assert_abs_diff_eq;
use id3_rust::*;
use proptest::prelude::*;
use std::collections::HashSet;

mod common;

/// Datasets with a label column and up to four feature columns
fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    (1usize..5, 1usize..60).prop_flat_map(|(num_features, num_rows)| {
        prop::collection::vec(
            prop::collection::vec(0u32..4, num_features + 1),
            num_rows,
        )
        .prop_map(move |rows| {
            let mut columns = vec!["label".to_string()];
            columns.extend((0..num_features).map(|j| format!("f{}", j)));
            Dataset::from_rows(columns, &rows).unwrap()
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_gain_decomposes_entropy(dataset in dataset_strategy()) {
        let ig = InformationGain::new("label");
        let subset = dataset.subset();
        let entropy = ig.entropy(&subset).unwrap();
        prop_assert!(entropy >= 0.0);

        for feature in dataset.feature_names("label").unwrap() {
            let conditional = ig.conditional_entropy(&subset, &feature).unwrap();
            let gain = ig.information_gain(&subset, &feature).unwrap();
            prop_assert!(gain >= 0.0);
            assert_abs_diff_eq!(entropy, conditional + gain, epsilon = 1e-9);
        }
    }

    #[test]
    fn prop_split_is_a_partition(dataset in dataset_strategy()) {
        let ig = InformationGain::new("label");
        let subset = dataset.subset();

        for feature in dataset.feature_names("label").unwrap() {
            let parts = ig.split(&subset, &feature).unwrap();
            let column = dataset.column_index(&feature).unwrap();

            let total: usize = parts.iter().map(|(_, part)| part.len()).sum();
            prop_assert_eq!(total, dataset.num_rows());

            let mut seen = HashSet::new();
            for (value, part) in &parts {
                prop_assert!(!part.is_empty());
                for &row in part.rows() {
                    prop_assert!(seen.insert(row));
                    prop_assert_eq!(dataset.value(row, column), *value);
                }
            }

            let values: Vec<_> = parts.iter().map(|(v, _)| *v).collect();
            let mut sorted = values.clone();
            sorted.sort_unstable();
            sorted.dedup();
            prop_assert_eq!(&values, &sorted);

            let again = ig.split(&subset, &feature).unwrap();
            prop_assert_eq!(parts, again);
        }
    }

    #[test]
    fn prop_class_probabilities_sum_to_one(dataset in dataset_strategy()) {
        let ig = InformationGain::new("label");
        let probabilities = ig.class_probabilities(&dataset.subset(), "label").unwrap();
        assert_abs_diff_eq!(probabilities.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn prop_trained_tree_respects_depth_and_routes_rows(
        dataset in dataset_strategy(),
        max_depth in 1usize..6,
        epsilon in 0.0f64..1.0,
    ) {
        let mut tree = DecisionTree::with_params(max_depth, "label").unwrap();
        tree.train(&dataset, epsilon).unwrap();
        tree.validate().unwrap();
        prop_assert!(tree.depth() <= max_depth);

        common::assert_structural_round_trip(&tree, &dataset);

        let (predictions, truth) = tree.predict(&dataset).unwrap();
        prop_assert_eq!(predictions.len(), truth.len());
        let mut expected_truth: Vec<u32> = dataset.column("label").unwrap().to_vec();
        let mut truth_sorted = truth.clone();
        expected_truth.sort_unstable();
        truth_sorted.sort_unstable();
        prop_assert_eq!(truth_sorted, expected_truth);
    }

    #[test]
    fn prop_kfold_partitions_rows(
        num_rows in 2usize..200,
        n_folds in 2usize..10,
        seed in any::<u64>(),
    ) {
        prop_assume!(n_folds <= num_rows);
        let splits = KFold::new(n_folds, seed).split(num_rows).unwrap();
        prop_assert_eq!(splits.len(), n_folds);

        let mut validation_rows: Vec<usize> = splits
            .iter()
            .flat_map(|s| s.validation.iter().copied())
            .collect();
        validation_rows.sort_unstable();
        prop_assert_eq!(validation_rows, (0..num_rows).collect::<Vec<_>>());

        for split in &splits {
            prop_assert_eq!(split.train.len() + split.validation.len(), num_rows);
            let train: HashSet<_> = split.train.iter().collect();
            prop_assert!(split.validation.iter().all(|r| !train.contains(r)));
        }
    }
}
