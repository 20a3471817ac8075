//! Decision tree engine integration tests.

use id3_rust::*;

mod common;
use common::*;

#[test]
fn test_sample_depth_one_predicts_majority() {
    let dataset = create_sample_dataset();
    let mut tree = DecisionTree::with_params(1, "label").unwrap();
    tree.train(&dataset, 0.01).unwrap();

    let root = tree.root().unwrap();
    assert!(root.is_leaf());
    assert_eq!(root.label(), Some(1));
    assert_eq!(tree.num_nodes(), 1);

    let (predictions, ground_truth) = tree.predict(&dataset).unwrap();
    assert_eq!(predictions, vec![1; 8]);
    assert_eq!(accuracy(&predictions, &ground_truth).unwrap(), 5.0 / 8.0);
}

#[test]
fn test_sample_full_tree() {
    let dataset = create_sample_dataset();
    let mut tree = DecisionTree::with_params(5, "label").unwrap();
    tree.train(&dataset, 0.01).unwrap();
    tree.validate().unwrap();

    assert_eq!(tree.root().unwrap().split_feature(), Some("A"));
    assert_structural_round_trip(&tree, &dataset);

    // Row 0 shares its features with rows 3 and 4, row 1 with row 6
    let (predictions, ground_truth) = tree.predict(&dataset).unwrap();
    let score = accuracy(&predictions, &ground_truth).unwrap();
    assert_eq!(score, 6.0 / 8.0);
}

#[test]
fn test_depth_bound_on_random_data() {
    let dataset = create_random_dataset(300, 6, 4, 0.1, 7);
    for max_depth in 1..=5 {
        let mut tree = DecisionTree::with_params(max_depth, "label").unwrap();
        tree.train(&dataset, 0.0).unwrap();
        tree.validate().unwrap();

        assert!(tree.depth() <= max_depth);
        assert!(tree.nodes().iter().all(|node| node.stage() <= max_depth));
        assert_structural_round_trip(&tree, &dataset);
    }
}

#[test]
fn test_deeper_trees_fit_training_data_better() {
    let dataset = create_random_dataset(400, 4, 3, 0.0, 11);
    let mut previous = 0.0;
    for max_depth in [1, 2, 3, 5] {
        let mut tree = DecisionTree::with_params(max_depth, "label").unwrap();
        tree.fit(&dataset).unwrap();
        let (predictions, truth) = tree.predict(&dataset).unwrap();
        let score = accuracy(&predictions, &truth).unwrap();
        assert!(score + 1e-12 >= previous);
        previous = score;
    }
    assert_eq!(previous, 1.0);
}

#[test]
fn test_predict_on_held_out_rows() {
    let dataset = create_random_dataset(200, 3, 3, 0.0, 5);
    let (train, test) = train_test_split_dataset(&dataset, 0.8, 1).unwrap();

    let config = TreeConfigBuilder::new()
        .max_depth(4)
        .unseen_category(UnseenCategoryPolicy::MajorityFallback)
        .build()
        .unwrap();
    let mut tree = DecisionTree::new(config).unwrap();
    tree.fit(&train).unwrap();

    let output = tree.predict_with_rows(&test).unwrap();
    assert_eq!(output.len(), test.num_rows());
    let in_order = output.predictions_in_row_order();
    for row in 0..test.num_rows() {
        assert_eq!(in_order[row], tree.predict_row(&test, row).unwrap());
    }
}

#[test]
fn test_unseen_category_error_policy() {
    let dataset = create_sample_dataset();
    let config = TreeConfigBuilder::new()
        .max_depth(3)
        .unseen_category(UnseenCategoryPolicy::Error)
        .build()
        .unwrap();
    let mut tree = DecisionTree::new(config).unwrap();
    tree.train(&dataset, 0.01).unwrap();

    let query = Dataset::from_rows(vec!["label", "A", "B"], &[vec![1, 2, 1], vec![0, 5, 0]])
        .unwrap();
    let err = tree.predict(&query).unwrap_err();
    assert_eq!(err.category(), "unseen_category");
}

#[test]
fn test_target_must_be_present() {
    let dataset = create_sample_dataset();
    let mut tree = DecisionTree::with_params(3, "class").unwrap();
    assert!(matches!(
        tree.train(&dataset, 0.01),
        Err(Id3Error::InvalidInput { .. })
    ));
    assert_eq!(tree.state(), EngineState::Untrained);
}

#[test]
fn test_single_class_dataset_is_a_leaf() {
    let dataset = Dataset::from_rows(
        vec!["label", "x"],
        &[vec![2, 0], vec![2, 1], vec![2, 2]],
    )
    .unwrap();
    let mut tree = DecisionTree::with_params(4, "label").unwrap();
    tree.train(&dataset, 0.01).unwrap();
    assert!(tree.root().unwrap().is_leaf());
    assert_eq!(tree.root().unwrap().label(), Some(2));
}

#[test]
fn test_identical_features_with_mixed_labels() {
    // No feature can separate these rows, so the root stays a leaf
    let dataset = Dataset::from_rows(
        vec!["label", "x", "y"],
        &[vec![0, 1, 1], vec![1, 1, 1], vec![1, 1, 1]],
    )
    .unwrap();
    let mut tree = DecisionTree::with_params(4, "label").unwrap();
    tree.train(&dataset, 0.0).unwrap();
    assert_eq!(tree.num_nodes(), 1);
    assert_eq!(tree.root().unwrap().label(), Some(1));
}

#[test]
fn test_engine_reuse_across_datasets() {
    let mut tree = DecisionTree::with_params(3, "label").unwrap();
    tree.train(&create_sample_dataset(), 0.01).unwrap();

    let other = create_random_dataset(100, 2, 2, 0.0, 3);
    tree.train(&other, 0.01).unwrap();
    tree.validate().unwrap();
    assert_structural_round_trip(&tree, &other);

    let feature = tree.root().unwrap().split_feature().unwrap();
    assert!(feature == "f0" || feature == "f1");
}
