//! Decision tree engine for the ID3 algorithm.
//!
//! The engine owns the root node and drives training and prediction over a
//! [`WorkStack`] of `(node, subset)` items instead of recursing.

use crate::config::core::validate_epsilon;
use crate::config::TreeConfig;
use crate::core::error::{Id3Error, Result};
use crate::core::types::{CategoryValue, EngineState, UnseenCategoryPolicy};
use crate::dataset::{Dataset, Subset};
use crate::tree::node::TreeNode;
use crate::tree::stack::WorkStack;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fmt;

/// Predictions paired with ground truth, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionOutput {
    /// Dataset row behind each entry
    pub row_indices: Vec<usize>,
    /// Predicted class per entry
    pub predictions: Vec<CategoryValue>,
    /// Target value per entry
    pub ground_truth: Vec<CategoryValue>,
}

impl PredictionOutput {
    fn with_capacity(capacity: usize) -> Self {
        PredictionOutput {
            row_indices: Vec::with_capacity(capacity),
            predictions: Vec::with_capacity(capacity),
            ground_truth: Vec::with_capacity(capacity),
        }
    }

    fn record(&mut self, subset: &Subset<'_>, label: CategoryValue, target_index: usize) {
        self.row_indices.extend_from_slice(subset.rows());
        self.predictions
            .extend(std::iter::repeat(label).take(subset.len()));
        self.ground_truth.extend(subset.column_values(target_index));
    }

    /// Number of predicted rows
    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    /// Returns true if no rows were predicted.
    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    /// Predictions rearranged into dataset row order.
    pub fn predictions_in_row_order(&self) -> Vec<CategoryValue> {
        let mut pairs: Vec<(usize, CategoryValue)> = self
            .row_indices
            .iter()
            .copied()
            .zip(self.predictions.iter().copied())
            .collect();
        pairs.sort_unstable_by_key(|&(row, _)| row);
        pairs.into_iter().map(|(_, label)| label).collect()
    }
}

/// ID3 decision tree engine.
///
/// States move `Untrained -> Training -> Trained`. A failed training run
/// discards the partial tree and leaves the engine `Untrained`.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<TreeNode>,
    state: EngineState,
}

impl DecisionTree {
    /// Creates an untrained engine from a validated configuration.
    pub fn new(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(DecisionTree {
            config,
            root: None,
            state: EngineState::Untrained,
        })
    }

    /// Creates an untrained engine with the given depth limit and target column.
    pub fn with_params<S: Into<String>>(max_depth: usize, target_column: S) -> Result<Self> {
        let config = TreeConfig {
            max_depth,
            target_column: target_column.into(),
            ..TreeConfig::default()
        };
        Self::new(config)
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Returns the engine state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Checks if a trained tree is available.
    pub fn is_trained(&self) -> bool {
        self.state == EngineState::Trained
    }

    /// Returns the root node once trained.
    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    /// Discards the tree and returns to `Untrained`.
    pub fn reset(&mut self) {
        self.root = None;
        self.state = EngineState::Untrained;
    }

    /// Trains with the configured entropy threshold.
    pub fn fit(&mut self, dataset: &Dataset) -> Result<()> {
        self.train(dataset, self.config.epsilon)
    }

    /// Grows a fresh tree over `dataset`, discarding any previous one.
    ///
    /// A node becomes a leaf when the entropy of its rows is below `epsilon`,
    /// when it sits at `max_depth`, or when no feature varies over its rows.
    /// Any error leaves the engine `Untrained`.
    pub fn train(&mut self, dataset: &Dataset, epsilon: f64) -> Result<()> {
        self.reset();
        validate_epsilon(epsilon)?;

        let target = self.config.target_column.clone();
        if !dataset.has_column(&target) {
            return Err(Id3Error::invalid_input(format!(
                "target column '{}' is not in the dataset",
                target
            )));
        }
        if dataset.is_empty() {
            return Err(Id3Error::empty_subset("cannot train on a dataset with zero rows"));
        }

        self.state = EngineState::Training;
        info!(
            "Training ID3 tree on {} rows x {} features (max_depth={}, epsilon={})",
            dataset.num_rows(),
            dataset.num_columns() - 1,
            self.config.max_depth,
            epsilon
        );

        let mut root = TreeNode::root(target);
        match Self::grow(&mut root, dataset, epsilon, self.config.max_depth) {
            Ok(steps) => {
                self.root = Some(root);
                self.state = EngineState::Trained;
                info!(
                    "Training finished after {} steps: {} nodes, {} leaves, depth {}",
                    steps,
                    self.num_nodes(),
                    self.num_leaves(),
                    self.depth()
                );
                Ok(())
            }
            Err(e) => {
                warn!("Training failed ({}): {}", e.category(), e);
                self.reset();
                Err(e)
            }
        }
    }

    fn grow(
        root: &mut TreeNode,
        dataset: &Dataset,
        epsilon: f64,
        max_depth: usize,
    ) -> Result<usize> {
        let mut stack = WorkStack::new();
        stack.push((root, dataset.subset()));

        let mut steps = 0;
        while let Some((node, subset)) = stack.pop() {
            steps += 1;
            if let Some(children) = node.advance_training(&subset, epsilon, max_depth)? {
                stack.extend(children);
            }
        }

        debug!("Training stack peaked at {} items", stack.high_water_mark());
        Ok(steps)
    }

    /// Classifies every row of `dataset`.
    ///
    /// Returns `(predictions, ground_truth)` of equal length, in traversal
    /// order rather than row order.
    pub fn predict(&self, dataset: &Dataset) -> Result<(Vec<CategoryValue>, Vec<CategoryValue>)> {
        let output = self.predict_with_rows(dataset)?;
        Ok((output.predictions, output.ground_truth))
    }

    /// Classifies every row of `dataset`, keeping the row index of each entry.
    pub fn predict_with_rows(&self, dataset: &Dataset) -> Result<PredictionOutput> {
        let root = self.trained_root()?;
        let target_index = dataset.column_index(&self.config.target_column)?;

        let mut output = PredictionOutput::with_capacity(dataset.num_rows());
        if dataset.is_empty() {
            return Ok(output);
        }

        let mut stack = WorkStack::new();
        stack.push((root, dataset.subset()));

        while let Some((node, subset)) = stack.pop() {
            match node.advance_prediction(&subset)? {
                Some(parts) => {
                    // Reversed so the smallest value is popped first
                    for (value, part) in parts.into_iter().rev() {
                        match node.child_for(value) {
                            Some(child) => stack.push((child, part)),
                            None => {
                                let label = self.unseen_label(node, value)?;
                                output.record(&part, label, target_index);
                            }
                        }
                    }
                }
                None => {
                    let label = Self::leaf_label(node)?;
                    output.record(&subset, label, target_index);
                }
            }
        }

        Ok(output)
    }

    /// Classifies a single row by following its split values from the root.
    ///
    /// The target column does not need to be present.
    pub fn predict_row(&self, dataset: &Dataset, row: usize) -> Result<CategoryValue> {
        let mut node = self.trained_root()?;
        if row >= dataset.num_rows() {
            return Err(Id3Error::invalid_input(format!(
                "row {} out of range for {} rows",
                row,
                dataset.num_rows()
            )));
        }

        loop {
            let feature = match node.split_feature() {
                Some(feature) if !node.children().is_empty() => feature,
                _ => return Self::leaf_label(node),
            };

            let value = dataset.value(row, dataset.column_index(feature)?);
            match node.child_for(value) {
                Some(child) => node = child,
                None => return self.unseen_label(node, value),
            }
        }
    }

    fn trained_root(&self) -> Result<&TreeNode> {
        match (&self.root, self.state) {
            (Some(root), EngineState::Trained) => Ok(root),
            _ => Err(Id3Error::untrained(format!(
                "predict called while the engine is {}",
                self.state
            ))),
        }
    }

    fn leaf_label(node: &TreeNode) -> Result<CategoryValue> {
        node.label().ok_or_else(|| {
            Id3Error::config(format!("node at stage {} was never trained", node.stage()))
        })
    }

    fn unseen_label(&self, node: &TreeNode, value: CategoryValue) -> Result<CategoryValue> {
        let feature = node.split_feature().unwrap_or_default();
        match self.config.unseen_category {
            UnseenCategoryPolicy::Error => Err(Id3Error::unseen_category(feature, value)),
            UnseenCategoryPolicy::MajorityFallback => {
                debug!(
                    "value {} of '{}' unseen at stage {}, using majority label",
                    value,
                    feature,
                    node.stage()
                );
                node.fallback_label().ok_or_else(|| {
                    Id3Error::config(format!(
                        "node at stage {} has no majority label",
                        node.stage()
                    ))
                })
            }
        }
    }

    /// All nodes in pre-order, children in ascending split value order.
    pub fn nodes(&self) -> Vec<&TreeNode> {
        let mut nodes = Vec::new();
        let mut stack = WorkStack::new();
        if let Some(root) = &self.root {
            stack.push(root);
        }

        while let Some(node) = stack.pop() {
            nodes.push(node);
            stack.extend(node.children().iter().rev().map(|branch| branch.node()));
        }
        nodes
    }

    /// Returns the number of nodes in the tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes().len()
    }

    /// Returns the number of leaf nodes in the tree.
    pub fn num_leaves(&self) -> usize {
        self.nodes().into_iter().filter(|node| node.is_leaf()).count()
    }

    /// Largest stage of any node, 0 when untrained.
    pub fn depth(&self) -> usize {
        self.nodes()
            .into_iter()
            .map(TreeNode::stage)
            .max()
            .unwrap_or(0)
    }

    /// Sum of split gains per feature.
    pub fn feature_importance(&self) -> BTreeMap<String, f64> {
        let mut importance = BTreeMap::new();
        for node in self.nodes() {
            if let (Some(feature), false) = (node.split_feature(), node.children().is_empty()) {
                *importance.entry(feature.to_string()).or_insert(0.0) += node.split_gain();
            }
        }
        importance
    }

    /// Validates the tree structure consistency.
    pub fn validate(&self) -> Result<()> {
        let root = self.trained_root()?;
        if root.stage() != 1 {
            return Err(Id3Error::config("root node must have stage 1"));
        }

        for node in self.nodes() {
            if node.stage() > self.config.max_depth {
                return Err(Id3Error::config(format!(
                    "node stage {} exceeds max_depth {}",
                    node.stage(),
                    self.config.max_depth
                )));
            }

            match (node.children().is_empty(), node.label()) {
                (true, Some(_)) => {}
                (false, None) => {
                    let ordered = node
                        .children()
                        .windows(2)
                        .all(|w| w[0].value() < w[1].value());
                    if !ordered {
                        return Err(Id3Error::config("children are not keyed by ascending value"));
                    }
                    for branch in node.children() {
                        if branch.node().stage() != node.stage() + 1 {
                            return Err(Id3Error::config(format!(
                                "child of stage {} node has stage {}",
                                node.stage(),
                                branch.node().stage()
                            )));
                        }
                    }
                }
                _ => {
                    return Err(Id3Error::config(format!(
                        "node at stage {} must have either children or a label",
                        node.stage()
                    )))
                }
            }
        }

        Ok(())
    }

    /// Returns a textual representation of the tree structure.
    pub fn to_string_representation(&self) -> String {
        let root = match &self.root {
            Some(root) => root,
            None => return "Empty tree".to_string(),
        };

        let mut result = String::new();
        let mut stack = WorkStack::new();
        stack.push((root, None, String::new(), true));

        while let Some((node, edge, prefix, is_last)) = stack.pop() {
            let connector = if is_last { "└── " } else { "├── " };
            match edge {
                Some(value) => result.push_str(&format!(
                    "{}{}[{}] {}\n",
                    prefix, connector, value, node
                )),
                None => result.push_str(&format!("{}{}\n", prefix, node)),
            }

            let child_prefix = match edge {
                Some(_) => format!("{}{}", prefix, if is_last { "    " } else { "│   " }),
                None => prefix,
            };
            let count = node.children().len();
            for (i, branch) in node.children().iter().enumerate().rev() {
                stack.push((
                    branch.node(),
                    Some(branch.value()),
                    child_prefix.clone(),
                    i + 1 == count,
                ));
            }
        }

        result
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DecisionTree(state={}, nodes={}, leaves={}, depth={}, max_depth={})",
            self.state,
            self.num_nodes(),
            self.num_leaves(),
            self.depth(),
            self.config.max_depth
        )
    }
}
