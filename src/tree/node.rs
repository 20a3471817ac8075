//! Tree node implementation for the ID3 engine.
//!
//! A node starts untrained. One call to [`TreeNode::advance_training`] turns
//! it into either a leaf carrying a label or an internal node owning one
//! child per value of its split feature. Children are keyed by the split
//! value they were trained on, so prediction routes rows by value and never
//! by position.

use crate::core::constants::GAIN_TOLERANCE;
use crate::core::error::{Id3Error, Result};
use crate::core::types::{CategoryValue, Stage};
use crate::dataset::Subset;
use crate::tree::information_gain::InformationGain;
use log::{debug, trace};
use std::fmt;

/// A child node together with the split value that leads to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    value: CategoryValue,
    node: TreeNode,
}

impl Branch {
    /// The split value routed to this child
    pub fn value(&self) -> CategoryValue {
        self.value
    }

    /// The child node
    pub fn node(&self) -> &TreeNode {
        &self.node
    }
}

/// Decision tree vertex.
///
/// Once trained, a node has either non-empty children and no label, or no
/// children and a label.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Distance from the root; the root has stage 1
    stage: Stage,
    /// Scoring routines bound to the target column
    calculator: InformationGain,
    /// Feature this node splits on (internal nodes only)
    split_feature: Option<String>,
    /// Information gain of the chosen split
    split_gain: f64,
    /// Children in ascending split value order
    children: Vec<Branch>,
    /// Predicted class (leaf nodes only)
    label: Option<CategoryValue>,
    /// Majority class of the training rows that reached this node
    fallback_label: Option<CategoryValue>,
    /// Number of training rows that reached this node
    data_count: usize,
}

impl TreeNode {
    /// Creates an untrained node at the given stage.
    pub fn new<S: Into<String>>(stage: Stage, target_column: S) -> Self {
        TreeNode {
            stage,
            calculator: InformationGain::new(target_column),
            split_feature: None,
            split_gain: 0.0,
            children: Vec::new(),
            label: None,
            fallback_label: None,
            data_count: 0,
        }
    }

    /// Creates an untrained root node.
    pub fn root<S: Into<String>>(target_column: S) -> Self {
        Self::new(1, target_column)
    }

    /// Returns the node stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the target column name.
    pub fn target_column(&self) -> &str {
        self.calculator.target_column()
    }

    /// Returns the split feature, if this node splits.
    pub fn split_feature(&self) -> Option<&str> {
        self.split_feature.as_deref()
    }

    /// Returns the information gain of the split.
    pub fn split_gain(&self) -> f64 {
        self.split_gain
    }

    /// Returns the children in ascending split value order.
    pub fn children(&self) -> &[Branch] {
        &self.children
    }

    /// Returns the leaf label.
    pub fn label(&self) -> Option<CategoryValue> {
        self.label
    }

    /// Returns the majority class seen during training.
    pub fn fallback_label(&self) -> Option<CategoryValue> {
        self.fallback_label
    }

    /// Returns the number of training rows that reached this node.
    pub fn data_count(&self) -> usize {
        self.data_count
    }

    /// Checks if this node is a finalized leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.label.is_some()
    }

    /// Checks if training has already processed this node.
    pub fn is_trained(&self) -> bool {
        self.label.is_some() || !self.children.is_empty()
    }

    /// The child trained on `value`, if any.
    pub fn child_for(&self, value: CategoryValue) -> Option<&TreeNode> {
        self.children
            .binary_search_by_key(&value, |branch| branch.value)
            .ok()
            .map(|i| &self.children[i].node)
    }

    /// Picks the candidate feature with the highest information gain and
    /// records it as the split feature.
    ///
    /// Ties go to the earliest candidate that varies in `subset`. Candidates
    /// that take a single value cannot partition the rows and are skipped
    /// before the comparison, so an earlier constant column never wins a tie.
    /// When every varying candidate has zero gain the first of them is still
    /// chosen, even if a constant column precedes it. The split feature stays
    /// unset only when no candidate varies.
    pub fn choose_split_feature(
        &mut self,
        subset: &Subset<'_>,
        candidate_features: &[String],
    ) -> Result<Option<&str>> {
        let target = self.calculator.target_column();
        let dataset = subset.dataset();

        for candidate in candidate_features {
            if candidate == target {
                return Err(Id3Error::invalid_input(format!(
                    "target column '{}' cannot be a split candidate",
                    candidate
                )));
            }
            if !dataset.has_column(candidate) {
                return Err(Id3Error::invalid_input(format!(
                    "split candidate '{}' is not a dataset column",
                    candidate
                )));
            }
        }

        let mut best: Option<(&String, f64)> = None;
        for candidate in candidate_features {
            if self.calculator.distinct_count(subset, candidate)? < 2 {
                continue;
            }

            let gain = self.calculator.information_gain(subset, candidate)?;
            trace!("stage {} candidate '{}' gain {:.6}", self.stage, candidate, gain);

            let better = match best {
                None => true,
                Some((_, best_gain)) => gain > best_gain + GAIN_TOLERANCE,
            };
            if better {
                best = Some((candidate, gain));
            }
        }

        match best {
            Some((feature, gain)) => {
                self.split_feature = Some(feature.clone());
                self.split_gain = gain;
            }
            None => {
                self.split_feature = None;
                self.split_gain = 0.0;
            }
        }

        Ok(self.split_feature.as_deref())
    }

    /// Turns this node into a leaf labelled with the majority class.
    pub fn finalize_as_leaf(&mut self, subset: &Subset<'_>) -> Result<()> {
        let label = self
            .calculator
            .majority_value(subset, self.calculator.target_column())?;
        self.split_feature = None;
        self.split_gain = 0.0;
        self.children.clear();
        self.label = Some(label);
        Ok(())
    }

    /// Performs one training step on the rows that reached this node.
    ///
    /// Returns the new children paired with their training rows when the
    /// node splits, or `None` when it became a leaf.
    pub fn advance_training<'d>(
        &mut self,
        subset: &Subset<'d>,
        epsilon: f64,
        max_depth: usize,
    ) -> Result<Option<Vec<(&mut TreeNode, Subset<'d>)>>> {
        if self.is_trained() {
            return Err(Id3Error::config(format!(
                "node at stage {} was already trained",
                self.stage
            )));
        }

        let loss = self.calculator.entropy(subset)?;
        let target = self.calculator.target_column().to_string();
        self.fallback_label = Some(self.calculator.majority_value(subset, &target)?);
        self.data_count = subset.len();

        if loss >= epsilon && self.stage < max_depth {
            let candidates = subset.dataset().feature_names(&target)?;
            self.choose_split_feature(subset, &candidates)?;
        }

        let feature = match self.split_feature.clone() {
            Some(feature) => feature,
            None => {
                self.finalize_as_leaf(subset)?;
                trace!(
                    "stage {} leaf label {:?} over {} rows (entropy {:.4})",
                    self.stage,
                    self.label,
                    subset.len(),
                    loss
                );
                return Ok(None);
            }
        };

        let parts = self.calculator.split(subset, &feature)?;
        let fresh = self.children.len();
        for (value, _) in &parts {
            self.children.push(Branch {
                value: *value,
                node: TreeNode::new(self.stage + 1, target.as_str()),
            });
        }

        let created = self.children.len() - fresh;
        if created != parts.len() {
            return Err(Id3Error::config(format!(
                "split on '{}' produced {} partitions but {} children",
                feature,
                parts.len(),
                created
            )));
        }

        debug!(
            "stage {} split on '{}' (gain {:.4}) into {} branches",
            self.stage,
            feature,
            self.split_gain,
            parts.len()
        );

        Ok(Some(
            self.children[fresh..]
                .iter_mut()
                .zip(parts)
                .map(|(branch, (_, part))| (&mut branch.node, part))
                .collect(),
        ))
    }

    /// Performs one prediction step on the rows that reached this node.
    ///
    /// Internal nodes partition `subset` by their split feature, using only
    /// the values present in it. Leaves return `None`.
    pub fn advance_prediction<'d>(
        &self,
        subset: &Subset<'d>,
    ) -> Result<Option<Vec<(CategoryValue, Subset<'d>)>>> {
        match &self.split_feature {
            Some(feature) if !self.children.is_empty() => {
                Ok(Some(self.calculator.split(subset, feature)?))
            }
            _ => Ok(None),
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.split_feature, self.label) {
            (Some(feature), _) if !self.children.is_empty() => write!(
                f,
                "Split(stage={}, feature={}, gain={:.4}, children={})",
                self.stage,
                feature,
                self.split_gain,
                self.children.len()
            ),
            (_, Some(label)) => write!(
                f,
                "Leaf(stage={}, label={}, count={})",
                self.stage, label, self.data_count
            ),
            _ => write!(f, "Untrained(stage={})", self.stage),
        }
    }
}
