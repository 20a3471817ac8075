//! Entropy-based split scoring.
//!
//! All routines work on a [`Subset`] and never modify it. Value orderings are
//! always ascending by category code, so a split computed at training time
//! and one computed at prediction time enumerate shared values in the same
//! order.

use crate::core::error::{Id3Error, Result};
use crate::core::types::CategoryValue;
use crate::dataset::Subset;
use std::collections::BTreeMap;

/// Shannon entropy, in bits, of a class histogram.
///
/// Zero counts are ignored. Returns `0.0` for an all-zero histogram.
pub fn entropy_from_counts(counts: &[usize]) -> f64 {
    let n: usize = counts.iter().sum();
    if n == 0 {
        return 0.0;
    }

    let n = n as f64;
    let entropy = counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / n;
            -p * p.log2()
        })
        .sum::<f64>();

    // A single class sums to -0.0
    entropy.max(0.0)
}

/// Information gain calculator bound to one target column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InformationGain {
    target_column: String,
}

impl InformationGain {
    /// Create a calculator for the given target column
    pub fn new<S: Into<String>>(target_column: S) -> Self {
        InformationGain {
            target_column: target_column.into(),
        }
    }

    /// The target column name
    pub fn target_column(&self) -> &str {
        &self.target_column
    }

    /// Partition `subset` by the distinct values of `feature`.
    ///
    /// Returns one `(value, rows)` part per value present, ascending by value.
    /// Rows keep their relative order inside each part.
    pub fn split<'a>(
        &self,
        subset: &Subset<'a>,
        feature: &str,
    ) -> Result<Vec<(CategoryValue, Subset<'a>)>> {
        let column = subset.dataset().column_index(feature)?;

        let mut parts: BTreeMap<CategoryValue, Vec<usize>> = BTreeMap::new();
        for &row in subset.rows() {
            parts
                .entry(subset.dataset().value(row, column))
                .or_default()
                .push(row);
        }

        Ok(parts
            .into_iter()
            .map(|(value, rows)| (value, Subset::from_rows_unchecked(subset.dataset(), rows)))
            .collect())
    }

    /// Relative frequency of each distinct value of `column`, ascending by value.
    pub fn class_probabilities(&self, subset: &Subset<'_>, column: &str) -> Result<Vec<f64>> {
        let counts = Self::value_counts(subset, column)?;
        Self::ensure_non_empty(subset, "class probabilities")?;

        let n = subset.len() as f64;
        Ok(counts.values().map(|&c| c as f64 / n).collect())
    }

    /// Entropy of the target column over `subset`.
    pub fn entropy(&self, subset: &Subset<'_>) -> Result<f64> {
        let counts = Self::value_counts(subset, &self.target_column)?;
        Self::ensure_non_empty(subset, "entropy")?;

        let counts: Vec<usize> = counts.into_values().collect();
        Ok(entropy_from_counts(&counts))
    }

    /// Size-weighted mean entropy of the parts of `split(subset, feature)`.
    pub fn conditional_entropy(&self, subset: &Subset<'_>, feature: &str) -> Result<f64> {
        let parts = self.split(subset, feature)?;
        Self::ensure_non_empty(subset, "conditional entropy")?;

        let n = subset.len() as f64;
        let mut weighted = 0.0;
        for (_, part) in &parts {
            weighted += (part.len() as f64 / n) * self.entropy(part)?;
        }
        Ok(weighted)
    }

    /// Entropy reduction obtained by splitting `subset` on `feature`.
    pub fn information_gain(&self, subset: &Subset<'_>, feature: &str) -> Result<f64> {
        let total = self.entropy(subset)?;
        let conditional = self.conditional_entropy(subset, feature)?;
        // Clamp float noise for features that do not reduce entropy
        Ok((total - conditional).max(0.0))
    }

    /// Most frequent value of `column`; ties resolve to the smallest value.
    pub fn majority_value(&self, subset: &Subset<'_>, column: &str) -> Result<CategoryValue> {
        let counts = Self::value_counts(subset, column)?;

        let mut best: Option<(CategoryValue, usize)> = None;
        for (value, count) in counts {
            // Ascending iteration + strict comparison keeps the smallest value on ties
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((value, count));
            }
        }

        best.map(|(value, _)| value).ok_or_else(|| {
            Id3Error::empty_subset(format!("majority of column '{}' over zero rows", column))
        })
    }

    /// Number of distinct values of `column` present in `subset`.
    pub fn distinct_count(&self, subset: &Subset<'_>, column: &str) -> Result<usize> {
        Ok(Self::value_counts(subset, column)?.len())
    }

    fn value_counts(subset: &Subset<'_>, column: &str) -> Result<BTreeMap<CategoryValue, usize>> {
        let index = subset.dataset().column_index(column)?;

        let mut counts = BTreeMap::new();
        for value in subset.column_values(index) {
            *counts.entry(value).or_insert(0) += 1;
        }
        Ok(counts)
    }

    fn ensure_non_empty(subset: &Subset<'_>, what: &str) -> Result<()> {
        if subset.is_empty() {
            return Err(Id3Error::empty_subset(format!(
                "{} requested on a subset with zero rows",
                what
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use approx::assert_relative_eq;

    fn sample() -> Dataset {
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

    #[test]
    fn test_entropy_from_counts() {
        assert_eq!(entropy_from_counts(&[]), 0.0);
        assert_eq!(entropy_from_counts(&[4]), 0.0);
        assert_relative_eq!(entropy_from_counts(&[2, 2]), 1.0);
        assert_relative_eq!(entropy_from_counts(&[1, 1, 1, 1]), 2.0);
        assert_relative_eq!(entropy_from_counts(&[3, 0, 3]), 1.0);
    }

    #[test]
    fn test_split_orders_values() {
        let data = sample();
        let ig = InformationGain::new("label");
        let parts = ig.split(&data.subset(), "A").unwrap();

        let values: Vec<_> = parts.iter().map(|(v, _)| *v).collect();
        assert_eq!(values, vec![0, 1, 2]);
        assert_eq!(parts[0].1.rows(), &[1, 6, 7]);
        assert_eq!(parts[1].1.rows(), &[0, 3, 4]);
        assert_eq!(parts[2].1.rows(), &[2, 5]);
    }

    #[test]
    fn test_class_probabilities() {
        let data = sample();
        let ig = InformationGain::new("label");
        let probs = ig.class_probabilities(&data.subset(), "label").unwrap();
        assert_eq!(probs.len(), 2);
        assert_relative_eq!(probs[0], 3.0 / 8.0);
        assert_relative_eq!(probs[1], 5.0 / 8.0);
        assert_relative_eq!(probs.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn test_entropy_and_gain_values() {
        let data = sample();
        let ig = InformationGain::new("label");
        let subset = data.subset();

        let h = -(3.0f64 / 8.0) * (3.0f64 / 8.0).log2() - (5.0f64 / 8.0) * (5.0f64 / 8.0).log2();
        assert_relative_eq!(ig.entropy(&subset).unwrap(), h, epsilon = 1e-12);

        // A: {0: [1,0,0]}, {1: [0,1,1]}, {2: [1,1]}
        let h3 = -(1.0f64 / 3.0) * (1.0f64 / 3.0).log2() - (2.0f64 / 3.0) * (2.0f64 / 3.0).log2();
        let conditional = 3.0 / 8.0 * h3 + 3.0 / 8.0 * h3;
        assert_relative_eq!(
            ig.conditional_entropy(&subset, "A").unwrap(),
            conditional,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            ig.information_gain(&subset, "A").unwrap(),
            h - conditional,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_pure_subset_has_zero_entropy() {
        let data = sample();
        let ig = InformationGain::new("label");
        let pure = Subset::from_rows(&data, vec![1, 2, 3]).unwrap();
        assert_eq!(ig.entropy(&pure).unwrap(), 0.0);
    }

    #[test]
    fn test_constant_feature_has_zero_gain() {
        let data = sample();
        let ig = InformationGain::new("label");
        // Column B is 1 on these rows
        let subset = Subset::from_rows(&data, vec![0, 2, 3, 7]).unwrap();
        assert_eq!(ig.information_gain(&subset, "B").unwrap(), 0.0);
        assert_eq!(ig.distinct_count(&subset, "B").unwrap(), 1);
    }

    #[test]
    fn test_empty_subset_is_an_error() {
        let data = sample();
        let ig = InformationGain::new("label");
        let empty = Subset::from_rows(&data, vec![]).unwrap();

        assert!(matches!(ig.entropy(&empty), Err(Id3Error::EmptySubset { .. })));
        assert!(matches!(
            ig.class_probabilities(&empty, "A"),
            Err(Id3Error::EmptySubset { .. })
        ));
        assert!(matches!(
            ig.majority_value(&empty, "label"),
            Err(Id3Error::EmptySubset { .. })
        ));
        assert!(ig.split(&empty, "A").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_column() {
        let data = sample();
        let ig = InformationGain::new("class");
        assert!(matches!(
            ig.entropy(&data.subset()),
            Err(Id3Error::InvalidInput { .. })
        ));
        let ig = InformationGain::new("label");
        assert!(ig.split(&data.subset(), "Z").is_err());
    }

    #[test]
    fn test_majority_tie_prefers_smallest() {
        let data = Dataset::from_rows(
            vec!["label"],
            &[vec![3], vec![1], vec![3], vec![1], vec![2]],
        )
        .unwrap();
        let ig = InformationGain::new("label");
        assert_eq!(ig.majority_value(&data.subset(), "label").unwrap(), 1);
    }
}
