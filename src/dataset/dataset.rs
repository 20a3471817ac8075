//! Categorical dataset and row-subset views.
//!
//! A [`Dataset`] is an immutable table of encoded categorical values with
//! named columns. A [`Subset`] is a set of row indices into a dataset; the
//! tree engine partitions subsets instead of copying rows, so every split
//! yields new, disjoint views over the same backing table.

use crate::core::error::{Id3Error, Result};
use crate::core::types::{CategoryValue, DataSize};
use crate::input_error;
use ndarray::{Array2, ArrayView1, Axis};
use std::collections::HashSet;
use std::fmt;

/// Immutable table of categorical values, rows x named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    values: Array2<CategoryValue>,
}

impl Dataset {
    /// Create a dataset from column names and a row-major value matrix.
    pub fn new(columns: Vec<String>, values: Array2<CategoryValue>) -> Result<Self> {
        if columns.is_empty() {
            return Err(input_error!("dataset must have at least one column"));
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if name.is_empty() {
                return Err(input_error!("column names must not be empty"));
            }
            if !seen.insert(name.as_str()) {
                return Err(input_error!("duplicate column name '{}'", name));
            }
        }

        if values.ncols() != columns.len() {
            return Err(input_error!(
                "value matrix has {} columns but {} column names were given",
                values.ncols(),
                columns.len()
            ));
        }

        Ok(Dataset { columns, values })
    }

    /// Create a dataset from a list of rows.
    pub fn from_rows<S: Into<String>>(
        columns: Vec<S>,
        rows: &[Vec<CategoryValue>],
    ) -> Result<Self> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let width = columns.len();

        let mut flat = Vec::with_capacity(rows.len() * width);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(input_error!(
                    "row {} has {} values, expected {}",
                    i,
                    row.len(),
                    width
                ));
            }
            flat.extend_from_slice(row);
        }

        let values = Array2::from_shape_vec((rows.len(), width), flat)
            .map_err(|e| input_error!("failed to shape dataset: {}", e))?;
        Self::new(columns, values)
    }

    /// Create a dataset with the given columns and no rows.
    pub fn empty<S: Into<String>>(columns: Vec<S>) -> Result<Self> {
        Self::from_rows(columns, &[])
    }

    /// Number of rows
    pub fn num_rows(&self) -> DataSize {
        self.values.nrows()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Column names in table order
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Returns true if a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Position of the named column.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| input_error!("column '{}' not found in dataset", name))
    }

    /// All values of the named column.
    pub fn column(&self, name: &str) -> Result<ArrayView1<'_, CategoryValue>> {
        let index = self.column_index(name)?;
        Ok(self.values.column(index))
    }

    /// Values of one row in column order.
    pub fn row(&self, row: DataSize) -> Result<ArrayView1<'_, CategoryValue>> {
        if row >= self.num_rows() {
            return Err(input_error!(
                "row index {} out of bounds for {} rows",
                row,
                self.num_rows()
            ));
        }
        Ok(self.values.row(row))
    }

    /// Single cell. Panics on out-of-bounds indices like slice indexing.
    pub fn value(&self, row: DataSize, column: usize) -> CategoryValue {
        self.values[[row, column]]
    }

    /// The underlying value matrix
    pub fn values(&self) -> &Array2<CategoryValue> {
        &self.values
    }

    /// Every column except `target`, in table order. These are the candidate
    /// split features of a tree trained on this dataset.
    pub fn feature_names(&self, target: &str) -> Result<Vec<String>> {
        self.column_index(target)?;
        Ok(self
            .columns
            .iter()
            .filter(|c| c.as_str() != target)
            .cloned()
            .collect())
    }

    /// Copy the given rows, in the given order, into a new dataset.
    pub fn select_rows(&self, rows: &[DataSize]) -> Result<Dataset> {
        if let Some(&bad) = rows.iter().find(|&&r| r >= self.num_rows()) {
            return Err(input_error!(
                "row index {} out of bounds for {} rows",
                bad,
                self.num_rows()
            ));
        }
        Ok(Dataset {
            columns: self.columns.clone(),
            values: self.values.select(Axis(0), rows),
        })
    }

    /// A subset covering every row.
    pub fn subset(&self) -> Subset<'_> {
        Subset::full(self)
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dataset({} rows x {} columns: {})",
            self.num_rows(),
            self.num_columns(),
            self.columns.join(", ")
        )
    }
}

/// Rows of a dataset that reached a particular tree node.
#[derive(Debug, Clone)]
pub struct Subset<'a> {
    dataset: &'a Dataset,
    rows: Vec<DataSize>,
}

impl<'a> Subset<'a> {
    /// Every row of `dataset`, in table order.
    pub fn full(dataset: &'a Dataset) -> Self {
        Subset {
            dataset,
            rows: (0..dataset.num_rows()).collect(),
        }
    }

    /// An explicit list of rows of `dataset`.
    pub fn from_rows(dataset: &'a Dataset, rows: Vec<DataSize>) -> Result<Self> {
        if let Some(&bad) = rows.iter().find(|&&r| r >= dataset.num_rows()) {
            return Err(Id3Error::invalid_input(format!(
                "row index {} out of bounds for {} rows",
                bad,
                dataset.num_rows()
            )));
        }
        Ok(Subset { dataset, rows })
    }

    pub(crate) fn from_rows_unchecked(dataset: &'a Dataset, rows: Vec<DataSize>) -> Self {
        Subset { dataset, rows }
    }

    /// The backing dataset
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Row indices into the backing dataset
    pub fn rows(&self) -> &[DataSize] {
        &self.rows
    }

    /// Number of rows in the subset
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the subset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of column `column` (by position) for every row of the subset.
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = CategoryValue> + '_ {
        self.rows.iter().map(move |&r| self.dataset.value(r, column))
    }

    /// Values of the named column for every row of the subset.
    pub fn values_of(&self, name: &str) -> Result<Vec<CategoryValue>> {
        let column = self.dataset.column_index(name)?;
        Ok(self.column_values(column).collect())
    }

    /// Materialize the subset into a standalone dataset.
    pub fn to_dataset(&self) -> Dataset {
        Dataset {
            columns: self.dataset.columns.clone(),
            values: self.dataset.values.select(Axis(0), &self.rows),
        }
    }
}

impl PartialEq for Subset<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.dataset, other.dataset) && self.rows == other.rows
    }
}
